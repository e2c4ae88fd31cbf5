use super::view_model::{initial_state, ProductFormController, ReferenceData};
use crate::shared::dialogs::BrowserDialogs;
use crate::shared::form_controller::FormCallbacks;
use crate::shared::form_field::{field_error, input_class};
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::state::FieldValue;
use contracts::domain::a003_product::aggregate::fields;
use contracts::domain::a003_product::Product;
use contracts::shared::field_errors::NON_FIELD_ERRORS;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

fn selected(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

#[component]
pub fn ProductDetails(product: Option<Product>, callbacks: FormCallbacks) -> impl IntoView {
    let state = RwSignal::new(initial_state(product.as_ref()));
    let refs = RwSignal::new(ReferenceData::default());
    let controller = StoredValue::new_local(ProductFormController::new(
        state,
        refs,
        ApiClient::browser(),
        Rc::new(BrowserDialogs),
        callbacks,
    ));

    Effect::new(move |_| {
        let c = controller.get_value();
        spawn_local(async move { c.load_reference_data().await });
    });

    let is_edit = state.with_untracked(|s| s.is_edit());
    let title = Signal::derive(move || {
        if is_edit {
            "Editar Producto".to_string()
        } else {
            "Nuevo Producto".to_string()
        }
    });

    let on_text = move |field: &'static str| {
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            controller.with_value(|c| c.change(field, FieldValue::Text(value)));
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let c = controller.get_value();
        spawn_local(async move {
            c.submit().await;
        });
    };

    view! {
        <Modal title=title on_close=Callback::new(move |_| controller.get_value().cancel())>
            <form class="producto-form" on:submit=on_submit>
                {move || {
                    state
                        .with(|s| s.error(NON_FIELD_ERRORS).map(str::to_string))
                        .map(|msg| view! { <div class="form-error">{msg}</div> })
                }}

                <div class="form-row">
                    <div class="form-group">
                        <label>"Código *"</label>
                        <input
                            type="text"
                            class=input_class(state, fields::CODE)
                            disabled=is_edit
                            prop:value=move || state.with(|s| s.draft().code.clone())
                            on:input=on_text(fields::CODE)
                        />
                        {field_error(state, fields::CODE)}
                    </div>

                    <div class="form-group">
                        <label>"Nombre *"</label>
                        <input
                            type="text"
                            class=input_class(state, fields::NAME)
                            prop:value=move || state.with(|s| s.draft().name.clone())
                            on:input=on_text(fields::NAME)
                        />
                        {field_error(state, fields::NAME)}
                    </div>
                </div>

                <div class="form-group">
                    <label>"Descripción *"</label>
                    <textarea
                        rows="3"
                        class=input_class(state, fields::DESCRIPTION)
                        prop:value=move || state.with(|s| s.draft().description.clone())
                        on:input=on_text(fields::DESCRIPTION)
                    />
                    {field_error(state, fields::DESCRIPTION)}
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label>"Cantidad *"</label>
                        <input
                            type="number"
                            min="0"
                            step="1"
                            class=input_class(state, fields::QUANTITY)
                            prop:value=move || state.with(|s| s.draft().quantity.clone())
                            on:input=on_text(fields::QUANTITY)
                        />
                        {field_error(state, fields::QUANTITY)}
                    </div>

                    <div class="form-group">
                        <label>"Precio Unitario *"</label>
                        <input
                            type="number"
                            min="0"
                            step="0.01"
                            class=input_class(state, fields::UNIT_PRICE)
                            prop:value=move || state.with(|s| s.draft().unit_price.clone())
                            on:input=on_text(fields::UNIT_PRICE)
                        />
                        {field_error(state, fields::UNIT_PRICE)}
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label>"Proveedor *"</label>
                        <select
                            class=input_class(state, fields::SUPPLIER)
                            prop:value=move || state.with(|s| selected(s.draft().supplier_id))
                            on:change=on_text(fields::SUPPLIER)
                        >
                            <option value="">"Seleccione un proveedor"</option>
                            {move || {
                                refs.with(|r| {
                                    r.suppliers
                                        .iter()
                                        .map(|s| {
                                            let id = s.id.to_string();
                                            let is_selected = state.with_untracked(|f| {
                                                f.draft().supplier_id == Some(s.id)
                                            });
                                            view! {
                                                <option value=id selected=is_selected>
                                                    {s.name.clone()}
                                                </option>
                                            }
                                        })
                                        .collect_view()
                                })
                            }}
                        </select>
                        {field_error(state, fields::SUPPLIER)}
                    </div>

                    <div class="form-group">
                        <label>"Categoría *"</label>
                        <select
                            class=input_class(state, fields::CATEGORY)
                            prop:value=move || state.with(|s| selected(s.draft().category_id))
                            on:change=on_text(fields::CATEGORY)
                        >
                            <option value="">"Seleccione una categoría"</option>
                            {move || {
                                refs.with(|r| {
                                    r.categories
                                        .iter()
                                        .map(|c| {
                                            let id = c.id.to_string();
                                            let is_selected = state.with_untracked(|f| {
                                                f.draft().category_id == Some(c.id)
                                            });
                                            view! {
                                                <option value=id selected=is_selected>
                                                    {c.label().to_string()}
                                                </option>
                                            }
                                        })
                                        .collect_view()
                                })
                            }}
                        </select>
                        {field_error(state, fields::CATEGORY)}
                    </div>
                </div>

                <Show when=move || is_edit>
                    <div class="form-group checkbox-group">
                        <label>
                            <input
                                type="checkbox"
                                prop:checked=move || state.with(|s| s.draft().active)
                                on:change=move |ev: ev::Event| {
                                    let on = event_target_checked(&ev);
                                    controller.with_value(|c| c.change(fields::ACTIVE, FieldValue::Flag(on)));
                                }
                            />
                            "Producto activo"
                        </label>
                    </div>
                </Show>

                <div class="form-actions">
                    <button
                        type="button"
                        class="btn-secondary"
                        on:click=move |_| controller.get_value().cancel()
                    >
                        "Cancelar"
                    </button>
                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || state.with(|s| s.is_submitting())
                    >
                        {icon("save")}
                        {move || if state.with(|s| s.is_submitting()) { "Guardando..." } else { "Guardar" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
