use super::view_model::{initial_state, SupplierFormController};
use crate::shared::dialogs::BrowserDialogs;
use crate::shared::form_controller::FormCallbacks;
use crate::shared::form_field::{field_error, input_class};
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::state::FieldValue;
use contracts::domain::a002_supplier::aggregate::fields;
use contracts::domain::a002_supplier::Supplier;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

#[component]
pub fn SupplierDetails(supplier: Option<Supplier>, callbacks: FormCallbacks) -> impl IntoView {
    let state = RwSignal::new(initial_state(supplier.as_ref()));
    let controller = StoredValue::new_local(SupplierFormController::new(
        state,
        ApiClient::browser(),
        Rc::new(BrowserDialogs),
        callbacks,
    ));

    let title = Signal::derive(move || {
        if state.with(|s| s.is_edit()) {
            "Editar Proveedor".to_string()
        } else {
            "Nuevo Proveedor".to_string()
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
            <form class="proveedor-form" on:submit=on_submit>
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

                <div class="form-group">
                    <label>"Teléfono *"</label>
                    <input
                        type="text"
                        class=input_class(state, fields::PHONE)
                        prop:value=move || state.with(|s| s.draft().phone.clone())
                        on:input=on_text(fields::PHONE)
                    />
                    {field_error(state, fields::PHONE)}
                </div>

                <div class="form-group">
                    <label>"Email *"</label>
                    <input
                        type="email"
                        class=input_class(state, fields::EMAIL)
                        prop:value=move || state.with(|s| s.draft().email.clone())
                        on:input=on_text(fields::EMAIL)
                    />
                    {field_error(state, fields::EMAIL)}
                </div>

                <div class="form-group">
                    <label>"Dirección *"</label>
                    <textarea
                        rows="3"
                        class=input_class(state, fields::ADDRESS)
                        prop:value=move || state.with(|s| s.draft().address.clone())
                        on:input=on_text(fields::ADDRESS)
                    />
                    {field_error(state, fields::ADDRESS)}
                </div>

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
