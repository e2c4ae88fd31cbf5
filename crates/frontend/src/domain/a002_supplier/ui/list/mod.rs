pub mod state;

use self::state::{create_state, SupplierListController};
use crate::domain::a002_supplier::ui::details::SupplierDetails;
use crate::shared::dialogs::BrowserDialogs;
use crate::shared::form_controller::FormCallbacks;
use crate::shared::format::format_date;
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::state::{FormSlot, ListView};
use futures::FutureExt;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

#[component]
pub fn SupplierList() -> impl IntoView {
    let state = create_state();
    let controller = StoredValue::new_local(SupplierListController::new(
        state,
        ApiClient::browser(),
        Rc::new(BrowserDialogs),
    ));

    let reload = move || {
        let c = controller.get_value();
        spawn_local(async move { c.reload().await });
    };

    // Suppliers have no filters: one load on mount.
    Effect::new(move |_| reload());

    let callbacks = StoredValue::new_local(FormCallbacks::new(
        move || {
            let c = controller.get_value();
            async move { c.reload().await }.boxed_local()
        },
        move || controller.with_value(|c| c.close_form()),
    ));

    let form_slot = Memo::new(move |_| state.with(|s| s.form.clone()));
    let view_kind = Memo::new(move |_| state.with(|s| s.list.view()));

    view! {
        <div class="proveedor-list-container">
            <div class="list-header">
                <h1>"Gestión de Proveedores"</h1>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| controller.with_value(|c| c.open_create())
                >
                    {icon("plus")}
                    "Nuevo Proveedor"
                </Button>
            </div>

            {move || match view_kind.get() {
                ListView::Loading => view! {
                    <div class="loading">
                        <Spinner />
                        "Cargando proveedores..."
                    </div>
                }.into_any(),
                ListView::Empty => view! {
                    <div class="no-data">"No hay proveedores registrados"</div>
                }.into_any(),
                ListView::Rows => view! {
                    <div class="proveedores-grid">
                        <For
                            each=move || state.with(|s| s.list.items().to_vec())
                            key=|s| (s.id, s.name.clone(), s.phone.clone(), s.email.clone(), s.address.clone())
                            children=move |supplier| {
                                let id = supplier.id;
                                let name = supplier.name.clone();
                                let for_edit = supplier.clone();
                                view! {
                                    <div class="proveedor-card">
                                        <div class="card-header">
                                            <h3>{supplier.name.clone()}</h3>
                                            <div class="card-actions">
                                                <button
                                                    class="btn-accion btn-editar"
                                                    title="Editar"
                                                    on:click=move |_| {
                                                        let s = for_edit.clone();
                                                        controller.with_value(|c| c.open_edit(s));
                                                    }
                                                >
                                                    {icon("edit")}
                                                </button>
                                                <button
                                                    class="btn-accion btn-eliminar"
                                                    title="Eliminar"
                                                    on:click=move |_| {
                                                        let c = controller.get_value();
                                                        let name = name.clone();
                                                        spawn_local(async move { c.delete(id, &name).await });
                                                    }
                                                >
                                                    {icon("trash")}
                                                </button>
                                            </div>
                                        </div>
                                        <div class="card-body">
                                            <p><strong>"Teléfono: "</strong>{supplier.phone.clone()}</p>
                                            <p><strong>"Email: "</strong>{supplier.email.clone()}</p>
                                            <p><strong>"Dirección: "</strong>{supplier.address.clone()}</p>
                                            <p class="fecha-creacion">
                                                <small>"Creado: "{format_date(&supplier.created_at)}</small>
                                            </p>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                }.into_any(),
            }}

            {move || match form_slot.get() {
                FormSlot::Closed => None,
                FormSlot::Create => Some(view! {
                    <SupplierDetails supplier=None callbacks=callbacks.get_value() />
                }.into_any()),
                FormSlot::Edit(supplier) => Some(view! {
                    <SupplierDetails supplier=Some(supplier) callbacks=callbacks.get_value() />
                }.into_any()),
            }}
        </div>
    }
}
