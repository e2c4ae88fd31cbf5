pub mod state;

use self::state::{create_state, FilterChange, ProductListController};
use crate::domain::a003_product::ui::details::ProductDetails;
use crate::shared::dialogs::BrowserDialogs;
use crate::shared::form_controller::FormCallbacks;
use crate::shared::format::{format_cop, format_date};
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::state::{FormSlot, ListView, SEARCH_DEBOUNCE_MS};
use futures::FutureExt;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

#[component]
pub fn ProductList() -> impl IntoView {
    let state = create_state();
    let controller = StoredValue::new_local(ProductListController::new(
        state,
        ApiClient::browser(),
        Rc::new(BrowserDialogs),
    ));

    Effect::new(move |_| {
        let c = controller.get_value();
        spawn_local(async move { c.mount().await });
    });

    let change_filter = move |change: FilterChange| {
        let c = controller.get_value();
        spawn_local(async move { c.change_filter(change).await });
    };

    // Keystrokes go through the debounce; only the last one in a burst loads.
    let search_text = RwSignal::new(String::new());
    Effect::watch(
        move || search_text.get(),
        move |text, _, _| {
            let Some(generation) = controller.with_value(|c| c.note_search(text.clone())) else {
                return;
            };
            let c = controller.get_value();
            spawn_local(async move {
                TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
                c.commit_search(generation).await;
            });
        },
        false,
    );

    let clear_filters = move |_: ev::MouseEvent| {
        change_filter(FilterChange::Clear);
        search_text.set(String::new());
    };

    let callbacks = StoredValue::new_local(FormCallbacks::new(
        move || {
            let c = controller.get_value();
            async move { c.reload().await }.boxed_local()
        },
        move || controller.with_value(|c| c.close_form()),
    ));

    let form_slot = Memo::new(move |_| state.with(|s| s.form.clone()));
    let view_kind = Memo::new(move |_| state.with(|s| s.list.view()));
    let selected_category = move || {
        state.with(|s| s.filter.category.map(|c| c.to_string()).unwrap_or_default())
    };

    view! {
        <div class="producto-list-container">
            <div class="list-header">
                <h1>"Gestión de Productos"</h1>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| controller.with_value(|c| c.open_create())
                >
                    {icon("plus")}
                    "Nuevo Producto"
                </Button>
            </div>

            <div class="filters">
                <Flex gap=FlexGap::Medium align=FlexAlign::Center>
                    <select
                        class="filter-select"
                        prop:value=selected_category
                        on:change=move |ev: ev::Event| {
                            let category = event_target_value(&ev).parse().ok();
                            change_filter(FilterChange::Category(category));
                        }
                    >
                        <option value="">"Todas las categorías"</option>
                        {move || {
                            state.with(|s| {
                                s.categories
                                    .iter()
                                    .map(|c| {
                                        let id = c.id.to_string();
                                        view! { <option value=id>{c.label().to_string()}</option> }
                                    })
                                    .collect_view()
                            })
                        }}
                    </select>

                    <Input value=search_text placeholder="Buscar por código o nombre..." />

                    <label class="checkbox-filter">
                        <input
                            type="checkbox"
                            prop:checked=move || state.with(|s| s.filter.include_inactive)
                            on:change=move |ev: ev::Event| {
                                change_filter(FilterChange::IncludeInactive(event_target_checked(&ev)));
                            }
                        />
                        "Mostrar inactivos"
                    </label>

                    <Button appearance=ButtonAppearance::Secondary on_click=clear_filters>
                        {icon("refresh")}
                        "Limpiar filtros"
                    </Button>
                </Flex>
            </div>

            {move || match view_kind.get() {
                ListView::Loading => view! {
                    <div class="loading">
                        <Spinner />
                        "Cargando productos..."
                    </div>
                }.into_any(),
                ListView::Empty => view! {
                    <div class="no-data">"No se encontraron productos"</div>
                }.into_any(),
                ListView::Rows => view! {
                    <div class="table-container">
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Código"</TableHeaderCell>
                                    <TableHeaderCell>"Nombre"</TableHeaderCell>
                                    <TableHeaderCell>"Categoría"</TableHeaderCell>
                                    <TableHeaderCell>"Proveedor"</TableHeaderCell>
                                    <TableHeaderCell>"Cantidad"</TableHeaderCell>
                                    <TableHeaderCell>"Precio"</TableHeaderCell>
                                    <TableHeaderCell>"Estado"</TableHeaderCell>
                                    <TableHeaderCell>"Creado"</TableHeaderCell>
                                    <TableHeaderCell>"Acciones"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || state.with(|s| s.list.items().to_vec())
                                    key=|p| (p.id, p.quantity, p.active, p.name.clone(), p.category_name.clone(), p.unit_price.to_bits())
                                    children=move |product| {
                                        let id = product.id;
                                        let name = product.name.clone();
                                        let active = product.active;
                                        let low_stock = product.is_low_stock();
                                        let row_class = if low_stock { "low-stock" } else { "" };
                                        view! {
                                            <TableRow class=row_class>
                                                <TableCell>{product.code.clone()}</TableCell>
                                                <TableCell>{product.name.clone()}</TableCell>
                                                <TableCell>{product.category_name.clone()}</TableCell>
                                                <TableCell>{product.supplier_name.clone()}</TableCell>
                                                <TableCell>
                                                    <span class=if low_stock { "cantidad-baja" } else { "" }>
                                                        {product.quantity}
                                                    </span>
                                                </TableCell>
                                                <TableCell>{format_cop(product.unit_price)}</TableCell>
                                                <TableCell>
                                                    {if active {
                                                        view! {
                                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Activo"</Badge>
                                                        }.into_any()
                                                    } else {
                                                        view! {
                                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"Inactivo"</Badge>
                                                        }.into_any()
                                                    }}
                                                </TableCell>
                                                <TableCell>{format_date(&product.created_at)}</TableCell>
                                                <TableCell>
                                                    <div class="actions">
                                                        <button
                                                            class="btn-accion btn-editar"
                                                            title="Editar"
                                                            on:click=move |_| {
                                                                let c = controller.get_value();
                                                                spawn_local(async move { c.open_edit(id).await });
                                                            }
                                                        >
                                                            {icon("edit")}
                                                        </button>
                                                        <button
                                                            class=if active { "btn-accion btn-eliminar" } else { "btn-accion btn-activar" }
                                                            title=if active { "Desactivar" } else { "Activar" }
                                                            on:click=move |_| {
                                                                let c = controller.get_value();
                                                                let name = name.clone();
                                                                spawn_local(async move {
                                                                    if active {
                                                                        c.deactivate(id, &name).await
                                                                    } else {
                                                                        c.activate(id, &name).await
                                                                    }
                                                                });
                                                            }
                                                        >
                                                            {if active { icon("trash") } else { icon("check") }}
                                                        </button>
                                                    </div>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }
                                />
                            </TableBody>
                        </Table>
                    </div>
                }.into_any(),
            }}

            {move || match form_slot.get() {
                FormSlot::Closed => None,
                FormSlot::Create => Some(view! {
                    <ProductDetails product=None callbacks=callbacks.get_value() />
                }.into_any()),
                FormSlot::Edit(product) => Some(view! {
                    <ProductDetails product=Some(product) callbacks=callbacks.get_value() />
                }.into_any()),
            }}
        </div>
    }
}
