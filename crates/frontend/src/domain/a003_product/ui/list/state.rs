use contracts::domain::a001_category::{Category, CategoryId};
use contracts::domain::a003_product::{Product, ProductFilter, ProductId, ProductListItem};
use leptos::prelude::*;
use std::rc::Rc;

use crate::domain::a001_category::api as category_api;
use crate::domain::a003_product::api;
use crate::shared::dialogs::Dialogs;
use crate::shared::http::ApiClient;
use crate::shared::state::{Debounce, FormSlot, ListState, LoadOutcome, StateCell};

pub const LOAD_FAILED: &str = "Error al cargar productos";
pub const LOAD_PRODUCT_FAILED: &str = "Error al cargar el producto";
pub const DEACTIVATE_FAILED: &str = "Error al eliminar producto";
pub const ACTIVATE_FAILED: &str = "Error al activar producto";

pub fn deactivate_prompt(name: &str) -> String {
    format!("¿Está seguro de desactivar el producto \"{}\"?", name)
}

pub fn activate_prompt(name: &str) -> String {
    format!("¿Está seguro de activar el producto \"{}\"?", name)
}

/// One user edit of the filter bar.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Category(Option<CategoryId>),
    Search(String),
    IncludeInactive(bool),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListState {
    pub list: ListState<ProductListItem>,
    pub filter: ProductFilter,
    /// Search box text; reaches `filter` only through the debounce.
    pub search_input: String,
    pub search: Debounce<String>,
    pub categories: Vec<Category>,
    pub form: FormSlot<Product>,
}

impl ProductListState {
    /// Replaces the filter; returns whether it actually changed.
    pub fn apply(&mut self, change: FilterChange) -> bool {
        let before = self.filter.clone();
        self.filter = match change {
            FilterChange::Category(category) => before.clone().with_category(category),
            FilterChange::Search(text) => before.clone().with_search(&text),
            FilterChange::IncludeInactive(include) => before.clone().with_include_inactive(include),
            FilterChange::Clear => {
                self.search_input.clear();
                self.search.cancel();
                ProductFilter::default()
            }
        };
        self.filter != before
    }
}

pub fn create_state() -> RwSignal<ProductListState> {
    RwSignal::new(ProductListState::default())
}

/// Product list screen: filter-driven loads and row actions.
pub struct ProductListController<C, D> {
    state: C,
    client: ApiClient,
    dialogs: Rc<D>,
}

impl<C: Clone, D> Clone for ProductListController<C, D> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            client: self.client.clone(),
            dialogs: self.dialogs.clone(),
        }
    }
}

impl<C, D> ProductListController<C, D>
where
    C: StateCell<ProductListState>,
    D: Dialogs,
{
    pub fn new(state: C, client: ApiClient, dialogs: Rc<D>) -> Self {
        Self {
            state,
            client,
            dialogs,
        }
    }

    pub async fn mount(&self) {
        futures::join!(self.load_categories(), self.reload());
    }

    /// Category filter options. Failure only costs the options.
    pub async fn load_categories(&self) {
        match category_api::list(&self.client).await {
            Ok(categories) => {
                self.state.modify(|s| s.categories = categories);
            }
            Err(e) => log::error!("Error cargando categorías: {}", e),
        }
    }

    /// Loads with the current filter. A response that arrives after a newer
    /// load was issued is dropped.
    pub async fn reload(&self) {
        let Some((ticket, filter)) = self
            .state
            .modify(|s| (s.list.begin_load(), s.filter.clone()))
        else {
            return;
        };
        let result = api::list(&self.client, &filter).await;
        let failed = result.is_err();
        let outcome = self
            .state
            .modify(|s| s.list.finish(ticket, result.map_err(|e| e.to_string())));
        if failed && outcome == Some(LoadOutcome::Applied) {
            self.dialogs.alert(LOAD_FAILED);
        }
    }

    pub async fn change_filter(&self, change: FilterChange) {
        if self.state.modify(|s| s.apply(change)).unwrap_or(false) {
            self.reload().await;
        }
    }

    /// Records a keystroke. The returned generation is handed back to
    /// [`Self::commit_search`] once the debounce delay has passed.
    pub fn note_search(&self, text: String) -> Option<u64> {
        self.state.modify(|s| {
            s.search_input = text.clone();
            s.search.push(text)
        })
    }

    /// Applies the search text if no newer keystroke arrived meanwhile.
    pub async fn commit_search(&self, generation: u64) {
        let pending = self.state.modify(|s| s.search.take(generation)).flatten();
        if let Some(text) = pending {
            self.change_filter(FilterChange::Search(text)).await;
        }
    }

    pub fn open_create(&self) {
        self.state.modify(|s| s.form = FormSlot::Create);
    }

    /// List rows lack the description and reference ids, so the full
    /// product is fetched first.
    pub async fn open_edit(&self, id: ProductId) {
        match api::get(&self.client, id).await {
            Ok(product) => {
                self.state.modify(|s| s.form = FormSlot::Edit(product));
            }
            Err(e) => {
                log::error!("Error cargando producto: {}", e);
                self.dialogs.alert(LOAD_PRODUCT_FAILED);
            }
        }
    }

    pub fn close_form(&self) {
        self.state.modify(|s| s.form = FormSlot::Closed);
    }

    /// Soft delete after confirmation, then a full reload.
    pub async fn deactivate(&self, id: ProductId, name: &str) {
        if !self.dialogs.confirm(&deactivate_prompt(name)) {
            return;
        }
        match api::soft_delete(&self.client, id).await {
            Ok(()) => self.reload().await,
            Err(e) => {
                log::error!("Error eliminando producto: {}", e);
                self.dialogs.alert(DEACTIVATE_FAILED);
            }
        }
    }

    pub async fn activate(&self, id: ProductId, name: &str) {
        if !self.dialogs.confirm(&activate_prompt(name)) {
            return;
        }
        match api::activate(&self.client, id).await {
            Ok(()) => self.reload().await,
            Err(e) => {
                log::error!("Error activando producto: {}", e);
                self.dialogs.alert(ACTIVATE_FAILED);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_product::ui::details::view_model::{
        initial_state, ProductFormController, ReferenceData,
    };
    use crate::shared::dialogs::ScriptedDialogs;
    use crate::shared::form_controller::{FormCallbacks, SubmitOutcome};
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::Method;
    use crate::shared::state::{FieldValue, ListView, LoadStatus};
    use contracts::domain::a003_product::aggregate::fields;
    use futures::FutureExt;
    use serde_json::{json, Value};
    use std::cell::RefCell;

    type Cell = Rc<RefCell<ProductListState>>;
    type Controller = ProductListController<Cell, ScriptedDialogs>;

    fn setup(dialogs: ScriptedDialogs) -> (MockTransport, Cell, Rc<ScriptedDialogs>, Controller) {
        let mock = MockTransport::new();
        let state = Rc::new(RefCell::new(ProductListState::default()));
        let dialogs = Rc::new(dialogs);
        let controller = ProductListController::new(state.clone(), mock.client(), dialogs.clone());
        (mock, state, dialogs, controller)
    }

    fn row(id: i64, name: &str, quantity: i64) -> Value {
        json!({
            "id": id, "codigo": format!("MED-{:03}", id), "nombre": name,
            "cantidad": quantity, "precio_unidad": "1500.00",
            "proveedor_nombre": "Central", "categoria_nombre": "Analgésicos",
            "activo": true, "fecha_creacion": "2026-01-05T10:00:00Z"
        })
    }

    fn detail(id: i64) -> Value {
        json!({
            "id": id, "codigo": format!("MED-{:03}", id), "nombre": "Ibuprofeno",
            "descripcion": "400mg", "cantidad": 3, "precio_unidad": "1500.00",
            "proveedor": 1, "proveedor_nombre": "Central",
            "categoria": 2, "categoria_nombre": "Analgésicos",
            "activo": true, "fecha_creacion": "2026-01-05T10:00:00Z",
            "fecha_actualizacion": null
        })
    }

    #[tokio::test]
    async fn test_mount_loads_categories_and_products() {
        let (mock, state, _, controller) = setup(ScriptedDialogs::accepting());
        mock.respond(
            Method::Get,
            "/categorias/",
            200,
            json!([{"id": 2, "nombre": "ANALGESICOS", "nombre_display": "Analgésicos"}]),
        );
        mock.respond(Method::Get, "/productos/", 200, json!([row(1, "Ibuprofeno", 3)]));

        controller.mount().await;
        let s = state.borrow();
        assert_eq!(s.categories.len(), 1);
        assert_eq!(s.list.view(), ListView::Rows);
        assert!(s.list.items()[0].is_low_stock());
        assert_eq!(mock.calls(), vec!["GET /categorias/", "GET /productos/"]);
    }

    #[tokio::test]
    async fn test_envelope_and_bare_render_identically() {
        let (mock, state, _, controller) = setup(ScriptedDialogs::accepting());
        mock.respond(
            Method::Get,
            "/productos/",
            200,
            json!({"count": 1, "next": null, "previous": null, "results": [row(1, "A", 20)]}),
        );
        mock.respond(Method::Get, "/productos/", 200, json!([row(1, "A", 20)]));

        controller.reload().await;
        let first = state.borrow().list.clone();
        controller.reload().await;
        assert_eq!(first.items(), state.borrow().list.items());
    }

    #[tokio::test]
    async fn test_failed_load_alerts_once() {
        let (mock, state, dialogs, controller) = setup(ScriptedDialogs::accepting());
        mock.fail(Method::Get, "/productos/", "offline");

        controller.reload().await;
        assert_eq!(dialogs.alerts(), vec![LOAD_FAILED]);
        let s = state.borrow();
        assert!(matches!(s.list.status(), LoadStatus::Failed(_)));
        assert_eq!(s.list.view(), ListView::Empty);
    }

    #[tokio::test]
    async fn test_filter_change_reloads_with_query() {
        let (mock, _, _, controller) = setup(ScriptedDialogs::accepting());
        mock.respond(Method::Get, "/productos/", 200, json!([]));

        controller.change_filter(FilterChange::Category(Some(2))).await;
        controller.change_filter(FilterChange::IncludeInactive(true)).await;
        controller.change_filter(FilterChange::IncludeInactive(true)).await;
        controller.change_filter(FilterChange::Clear).await;
        assert_eq!(
            mock.calls(),
            vec![
                "GET /productos/?categoria=2",
                "GET /productos/?categoria=2&mostrar_inactivos=true",
                "GET /productos/",
            ]
        );
    }

    #[tokio::test]
    async fn test_search_is_debounced() {
        let (mock, state, _, controller) = setup(ScriptedDialogs::accepting());
        mock.respond(Method::Get, "/productos/", 200, json!([]));

        let g1 = controller.note_search("i".into()).unwrap();
        let g2 = controller.note_search("ib".into()).unwrap();
        let g3 = controller.note_search("ibu".into()).unwrap();
        assert_eq!(state.borrow().search_input, "ibu");

        controller.commit_search(g1).await;
        controller.commit_search(g2).await;
        assert!(mock.calls().is_empty());

        controller.commit_search(g3).await;
        assert_eq!(mock.calls(), vec!["GET /productos/?search=ibu"]);
    }

    #[tokio::test]
    async fn test_clear_drops_pending_search() {
        let (mock, state, _, controller) = setup(ScriptedDialogs::accepting());
        mock.respond(Method::Get, "/productos/", 200, json!([]));

        let g = controller.note_search("ibu".into()).unwrap();
        controller.change_filter(FilterChange::Clear).await;
        controller.commit_search(g).await;
        assert!(mock.calls().is_empty());
        assert!(state.borrow().search_input.is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_is_dropped() {
        let (_, state, _, _) = setup(ScriptedDialogs::accepting());
        let older = state.borrow_mut().list.begin_load();
        let newer = state.borrow_mut().list.begin_load();

        let item: ProductListItem = serde_json::from_value(row(2, "Nuevo", 50)).unwrap();
        let stale: ProductListItem = serde_json::from_value(row(1, "Viejo", 50)).unwrap();
        state.borrow_mut().list.finish(newer, Ok(vec![item.clone()]));
        let outcome = state.borrow_mut().list.finish(older, Ok(vec![stale]));

        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(state.borrow().list.items(), &[item]);
    }

    #[tokio::test]
    async fn test_confirmed_deactivate_then_reload() {
        let (mock, _, dialogs, controller) = setup(ScriptedDialogs::accepting());
        mock.respond(Method::Post, "/productos/7/eliminar/", 200, json!({"mensaje": "ok"}));
        mock.respond(Method::Get, "/productos/", 200, json!([]));

        controller.deactivate(7, "Ibuprofeno").await;
        assert_eq!(dialogs.confirms(), vec![deactivate_prompt("Ibuprofeno")]);
        assert_eq!(mock.calls(), vec!["POST /productos/7/eliminar/", "GET /productos/"]);
    }

    #[tokio::test]
    async fn test_declined_deactivate_sends_nothing() {
        let (mock, _, dialogs, controller) = setup(ScriptedDialogs::declining());
        controller.deactivate(7, "Ibuprofeno").await;
        controller.activate(7, "Ibuprofeno").await;
        assert!(mock.calls().is_empty());
        assert_eq!(dialogs.confirms().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_activate_leaves_state() {
        let (mock, state, dialogs, controller) = setup(ScriptedDialogs::accepting());
        mock.respond(Method::Post, "/productos/7/activar/", 404, json!({"detail": "No encontrado."}));
        let before = state.borrow().clone();

        controller.activate(7, "Ibuprofeno").await;
        assert_eq!(dialogs.alerts(), vec![ACTIVATE_FAILED]);
        assert_eq!(mock.calls(), vec!["POST /productos/7/activar/"]);
        assert_eq!(*state.borrow(), before);
    }

    #[tokio::test]
    async fn test_open_edit_fetches_full_product() {
        let (mock, state, _, controller) = setup(ScriptedDialogs::accepting());
        mock.respond(Method::Get, "/productos/5/", 200, detail(5));

        controller.open_edit(5).await;
        let s = state.borrow();
        let product = s.form.entity().unwrap();
        assert_eq!(product.description, "400mg");
        assert_eq!(product.category_id, 2);
    }

    #[tokio::test]
    async fn test_open_edit_failure_keeps_form_closed() {
        let (_, state, dialogs, controller) = setup(ScriptedDialogs::accepting());
        controller.open_edit(5).await;
        assert_eq!(state.borrow().form, FormSlot::Closed);
        assert_eq!(dialogs.alerts(), vec![LOAD_PRODUCT_FAILED]);
    }

    /// Form saved from the list: one create, then one list reload.
    #[tokio::test]
    async fn test_create_then_single_reload() {
        let (mock, state, _, list) = setup(ScriptedDialogs::accepting());
        mock.respond(Method::Post, "/productos/", 201, detail(8));
        mock.respond(Method::Get, "/productos/", 200, json!([row(8, "Nuevo", 40)]));
        list.open_create();

        let callbacks = {
            let on_saved = list.clone();
            let on_close = list.clone();
            FormCallbacks::new(
                move || {
                    let c = on_saved.clone();
                    async move { c.reload().await }.boxed_local()
                },
                move || on_close.close_form(),
            )
        };
        let form = ProductFormController::new(
            Rc::new(RefCell::new(initial_state(None))),
            Rc::new(RefCell::new(ReferenceData::default())),
            mock.client(),
            Rc::new(ScriptedDialogs::accepting()),
            callbacks,
        );
        for (field, value) in [
            (fields::CODE, "MED-008"),
            (fields::NAME, "Nuevo"),
            (fields::DESCRIPTION, "x"),
            (fields::QUANTITY, "40"),
            (fields::UNIT_PRICE, "1500"),
            (fields::SUPPLIER, "1"),
            (fields::CATEGORY, "2"),
        ] {
            form.change(field, FieldValue::Text(value.into()));
        }

        assert_eq!(form.submit().await, SubmitOutcome::Saved);
        assert_eq!(mock.calls(), vec!["POST /productos/", "GET /productos/"]);
        let s = state.borrow();
        assert_eq!(s.form, FormSlot::Closed);
        assert_eq!(s.list.items().len(), 1);
    }
}
