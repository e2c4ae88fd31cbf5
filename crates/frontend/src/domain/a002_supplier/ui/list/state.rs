use contracts::domain::a002_supplier::{Supplier, SupplierId};
use leptos::prelude::*;
use std::rc::Rc;

use crate::domain::a002_supplier::api;
use crate::shared::dialogs::Dialogs;
use crate::shared::http::ApiClient;
use crate::shared::state::{FormSlot, ListState, LoadOutcome, StateCell};

pub const LOAD_FAILED: &str = "Error al cargar proveedores";
pub const DELETE_FAILED: &str = "Error al eliminar proveedor. Puede tener productos asociados.";

pub fn delete_prompt(name: &str) -> String {
    format!("¿Está seguro de eliminar el proveedor \"{}\"?", name)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierListState {
    pub list: ListState<Supplier>,
    pub form: FormSlot<Supplier>,
}

pub fn create_state() -> RwSignal<SupplierListState> {
    RwSignal::new(SupplierListState::default())
}

/// Loads the supplier list once on mount and after every mutation.
pub struct SupplierListController<C, D> {
    state: C,
    client: ApiClient,
    dialogs: Rc<D>,
}

impl<C: Clone, D> Clone for SupplierListController<C, D> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            client: self.client.clone(),
            dialogs: self.dialogs.clone(),
        }
    }
}

impl<C, D> SupplierListController<C, D>
where
    C: StateCell<SupplierListState>,
    D: Dialogs,
{
    pub fn new(state: C, client: ApiClient, dialogs: Rc<D>) -> Self {
        Self {
            state,
            client,
            dialogs,
        }
    }

    pub async fn reload(&self) {
        let Some(ticket) = self.state.modify(|s| s.list.begin_load()) else {
            return;
        };
        let result = api::list(&self.client).await;
        let failed = result.is_err();
        let outcome = self
            .state
            .modify(|s| s.list.finish(ticket, result.map_err(|e| e.to_string())));
        if failed && outcome == Some(LoadOutcome::Applied) {
            self.dialogs.alert(LOAD_FAILED);
        }
    }

    /// Asks first; the list is reloaded only after a successful delete.
    pub async fn delete(&self, id: SupplierId, name: &str) {
        if !self.dialogs.confirm(&delete_prompt(name)) {
            return;
        }
        match api::delete(&self.client, id).await {
            Ok(()) => self.reload().await,
            Err(e) => {
                log::error!("Error eliminando proveedor: {}", e);
                self.dialogs.alert(DELETE_FAILED);
            }
        }
    }

    pub fn open_create(&self) {
        self.state.modify(|s| s.form = FormSlot::Create);
    }

    pub fn open_edit(&self, supplier: Supplier) {
        self.state.modify(|s| s.form = FormSlot::Edit(supplier));
    }

    pub fn close_form(&self) {
        self.state.modify(|s| s.form = FormSlot::Closed);
    }
}
