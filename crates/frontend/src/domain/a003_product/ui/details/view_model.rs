use contracts::domain::a001_category::{Category, CategoryId};
use contracts::domain::a002_supplier::{Supplier, SupplierId};
use contracts::domain::a003_product::aggregate::fields;
use contracts::domain::a003_product::{Product, ProductPayload};
use contracts::shared::validation::{is_blank, parse_price, parse_quantity};
use contracts::shared::FieldErrors;
use std::rc::Rc;

use crate::domain::a001_category::api as category_api;
use crate::domain::a002_supplier::api as supplier_api;
use crate::domain::a003_product::api;
use crate::shared::dialogs::Dialogs;
use crate::shared::form_controller::{submit_form, FormCallbacks, SubmitOutcome};
use crate::shared::http::ApiClient;
use crate::shared::state::{Draft, FieldValue, FormMode, FormState, StateCell};

pub const SAVE_FAILED: &str = "Error al guardar el producto";
pub const REFERENCE_DATA_FAILED: &str = "Error al cargar categorías y proveedores";
pub const QUANTITY_NOT_INTEGER: &str = "Introduzca un número entero válido.";

/// Text of the product form, as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub supplier_id: Option<SupplierId>,
    pub category_id: Option<CategoryId>,
    pub active: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            description: String::new(),
            quantity: "0".to_string(),
            unit_price: String::new(),
            supplier_id: None,
            category_id: None,
            active: true,
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        Self {
            code: p.code.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            quantity: p.quantity.to_string(),
            unit_price: format!("{:.2}", p.unit_price),
            supplier_id: Some(p.supplier_id),
            category_id: Some(p.category_id),
            active: p.active,
        }
    }
}

fn parse_reference(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

impl Draft for ProductDraft {
    type Payload = ProductPayload;
    const IDENTITY_FIELDS: &'static [&'static str] = &[fields::CODE];

    fn set(&mut self, field: &str, value: FieldValue) {
        match (field, value) {
            (fields::CODE, FieldValue::Text(t)) => self.code = t,
            (fields::NAME, FieldValue::Text(t)) => self.name = t,
            (fields::DESCRIPTION, FieldValue::Text(t)) => self.description = t,
            (fields::QUANTITY, FieldValue::Text(t)) => self.quantity = t,
            (fields::UNIT_PRICE, FieldValue::Text(t)) => self.unit_price = t,
            (fields::SUPPLIER, FieldValue::Text(t)) => self.supplier_id = parse_reference(&t),
            (fields::CATEGORY, FieldValue::Text(t)) => self.category_id = parse_reference(&t),
            (fields::ACTIVE, FieldValue::Flag(on)) => self.active = on,
            _ => {}
        }
    }

    fn validate(&self) -> Result<ProductPayload, FieldErrors> {
        let payload = ProductPayload {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            quantity: parse_quantity(&self.quantity),
            unit_price: parse_price(&self.unit_price),
            supplier_id: self.supplier_id,
            category_id: self.category_id,
            active: self.active,
        };
        let mut errors = payload.validate();
        if payload.quantity.is_none() && !is_blank(&self.quantity) {
            errors.insert(fields::QUANTITY, QUANTITY_NOT_INTEGER);
        }
        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(errors)
        }
    }
}

pub type ProductFormState = FormState<ProductDraft>;

pub fn initial_state(product: Option<&Product>) -> ProductFormState {
    match product {
        Some(p) => FormState::new(FormMode::Edit(p.id), ProductDraft::from(p)),
        None => FormState::new(FormMode::Create, ProductDraft::default()),
    }
}

/// Options of the supplier and category selects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub categories: Vec<Category>,
    pub suppliers: Vec<Supplier>,
}

/// Create/edit flow of one open product form.
pub struct ProductFormController<C, R, D> {
    state: C,
    refs: R,
    client: ApiClient,
    dialogs: Rc<D>,
    callbacks: FormCallbacks,
}

impl<C: Clone, R: Clone, D> Clone for ProductFormController<C, R, D> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            refs: self.refs.clone(),
            client: self.client.clone(),
            dialogs: self.dialogs.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<C, R, D> ProductFormController<C, R, D>
where
    C: StateCell<ProductFormState>,
    R: StateCell<ReferenceData>,
    D: Dialogs,
{
    pub fn new(
        state: C,
        refs: R,
        client: ApiClient,
        dialogs: Rc<D>,
        callbacks: FormCallbacks,
    ) -> Self {
        Self {
            state,
            refs,
            client,
            dialogs,
            callbacks,
        }
    }

    /// Categories and suppliers are requested together; both must arrive.
    pub async fn load_reference_data(&self) {
        let (categories, suppliers) = futures::join!(
            category_api::list(&self.client),
            supplier_api::list(&self.client)
        );
        match (categories, suppliers) {
            (Ok(categories), Ok(suppliers)) => {
                self.refs.modify(|r| {
                    r.categories = categories;
                    r.suppliers = suppliers;
                });
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!("Error cargando datos: {}", e);
                self.dialogs.alert(REFERENCE_DATA_FAILED);
            }
        }
    }

    /// Edits to the code of an existing product are ignored.
    pub fn change(&self, field: &str, value: FieldValue) {
        self.state.modify(|s| s.change(field, value));
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let client = self.client.clone();
        submit_form(
            &self.state,
            &*self.dialogs,
            &self.callbacks,
            SAVE_FAILED,
            move |mode, payload: ProductPayload| async move {
                match mode {
                    FormMode::Create => api::create(&client, &payload).await,
                    FormMode::Edit(id) => api::update(&client, id, &payload).await,
                }
            },
        )
        .await
    }

    pub fn cancel(&self) {
        (self.callbacks.on_close)();
    }
}
