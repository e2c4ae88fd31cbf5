use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_category::CategoryId;
use crate::domain::a002_supplier::SupplierId;
use crate::shared::validation::{decimal_places, TextRule};
use crate::shared::FieldErrors;

pub type ProductId = i64;

/// Quantity below which a product counts as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Wire field names, used as keys in [`FieldErrors`].
pub mod fields {
    pub const CODE: &str = "codigo";
    pub const NAME: &str = "nombre";
    pub const DESCRIPTION: &str = "descripcion";
    pub const QUANTITY: &str = "cantidad";
    pub const UNIT_PRICE: &str = "precio_unidad";
    pub const SUPPLIER: &str = "proveedor";
    pub const CATEGORY: &str = "categoria";
    pub const ACTIVE: &str = "activo";
}

pub const CODE_RULE: TextRule = TextRule::required("El código es requerido").max_length(50);
pub const NAME_RULE: TextRule = TextRule::required("El nombre es requerido").max_length(200);
pub const DESCRIPTION_RULE: TextRule = TextRule::required("La descripción es requerida");
pub const QUANTITY_REQUIRED: &str = "La cantidad es requerida";
pub const QUANTITY_NEGATIVE: &str = "La cantidad no puede ser negativa";
pub const PRICE_NOT_POSITIVE: &str = "El precio debe ser mayor a 0";
pub const PRICE_TOO_PRECISE: &str = "Asegúrese de que no haya más de 2 decimales.";
pub const PRICE_TOO_LARGE: &str = "Asegúrese de que no haya más de 10 dígitos en total.";
pub const SUPPLIER_REQUIRED: &str = "Debe seleccionar un proveedor";
pub const CATEGORY_REQUIRED: &str = "Debe seleccionar una categoría";

/// Largest price representable with 10 digits, 2 of them decimals.
const PRICE_MAX: f64 = 99_999_999.99;

// ============================================================================
// Aggregate
// ============================================================================

/// Producto de la farmacia (detail representation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "descripcion", default)]
    pub description: String,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    #[serde(rename = "precio_unidad", with = "crate::shared::decimal")]
    pub unit_price: f64,

    #[serde(rename = "proveedor")]
    pub supplier_id: SupplierId,

    #[serde(rename = "proveedor_nombre", default)]
    pub supplier_name: String,

    #[serde(rename = "categoria")]
    pub category_id: CategoryId,

    #[serde(rename = "categoria_nombre", default)]
    pub category_name: String,

    #[serde(rename = "activo")]
    pub active: bool,

    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "fecha_actualizacion", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row shape returned by the list endpoint.
///
/// Carries display names only; reference ids and the description come from
/// the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListItem {
    pub id: ProductId,

    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    #[serde(rename = "precio_unidad", with = "crate::shared::decimal")]
    pub unit_price: f64,

    #[serde(rename = "proveedor_nombre", default)]
    pub supplier_name: String,

    #[serde(rename = "categoria_nombre", default)]
    pub category_name: String,

    #[serde(rename = "activo")]
    pub active: bool,

    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
}

impl ProductListItem {
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }
}

impl From<&Product> for ProductListItem {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            code: p.code.clone(),
            name: p.name.clone(),
            quantity: p.quantity,
            unit_price: p.unit_price,
            supplier_name: p.supplier_name.clone(),
            category_name: p.category_name.clone(),
            active: p.active,
            created_at: p.created_at,
        }
    }
}

// ============================================================================
// Create / update payload
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    /// Ignored by the update endpoint; the stored code is kept.
    #[serde(rename = "codigo", default)]
    pub code: String,

    #[serde(rename = "nombre", default)]
    pub name: String,

    #[serde(rename = "descripcion", default)]
    pub description: String,

    #[serde(rename = "cantidad", default)]
    pub quantity: Option<i64>,

    #[serde(rename = "precio_unidad", default, with = "crate::shared::decimal::option")]
    pub unit_price: Option<f64>,

    #[serde(rename = "proveedor", default)]
    pub supplier_id: Option<SupplierId>,

    #[serde(rename = "categoria", default)]
    pub category_id: Option<CategoryId>,

    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ProductPayload {
    /// Typed checks; an empty map means the payload is valid.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Err(msg) = CODE_RULE.check(&self.code) {
            errors.insert(fields::CODE, msg);
        }
        if let Err(msg) = NAME_RULE.check(&self.name) {
            errors.insert(fields::NAME, msg);
        }
        if let Err(msg) = DESCRIPTION_RULE.check(&self.description) {
            errors.insert(fields::DESCRIPTION, msg);
        }
        match self.quantity {
            None => errors.insert(fields::QUANTITY, QUANTITY_REQUIRED),
            Some(q) if q < 0 => errors.insert(fields::QUANTITY, QUANTITY_NEGATIVE),
            Some(_) => {}
        }
        if let Err(msg) = check_price(self.unit_price) {
            errors.insert(fields::UNIT_PRICE, msg);
        }
        if self.supplier_id.is_none() {
            errors.insert(fields::SUPPLIER, SUPPLIER_REQUIRED);
        }
        if self.category_id.is_none() {
            errors.insert(fields::CATEGORY, CATEGORY_REQUIRED);
        }
        errors
    }
}

/// Price must be present, positive, with at most 2 decimals and 10 digits.
pub fn check_price(price: Option<f64>) -> Result<(), &'static str> {
    match price {
        Some(p) if p > 0.0 => {
            if decimal_places(p) > 2 {
                Err(PRICE_TOO_PRECISE)
            } else if p > PRICE_MAX {
                Err(PRICE_TOO_LARGE)
            } else {
                Ok(())
            }
        }
        _ => Err(PRICE_NOT_POSITIVE),
    }
}

impl From<&Product> for ProductPayload {
    fn from(p: &Product) -> Self {
        Self {
            code: p.code.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            quantity: Some(p.quantity),
            unit_price: Some(p.unit_price),
            supplier_id: Some(p.supplier_id),
            category_id: Some(p.category_id),
            active: p.active,
        }
    }
}

// ============================================================================
// List filter
// ============================================================================

fn is_false(v: &bool) -> bool {
    !*v
}

/// Query parameters of the product list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,

    /// Matched against code and name by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(rename = "mostrar_inactivos", default, skip_serializing_if = "is_false")]
    pub include_inactive: bool,
}

impl ProductFilter {
    /// Blank text clears the search.
    pub fn with_search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        self
    }

    pub fn with_category(mut self, category: Option<CategoryId>) -> Self {
        self.category = category;
        self
    }

    pub fn with_include_inactive(mut self, include: bool) -> Self {
        self.include_inactive = include;
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == ProductFilter::default()
    }
}
