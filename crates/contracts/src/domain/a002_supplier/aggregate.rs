use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::validation::{is_blank, is_valid_email, TextRule};
use crate::shared::FieldErrors;

pub type SupplierId = i64;

/// Wire field names, used as keys in [`FieldErrors`].
pub mod fields {
    pub const NAME: &str = "nombre";
    pub const PHONE: &str = "telefono";
    pub const EMAIL: &str = "email";
    pub const ADDRESS: &str = "direccion";
}

pub const NAME_RULE: TextRule = TextRule::required("El nombre es requerido").max_length(200);
pub const PHONE_RULE: TextRule = TextRule::required("El teléfono es requerido").max_length(20);
pub const ADDRESS_RULE: TextRule = TextRule::required("La dirección es requerida");
pub const EMAIL_REQUIRED: &str = "El email es requerido";
pub const EMAIL_INVALID: &str = "Email inválido";

// ============================================================================
// Aggregate
// ============================================================================

/// Proveedor de la farmacia
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "telefono")]
    pub phone: String,

    pub email: String,

    #[serde(rename = "direccion")]
    pub address: String,

    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Create / update payload
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierPayload {
    #[serde(rename = "nombre", default)]
    pub name: String,

    #[serde(rename = "telefono", default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,

    #[serde(rename = "direccion", default)]
    pub address: String,
}

impl SupplierPayload {
    /// Copy with every text field trimmed.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }

    /// Field-level checks; an empty map means the payload is valid.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Err(msg) = NAME_RULE.check(&self.name) {
            errors.insert(fields::NAME, msg);
        }
        if let Err(msg) = PHONE_RULE.check(&self.phone) {
            errors.insert(fields::PHONE, msg);
        }
        if is_blank(&self.email) {
            errors.insert(fields::EMAIL, EMAIL_REQUIRED);
        } else if !is_valid_email(&self.email) {
            errors.insert(fields::EMAIL, EMAIL_INVALID);
        }
        if let Err(msg) = ADDRESS_RULE.check(&self.address) {
            errors.insert(fields::ADDRESS, msg);
        }
        errors
    }
}

impl From<&Supplier> for SupplierPayload {
    fn from(s: &Supplier) -> Self {
        Self {
            name: s.name.clone(),
            phone: s.phone.clone(),
            email: s.email.clone(),
            address: s.address.clone(),
        }
    }
}
