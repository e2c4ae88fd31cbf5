pub mod decimal;
pub mod field_errors;
pub mod list_response;
pub mod validation;

pub use field_errors::FieldErrors;
pub use list_response::{ListResponse, Page};
