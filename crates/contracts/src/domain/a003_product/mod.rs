pub mod aggregate;

pub use aggregate::{Product, ProductFilter, ProductId, ProductListItem, ProductPayload};
