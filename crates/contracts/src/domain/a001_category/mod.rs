pub mod aggregate;

pub use aggregate::{Category, CategoryCode, CategoryId};
