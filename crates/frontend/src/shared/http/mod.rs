//! Single configured HTTP client used by every resource service.

pub mod client;
pub mod error;
pub mod transport;

#[cfg(test)]
pub mod mock;

pub use client::{decode, decode_list, ApiClient};
pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, FetchTransport, Method, Transport};
