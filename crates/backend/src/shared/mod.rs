pub mod api_error;
pub mod app_state;
pub mod config;
pub mod data;
pub mod pagination;
