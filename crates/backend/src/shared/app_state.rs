use sea_orm::DatabaseConnection;

use super::config::ApiConfig;

/// Shared by every handler through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub api: ApiConfig,
}
