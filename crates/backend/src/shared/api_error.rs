use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::FieldErrors;
use serde_json::json;
use thiserror::Error;

pub const NOT_FOUND: &str = "No encontrado.";

/// Errors a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rendered as `{"field": ["message"]}`.
    #[error("validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Business rule rejection, e.g. deleting a referenced supplier.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found() -> Self {
        ApiError::NotFound(NOT_FOUND.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        ApiError::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => errors.to_payload(),
            ApiError::BadRequest(msg) | ApiError::Conflict(msg) => json!({ "error": msg }),
            ApiError::NotFound(msg) => json!({ "detail": msg }),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                json!({ "detail": "Error interno del servidor." })
            }
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
