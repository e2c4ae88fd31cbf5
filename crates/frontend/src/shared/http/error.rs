use contracts::shared::FieldErrors;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single API call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response, with whatever body the server sent.
    #[error("HTTP {status}")]
    Status { status: u16, payload: Option<Value> },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Field-keyed validation payload carried by the response, if any.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            ApiError::Status {
                payload: Some(payload),
                ..
            } => FieldErrors::from_payload(payload),
            _ => None,
        }
    }

    /// Server payload when present, otherwise the error message.
    pub fn log_detail(&self) -> String {
        match self {
            ApiError::Status {
                payload: Some(payload),
                ..
            } => payload.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_errors_only_from_keyed_payload() {
        let keyed = ApiError::Status {
            status: 400,
            payload: Some(json!({"email": ["Ya existe un proveedor con este email."]})),
        };
        assert_eq!(
            keyed.field_errors().unwrap().get("email"),
            Some("Ya existe un proveedor con este email.")
        );

        let opaque = ApiError::Status {
            status: 409,
            payload: Some(json!({"error": "tiene productos"})),
        };
        assert!(opaque.field_errors().is_none());
        assert!(ApiError::Transport("offline".into()).field_errors().is_none());
    }

    #[test]
    fn test_log_detail() {
        let e = ApiError::Status {
            status: 404,
            payload: Some(json!({"detail": "No encontrado."})),
        };
        assert_eq!(e.log_detail(), r#"{"detail":"No encontrado."}"#);
        assert_eq!(
            ApiError::Status { status: 500, payload: None }.log_detail(),
            "HTTP 500"
        );
        assert_eq!(ApiError::Transport("x".into()).log_detail(), "Network error: x");
    }
}
