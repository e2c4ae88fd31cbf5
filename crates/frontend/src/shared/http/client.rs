use contracts::shared::ListResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::rc::Rc;

use super::error::ApiError;
use super::transport::{ApiRequest, FetchTransport, Method, Transport};
use crate::shared::api_utils::{api_base, join_url};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The configured request sender: fixed base endpoint, JSON content type,
/// and one response interceptor that logs failures and passes them on
/// unchanged.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    transport: Rc<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Rc<dyn Transport>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    /// Client pointed at the backend next to the current page.
    pub fn browser() -> Self {
        Self::new(api_base(), Rc::new(FetchTransport))
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::Get, path, String::new(), None).await
    }

    /// GET with query parameters taken from any serializable struct.
    pub async fn get_with<Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Value, ApiError> {
        let query = serde_qs::to_string(query).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.send(Method::Get, path, query, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let body = encode(body)?;
        self.send(Method::Post, path, String::new(), Some(body)).await
    }

    /// POST without a body, for action endpoints.
    pub async fn post_action(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::Post, path, String::new(), None).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let body = encode(body)?;
        self.send(Method::Put, path, String::new(), Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::Delete, path, String::new(), None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: String,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest {
            method,
            url: join_url(&self.base_url, path, &query),
            headers: vec![("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body,
        };

        let result = match self.transport.send(request).await {
            Ok(response) if response.is_success() => Ok(response.body.unwrap_or(Value::Null)),
            Ok(response) => Err(ApiError::Status {
                status: response.status,
                payload: response.body,
            }),
            Err(message) => Err(ApiError::Transport(message)),
        };

        result.inspect_err(|e| log::error!("Error en la API: {}", e.log_detail()))
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decodes a list body in either the envelope or the bare shape.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    ListResponse::from_value(value)
        .map(ListResponse::into_items)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::mock::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_sends_json_header_and_query() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/productos/", 200, json!([]));
        let client = mock.client();

        #[derive(Serialize)]
        struct Q {
            search: &'static str,
        }
        client.get_with("/productos/", &Q { search: "ibu" }).await.unwrap();

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, format!("{}/productos/?search=ibu", MockTransport::BASE));
        assert_eq!(
            sent[0].headers,
            vec![("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_error_status_is_passed_through_unchanged() {
        let mock = MockTransport::new();
        let payload = json!({"codigo": ["Ya existe un producto con este código."]});
        mock.respond(Method::Post, "/productos/", 400, payload.clone());
        let client = mock.client();

        let err = client.post("/productos/", &json!({})).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                payload: Some(payload)
            }
        );
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let mock = MockTransport::new();
        mock.fail(Method::Delete, "/proveedores/1/", "connection refused");
        let err = mock.client().delete("/proveedores/1/").await.unwrap_err();
        assert_eq!(err, ApiError::Transport("connection refused".into()));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let mock = MockTransport::new();
        mock.respond_empty(Method::Delete, "/proveedores/2/", 204);
        assert_eq!(mock.client().delete("/proveedores/2/").await.unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_list_shapes() {
        let a: Vec<i64> = decode_list(json!({"results": [1, 2]})).unwrap();
        let b: Vec<i64> = decode_list(json!([1, 2])).unwrap();
        assert_eq!(a, b);
        assert!(matches!(decode::<i64>(json!("x")), Err(ApiError::Decode(_))));
    }
}
