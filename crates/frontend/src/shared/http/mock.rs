use async_trait::async_trait;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::client::ApiClient;
use super::transport::{ApiRequest, ApiResponse, Method, Transport};

#[derive(Clone)]
enum Reply {
    Response(ApiResponse),
    Failure(String),
}

#[derive(Default)]
struct Inner {
    routes: HashMap<(&'static str, String), Vec<Reply>>,
    requests: Vec<ApiRequest>,
}

/// Recording transport with canned replies keyed by method and path.
///
/// Replies queued for the same key are consumed in order; the last one
/// keeps answering. Unrouted requests get a 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Rc<RefCell<Inner>>,
}

impl MockTransport {
    pub const BASE: &'static str = "http://test/api";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(Self::BASE, Rc::new(self.clone()))
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(
            method,
            path,
            Reply::Response(ApiResponse {
                status,
                body: Some(body),
            }),
        );
    }

    pub fn respond_empty(&self, method: Method, path: &str, status: u16) {
        self.push(method, path, Reply::Response(ApiResponse { status, body: None }));
    }

    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.push(method, path, Reply::Failure(message.to_string()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.borrow().requests.clone()
    }

    /// Requests as `"METHOD /path?query"`, relative to [`Self::BASE`].
    pub fn calls(&self) -> Vec<String> {
        self.inner
            .borrow()
            .requests
            .iter()
            .map(|r| {
                let relative = r.url.strip_prefix(Self::BASE).unwrap_or(&r.url);
                format!("{} {}", r.method.as_str(), relative)
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.inner.borrow_mut().requests.clear();
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.inner
            .borrow_mut()
            .routes
            .entry((method.as_str(), path.to_string()))
            .or_default()
            .push(reply);
    }

    fn route_path(url: &str) -> String {
        let relative = url.strip_prefix(Self::BASE).unwrap_or(url);
        relative.split('?').next().unwrap_or("").to_string()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        let key = (request.method.as_str(), Self::route_path(&request.url));
        let mut inner = self.inner.borrow_mut();
        inner.requests.push(request);

        let reply = match inner.routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => Some(queue.remove(0)),
            Some(queue) => queue.first().cloned(),
            None => None,
        };
        drop(inner);

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(message),
            None => Ok(ApiResponse {
                status: 404,
                body: Some(serde_json::json!({"detail": "No encontrado."})),
            }),
        }
    }
}
