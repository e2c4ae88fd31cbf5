use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paginated envelope as rendered by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A list response in either of the two shapes the API may return.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Page<T>),
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn items(&self) -> &[T] {
        match self {
            ListResponse::Paginated(page) => &page.results,
            ListResponse::Bare(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated(page) => page.results,
            ListResponse::Bare(items) => items,
        }
    }
}

impl<T: DeserializeOwned> ListResponse<T> {
    /// Unwraps a list body defensively: an envelope's `results` first, then a
    /// bare array, otherwise an empty list.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(_) => Ok(ListResponse::Bare(serde_json::from_value(value)?)),
            Value::Object(mut obj) => match obj.remove("results") {
                Some(results @ Value::Array(_)) => {
                    let results: Vec<T> = serde_json::from_value(results)?;
                    let count = obj
                        .get("count")
                        .and_then(Value::as_u64)
                        .unwrap_or(results.len() as u64);
                    let link = |key: &str| obj.get(key).and_then(Value::as_str).map(String::from);
                    Ok(ListResponse::Paginated(Page {
                        count,
                        next: link("next"),
                        previous: link("previous"),
                        results,
                    }))
                }
                _ => Ok(ListResponse::Bare(Vec::new())),
            },
            _ => Ok(ListResponse::Bare(Vec::new())),
        }
    }
}
