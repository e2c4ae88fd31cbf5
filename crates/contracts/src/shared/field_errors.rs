use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Keys that carry a human message rather than a field name.
const MESSAGE_KEYS: [&str; 3] = ["detail", "error", "mensaje"];

/// Field name -> error message.
///
/// The same map holds client-side validation results and the field-keyed
/// payload returned by the server, so both render identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Drops the error for one field, leaving the others untouched.
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Later entries win on conflicting keys.
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    /// Parses a validation payload of the form `{"field": ["msg", ...]}` or
    /// `{"field": "msg"}`.
    ///
    /// Returns `None` when the value carries no field-keyed entries, e.g.
    /// `{"detail": "Not found."}` or a plain string.
    pub fn from_payload(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let mut errors = FieldErrors::new();
        for (key, entry) in obj {
            if MESSAGE_KEYS.contains(&key.as_str()) {
                continue;
            }
            let message = match entry {
                Value::String(s) => s.clone(),
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" "),
                _ => continue,
            };
            if !message.is_empty() {
                errors.insert(key.clone(), message);
            }
        }
        if errors.is_empty() {
            None
        } else {
            Some(errors)
        }
    }

    /// Renders the map as `{"field": ["msg"]}`.
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        for (field, message) in &self.0 {
            map.insert(field.clone(), Value::Array(vec![Value::String(message.clone())]));
        }
        Value::Object(map)
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
