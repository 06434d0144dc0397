//! Query and body builder shared by all endpoint tools.
//!
//! Required fields are always written. Optional fields are written only when
//! they are truthy: `None`, empty strings, zero and empty lists are dropped
//! rather than sent as explicit nulls or zeros.

use serde_json::{Map, Value};

use crate::error::ToolError;

/// Upper bound for `maxResults` accepted by the Zephyr Scale API.
pub const MAX_RESULTS_LIMIT: i64 = 1000;

/// Values that may be omitted from an outgoing payload.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for i64 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

/// Ordered field mapping used for both query strings and JSON bodies.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    fields: Map<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always include `key`.
    pub fn required(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Include `key` only when the value is present and truthy.
    pub fn optional<T>(mut self, key: &str, value: Option<T>) -> Self
    where
        T: Truthy + Into<Value>,
    {
        if let Some(value) = value.filter(Truthy::is_truthy) {
            self.fields.insert(key.to_string(), value.into());
        }
        self
    }

    /// `maxResults` (clamped) and `startAt`.
    ///
    /// Only the upper bound is enforced; other values go upstream as given.
    pub fn page(self, max_results: i64, start_at: i64) -> Self {
        self.required("maxResults", clamp_max_results(max_results))
            .required("startAt", start_at)
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Render as `(name, value)` pairs for a URL query string.
    ///
    /// Booleans render as `true`/`false`; arrays repeat the key.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.fields.len());
        for (key, value) in &self.fields {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        pairs.push((key.clone(), scalar_to_string(item)));
                    }
                }
                other => pairs.push((key.clone(), scalar_to_string(other))),
            }
        }
        pairs
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Clamp a caller-supplied page size to the upstream maximum.
pub fn clamp_max_results(max_results: i64) -> i64 {
    max_results.min(MAX_RESULTS_LIMIT)
}

/// Parse a free-form JSON payload passed as a string argument.
pub fn parse_json_payload(raw: &str, field: &'static str) -> Result<Value, ToolError> {
    serde_json::from_str(raw).map_err(|_| ToolError::InvalidJson { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_fields_always_written() {
        let params = Params::new()
            .required("projectKey", "SM")
            .required("startAt", 0u32);
        assert_eq!(params.into_value(), json!({"projectKey": "SM", "startAt": 0}));
    }

    #[test]
    fn test_falsy_optionals_are_dropped() {
        let params = Params::new()
            .optional("objective", Some(String::new()))
            .optional("folderId", Some(0i64))
            .optional::<i64>("componentId", None)
            .optional("labels", Some(Vec::<String>::new()));
        assert!(params.is_empty());
    }

    #[test]
    fn test_truthy_optionals_use_upstream_names() {
        let params = Params::new()
            .optional("folderId", Some(42i64))
            .optional("labels", Some(vec!["smoke".to_string()]));
        assert_eq!(
            params.into_value(),
            json!({"folderId": 42, "labels": ["smoke"]})
        );
    }

    #[test]
    fn test_page_clamps_max_results() {
        let params = Params::new().page(5000, 100);
        assert_eq!(params.get("maxResults"), Some(&json!(1000)));
        assert_eq!(params.get("startAt"), Some(&json!(100)));

        let params = Params::new().page(25, 0);
        assert_eq!(params.get("maxResults"), Some(&json!(25)));
    }

    #[test]
    fn test_page_passes_negative_values_through() {
        let params = Params::new().page(-5, -1);
        assert_eq!(params.get("maxResults"), Some(&json!(-5)));
        assert_eq!(params.get("startAt"), Some(&json!(-1)));
    }

    #[test]
    fn test_query_pairs_render_scalars() {
        let params = Params::new()
            .required("projectKey", "SM")
            .required("onlyLastExecutions", false)
            .required("maxResults", 25u32)
            .required("labels", vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("projectKey".to_string(), "SM".to_string()),
                ("onlyLastExecutions".to_string(), "false".to_string()),
                ("maxResults".to_string(), "25".to_string()),
                ("labels".to_string(), "a".to_string()),
                ("labels".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_json_payload_rejects_malformed_input() {
        let err = parse_json_payload("{bad json", "test_case_data").unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON format for test_case_data");
    }

    #[test]
    fn test_parse_json_payload_accepts_any_json() {
        assert_eq!(
            parse_json_payload("{\"name\": \"x\"}", "status_data").unwrap(),
            json!({"name": "x"})
        );
        assert_eq!(
            parse_json_payload("[1, 2]", "steps_data").unwrap(),
            json!([1, 2])
        );
    }
}
