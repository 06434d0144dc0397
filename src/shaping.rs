//! Response shaping policies applied to successful outcomes.

use serde_json::{json, Map, Value};

use crate::error::ToolError;

/// How a successful upstream response is turned into tool output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Pretty-printed upstream JSON, verbatim.
    Echo,
    /// A fixed confirmation sentence; the upstream body is discarded.
    Confirm(&'static str),
    /// Condensed test case listing with pagination metadata.
    TestCaseSummary,
}

pub const NO_TEST_CASES: &str = "No test cases found.";

/// Apply `shape` to a successful response.
pub fn render(shape: Shape, value: Value) -> Result<String, ToolError> {
    match shape {
        Shape::Echo => pretty(&value),
        Shape::Confirm(message) => Ok(message.to_string()),
        Shape::TestCaseSummary => summarize_test_cases(&value),
    }
}

/// Two-space indented JSON.
pub fn pretty(value: &Value) -> Result<String, ToolError> {
    serde_json::to_string_pretty(value).map_err(|e| ToolError::Render(e.to_string()))
}

fn summarize_test_cases(page: &Value) -> Result<String, ToolError> {
    let test_cases = match page.get("values").and_then(Value::as_array) {
        Some(values) if !values.is_empty() => values,
        _ => return Ok(NO_TEST_CASES.to_string()),
    };

    let summaries: Vec<Value> = test_cases.iter().map(summarize_test_case).collect();

    pretty(&json!({
        "testCases": summaries,
        "pagination": pagination(page),
    }))
}

fn summarize_test_case(tc: &Value) -> Value {
    json!({
        "id": field(tc, "/id"),
        "key": field(tc, "/key"),
        "name": field(tc, "/name"),
        "priority": field(tc, "/priority/id"),
        "status": field(tc, "/status/id"),
        "objective": field(tc, "/objective"),
        "precondition": field(tc, "/precondition"),
        "estimatedTime": field(tc, "/estimatedTime"),
        "createdOn": field(tc, "/createdOn"),
        "folder": field(tc, "/folder/id"),
        "owner": field(tc, "/owner/accountId"),
    })
}

/// Upstream pagination keys, passed through as-is (null when absent).
pub fn pagination(page: &Value) -> Value {
    let mut meta = Map::new();
    for key in ["startAt", "maxResults", "total", "isLast"] {
        meta.insert(key.to_string(), page.get(key).cloned().unwrap_or(Value::Null));
    }
    Value::Object(meta)
}

fn field(value: &Value, pointer: &str) -> Value {
    value.pointer(pointer).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_is_two_space_indented() {
        let text = render(Shape::Echo, json!({"id": 1, "name": "Smoke"})).unwrap();
        assert_eq!(text, "{\n  \"id\": 1,\n  \"name\": \"Smoke\"\n}");
    }

    #[test]
    fn test_confirm_ignores_body() {
        let text = render(
            Shape::Confirm("Test case updated successfully"),
            json!({"success": true}),
        )
        .unwrap();
        assert_eq!(text, "Test case updated successfully");
    }

    #[test]
    fn test_empty_or_missing_values_means_no_test_cases() {
        assert_eq!(
            render(Shape::TestCaseSummary, json!({"values": []})).unwrap(),
            NO_TEST_CASES
        );
        assert_eq!(
            render(Shape::TestCaseSummary, json!({"total": 0})).unwrap(),
            NO_TEST_CASES
        );
    }

    #[test]
    fn test_test_case_projection() {
        let page = json!({
            "startAt": 0,
            "maxResults": 25,
            "total": 1,
            "isLast": true,
            "values": [{
                "id": 10,
                "key": "SM-T1",
                "name": "Login works",
                "project": {"id": 5},
                "priority": {"id": 3, "self": "https://example/priorities/3"},
                "status": {"id": 7},
                "objective": "Check login",
                "precondition": null,
                "estimatedTime": 60000,
                "createdOn": "2024-01-01T00:00:00Z",
                "folder": {"id": 99},
                "owner": {"accountId": "abc-123"},
                "labels": ["smoke"]
            }]
        });

        let text = render(Shape::TestCaseSummary, page).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            parsed,
            json!({
                "testCases": [{
                    "id": 10,
                    "key": "SM-T1",
                    "name": "Login works",
                    "priority": 3,
                    "status": 7,
                    "objective": "Check login",
                    "precondition": null,
                    "estimatedTime": 60000,
                    "createdOn": "2024-01-01T00:00:00Z",
                    "folder": 99,
                    "owner": "abc-123"
                }],
                "pagination": {"startAt": 0, "maxResults": 25, "total": 1, "isLast": true}
            })
        );
    }

    #[test]
    fn test_projection_tolerates_missing_nested_objects() {
        let page = json!({"values": [{"id": 1, "key": "SM-T2", "folder": null}]});
        let text = render(Shape::TestCaseSummary, page).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        let tc = &parsed["testCases"][0];
        assert_eq!(tc["folder"], Value::Null);
        assert_eq!(tc["owner"], Value::Null);
        assert_eq!(tc["priority"], Value::Null);
        assert_eq!(
            parsed["pagination"],
            json!({"startAt": null, "maxResults": null, "total": null, "isLast": null})
        );
    }
}
