//! Tool result builders
//!
//! Every tool answers with MCP `content` blocks. Failures the agent should
//! see (bad arguments, API errors) are results flagged with `isError`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::McpResult;

/// Build a text content response
pub fn text_response(text: String) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": text
        }]
    })
}

/// Build a text response holding pretty-printed JSON
pub fn json_response<T: Serialize>(value: &T) -> McpResult<Value> {
    Ok(text_response(serde_json::to_string_pretty(value)?))
}

/// Build an error content response
pub fn error_response(message: String) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": message
        }],
        "isError": true
    })
}

/// Whether a tool result is flagged as an error
pub fn is_error_response(result: &Value) -> bool {
    result.get("isError").and_then(Value::as_bool).unwrap_or(false)
}

/// Text of the first content block of a tool result
pub fn response_text(result: &Value) -> Option<&str> {
    result.get("content")?.get(0)?.get("text")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_error_responses() {
        let ok = text_response("done".to_string());
        assert!(!is_error_response(&ok));
        assert_eq!(response_text(&ok), Some("done"));

        let err = error_response("fetching customer failed: nope".to_string());
        assert!(is_error_response(&err));
        assert_eq!(response_text(&err), Some("fetching customer failed: nope"));
    }

    #[test]
    fn test_json_response_is_pretty() {
        let result = json_response(&json!({ "id": "cust_1" })).unwrap();
        assert_eq!(response_text(&result), Some("{\n  \"id\": \"cust_1\"\n}"));
    }
}
