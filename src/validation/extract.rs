//! Generic extraction of typed values from a tool call's argument bag
//!
//! Coercion is structural: every target type lists exactly which JSON shapes
//! it accepts. A numeric string never becomes a number and a number never
//! becomes a string.

use serde_json::{Map, Value};

use super::ValidationError;
use crate::protocol::CallToolRequest;

/// A type that can be coerced out of a dynamic JSON argument
pub trait FromArg: Sized {
    /// Attempt the coercion, `None` on any shape mismatch
    fn from_arg(value: &Value) -> Option<Self>;
}

impl FromArg for String {
    fn from_arg(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromArg for i64 {
    fn from_arg(value: &Value) -> Option<Self> {
        if let Some(n) = value.as_i64() {
            return Some(n);
        }
        // Integral floats such as `10.0` are accepted, fractions are not
        let f = value.as_f64()?;
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            Some(f as i64)
        } else {
            None
        }
    }
}

impl FromArg for f64 {
    fn from_arg(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromArg for bool {
    fn from_arg(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromArg for Vec<Value> {
    fn from_arg(value: &Value) -> Option<Self> {
        value.as_array().cloned()
    }
}

impl FromArg for Map<String, Value> {
    fn from_arg(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl FromArg for Vec<String> {
    fn from_arg(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect()
    }
}

/// Look up `name` in the request arguments and coerce it to `T`.
///
/// Absent and `null` values yield `Ok(None)` unless `required` is set, in
/// which case they yield [`ValidationError::MissingRequired`]. A present value
/// of the wrong shape is always [`ValidationError::InvalidType`].
pub fn extract<T: FromArg>(
    request: &CallToolRequest,
    name: &str,
    required: bool,
) -> Result<Option<T>, ValidationError> {
    let args = request
        .arguments
        .as_object()
        .ok_or(ValidationError::InvalidArguments)?;

    match args.get(name) {
        None | Some(Value::Null) => {
            if required {
                Err(ValidationError::MissingRequired(name.to_string()))
            } else {
                Ok(None)
            }
        }
        Some(value) => T::from_arg(value)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidType(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(arguments: Value) -> CallToolRequest {
        CallToolRequest::new("test_tool", arguments)
    }

    #[test]
    fn test_absent_optional_is_none() {
        let req = request(json!({}));
        assert_eq!(extract::<String>(&req, "name", false), Ok(None));
    }

    #[test]
    fn test_absent_or_null_required_is_missing() {
        let req = request(json!({ "name": null }));
        assert_eq!(
            extract::<String>(&req, "name", true),
            Err(ValidationError::MissingRequired("name".to_string()))
        );
        assert_eq!(
            extract::<String>(&req, "other", true),
            Err(ValidationError::MissingRequired("other".to_string()))
        );
    }

    #[test]
    fn test_string_does_not_coerce_to_number() {
        let req = request(json!({ "count": "10", "name": 12345 }));
        assert_eq!(
            extract::<i64>(&req, "count", false),
            Err(ValidationError::InvalidType("count".to_string()))
        );
        assert_eq!(
            extract::<String>(&req, "name", false),
            Err(ValidationError::InvalidType("name".to_string()))
        );
    }

    #[test]
    fn test_number_coerces_to_int_and_float() {
        let req = request(json!({ "amount": 500, "whole": 10.0, "rate": 1.5 }));
        assert_eq!(extract::<i64>(&req, "amount", true), Ok(Some(500)));
        assert_eq!(extract::<f64>(&req, "amount", true), Ok(Some(500.0)));
        assert_eq!(extract::<i64>(&req, "whole", true), Ok(Some(10)));
        assert_eq!(extract::<f64>(&req, "rate", true), Ok(Some(1.5)));
        assert_eq!(
            extract::<i64>(&req, "rate", true),
            Err(ValidationError::InvalidType("rate".to_string()))
        );
    }

    #[test]
    fn test_collections() {
        let req = request(json!({
            "notes": { "k": "v" },
            "tags": ["a", "b"],
            "mixed": ["a", 1],
        }));
        let notes = extract::<Map<String, Value>>(&req, "notes", true).unwrap().unwrap();
        assert_eq!(notes.get("k"), Some(&json!("v")));
        assert_eq!(
            extract::<Vec<String>>(&req, "tags", true),
            Ok(Some(vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(
            extract::<Vec<Value>>(&req, "mixed", true),
            Ok(Some(vec![json!("a"), json!(1)]))
        );
        assert_eq!(
            extract::<Vec<String>>(&req, "mixed", true),
            Err(ValidationError::InvalidType("mixed".to_string()))
        );
        assert_eq!(
            extract::<Map<String, Value>>(&req, "tags", true),
            Err(ValidationError::InvalidType("tags".to_string()))
        );
    }

    #[test]
    fn test_bool() {
        let req = request(json!({ "flag": true, "text": "true" }));
        assert_eq!(extract::<bool>(&req, "flag", true), Ok(Some(true)));
        assert_eq!(
            extract::<bool>(&req, "text", true),
            Err(ValidationError::InvalidType("text".to_string()))
        );
    }

    #[test]
    fn test_malformed_argument_bag() {
        let req = request(json!(["not", "an", "object"]));
        assert_eq!(
            extract::<String>(&req, "name", false),
            Err(ValidationError::InvalidArguments)
        );
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let req = request(json!({ "name": "Acme" }));
        let first = extract::<String>(&req, "name", true);
        let second = extract::<String>(&req, "name", true);
        assert_eq!(first, second);
        assert_eq!(req.arguments, json!({ "name": "Acme" }));
    }
}
