//! Fluent per-request validator
//!
//! A [`Validator`] runs many field extractions against one tool call and keeps
//! every failure instead of stopping at the first. Handlers chain their field
//! checks, then call [`Validator::handle_errors_if_any`] once before touching
//! the payments API.

use serde_json::Value;

use super::extract::{extract, FromArg};
use super::ValidationError;
use crate::protocol::CallToolRequest;
use crate::server::error_response;
use crate::types::Params;

/// Output key used by [`Validator::expand`]
pub const EXPAND_KEY: &str = "expand[]";

/// Accumulates validation outcomes for a single tool call
#[derive(Debug)]
pub struct Validator<'a> {
    request: &'a CallToolRequest,
    errors: Vec<ValidationError>,
}

impl<'a> Validator<'a> {
    /// Create a validator bound to one request
    pub fn new(request: &'a CallToolRequest) -> Self {
        Self {
            request,
            errors: Vec::new(),
        }
    }

    fn record<T: FromArg>(&mut self, name: &str, required: bool) -> Option<T> {
        match extract::<T>(self.request, name, required) {
            Ok(value) => value,
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }

    /// Extract a required field and write it to `out[name]`
    pub fn required_field<T>(&mut self, out: &mut Params, name: &str) -> &mut Self
    where
        T: FromArg + Into<Value>,
    {
        if let Some(value) = self.record::<T>(name, true) {
            out.insert(name.to_string(), value.into());
        }
        self
    }

    /// Extract an optional field and write it to `out[name]` when present
    pub fn optional_field<T>(&mut self, out: &mut Params, name: &str) -> &mut Self
    where
        T: FromArg + Into<Value>,
    {
        self.optional_field_to_key::<T>(out, name, name)
    }

    /// Extract an optional field `name` but write it to `out[target_key]`.
    ///
    /// Used to assemble nested payloads, e.g. `customer_email` in the request
    /// becoming `email` inside a `customer` object.
    pub fn optional_field_to_key<T>(
        &mut self,
        out: &mut Params,
        name: &str,
        target_key: &str,
    ) -> &mut Self
    where
        T: FromArg + Into<Value>,
    {
        if let Some(value) = self.record::<T>(name, false) {
            out.insert(target_key.to_string(), value.into());
        }
        self
    }

    /// Extract a required field and hand it back instead of writing it to a map
    pub fn required_value<T: FromArg>(&mut self, name: &str) -> Option<T> {
        self.record::<T>(name, true)
    }

    /// Extract an optional field and hand it back instead of writing it to a map
    pub fn optional_value<T: FromArg>(&mut self, name: &str) -> Option<T> {
        self.record::<T>(name, false)
    }

    /// Extract a required resource id destined for a URL path segment.
    ///
    /// Empty ids and ids that could leave their segment (`/`, `?`, `#`,
    /// `..`) are recorded as invalid type.
    pub fn required_id(&mut self, name: &str) -> Option<String> {
        let id = self.record::<String>(name, true)?;
        if is_path_segment(&id) {
            Some(id)
        } else {
            self.errors.push(ValidationError::InvalidType(name.to_string()));
            None
        }
    }

    /// Optional integer `count` and `skip`
    pub fn pagination(&mut self, out: &mut Params) -> &mut Self {
        self.optional_field::<i64>(out, "count")
            .optional_field::<i64>(out, "skip")
    }

    /// Optional string list `expand`, written element by element to `expand[]`.
    ///
    /// Every element overwrites the previous one, so only the last survives.
    pub fn expand(&mut self, out: &mut Params) -> &mut Self {
        if let Some(values) = self.record::<Vec<String>>("expand", false) {
            for value in values {
                out.insert(EXPAND_KEY.to_string(), Value::String(value));
            }
        }
        self
    }

    /// Record a caller-detected error
    pub fn add_error(&mut self, err: ValidationError) -> &mut Self {
        self.errors.push(err);
        self
    }

    /// Whether any check has failed so far
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors in the order they were recorded
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Render every recorded error as one message, `None` when clean
    pub fn render(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        let mut message = String::from("Validation errors:");
        for err in &self.errors {
            message.push_str("\n- ");
            message.push_str(&err.to_string());
        }
        Some(message)
    }

    /// The tool error result to return when validation failed
    pub fn handle_errors_if_any(&self) -> Option<Value> {
        let message = self.render()?;
        tracing::debug!(
            tool = %self.request.name,
            errors = self.errors.len(),
            "rejecting tool call with invalid arguments"
        );
        Some(error_response(message))
    }
}

fn is_path_segment(id: &str) -> bool {
    !id.trim().is_empty()
        && !id.contains("..")
        && !id.contains(['/', '\\', '?', '#', '%'])
}
