//! Payments client abstraction
//!
//! Tools never talk HTTP directly. They build an [`ApiRequest`] and hand it to
//! whichever [`RazorpayApi`] was resolved for the call, so tests can swap in a
//! recording client.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::types::Params;

/// HTTP verb of an API request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One call against the Razorpay REST API, relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Params,
    pub body: Option<Params>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Params::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// Attach query string parameters
    pub fn query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body
    pub fn body(mut self, body: Params) -> Self {
        self.body = Some(body);
        self
    }
}

/// Failures talking to the payments API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The API answered with an error envelope
    #[error("{description}")]
    Api {
        status: u16,
        code: String,
        description: String,
    },

    /// The request never produced an HTTP response
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the JSON we expected
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an [`ApiError::Api`] from a status code and raw error body
    pub fn from_response(status: u16, body: &str) -> Self {
        let envelope = serde_json::from_str::<Value>(body).ok();
        let error = envelope.as_ref().and_then(|v| v.get("error"));
        let field = |name: &str| {
            error
                .and_then(|e| e.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let description = field("description").unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("request failed with status {status}")
            } else {
                body.trim().to_string()
            }
        });

        ApiError::Api {
            status,
            code: field("code").unwrap_or_else(|| "SERVER_ERROR".to_string()),
            description,
        }
    }
}

/// Result type for payments API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// A client able to execute requests against the payments API
pub trait RazorpayApi: Send + Sync {
    fn send(&self, request: ApiRequest) -> ApiResult<Value>;
}
