//! Blocking HTTP implementation of [`RazorpayApi`]

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use ureq::{Agent, AgentBuilder};

use super::client::{ApiError, ApiRequest, ApiResult, Method, RazorpayApi};
use crate::config::Credentials;
use crate::types::Params;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.razorpay.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Razorpay REST client authenticated with a key id / secret pair
pub struct HttpClient {
    agent: Agent,
    base_url: String,
    authorization: String,
}

impl HttpClient {
    pub fn new(credentials: &Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: &Credentials, base_url: &str) -> Self {
        let agent = AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("razorpay-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: basic_authorization(credentials),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl RazorpayApi for HttpClient {
    fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, "razorpay request");

        let mut call = self
            .agent
            .request(request.method.as_str(), &url)
            .set("Authorization", &self.authorization);
        for (key, value) in flatten_query(&request.query) {
            call = call.query(&key, &value);
        }

        let result = match (&request.method, &request.body) {
            (Method::Get, _) | (_, None) => call.call(),
            (_, Some(body)) => call.send_json(body),
        };

        match result {
            Ok(response) => response
                .into_json::<Value>()
                .map_err(|e| ApiError::Decode(e.to_string())),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                let err = ApiError::from_response(status, &body);
                tracing::warn!(status, path = %request.path, error = %err, "razorpay request failed");
                Err(err)
            }
            Err(ureq::Error::Transport(transport)) => {
                tracing::warn!(path = %request.path, error = %transport, "razorpay transport failure");
                Err(ApiError::Transport(transport.to_string()))
            }
        }
    }
}

/// `Basic <base64(key_id:key_secret)>`
pub fn basic_authorization(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.key_id, credentials.key_secret);
    format!("Basic {}", STANDARD.encode(raw))
}

/// Flatten a parameter map into query pairs.
///
/// Arrays repeat the key, nested objects use `key[sub]`, nulls are dropped.
pub fn flatten_query(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push_pairs(&mut pairs, key.clone(), value);
    }
    pairs
}

fn push_pairs(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Bool(_) | Value::Number(_) => pairs.push((key, value.to_string())),
        Value::Array(items) => {
            for item in items {
                push_pairs(pairs, key.clone(), item);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                push_pairs(pairs, format!("{key}[{sub}]"), item);
            }
        }
    }
}
