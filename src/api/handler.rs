//! MCP HTTP handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::WWW_AUTHENTICATE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::auth::{credentials_from_headers, AuthError};
use crate::config::Credentials;
use crate::protocol::{JsonRpcError, INVALID_REQUEST, PROTOCOL_VERSION};
use crate::razorpay::{HttpClient, RazorpayApi};
use crate::server::Dispatcher;

/// Builds a payments client from request credentials
pub type ClientFactory = Arc<dyn Fn(&Credentials) -> Arc<dyn RazorpayApi> + Send + Sync>;

/// Shared state for MCP endpoints
pub struct McpState {
    pub dispatcher: Arc<Dispatcher>,
    pub client_factory: ClientFactory,
}

impl McpState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            client_factory: Arc::new(|creds: &Credentials| -> Arc<dyn RazorpayApi> {
                Arc::new(HttpClient::new(creds))
            }),
        }
    }

    /// Replace how request credentials become a client
    pub fn with_client_factory(mut self, factory: ClientFactory) -> Self {
        self.client_factory = factory;
        self
    }
}

fn unauthorized(err: AuthError) -> Response {
    tracing::warn!(error = %err, "rejected MCP request");
    let body = JsonRpcError::new(
        Value::Null,
        INVALID_REQUEST,
        "Unauthorized",
        Some(json!({ "details": err.to_string() })),
    );
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, "Basic realm=\"razorpay\"")],
        Json(body),
    )
        .into_response()
}

/// POST /mcp - Handle JSON-RPC requests
pub async fn mcp_request_handler(
    State(state): State<Arc<McpState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let client = match credentials_from_headers(&headers) {
        Ok(Some(creds)) => {
            tracing::debug!(key_id = %creds.key_id, "request-scoped credentials");
            Some((state.client_factory)(&creds))
        }
        Ok(None) if state.dispatcher.has_default_client() => None,
        Ok(None) => return unauthorized(AuthError::MissingCredentials),
        Err(e) => return unauthorized(e),
    };

    // The payments client blocks on network I/O
    let dispatcher = state.dispatcher.clone();
    let reply =
        tokio::task::spawn_blocking(move || dispatcher.handle_message(&body, client)).await;

    match reply {
        Ok(Some(message)) => (StatusCode::OK, Json(message)).into_response(),
        Ok(None) => StatusCode::ACCEPTED.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "MCP request task failed");
            let error = JsonRpcError::internal_error(Value::Null, e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}

/// GET /mcp/info - Get server info
#[derive(Debug, Serialize)]
pub struct ServerInfoResponse {
    pub name: String,
    pub version: String,
    pub protocol_version: String,
    pub tool_count: usize,
}

pub async fn server_info_handler(State(state): State<Arc<McpState>>) -> impl IntoResponse {
    let info = state.dispatcher.server_info();
    Json(ServerInfoResponse {
        name: info.name.clone(),
        version: info.version.clone(),
        protocol_version: PROTOCOL_VERSION.to_string(),
        tool_count: state.dispatcher.tool_count(),
    })
}
