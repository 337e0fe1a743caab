//! Crate-level error type

use thiserror::Error;

use crate::razorpay::ApiError;
use crate::toolsets::ToolsetError;

/// Errors surfaced by the server outside of individual tool results
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Toolset(#[from] ToolsetError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Result type for MCP operations
pub type McpResult<T> = Result<T, Error>;
