//! MCP (Model Context Protocol) types

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::McpResult;
use crate::razorpay::RazorpayApi;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Behavioural hints advertised alongside a tool
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolAnnotations {
    #[serde(rename = "readOnlyHint")]
    pub read_only_hint: bool,
}

/// MCP Tool definition
#[derive(Serialize, Debug, Clone)]
pub struct McpTool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    pub annotations: ToolAnnotations,
}

impl McpTool {
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
            annotations: ToolAnnotations::default(),
        }
    }

    /// Mark the tool as free of side effects
    pub fn read_only(mut self) -> Self {
        self.annotations.read_only_hint = true;
        self
    }
}

/// Server information for MCP handshake
#[derive(Clone, Debug)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(name: String, version: String) -> Self {
        Self { name, version }
    }
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: "razorpay-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// The `params` of a `tools/call` request
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CallToolRequest {
    pub name: String,
    /// Untyped argument bag supplied by the agent
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(serde_json::Map::new())
}

impl CallToolRequest {
    pub fn new(name: &str, arguments: Value) -> Self {
        Self {
            name: name.to_string(),
            arguments,
        }
    }
}

/// Per-call collaborators handed to a tool
#[derive(Clone)]
pub struct ToolContext {
    client: Arc<dyn RazorpayApi>,
}

impl ToolContext {
    pub fn new(client: Arc<dyn RazorpayApi>) -> Self {
        Self { client }
    }

    /// The payments client resolved for this call
    pub fn client(&self) -> &dyn RazorpayApi {
        self.client.as_ref()
    }
}

/// Trait for MCP tools
///
/// All tools must implement this trait to be registered with the MCP server.
/// Argument and API failures are reported as error *results*; `Err` is kept
/// for faults the server itself cannot recover from.
pub trait Tool: Send + Sync {
    /// Get the tool definition for tools/list
    fn definition(&self) -> McpTool;

    /// Execute the tool against the resolved client
    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value>;

    /// Get the tool name (convenience method)
    fn name(&self) -> String {
        self.definition().name
    }

    /// Whether the tool only reads data
    fn is_read_only(&self) -> bool {
        self.definition().annotations.read_only_hint
    }
}
