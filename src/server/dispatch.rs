//! JSON-RPC method routing shared by the stdio and HTTP transports

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::protocol::{
    CallToolRequest, JsonRpcError, JsonRpcMessage, JsonRpcRequest, JsonRpcResponse, McpTool,
    ServerInfo, Tool, ToolContext, PROTOCOL_VERSION,
};
use crate::razorpay::RazorpayApi;

/// Routes MCP requests to registered tools
pub struct Dispatcher {
    server_info: ServerInfo,
    tools: BTreeMap<String, Arc<dyn Tool>>,
    default_client: Option<Arc<dyn RazorpayApi>>,
}

impl Dispatcher {
    pub fn new(server_info: ServerInfo) -> Self {
        Self {
            server_info,
            tools: BTreeMap::new(),
            default_client: None,
        }
    }

    /// Client used when a request carries no credentials of its own
    pub fn with_default_client(mut self, client: Arc<dyn RazorpayApi>) -> Self {
        self.default_client = Some(client);
        self
    }

    /// Register a tool with the server
    pub fn register_tool(&mut self, tool: Arc<dyn Tool>) -> &mut Self {
        let name = tool.definition().name;
        self.tools.insert(name, tool);
        self
    }

    /// Get the number of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    pub fn has_default_client(&self) -> bool {
        self.default_client.is_some()
    }

    /// Parse and handle one raw JSON-RPC message.
    ///
    /// Returns `None` for notifications, which get no reply.
    pub fn handle_message(
        &self,
        raw: &str,
        client: Option<Arc<dyn RazorpayApi>>,
    ) -> Option<JsonRpcMessage> {
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable JSON-RPC message");
                return Some(JsonRpcError::parse_error(e.to_string()).into());
            }
        };

        // Valid JSON that is not a request object
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request, client),
            Err(e) => {
                tracing::warn!(error = %e, "malformed JSON-RPC request");
                Some(JsonRpcError::invalid_request(id, e.to_string()).into())
            }
        }
    }

    /// Handle a parsed JSON-RPC request
    pub fn handle_request(
        &self,
        request: JsonRpcRequest,
        client: Option<Arc<dyn RazorpayApi>>,
    ) -> Option<JsonRpcMessage> {
        let id = request.id_or_null();

        if !request.is_valid() {
            return Some(
                JsonRpcError::invalid_request(id, "jsonrpc must be '2.0'".to_string()).into(),
            );
        }

        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }

        let message = match request.method.as_str() {
            "initialize" => JsonRpcResponse::new(id, self.initialize_result()).into(),
            "ping" => JsonRpcResponse::new(id, json!({})).into(),
            "tools/list" => JsonRpcResponse::new(id, self.tools_list_result()).into(),
            "tools/call" => self.handle_tool_call(id, request.params, client),
            _ => JsonRpcError::method_not_found(id, request.method).into(),
        };
        Some(message)
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": self.server_info.name,
                "version": self.server_info.version
            }
        })
    }

    fn tools_list_result(&self) -> Value {
        let tools: Vec<McpTool> = self.tools.values().map(|t| t.definition()).collect();
        json!({ "tools": tools })
    }

    fn handle_tool_call(
        &self,
        id: Value,
        params: Option<Value>,
        client: Option<Arc<dyn RazorpayApi>>,
    ) -> JsonRpcMessage {
        let Some(params) = params else {
            return JsonRpcError::invalid_params(id, "Missing parameters".to_string()).into();
        };

        let request: CallToolRequest = match serde_json::from_value(params) {
            Ok(request) => request,
            Err(e) => return JsonRpcError::invalid_params(id, e.to_string()).into(),
        };

        let Some(tool) = self.tools.get(&request.name) else {
            return JsonRpcError::new(
                id,
                crate::protocol::INVALID_PARAMS,
                "Unknown tool",
                Some(json!({ "tool": request.name })),
            )
            .into();
        };

        let Some(client) = client.or_else(|| self.default_client.clone()) else {
            return JsonRpcError::internal_error(
                id,
                "no Razorpay credentials available".to_string(),
            )
            .into();
        };

        tracing::info!(tool = %request.name, "tool call");
        let ctx = ToolContext::new(client);
        match tool.execute(&ctx, &request) {
            Ok(result) => JsonRpcResponse::new(id, result).into(),
            Err(e) => {
                tracing::error!(tool = %request.name, error = %e, "tool execution failed");
                JsonRpcError::new(
                    id,
                    crate::protocol::INTERNAL_ERROR,
                    "Tool execution error",
                    Some(json!({ "details": e.to_string() })),
                )
                .into()
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(ServerInfo::default())
    }
}
