//! Razorpay MCP Server
//!
//! Exposes the Razorpay payments API as Model Context Protocol tools that an
//! LLM-driven agent can call.
//!
//! # Modules
//!
//! - `validation`: typed extraction of tool arguments and error aggregation
//! - `protocol`: MCP and JSON-RPC protocol types
//! - `server`: JSON-RPC dispatch and the stdio transport
//! - `api`: HTTP transport with per-request credentials
//! - `razorpay`: payments API client
//! - `tools`: one tool per API operation, grouped by resource
//! - `toolsets`: enabling tool groups and read-only mode
//! - `config` / `logging`: CLI configuration and tracing setup
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use razorpay_mcp::config::Credentials;
//! use razorpay_mcp::razorpay::HttpClient;
//! use razorpay_mcp::server::{Dispatcher, McpServer};
//! use razorpay_mcp::toolsets::default_toolsets;
//! use razorpay_mcp::tools::HttpDocsSource;
//!
//! fn main() -> razorpay_mcp::McpResult<()> {
//!     let creds = Credentials::new("rzp_test_xxx", "secret");
//!     let mut dispatcher = Dispatcher::default()
//!         .with_default_client(Arc::new(HttpClient::new(&creds)));
//!     let mut toolsets = default_toolsets(false, Arc::new(HttpDocsSource::new()));
//!     toolsets.enable(&[])?;
//!     toolsets.register(&mut dispatcher);
//!     McpServer::new(dispatcher).run()
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod razorpay;
pub mod server;
pub mod tools;
pub mod toolsets;
pub mod types;
pub mod validation;

// Re-export commonly used items at crate root
pub use error::{Error, McpResult};
pub use protocol::{CallToolRequest, McpTool, ServerInfo, Tool, ToolContext};
pub use server::{Dispatcher, McpServer};
pub use types::Params;
pub use validation::{ValidationError, Validator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
