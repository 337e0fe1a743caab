//! HTTP transport for MCP
//!
//! ## Endpoints
//! - `POST /mcp` - JSON-RPC requests, authenticated with Razorpay Basic credentials
//! - `GET /mcp/info` - Server info and tool count
//! - `GET /health` - Liveness probe

pub mod auth;
pub mod handler;
pub mod http;

pub use handler::{ClientFactory, McpState};
pub use http::{create_router, serve};
