//! MCP Server implementation
//!
//! This module contains the stdio server and the JSON-RPC dispatcher it
//! shares with the HTTP transport.

mod dispatch;
mod handlers;

use std::io::{self, BufRead, BufReader, BufWriter, Write};

use crate::error::McpResult;
use crate::protocol::JsonRpcMessage;

pub use dispatch::Dispatcher;
pub use handlers::*;

/// MCP Server that handles line-delimited JSON-RPC over stdio
pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run the server on stdin/stdout (blocking)
    pub fn run(&self) -> McpResult<()> {
        let reader = BufReader::new(io::stdin());
        let writer = BufWriter::new(io::stdout());
        self.serve(reader, writer)
    }

    /// Serve requests from any line reader until EOF
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> McpResult<()> {
        tracing::info!(
            server = %self.dispatcher.server_info().name,
            tools = self.dispatcher.tool_count(),
            "serving MCP over stdio"
        );

        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                if let Some(reply) = self.dispatcher.handle_message(trimmed, None) {
                    write_message(&mut writer, &reply)?;
                }
            }
            line.clear();
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }
}

fn write_message<W: Write>(writer: &mut W, message: &JsonRpcMessage) -> McpResult<()> {
    let json = serde_json::to_string(message)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;
    Ok(())
}
