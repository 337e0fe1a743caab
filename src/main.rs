//! Razorpay MCP Server - Binary Entry Point

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use razorpay_mcp::api::{self, McpState};
use razorpay_mcp::config::{listen_addr, Cli, Command};
use razorpay_mcp::error::{Error, McpResult};
use razorpay_mcp::logging;
use razorpay_mcp::protocol::ServerInfo;
use razorpay_mcp::razorpay::HttpClient;
use razorpay_mcp::server::{Dispatcher, McpServer};
use razorpay_mcp::toolsets::default_toolsets;
use razorpay_mcp::tools::HttpDocsSource;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match logging::init(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("razorpay-mcp-server: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> McpResult<()> {
    let credentials = cli.credentials()?;
    if cli.command == Command::Stdio && credentials.is_none() {
        return Err(Error::Config(
            "stdio mode requires --key and --secret (or RAZORPAY_KEY_ID / RAZORPAY_KEY_SECRET)"
                .to_string(),
        ));
    }

    let mut toolsets = default_toolsets(cli.read_only, Arc::new(HttpDocsSource::new()));
    toolsets.enable(&cli.toolset_names())?;

    let mut dispatcher = Dispatcher::new(ServerInfo::default());
    if let Some(creds) = &credentials {
        tracing::info!(key_id = %creds.key_id, "using default Razorpay credentials");
        dispatcher = dispatcher.with_default_client(Arc::new(HttpClient::new(creds)));
    }
    toolsets.register(&mut dispatcher);

    match cli.command {
        Command::Stdio => McpServer::new(dispatcher).run(),
        Command::Http { address, port } => {
            let addr = listen_addr(&address, port)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(api::serve(Arc::new(McpState::new(dispatcher)), addr))
        }
    }
}
