//! Command-line and environment configuration
//!
//! Every flag can also come from the environment, e.g.
//!
//! ```bash
//! RAZORPAY_KEY_ID=rzp_test_xxx RAZORPAY_KEY_SECRET=... razorpay-mcp-server stdio
//! razorpay-mcp-server --toolsets customers,refunds --read-only http --port 8090
//! ```

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{Error, McpResult};

/// Razorpay API key pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key_id: String,
    pub key_secret: String,
}

impl Credentials {
    pub fn new(key_id: &str, key_secret: &str) -> Self {
        Self {
            key_id: key_id.to_string(),
            key_secret: key_secret.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("key_secret", &"***")
            .finish()
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "razorpay-mcp-server",
    version,
    about = "MCP server exposing the Razorpay payments API as tools"
)]
pub struct Cli {
    /// Razorpay key id
    #[arg(long, env = "RAZORPAY_KEY_ID", global = true)]
    pub key: Option<String>,

    /// Razorpay key secret
    #[arg(long, env = "RAZORPAY_KEY_SECRET", global = true, hide_env_values = true)]
    pub secret: Option<String>,

    /// Comma-separated toolsets to enable (default: all)
    #[arg(long, env = "RAZORPAY_TOOLSETS", value_delimiter = ',', global = true)]
    pub toolsets: Vec<String>,

    /// Only expose tools that do not modify data
    #[arg(long, env = "RAZORPAY_READ_ONLY", global = true)]
    pub read_only: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "RAZORPAY_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve MCP over stdin/stdout
    Stdio,
    /// Serve MCP JSON-RPC over HTTP
    Http {
        #[arg(long, env = "RAZORPAY_MCP_ADDRESS", default_value = "127.0.0.1")]
        address: String,
        #[arg(long, env = "RAZORPAY_MCP_PORT", default_value_t = 8090)]
        port: u16,
    },
}

impl Cli {
    /// The configured key pair, if any.
    ///
    /// Supplying only one half of the pair is an error.
    pub fn credentials(&self) -> McpResult<Option<Credentials>> {
        match (&self.key, &self.secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Ok(Some(Credentials::new(key, secret)))
            }
            (None, None) => Ok(None),
            _ => Err(Error::Config(
                "both --key and --secret must be provided".to_string(),
            )),
        }
    }

    /// Requested toolsets with whitespace and empty entries removed
    pub fn toolset_names(&self) -> Vec<String> {
        self.toolsets
            .iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Socket address for the HTTP transport; accepts IPv4 and IPv6 literals
pub fn listen_addr(address: &str, port: u16) -> McpResult<SocketAddr> {
    let ip: IpAddr = address
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .map_err(|e| Error::Config(format!("invalid listen address {address}: {e}")))?;
    Ok(SocketAddr::new(ip, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stdio_with_credentials() {
        let cli = Cli::try_parse_from([
            "razorpay-mcp-server",
            "--key",
            "rzp_test_1",
            "--secret",
            "s3cret",
            "--toolsets",
            "customers, refunds",
            "stdio",
        ])
        .unwrap();

        assert_eq!(cli.command, Command::Stdio);
        assert_eq!(
            cli.credentials().unwrap(),
            Some(Credentials::new("rzp_test_1", "s3cret"))
        );
        assert_eq!(cli.toolset_names(), vec!["customers", "refunds"]);
    }

    #[test]
    fn test_parse_http_defaults() {
        let cli = Cli::try_parse_from(["razorpay-mcp-server", "http", "--read-only"]).unwrap();
        assert!(cli.read_only);
        match cli.command {
            Command::Http { address, port } => {
                assert_eq!(address, "127.0.0.1");
                assert_eq!(port, 8090);
            }
            Command::Stdio => panic!("expected http command"),
        }
    }

    #[test]
    fn test_half_credentials_rejected() {
        let cli = Cli::try_parse_from(["razorpay-mcp-server", "--key", "rzp_test_1", "stdio"])
            .unwrap();
        assert!(matches!(cli.credentials(), Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let creds = Credentials::new("rzp_test_1", "s3cret");
        let text = format!("{creds:?}");
        assert!(text.contains("rzp_test_1"));
        assert!(!text.contains("s3cret"));
    }

    #[test]
    fn test_listen_addr_ipv4_and_ipv6() {
        assert_eq!(
            listen_addr("127.0.0.1", 8090).unwrap().to_string(),
            "127.0.0.1:8090"
        );
        assert_eq!(listen_addr("::1", 8090).unwrap().to_string(), "[::1]:8090");
        assert_eq!(listen_addr("[::]", 80).unwrap().to_string(), "[::]:80");
        assert!(matches!(listen_addr("localhost:1", 80), Err(Error::Config(_))));
    }
}
