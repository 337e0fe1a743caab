//! Razorpay documentation tool
//!
//! Fetches a page from the public docs site and hands the agent plain text.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use regex::Regex;
use serde_json::{json, Value};
use ureq::{Agent, AgentBuilder};

use crate::error::McpResult;
use crate::protocol::{CallToolRequest, McpTool, Tool, ToolContext};
use crate::razorpay::{ApiError, ApiResult};
use crate::server::{error_response, text_response};
use crate::validation::{ValidationError, Validator};

pub const DOCS_BASE_URL: &str = "https://razorpay.com/docs";

const DEFAULT_MAX_LENGTH: usize = 8000;

/// Somewhere documentation pages can be loaded from
pub trait DocsSource: Send + Sync {
    fn fetch(&self, url: &str) -> ApiResult<String>;
}

/// Loads pages over HTTPS
pub struct HttpDocsSource {
    agent: Agent,
}

impl HttpDocsSource {
    pub fn new() -> Self {
        Self {
            agent: AgentBuilder::new().timeout(Duration::from_secs(20)).build(),
        }
    }
}

impl Default for HttpDocsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DocsSource for HttpDocsSource {
    fn fetch(&self, url: &str) -> ApiResult<String> {
        match self.agent.get(url).call() {
            Ok(response) => response
                .into_string()
                .map_err(|e| ApiError::Decode(e.to_string())),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.status_text().to_string();
                Err(ApiError::from_response(status, &body))
            }
            Err(ureq::Error::Transport(transport)) => Err(ApiError::Transport(transport.to_string())),
        }
    }
}

/// Tool for reading a Razorpay documentation page
pub struct FetchDocsTool {
    source: Arc<dyn DocsSource>,
    base_url: String,
}

impl FetchDocsTool {
    pub fn new(source: Arc<dyn DocsSource>) -> Self {
        Self::with_base_url(source, DOCS_BASE_URL)
    }

    pub fn with_base_url(source: Arc<dyn DocsSource>, base_url: &str) -> Self {
        Self {
            source,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Tool for FetchDocsTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_razorpay_docs",
            "Fetch a page of the Razorpay documentation as plain text",
            json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Page path below razorpay.com/docs, e.g. \"api/payments/refunds\""
                    },
                    "max_length": {
                        "type": "integer",
                        "description": "Maximum number of characters to return (default: 8000)"
                    }
                },
                "required": ["path"]
            }),
        )
        .read_only()
    }

    fn execute(&self, _ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut v = Validator::new(request);
        let path = v.required_value::<String>("path");
        let max_length = v.optional_value::<i64>("max_length");

        let path = path.unwrap_or_default();
        if path.contains("..") || path.contains("://") {
            v.add_error(ValidationError::cross_field(
                "path must be relative to the documentation site",
            ));
        }
        if max_length.is_some_and(|n| n <= 0) {
            v.add_error(ValidationError::cross_field("max_length must be positive"));
        }
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        let url = format!("{}/{}/", self.base_url, path.trim_matches('/'));
        let max_length = max_length
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_MAX_LENGTH);

        match self.source.fetch(&url) {
            Ok(html) => {
                let text = truncate(&html_to_text(&html), max_length);
                Ok(text_response(format!("Source: {url}\n\n{text}")))
            }
            Err(e) => Ok(error_response(format!("fetching documentation failed: {e}"))),
        }
    }
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern"))
}

/// Reduce an HTML document to readable text
pub fn html_to_text(html: &str) -> String {
    static HIDDEN: OnceLock<Regex> = OnceLock::new();
    static BLOCK: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();
    static SPACES: OnceLock<Regex> = OnceLock::new();

    let text = regex(
        &HIDDEN,
        r"(?is)<script[^>]*>.*?</script>|<style[^>]*>.*?</style>|<noscript[^>]*>.*?</noscript>|<!--.*?-->",
    )
    .replace_all(html, "");
    let text = regex(
        &BLOCK,
        r"(?i)<br\s*/?>|</?(p|div|li|ul|ol|h[1-6]|tr|table|section|article|pre|header|footer)(\s[^>]*)?>",
    )
    .replace_all(&text, "\n");
    let text = regex(&TAG, r"<[^>]*>").replace_all(&text, "");
    let text = decode_entities(&text);

    let spaces = regex(&SPACES, r"[ \t\u{a0}]+");
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = spaces.replace_all(line.trim(), " ").into_owned();
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}\n\n[truncated]", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::server::{is_error_response, response_text};

    struct StaticDocs {
        html: String,
        requested: Mutex<Vec<String>>,
    }

    impl DocsSource for StaticDocs {
        fn fetch(&self, url: &str) -> ApiResult<String> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(self.html.clone())
        }
    }

    struct NoClient;

    impl crate::razorpay::RazorpayApi for NoClient {
        fn send(&self, _request: crate::razorpay::ApiRequest) -> ApiResult<Value> {
            Err(ApiError::Transport("unused".to_string()))
        }
    }

    fn ctx() -> ToolContext {
        ToolContext::new(Arc::new(NoClient))
    }

    #[test]
    fn test_html_to_text() {
        let html = r#"<html><head><style>body{color:red}</style><script>var x = "<p>";</script></head>
            <body><h1>Refunds</h1><p>Create a  refund &amp; track it.</p><ul><li>Normal</li><li>Optimum</li></ul>
            <!-- hidden --></body></html>"#;
        assert_eq!(
            html_to_text(html),
            "Refunds\n\nCreate a refund & track it.\n\nNormal\n\nOptimum"
        );
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("héllo", 10), "héllo");
        assert_eq!(truncate("héllo", 2), "hé\n\n[truncated]");
    }

    #[test]
    fn test_fetch_docs_builds_url() {
        let source = Arc::new(StaticDocs {
            html: "<p>Payment Links</p>".to_string(),
            requested: Mutex::new(Vec::new()),
        });
        let tool = FetchDocsTool::with_base_url(source.clone(), "https://docs.example.com/");
        let req = CallToolRequest::new("fetch_razorpay_docs", json!({ "path": "/api/payment-links" }));

        let result = tool.execute(&ctx(), &req).unwrap();
        assert!(!is_error_response(&result));
        assert_eq!(
            response_text(&result),
            Some("Source: https://docs.example.com/api/payment-links/\n\nPayment Links")
        );
        assert_eq!(
            source.requested.lock().unwrap().as_slice(),
            ["https://docs.example.com/api/payment-links/"]
        );
    }

    #[test]
    fn test_fetch_docs_rejects_escaping_path() {
        let source = Arc::new(StaticDocs {
            html: String::new(),
            requested: Mutex::new(Vec::new()),
        });
        let tool = FetchDocsTool::new(source.clone());
        let req = CallToolRequest::new("fetch_razorpay_docs", json!({ "path": "../admin", "max_length": 0 }));

        let result = tool.execute(&ctx(), &req).unwrap();
        assert!(is_error_response(&result));
        assert_eq!(
            response_text(&result),
            Some(
                "Validation errors:\n\
                 - path must be relative to the documentation site\n\
                 - max_length must be positive"
            )
        );
        assert!(source.requested.lock().unwrap().is_empty());
    }
}
