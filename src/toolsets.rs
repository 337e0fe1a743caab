//! Named groups of tools that can be switched on per deployment
//!
//! `--toolsets customers,refunds` exposes only those groups; `--read-only`
//! additionally hides every tool not annotated as read-only.

use std::sync::Arc;

use thiserror::Error;

use crate::protocol::Tool;
use crate::server::Dispatcher;
use crate::tools::{self, DocsSource};

/// Keyword enabling every toolset
pub const ALL_TOOLSETS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolsetError {
    #[error("unknown toolset: {0}")]
    Unknown(String),
}

/// A named collection of related tools
pub struct Toolset {
    pub name: String,
    pub description: String,
    tools: Vec<Arc<dyn Tool>>,
    enabled: bool,
}

impl Toolset {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            tools: Vec::new(),
            enabled: false,
        }
    }

    pub fn with_tool(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.push(Arc::new(tool));
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Tools this toolset exposes, dropping writers in read-only mode
    pub fn tools(&self, read_only: bool) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools
            .iter()
            .filter(move |tool| !read_only || tool.is_read_only())
    }
}

/// Every toolset known to the server and which of them are enabled
pub struct ToolsetGroup {
    toolsets: Vec<Toolset>,
    read_only: bool,
}

impl ToolsetGroup {
    pub fn new(read_only: bool) -> Self {
        Self {
            toolsets: Vec::new(),
            read_only,
        }
    }

    pub fn add(&mut self, toolset: Toolset) -> &mut Self {
        self.toolsets.push(toolset);
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn names(&self) -> Vec<&str> {
        self.toolsets.iter().map(|t| t.name.as_str()).collect()
    }

    /// Enable the named toolsets; empty or `all` enables everything
    pub fn enable(&mut self, names: &[String]) -> Result<(), ToolsetError> {
        if names.is_empty() || names.iter().any(|n| n == ALL_TOOLSETS) {
            for toolset in &mut self.toolsets {
                toolset.enabled = true;
            }
            return Ok(());
        }

        // Check every name before enabling anything
        if let Some(unknown) = names
            .iter()
            .find(|name| !self.toolsets.iter().any(|t| &t.name == *name))
        {
            return Err(ToolsetError::Unknown(unknown.clone()));
        }
        for toolset in &mut self.toolsets {
            if names.contains(&toolset.name) {
                toolset.enabled = true;
            }
        }
        Ok(())
    }

    /// Tools of all enabled toolsets
    pub fn enabled_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.toolsets
            .iter()
            .filter(|t| t.enabled)
            .flat_map(|t| t.tools(self.read_only).cloned())
            .collect()
    }

    /// Register the enabled tools with a dispatcher
    pub fn register(&self, dispatcher: &mut Dispatcher) {
        for tool in self.enabled_tools() {
            dispatcher.register_tool(tool);
        }
        tracing::info!(
            toolsets = ?self
                .toolsets
                .iter()
                .filter(|t| t.enabled)
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>(),
            read_only = self.read_only,
            tools = dispatcher.tool_count(),
            "registered toolsets"
        );
    }
}

/// The full catalogue of Razorpay toolsets, none enabled yet
pub fn default_toolsets(read_only: bool, docs: Arc<dyn DocsSource>) -> ToolsetGroup {
    let mut group = ToolsetGroup::new(read_only);
    group
        .add(
            Toolset::new("customers", "Razorpay customer operations")
                .with_tool(tools::CreateCustomerTool)
                .with_tool(tools::FetchCustomerTool)
                .with_tool(tools::EditCustomerTool)
                .with_tool(tools::FetchAllCustomersTool),
        )
        .add(
            Toolset::new("payouts", "RazorpayX payout operations")
                .with_tool(tools::FetchAllPayoutsTool)
                .with_tool(tools::FetchPayoutTool),
        )
        .add(
            Toolset::new("refunds", "Razorpay refund operations")
                .with_tool(tools::CreateRefundTool)
                .with_tool(tools::FetchRefundTool)
                .with_tool(tools::UpdateRefundTool)
                .with_tool(tools::FetchMultipleRefundsForPaymentTool)
                .with_tool(tools::FetchSpecificRefundForPaymentTool)
                .with_tool(tools::FetchAllRefundsTool),
        )
        .add(
            Toolset::new("settlements", "Razorpay settlement operations")
                .with_tool(tools::FetchSettlementTool)
                .with_tool(tools::FetchSettlementReconDetailsTool)
                .with_tool(tools::FetchAllSettlementsTool)
                .with_tool(tools::CreateInstantSettlementTool)
                .with_tool(tools::FetchAllInstantSettlementsTool)
                .with_tool(tools::FetchInstantSettlementTool),
        )
        .add(
            Toolset::new("qr_codes", "Razorpay UPI QR code operations")
                .with_tool(tools::CreateQrCodeTool)
                .with_tool(tools::FetchQrCodeTool)
                .with_tool(tools::FetchAllQrCodesTool)
                .with_tool(tools::FetchQrCodesByCustomerTool)
                .with_tool(tools::FetchQrCodesByPaymentTool)
                .with_tool(tools::FetchPaymentsForQrCodeTool)
                .with_tool(tools::CloseQrCodeTool),
        )
        .add(
            Toolset::new("payment_links", "Razorpay payment link operations")
                .with_tool(tools::CreatePaymentLinkTool)
                .with_tool(tools::FetchPaymentLinkTool),
        )
        .add(
            Toolset::new("docs", "Razorpay documentation lookup")
                .with_tool(tools::FetchDocsTool::new(docs)),
        );
    group
}
