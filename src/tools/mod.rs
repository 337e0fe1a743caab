//! MCP Tools implementation
//!
//! Tools are grouped by Razorpay resource. Each one declares its schema,
//! validates the agent's arguments, makes a single API call and returns the
//! API response as text.

pub mod customers;
pub mod docs;
pub mod payment_links;
pub mod payouts;
pub mod qr_codes;
pub mod refunds;
pub mod settlements;

use serde_json::Value;

use crate::error::McpResult;
use crate::protocol::ToolContext;
use crate::razorpay::ApiRequest;
use crate::server::{error_response, json_response};

// Re-export all tools for convenience
pub use customers::{CreateCustomerTool, EditCustomerTool, FetchAllCustomersTool, FetchCustomerTool};
pub use docs::{DocsSource, FetchDocsTool, HttpDocsSource};
pub use payment_links::{CreatePaymentLinkTool, FetchPaymentLinkTool};
pub use payouts::{FetchAllPayoutsTool, FetchPayoutTool};
pub use qr_codes::{
    CloseQrCodeTool, CreateQrCodeTool, FetchAllQrCodesTool, FetchPaymentsForQrCodeTool,
    FetchQrCodeTool, FetchQrCodesByCustomerTool, FetchQrCodesByPaymentTool,
};
pub use refunds::{
    CreateRefundTool, FetchAllRefundsTool, FetchMultipleRefundsForPaymentTool, FetchRefundTool,
    FetchSpecificRefundForPaymentTool, UpdateRefundTool,
};
pub use settlements::{
    CreateInstantSettlementTool, FetchAllInstantSettlementsTool, FetchAllSettlementsTool,
    FetchInstantSettlementTool, FetchSettlementReconDetailsTool, FetchSettlementTool,
};

/// Send `request` with the call's client and map the outcome to a tool result.
///
/// API failures become `"<action> failed: <reason>"` error results.
pub(crate) fn call_api(ctx: &ToolContext, request: ApiRequest, action: &str) -> McpResult<Value> {
    match ctx.client().send(request) {
        Ok(body) => json_response(&body),
        Err(e) => Ok(error_response(format!("{action} failed: {e}"))),
    }
}
