//! Payout tools (RazorpayX)

use serde_json::{json, Value};

use super::call_api;
use crate::error::McpResult;
use crate::protocol::{CallToolRequest, McpTool, Tool, ToolContext};
use crate::razorpay::ApiRequest;
use crate::types::Params;
use crate::validation::Validator;

/// Tool for listing payouts of a business account
pub struct FetchAllPayoutsTool;

impl Tool for FetchAllPayoutsTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_all_payouts",
            "Fetch all payouts for a bank account number",
            json!({
                "type": "object",
                "properties": {
                    "account_number": {
                        "type": "string",
                        "description": "The account from which the payouts were done, e.g. 7878780080316316"
                    },
                    "count": { "type": "integer", "description": "Number of payouts to fetch (default: 10, max: 100)" },
                    "skip": { "type": "integer", "description": "Number of payouts to skip" }
                },
                "required": ["account_number"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut query = Params::new();
        let mut v = Validator::new(request);
        v.required_field::<String>(&mut query, "account_number")
            .pagination(&mut query);
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        call_api(ctx, ApiRequest::get("/payouts").query(query), "fetching payouts")
    }
}

/// Tool for fetching a payout by id
pub struct FetchPayoutTool;

impl Tool for FetchPayoutTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_payout_with_id",
            "Fetch a payout's details using its ID",
            json!({
                "type": "object",
                "properties": {
                    "payout_id": {
                        "type": "string",
                        "description": "The unique identifier of the payout, e.g. pout_00000000000001"
                    }
                },
                "required": ["payout_id"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut v = Validator::new(request);
        let payout_id = v.required_id("payout_id");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let payout_id = payout_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::get(format!("/payouts/{payout_id}")),
            "fetching payout",
        )
    }
}
