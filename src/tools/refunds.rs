//! Refund tools

use serde_json::{json, Map, Value};

use super::call_api;
use crate::error::McpResult;
use crate::protocol::{CallToolRequest, McpTool, Tool, ToolContext};
use crate::razorpay::ApiRequest;
use crate::types::Params;
use crate::validation::Validator;

fn list_schema(extra: Value, required: &[&str]) -> Value {
    let mut properties = json!({
        "from": { "type": "integer", "description": "Unix timestamp at which refunds start" },
        "to": { "type": "integer", "description": "Unix timestamp up to which refunds are fetched" },
        "count": { "type": "integer", "description": "Number of refunds to fetch (default: 10, max: 100)" },
        "skip": { "type": "integer", "description": "Number of refunds to skip" }
    });
    if let (Some(props), Some(extra)) = (properties.as_object_mut(), extra.as_object()) {
        props.extend(extra.clone());
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Tool for refunding a captured payment
pub struct CreateRefundTool;

impl Tool for CreateRefundTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "create_refund",
            "Create a refund for a captured payment. Omitting amount refunds the full payment",
            json!({
                "type": "object",
                "properties": {
                    "payment_id": { "type": "string", "description": "Unique identifier of the payment to refund" },
                    "amount": { "type": "integer", "description": "Amount to refund in the smallest currency sub-unit (paise for INR)" },
                    "speed": {
                        "type": "string",
                        "enum": ["normal", "optimum"],
                        "description": "Refund processing speed"
                    },
                    "receipt": { "type": "string", "description": "Your internal reference for the refund" },
                    "notes": { "type": "object", "description": "Key-value pairs for additional information" }
                },
                "required": ["payment_id"]
            }),
        )
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut payload = Params::new();
        let mut v = Validator::new(request);
        let payment_id = v.required_id("payment_id");
        v.optional_field::<i64>(&mut payload, "amount")
            .optional_field::<String>(&mut payload, "speed")
            .optional_field::<String>(&mut payload, "receipt")
            .optional_field::<Map<String, Value>>(&mut payload, "notes");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let payment_id = payment_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::post(format!("/payments/{payment_id}/refund")).body(payload),
            "creating refund",
        )
    }
}

/// Tool for fetching a refund by id
pub struct FetchRefundTool;

impl Tool for FetchRefundTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_refund",
            "Fetch a refund's details using its ID",
            json!({
                "type": "object",
                "properties": {
                    "refund_id": { "type": "string", "description": "Unique identifier of the refund, e.g. rfnd_FP8DDKxqJif6ca" }
                },
                "required": ["refund_id"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut v = Validator::new(request);
        let refund_id = v.required_id("refund_id");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let refund_id = refund_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::get(format!("/refunds/{refund_id}")),
            "fetching refund",
        )
    }
}

/// Tool for replacing the notes of a refund
pub struct UpdateRefundTool;

impl Tool for UpdateRefundTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "update_refund",
            "Update the notes of an existing refund",
            json!({
                "type": "object",
                "properties": {
                    "refund_id": { "type": "string", "description": "Unique identifier of the refund" },
                    "notes": { "type": "object", "description": "Key-value pairs replacing the refund's notes (max 15 pairs)" }
                },
                "required": ["refund_id", "notes"]
            }),
        )
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut payload = Params::new();
        let mut v = Validator::new(request);
        let refund_id = v.required_id("refund_id");
        v.required_field::<Map<String, Value>>(&mut payload, "notes");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let refund_id = refund_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::patch(format!("/refunds/{refund_id}")).body(payload),
            "updating refund",
        )
    }
}

/// Tool for listing the refunds of one payment
pub struct FetchMultipleRefundsForPaymentTool;

impl Tool for FetchMultipleRefundsForPaymentTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_multiple_refunds_for_payment",
            "Fetch the refunds issued against a payment",
            list_schema(
                json!({
                    "payment_id": { "type": "string", "description": "Unique identifier of the payment" }
                }),
                &["payment_id"],
            ),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut query = Params::new();
        let mut v = Validator::new(request);
        let payment_id = v.required_id("payment_id");
        v.optional_field::<i64>(&mut query, "from")
            .optional_field::<i64>(&mut query, "to")
            .pagination(&mut query);
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let payment_id = payment_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::get(format!("/payments/{payment_id}/refunds")).query(query),
            "fetching multiple refunds",
        )
    }
}

/// Tool for fetching one refund of one payment
pub struct FetchSpecificRefundForPaymentTool;

impl Tool for FetchSpecificRefundForPaymentTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_specific_refund_for_payment",
            "Fetch a specific refund issued against a payment",
            json!({
                "type": "object",
                "properties": {
                    "payment_id": { "type": "string", "description": "Unique identifier of the payment" },
                    "refund_id": { "type": "string", "description": "Unique identifier of the refund" }
                },
                "required": ["payment_id", "refund_id"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut v = Validator::new(request);
        let payment_id = v.required_id("payment_id");
        let refund_id = v.required_id("refund_id");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let payment_id = payment_id.unwrap_or_default();
        let refund_id = refund_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::get(format!("/payments/{payment_id}/refunds/{refund_id}")),
            "fetching specific refund for payment",
        )
    }
}

/// Tool for listing all refunds
pub struct FetchAllRefundsTool;

impl Tool for FetchAllRefundsTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_all_refunds",
            "Fetch all refunds, optionally filtered by creation time",
            list_schema(json!({}), &[]),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut query = Params::new();
        let mut v = Validator::new(request);
        v.optional_field::<i64>(&mut query, "from")
            .optional_field::<i64>(&mut query, "to")
            .pagination(&mut query);
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        call_api(ctx, ApiRequest::get("/refunds").query(query), "fetching refunds")
    }
}
