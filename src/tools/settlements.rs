//! Settlement tools, including instant (on-demand) settlements

use serde_json::{json, Map, Value};

use super::call_api;
use crate::error::McpResult;
use crate::protocol::{CallToolRequest, McpTool, Tool, ToolContext};
use crate::razorpay::ApiRequest;
use crate::types::Params;
use crate::validation::{ValidationError, Validator};

/// Tool for fetching a settlement by id
pub struct FetchSettlementTool;

impl Tool for FetchSettlementTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_settlement_with_id",
            "Fetch a settlement's details using its ID",
            json!({
                "type": "object",
                "properties": {
                    "settlement_id": { "type": "string", "description": "Unique identifier of the settlement, e.g. setl_FNj7g2YS5J67Rz" }
                },
                "required": ["settlement_id"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut v = Validator::new(request);
        let settlement_id = v.required_id("settlement_id");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let settlement_id = settlement_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::get(format!("/settlements/{settlement_id}")),
            "fetching settlement",
        )
    }
}

/// Tool for the combined settlement reconciliation report
pub struct FetchSettlementReconDetailsTool;

impl Tool for FetchSettlementReconDetailsTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_settlement_recon_details",
            "Fetch settlement reconciliation details for a year and month, optionally a single day",
            json!({
                "type": "object",
                "properties": {
                    "year": { "type": "integer", "description": "Year for the report, e.g. 2022" },
                    "month": { "type": "integer", "description": "Month for the report, 1-12" },
                    "day": { "type": "integer", "description": "Day of the month, 1-31" },
                    "count": { "type": "integer", "description": "Number of records to fetch (default: 10, max: 1000)" },
                    "skip": { "type": "integer", "description": "Number of records to skip" }
                },
                "required": ["year", "month"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut query = Params::new();
        let mut v = Validator::new(request);
        v.required_field::<i64>(&mut query, "year")
            .required_field::<i64>(&mut query, "month")
            .optional_field::<i64>(&mut query, "day")
            .pagination(&mut query);

        let in_range = |key: &str, max: i64| {
            query
                .get(key)
                .and_then(Value::as_i64)
                .map_or(true, |n| (1..=max).contains(&n))
        };
        if !in_range("month", 12) {
            v.add_error(ValidationError::cross_field("month must be between 1 and 12"));
        }
        if !in_range("day", 31) {
            v.add_error(ValidationError::cross_field("day must be between 1 and 31"));
        }
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        call_api(
            ctx,
            ApiRequest::get("/settlements/recon/combined").query(query),
            "fetching settlement reconciliation details",
        )
    }
}

/// Tool for listing settlements
pub struct FetchAllSettlementsTool;

impl Tool for FetchAllSettlementsTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_all_settlements",
            "Fetch all settlements, optionally filtered by creation time",
            json!({
                "type": "object",
                "properties": {
                    "from": { "type": "integer", "description": "Unix timestamp from which settlements are fetched" },
                    "to": { "type": "integer", "description": "Unix timestamp up to which settlements are fetched" },
                    "count": { "type": "integer", "description": "Number of settlements to fetch (default: 10, max: 100)" },
                    "skip": { "type": "integer", "description": "Number of settlements to skip" }
                }
            }),
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

        call_api(ctx, ApiRequest::get("/settlements").query(query), "fetching settlements")
    }
}

/// Tool for requesting an instant settlement
pub struct CreateInstantSettlementTool;

impl Tool for CreateInstantSettlementTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "create_instant_settlement",
            "Create an instant settlement of the available balance",
            json!({
                "type": "object",
                "properties": {
                    "amount": { "type": "integer", "description": "Amount to settle in the smallest currency sub-unit (paise for INR), minimum 200" },
                    "settle_full_balance": { "type": "boolean", "description": "Settle the full available balance; amount is then ignored (default: false)" },
                    "description": { "type": "string", "description": "Custom note for the settlement (max 30 characters)" },
                    "notes": { "type": "object", "description": "Key-value pairs for additional information" }
                },
                "required": ["amount"]
            }),
        )
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut payload = Params::new();
        let mut v = Validator::new(request);
        v.required_field::<i64>(&mut payload, "amount")
            .optional_field::<bool>(&mut payload, "settle_full_balance")
            .optional_field::<String>(&mut payload, "description")
            .optional_field::<Map<String, Value>>(&mut payload, "notes");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        call_api(
            ctx,
            ApiRequest::post("/settlements/ondemand").body(payload),
            "creating instant settlement",
        )
    }
}

/// Tool for listing instant settlements
pub struct FetchAllInstantSettlementsTool;

impl Tool for FetchAllInstantSettlementsTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_all_instant_settlements",
            "Fetch all instant settlements, optionally expanding related entities",
            json!({
                "type": "object",
                "properties": {
                    "from": { "type": "integer", "description": "Unix timestamp from which settlements are fetched" },
                    "to": { "type": "integer", "description": "Unix timestamp up to which settlements are fetched" },
                    "count": { "type": "integer", "description": "Number of settlements to fetch (default: 10, max: 100)" },
                    "skip": { "type": "integer", "description": "Number of settlements to skip" },
                    "expand": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Related entities to include, e.g. [\"ondemand_payouts\"]"
                    }
                }
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut query = Params::new();
        let mut v = Validator::new(request);
        v.optional_field::<i64>(&mut query, "from")
            .optional_field::<i64>(&mut query, "to")
            .pagination(&mut query)
            .expand(&mut query);
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        call_api(
            ctx,
            ApiRequest::get("/settlements/ondemand").query(query),
            "fetching instant settlements",
        )
    }
}

/// Tool for fetching an instant settlement by id
pub struct FetchInstantSettlementTool;

impl Tool for FetchInstantSettlementTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_instant_settlement_with_id",
            "Fetch an instant settlement's details using its ID",
            json!({
                "type": "object",
                "properties": {
                    "settlement_id": { "type": "string", "description": "Unique identifier of the instant settlement, e.g. setlod_FNj7g2YS5J67Rz" }
                },
                "required": ["settlement_id"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut v = Validator::new(request);
        let settlement_id = v.required_id("settlement_id");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let settlement_id = settlement_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::get(format!("/settlements/ondemand/{settlement_id}")),
            "fetching instant settlement",
        )
    }
}
