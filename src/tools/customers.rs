//! Customer tools

use serde_json::{json, Map, Value};

use super::call_api;
use crate::error::McpResult;
use crate::protocol::{CallToolRequest, McpTool, Tool, ToolContext};
use crate::razorpay::ApiRequest;
use crate::types::Params;
use crate::validation::Validator;

/// Tool for creating a customer
pub struct CreateCustomerTool;

impl Tool for CreateCustomerTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "create_customer",
            "Create a new customer in Razorpay",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Customer's name (3-50 characters)" },
                    "contact": { "type": "string", "description": "Customer's phone number" },
                    "email": { "type": "string", "description": "Customer's email address" },
                    "fail_existing": {
                        "type": "string",
                        "enum": ["0", "1"],
                        "description": "\"0\" returns the existing customer when one matches, \"1\" (default) raises an error"
                    },
                    "gstin": { "type": "string", "description": "Customer's GST number" },
                    "notes": {
                        "type": "object",
                        "description": "Key-value pairs for additional information (max 15 pairs)"
                    }
                },
                "required": ["name"]
            }),
        )
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut payload = Params::new();
        let mut v = Validator::new(request);
        v.required_field::<String>(&mut payload, "name")
            .optional_field::<String>(&mut payload, "contact")
            .optional_field::<String>(&mut payload, "email")
            .optional_field::<String>(&mut payload, "fail_existing")
            .optional_field::<String>(&mut payload, "gstin")
            .optional_field::<Map<String, Value>>(&mut payload, "notes");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        call_api(ctx, ApiRequest::post("/customers").body(payload), "creating customer")
    }
}

/// Tool for fetching one customer
pub struct FetchCustomerTool;

impl Tool for FetchCustomerTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_customer",
            "Fetch a customer's details using their ID",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": {
                        "type": "string",
                        "description": "Unique identifier of the customer, e.g. cust_1Aa00000000001"
                    }
                },
                "required": ["customer_id"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut v = Validator::new(request);
        let customer_id = v.required_id("customer_id");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let customer_id = customer_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::get(format!("/customers/{customer_id}")),
            "fetching customer",
        )
    }
}

/// Tool for editing an existing customer
pub struct EditCustomerTool;

impl Tool for EditCustomerTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "edit_customer",
            "Edit an existing customer's name, email or contact",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": { "type": "string", "description": "Unique identifier of the customer" },
                    "name": { "type": "string", "description": "New name for the customer" },
                    "email": { "type": "string", "description": "New email address" },
                    "contact": { "type": "string", "description": "New phone number" }
                },
                "required": ["customer_id"]
            }),
        )
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut payload = Params::new();
        let mut v = Validator::new(request);
        let customer_id = v.required_id("customer_id");
        v.optional_field::<String>(&mut payload, "name")
            .optional_field::<String>(&mut payload, "email")
            .optional_field::<String>(&mut payload, "contact");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let customer_id = customer_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::put(format!("/customers/{customer_id}")).body(payload),
            "editing customer",
        )
    }
}

/// Tool for listing customers
pub struct FetchAllCustomersTool;

impl Tool for FetchAllCustomersTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_all_customers",
            "Fetch all customers with optional pagination",
            json!({
                "type": "object",
                "properties": {
                    "count": { "type": "integer", "description": "Number of customers to fetch (default: 10, max: 100)" },
                    "skip": { "type": "integer", "description": "Number of customers to skip" }
                }
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut query = Params::new();
        let mut v = Validator::new(request);
        v.pagination(&mut query);
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        call_api(ctx, ApiRequest::get("/customers").query(query), "fetching customers")
    }
}
