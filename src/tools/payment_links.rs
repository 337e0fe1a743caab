//! Payment link tools

use serde_json::{json, Map, Value};

use super::call_api;
use crate::error::McpResult;
use crate::protocol::{CallToolRequest, McpTool, Tool, ToolContext};
use crate::razorpay::ApiRequest;
use crate::types::Params;
use crate::validation::{ValidationError, Validator};

/// Tool for creating a standard payment link
pub struct CreatePaymentLinkTool;

impl Tool for CreatePaymentLinkTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "create_payment_link",
            "Create a standard payment link that can be shared with a customer",
            json!({
                "type": "object",
                "properties": {
                    "amount": { "type": "integer", "description": "Amount in the smallest currency sub-unit (paise for INR), minimum 100" },
                    "currency": { "type": "string", "description": "Three-letter ISO currency code, e.g. INR" },
                    "description": { "type": "string", "description": "Purpose of the payment" },
                    "reference_id": { "type": "string", "description": "Your reference for the link, must be unique" },
                    "accept_partial": { "type": "boolean", "description": "Allow the customer to pay in parts" },
                    "first_min_partial_amount": { "type": "integer", "description": "Minimum first partial payment; needs accept_partial" },
                    "expire_by": { "type": "integer", "description": "Unix timestamp at which the link expires" },
                    "customer_name": { "type": "string", "description": "Name of the customer" },
                    "customer_email": { "type": "string", "description": "Email address of the customer" },
                    "customer_contact": { "type": "string", "description": "Phone number of the customer" },
                    "callback_url": { "type": "string", "description": "URL the customer is redirected to after payment" },
                    "callback_method": { "type": "string", "enum": ["get"], "description": "HTTP method for the callback" },
                    "notes": { "type": "object", "description": "Key-value pairs for additional information" }
                },
                "required": ["amount", "currency"]
            }),
        )
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut payload = Params::new();
        let mut customer = Params::new();
        let mut v = Validator::new(request);
        v.required_field::<i64>(&mut payload, "amount")
            .required_field::<String>(&mut payload, "currency")
            .optional_field::<String>(&mut payload, "description")
            .optional_field::<String>(&mut payload, "reference_id")
            .optional_field::<bool>(&mut payload, "accept_partial")
            .optional_field::<i64>(&mut payload, "first_min_partial_amount")
            .optional_field::<i64>(&mut payload, "expire_by")
            .optional_field_to_key::<String>(&mut customer, "customer_name", "name")
            .optional_field_to_key::<String>(&mut customer, "customer_email", "email")
            .optional_field_to_key::<String>(&mut customer, "customer_contact", "contact")
            .optional_field::<String>(&mut payload, "callback_url")
            .optional_field::<String>(&mut payload, "callback_method")
            .optional_field::<Map<String, Value>>(&mut payload, "notes");

        let accept_partial = payload
            .get("accept_partial")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if payload.contains_key("first_min_partial_amount") && !accept_partial {
            v.add_error(ValidationError::cross_field(
                "first_min_partial_amount requires accept_partial to be true",
            ));
        }
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        if !customer.is_empty() {
            payload.insert("customer".to_string(), Value::Object(customer));
        }

        call_api(
            ctx,
            ApiRequest::post("/payment_links").body(payload),
            "creating payment link",
        )
    }
}

/// Tool for fetching a payment link by id
pub struct FetchPaymentLinkTool;

impl Tool for FetchPaymentLinkTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_payment_link",
            "Fetch a payment link's details using its ID",
            json!({
                "type": "object",
                "properties": {
                    "payment_link_id": { "type": "string", "description": "Unique identifier of the payment link, e.g. plink_ExjpAUN3gVHrPJ" }
                },
                "required": ["payment_link_id"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut v = Validator::new(request);
        let payment_link_id = v.required_id("payment_link_id");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let payment_link_id = payment_link_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::get(format!("/payment_links/{payment_link_id}")),
            "fetching payment link",
        )
    }
}
