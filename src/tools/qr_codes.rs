//! UPI QR code tools

use serde_json::{json, Map, Value};

use super::call_api;
use crate::error::McpResult;
use crate::protocol::{CallToolRequest, McpTool, Tool, ToolContext};
use crate::razorpay::ApiRequest;
use crate::types::Params;
use crate::validation::{ValidationError, Validator};

const QR_CODES_PATH: &str = "/payments/qr_codes";

/// Tool for creating a UPI QR code
pub struct CreateQrCodeTool;

impl Tool for CreateQrCodeTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "create_qr_code",
            "Create a UPI QR code for collecting payments",
            json!({
                "type": "object",
                "properties": {
                    "type": { "type": "string", "description": "The type of QR code; only \"upi_qr\" is supported" },
                    "name": { "type": "string", "description": "Label for the QR code, e.g. \"Store Front Display\"" },
                    "usage": {
                        "type": "string",
                        "enum": ["single_use", "multiple_use"],
                        "description": "Whether the QR code accepts one payment or many"
                    },
                    "fixed_amount": { "type": "boolean", "description": "Whether the QR code only accepts payment_amount (default: false)" },
                    "payment_amount": { "type": "integer", "description": "Amount in paise; required when fixed_amount is true" },
                    "description": { "type": "string", "description": "Brief description of the QR code" },
                    "customer_id": { "type": "string", "description": "Customer the QR code is issued for" },
                    "close_by": { "type": "integer", "description": "Unix timestamp at which the QR code closes automatically" },
                    "notes": { "type": "object", "description": "Key-value pairs for additional information" }
                },
                "required": ["type", "usage"]
            }),
        )
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut payload = Params::new();
        let mut v = Validator::new(request);
        v.required_field::<String>(&mut payload, "type")
            .optional_field::<String>(&mut payload, "name")
            .required_field::<String>(&mut payload, "usage")
            .optional_field::<bool>(&mut payload, "fixed_amount")
            .optional_field::<i64>(&mut payload, "payment_amount")
            .optional_field::<String>(&mut payload, "description")
            .optional_field::<String>(&mut payload, "customer_id")
            .optional_field::<i64>(&mut payload, "close_by")
            .optional_field::<Map<String, Value>>(&mut payload, "notes");

        let fixed_amount = payload
            .get("fixed_amount")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if fixed_amount && !payload.contains_key("payment_amount") {
            v.add_error(ValidationError::cross_field(
                "payment_amount is required when fixed_amount is true",
            ));
        }
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        call_api(
            ctx,
            ApiRequest::post(QR_CODES_PATH).body(payload),
            "creating QR code",
        )
    }
}

/// Tool for fetching a QR code by id
pub struct FetchQrCodeTool;

impl Tool for FetchQrCodeTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_qr_code",
            "Fetch a QR code's details using its ID",
            json!({
                "type": "object",
                "properties": {
                    "qr_code_id": { "type": "string", "description": "Unique identifier of the QR code, e.g. qr_FuZIYx6rMbP6gs" }
                },
                "required": ["qr_code_id"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut v = Validator::new(request);
        let qr_code_id = v.required_id("qr_code_id");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let qr_code_id = qr_code_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::get(format!("{QR_CODES_PATH}/{qr_code_id}")),
            "fetching QR code",
        )
    }
}

/// Tool for listing QR codes
pub struct FetchAllQrCodesTool;

impl Tool for FetchAllQrCodesTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_all_qr_codes",
            "Fetch all QR codes, optionally filtered by creation time",
            json!({
                "type": "object",
                "properties": {
                    "from": { "type": "integer", "description": "Unix timestamp from which QR codes are fetched" },
                    "to": { "type": "integer", "description": "Unix timestamp up to which QR codes are fetched" },
                    "count": { "type": "integer", "description": "Number of QR codes to fetch (default: 10, max: 100)" },
                    "skip": { "type": "integer", "description": "Number of QR codes to skip" }
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

        call_api(ctx, ApiRequest::get(QR_CODES_PATH).query(query), "fetching QR codes")
    }
}

/// Tool for listing the QR codes issued to a customer
pub struct FetchQrCodesByCustomerTool;

impl Tool for FetchQrCodesByCustomerTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_qr_codes_by_customer_id",
            "Fetch all QR codes issued to a customer",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": { "type": "string", "description": "Unique identifier of the customer" }
                },
                "required": ["customer_id"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut query = Params::new();
        let mut v = Validator::new(request);
        v.required_field::<String>(&mut query, "customer_id");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        call_api(
            ctx,
            ApiRequest::get(QR_CODES_PATH).query(query),
            "fetching QR codes by customer",
        )
    }
}

/// Tool for finding the QR code a payment was made through
pub struct FetchQrCodesByPaymentTool;

impl Tool for FetchQrCodesByPaymentTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_qr_codes_by_payment_id",
            "Fetch the QR code a payment was made through",
            json!({
                "type": "object",
                "properties": {
                    "payment_id": { "type": "string", "description": "Unique identifier of the payment" }
                },
                "required": ["payment_id"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut query = Params::new();
        let mut v = Validator::new(request);
        v.required_field::<String>(&mut query, "payment_id");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }

        call_api(
            ctx,
            ApiRequest::get(QR_CODES_PATH).query(query),
            "fetching QR codes by payment",
        )
    }
}

/// Tool for listing payments received on a QR code
pub struct FetchPaymentsForQrCodeTool;

impl Tool for FetchPaymentsForQrCodeTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "fetch_payments_for_qr_code",
            "Fetch the payments received on a QR code",
            json!({
                "type": "object",
                "properties": {
                    "qr_code_id": { "type": "string", "description": "Unique identifier of the QR code" },
                    "from": { "type": "integer", "description": "Unix timestamp from which payments are fetched" },
                    "to": { "type": "integer", "description": "Unix timestamp up to which payments are fetched" },
                    "count": { "type": "integer", "description": "Number of payments to fetch (default: 10, max: 100)" },
                    "skip": { "type": "integer", "description": "Number of payments to skip" }
                },
                "required": ["qr_code_id"]
            }),
        )
        .read_only()
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut query = Params::new();
        let mut v = Validator::new(request);
        let qr_code_id = v.required_id("qr_code_id");
        v.optional_field::<i64>(&mut query, "from")
            .optional_field::<i64>(&mut query, "to")
            .pagination(&mut query);
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let qr_code_id = qr_code_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::get(format!("{QR_CODES_PATH}/{qr_code_id}/payments")).query(query),
            "fetching payments for QR code",
        )
    }
}

/// Tool for closing a QR code so it stops accepting payments
pub struct CloseQrCodeTool;

impl Tool for CloseQrCodeTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "close_qr_code",
            "Close a QR code so that it no longer accepts payments",
            json!({
                "type": "object",
                "properties": {
                    "qr_code_id": { "type": "string", "description": "Unique identifier of the QR code to close" }
                },
                "required": ["qr_code_id"]
            }),
        )
    }

    fn execute(&self, ctx: &ToolContext, request: &CallToolRequest) -> McpResult<Value> {
        let mut v = Validator::new(request);
        let qr_code_id = v.required_id("qr_code_id");
        if let Some(result) = v.handle_errors_if_any() {
            return Ok(result);
        }
        let qr_code_id = qr_code_id.unwrap_or_default();

        call_api(
            ctx,
            ApiRequest::post(format!("{QR_CODES_PATH}/{qr_code_id}/close")),
            "closing QR code",
        )
    }
}
