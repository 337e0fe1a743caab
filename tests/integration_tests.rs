//! Integration tests for the Razorpay MCP Server

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use razorpay_mcp::protocol::{CallToolRequest, Tool, ToolContext};
use razorpay_mcp::razorpay::{ApiError, ApiRequest, ApiResult, Method, RazorpayApi};
use razorpay_mcp::server::{is_error_response, response_text};
use razorpay_mcp::tools::{
    CloseQrCodeTool, CreateCustomerTool, CreatePaymentLinkTool, CreateQrCodeTool,
    CreateRefundTool, EditCustomerTool, FetchAllInstantSettlementsTool, FetchAllPayoutsTool,
    FetchCustomerTool, FetchQrCodesByCustomerTool, FetchSettlementReconDetailsTool,
    FetchSpecificRefundForPaymentTool, UpdateRefundTool,
};
use razorpay_mcp::validation::{ValidationError, Validator, EXPAND_KEY};
use razorpay_mcp::Params;

/// Records every request and answers with a canned response
struct RecordingClient {
    requests: Mutex<Vec<ApiRequest>>,
    response: ApiResult<Value>,
}

impl RecordingClient {
    fn ok(body: Value) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Ok(body),
        })
    }

    fn failing(err: ApiError) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Err(err),
        })
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl RazorpayApi for RecordingClient {
    fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        self.requests.lock().unwrap().push(request);
        self.response.clone()
    }
}

fn run(tool: &dyn Tool, client: &Arc<RecordingClient>, arguments: Value) -> Value {
    let ctx = ToolContext::new(client.clone());
    let request = CallToolRequest::new(&tool.name(), arguments);
    tool.execute(&ctx, &request).unwrap()
}

fn request(arguments: Value) -> CallToolRequest {
    CallToolRequest::new("any_tool", arguments)
}

// ---------------------------------------------------------------------------
// Validator scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_empty_request_missing_name() {
    let req = request(json!({}));
    let mut out = Params::new();
    let mut v = Validator::new(&req);
    v.required_field::<String>(&mut out, "name");

    assert_eq!(
        v.render().as_deref(),
        Some("Validation errors:\n- missing required parameter: name")
    );
    assert!(out.is_empty());
}

#[test]
fn test_numeric_name_is_invalid_type() {
    let req = request(json!({ "name": 12345 }));
    let mut out = Params::new();
    let mut v = Validator::new(&req);
    v.required_field::<String>(&mut out, "name");

    assert_eq!(
        v.render().as_deref(),
        Some("Validation errors:\n- invalid parameter type: name")
    );
    assert!(out.is_empty());
}

#[test]
fn test_string_count_fails_pagination() {
    let req = request(json!({ "count": "10" }));
    let mut out = Params::new();
    let mut v = Validator::new(&req);
    v.pagination(&mut out);

    assert_eq!(v.errors(), &[ValidationError::InvalidType("count".to_string())]);
    assert!(!out.contains_key("count"));
    assert!(!out.contains_key("skip"));
}

#[test]
fn test_one_good_one_bad_optional() {
    let req = request(json!({ "contact": "x", "email": 123 }));
    let mut out = Params::new();
    let mut v = Validator::new(&req);
    v.optional_field::<String>(&mut out, "contact")
        .optional_field::<String>(&mut out, "email");

    assert_eq!(out.len(), 1);
    assert_eq!(out["contact"], json!("x"));
    assert_eq!(v.errors(), &[ValidationError::InvalidType("email".to_string())]);
}

#[test]
fn test_expand_last_write_wins() {
    let req = request(json!({ "expand": ["a", "b"] }));
    let mut out = Params::new();
    let mut v = Validator::new(&req);
    v.expand(&mut out);

    assert!(!v.has_errors());
    assert_eq!(out[EXPAND_KEY], json!("b"));
}

#[test]
fn test_three_bad_fields_render_in_call_order() {
    let req = request(json!({ "zeta": 1, "alpha": "x", "mid": [1] }));
    let mut out = Params::new();
    let mut v = Validator::new(&req);
    v.required_field::<String>(&mut out, "zeta")
        .required_field::<i64>(&mut out, "alpha")
        .optional_field::<Vec<String>>(&mut out, "mid");

    let rendered = v.render().unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Validation errors:",
            "- invalid parameter type: zeta",
            "- invalid parameter type: alpha",
            "- invalid parameter type: mid",
        ]
    );
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

#[test]
fn test_create_customer_payload() {
    let client = RecordingClient::ok(json!({ "id": "cust_1", "name": "Acme" }));
    let result = run(
        &CreateCustomerTool,
        &client,
        json!({ "name": "Acme", "email": "ops@acme.test", "notes": { "tier": "gold" } }),
    );

    assert!(!is_error_response(&result));
    let sent = client.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].path, "/customers");
    assert_eq!(
        Value::Object(sent[0].body.clone().unwrap()),
        json!({ "name": "Acme", "email": "ops@acme.test", "notes": { "tier": "gold" } })
    );
    let text = response_text(&result).unwrap();
    assert_eq!(serde_json::from_str::<Value>(text).unwrap()["id"], json!("cust_1"));
}

#[test]
fn test_invalid_arguments_never_reach_api() {
    let client = RecordingClient::ok(json!({}));
    let result = run(&CreateCustomerTool, &client, json!({ "email": 42 }));

    assert!(is_error_response(&result));
    assert_eq!(
        response_text(&result),
        Some(
            "Validation errors:\n\
             - missing required parameter: name\n\
             - invalid parameter type: email"
        )
    );
    assert!(client.requests().is_empty());
}

#[test]
fn test_edit_customer_uses_put() {
    let client = RecordingClient::ok(json!({ "id": "cust_1" }));
    run(&EditCustomerTool, &client, json!({ "customer_id": "cust_1", "contact": "9000090000" }));

    let sent = client.requests();
    assert_eq!(sent[0].method, Method::Put);
    assert_eq!(sent[0].path, "/customers/cust_1");
    assert_eq!(Value::Object(sent[0].body.clone().unwrap()), json!({ "contact": "9000090000" }));
}

#[test]
fn test_fetch_all_payouts_requires_account() {
    let client = RecordingClient::ok(json!({ "items": [] }));
    let result = run(&FetchAllPayoutsTool, &client, json!({ "count": 5 }));
    assert_eq!(
        response_text(&result),
        Some("Validation errors:\n- missing required parameter: account_number")
    );

    run(&FetchAllPayoutsTool, &client, json!({ "account_number": "7878780080316316", "count": 5 }));
    let sent = client.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        Value::Object(sent[0].query.clone()),
        json!({ "account_number": "7878780080316316", "count": 5 })
    );
}

#[test]
fn test_api_error_becomes_tool_error() {
    let client = RecordingClient::failing(ApiError::Api {
        status: 400,
        code: "BAD_REQUEST_ERROR".to_string(),
        description: "The payment has been fully refunded already".to_string(),
    });
    let result = run(&CreateRefundTool, &client, json!({ "payment_id": "pay_1", "amount": 100 }));

    assert!(is_error_response(&result));
    assert_eq!(
        response_text(&result),
        Some("creating refund failed: The payment has been fully refunded already")
    );
    assert_eq!(client.requests()[0].path, "/payments/pay_1/refund");
}

#[test]
fn test_update_refund_requires_notes_object() {
    let client = RecordingClient::ok(json!({}));
    let result = run(&UpdateRefundTool, &client, json!({ "refund_id": "rfnd_1", "notes": "x" }));
    assert_eq!(
        response_text(&result),
        Some("Validation errors:\n- invalid parameter type: notes")
    );

    run(&UpdateRefundTool, &client, json!({ "refund_id": "rfnd_1", "notes": { "reason": "dup" } }));
    let sent = client.requests();
    assert_eq!(sent[0].method, Method::Patch);
    assert_eq!(sent[0].path, "/refunds/rfnd_1");
}

#[test]
fn test_specific_refund_path() {
    let client = RecordingClient::ok(json!({}));
    run(
        &FetchSpecificRefundForPaymentTool,
        &client,
        json!({ "payment_id": "pay_1", "refund_id": "rfnd_2" }),
    );
    assert_eq!(client.requests()[0].path, "/payments/pay_1/refunds/rfnd_2");
}

#[test]
fn test_recon_details_range_checks() {
    let client = RecordingClient::ok(json!({}));
    let result = run(
        &FetchSettlementReconDetailsTool,
        &client,
        json!({ "year": 2024, "month": 13, "day": 0 }),
    );
    assert_eq!(
        response_text(&result),
        Some(
            "Validation errors:\n\
             - month must be between 1 and 12\n\
             - day must be between 1 and 31"
        )
    );
    assert!(client.requests().is_empty());

    run(&FetchSettlementReconDetailsTool, &client, json!({ "year": 2024, "month": 2.0 }));
    let sent = client.requests();
    assert_eq!(sent[0].path, "/settlements/recon/combined");
    assert_eq!(Value::Object(sent[0].query.clone()), json!({ "year": 2024, "month": 2 }));
}

#[test]
fn test_instant_settlements_expand() {
    let client = RecordingClient::ok(json!({ "items": [] }));
    run(
        &FetchAllInstantSettlementsTool,
        &client,
        json!({ "expand": ["ondemand_payouts", "ledger"], "count": 2 }),
    );

    let query = &client.requests()[0].query;
    assert_eq!(query[EXPAND_KEY], json!("ledger"));
    assert_eq!(query["count"], json!(2));
}

#[test]
fn test_qr_code_fixed_amount_rule() {
    let client = RecordingClient::ok(json!({ "id": "qr_1" }));
    let result = run(
        &CreateQrCodeTool,
        &client,
        json!({ "type": "upi_qr", "usage": "single_use", "fixed_amount": true }),
    );
    assert_eq!(
        response_text(&result),
        Some("Validation errors:\n- payment_amount is required when fixed_amount is true")
    );
    assert!(client.requests().is_empty());

    let result = run(
        &CreateQrCodeTool,
        &client,
        json!({ "type": "upi_qr", "usage": "single_use", "fixed_amount": true, "payment_amount": 300 }),
    );
    assert!(!is_error_response(&result));
    assert_eq!(client.requests()[0].path, "/payments/qr_codes");
}

#[test]
fn test_qr_code_queries_and_close() {
    let client = RecordingClient::ok(json!({}));
    run(&FetchQrCodesByCustomerTool, &client, json!({ "customer_id": "cust_1" }));
    run(&CloseQrCodeTool, &client, json!({ "qr_code_id": "qr_1" }));

    let sent = client.requests();
    assert_eq!(Value::Object(sent[0].query.clone()), json!({ "customer_id": "cust_1" }));
    assert_eq!(sent[1].method, Method::Post);
    assert_eq!(sent[1].path, "/payments/qr_codes/qr_1/close");
    assert!(sent[1].body.is_none());
}

#[test]
fn test_payment_link_nests_customer() {
    let client = RecordingClient::ok(json!({ "id": "plink_1" }));
    run(
        &CreatePaymentLinkTool,
        &client,
        json!({
            "amount": 1000,
            "currency": "INR",
            "customer_name": "Jane",
            "customer_email": "jane@example.test"
        }),
    );

    let body = Value::Object(client.requests()[0].body.clone().unwrap());
    assert_eq!(
        body,
        json!({
            "amount": 1000,
            "currency": "INR",
            "customer": { "name": "Jane", "email": "jane@example.test" }
        })
    );
}

#[test]
fn test_payment_link_without_customer_fields() {
    let client = RecordingClient::ok(json!({ "id": "plink_2" }));
    run(&CreatePaymentLinkTool, &client, json!({ "amount": 500, "currency": "INR" }));

    let body = client.requests()[0].body.clone().unwrap();
    assert!(!body.contains_key("customer"));
}

#[test]
fn test_ids_cannot_escape_their_path_segment() {
    let client = RecordingClient::ok(json!({}));

    let result = run(&FetchCustomerTool, &client, json!({ "customer_id": "" }));
    assert_eq!(
        response_text(&result),
        Some("Validation errors:\n- invalid parameter type: customer_id")
    );

    let result = run(
        &FetchCustomerTool,
        &client,
        json!({ "customer_id": "../payouts?account_number=1" }),
    );
    assert!(is_error_response(&result));

    let result = run(
        &CloseQrCodeTool,
        &client,
        json!({ "qr_code_id": "../../customers/cust_1" }),
    );
    assert_eq!(
        response_text(&result),
        Some("Validation errors:\n- invalid parameter type: qr_code_id")
    );

    let result = run(
        &FetchSpecificRefundForPaymentTool,
        &client,
        json!({ "payment_id": "pay_1", "refund_id": "rfnd_1#frag" }),
    );
    assert!(is_error_response(&result));

    assert!(client.requests().is_empty());
}

#[test]
fn test_refund_amount_declared_as_integer() {
    let definition = CreateRefundTool.definition();
    assert_eq!(
        definition.input_schema["properties"]["amount"]["type"],
        json!("integer")
    );
}

// ---------------------------------------------------------------------------
// Dispatcher over the default toolsets
// ---------------------------------------------------------------------------

mod dispatcher {
    use super::*;

    use razorpay_mcp::razorpay::ApiResult;
    use razorpay_mcp::server::Dispatcher;
    use razorpay_mcp::tools::DocsSource;
    use razorpay_mcp::toolsets::default_toolsets;

    struct NoDocs;

    impl DocsSource for NoDocs {
        fn fetch(&self, _url: &str) -> ApiResult<String> {
            Ok(String::new())
        }
    }

    fn dispatcher(read_only: bool, client: Arc<RecordingClient>) -> Dispatcher {
        let mut group = default_toolsets(read_only, Arc::new(NoDocs));
        group.enable(&[]).unwrap();
        let mut dispatcher = Dispatcher::default().with_default_client(client);
        group.register(&mut dispatcher);
        dispatcher
    }

    fn call(dispatcher: &Dispatcher, raw: &str) -> Value {
        let reply = dispatcher.handle_message(raw, None).unwrap();
        serde_json::to_value(reply).unwrap()
    }

    #[test]
    fn test_read_only_hides_write_tools() {
        let d = dispatcher(true, RecordingClient::ok(json!({})));
        let reply = call(&d, r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#);
        let names: Vec<&str> = reply["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();

        assert!(names.contains(&"fetch_customer"));
        assert!(names.contains(&"fetch_razorpay_docs"));
        assert!(!names.contains(&"create_customer"));
        assert!(!names.contains(&"close_qr_code"));
    }

    #[test]
    fn test_tool_call_round_trip() {
        let client = RecordingClient::ok(json!({ "id": "pout_1", "status": "processed" }));
        let d = dispatcher(false, client.clone());
        let reply = call(
            &d,
            r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"fetch_payout_with_id","arguments":{"payout_id":"pout_1"}}}"#,
        );

        assert_eq!(reply["id"], json!(7));
        assert!(reply["result"]["isError"].is_null());
        let text = reply["result"]["content"][0]["text"].as_str().unwrap();
        assert_eq!(serde_json::from_str::<Value>(text).unwrap()["status"], json!("processed"));
        assert_eq!(client.requests()[0].path, "/payouts/pout_1");
    }

    #[test]
    fn test_validation_failure_is_a_result() {
        let client = RecordingClient::ok(json!({}));
        let d = dispatcher(false, client.clone());
        let reply = call(
            &d,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"fetch_all_customers","arguments":{"count":"10"}}}"#,
        );

        assert!(reply.get("error").is_none());
        assert_eq!(reply["result"]["isError"], json!(true));
        assert_eq!(
            reply["result"]["content"][0]["text"],
            json!("Validation errors:\n- invalid parameter type: count")
        );
        assert!(client.requests().is_empty());
    }
}
