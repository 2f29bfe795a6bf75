//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use iglobal_core::{
    ClientConfig, ClientError, Credentials, DateFilter, HttpResponse, OrderClient, OrderId,
    OrderLookup, OrderNumbersQuery, TempCart,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000/v1";

/// Build/parse never touch the transport, so none is needed here.
fn client() -> OrderClient<()> {
    OrderClient::with_config(
        Credentials::new(0, "secret key").unwrap(),
        ClientConfig::new(BASE_URL),
        (),
    )
    .unwrap()
}

fn opt_str(value: &Value, key: &str) -> Option<String> {
    value[key].as_str().map(str::to_string)
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn assert_request(name: &str, req: &iglobal_core::HttpRequest, expected: &Value) {
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );
    let body: Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body, expected["body"], "{name}: body");
}

fn assert_remote_error(name: &str, err: ClientError, case: &Value) {
    let status = case["simulated_response"]["status"].as_u64().unwrap() as u16;
    match err {
        ClientError::RemoteApi { status: got, body } => {
            assert_eq!(got, status, "{name}: status");
            assert_eq!(body, case["simulated_response"]["body"], "{name}: body");
        }
        other => panic!("{name}: expected RemoteApi, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// orderNumbers
// ---------------------------------------------------------------------------

#[test]
fn order_numbers_test_vectors() {
    let raw = include_str!("../../test-vectors/order_numbers.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let query = OrderNumbersQuery {
            since_order_id: opt_str(input, "sinceOrderId").map(OrderId::from),
            since_date: opt_str(input, "sinceDate").map(DateFilter::from),
            through_date: opt_str(input, "throughDate").map(DateFilter::from),
        };

        if case["expected_error"] == "Validation" {
            let err = c.build_order_numbers(&query).unwrap_err();
            assert!(matches!(err, ClientError::Validation { .. }), "{name}: expected Validation");
            continue;
        }

        // Verify build
        let req = c.build_order_numbers(&query).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let result = c.parse_order_numbers(simulated(case));
        if case["expected_error"] == "RemoteApi" {
            assert_remote_error(name, result.unwrap_err(), case);
            continue;
        }
        let numbers = result.unwrap();
        let expected = &case["expected_result"];
        assert_eq!(numbers.order_count, expected["orderCount"].as_u64().unwrap(), "{name}: count");
        let ids: Vec<&str> = numbers.orders.iter().map(OrderId::as_str).collect();
        let expected_ids: Vec<&str> = expected["orders"]
            .as_array()
            .unwrap()
            .iter()
            .map(|id| id.as_str().unwrap())
            .collect();
        assert_eq!(ids, expected_ids, "{name}: orders");
    }
}

// ---------------------------------------------------------------------------
// orderDetail
// ---------------------------------------------------------------------------

#[test]
fn order_detail_test_vectors() {
    let raw = include_str!("../../test-vectors/order_detail.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let lookup = OrderLookup {
            order_id: opt_str(input, "orderId").map(OrderId::from),
            reference_id: opt_str(input, "referenceId"),
        };

        if case["expected_error"] == "Validation" {
            let err = c.build_order_detail(&lookup).unwrap_err();
            assert!(matches!(err, ClientError::Validation { .. }), "{name}: expected Validation");
            continue;
        }

        let req = c.build_order_detail(&lookup).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_order_detail(simulated(case));
        if case["expected_error"] == "RemoteApi" {
            assert_remote_error(name, result.unwrap_err(), case);
            continue;
        }
        let order = result.unwrap();
        for (key, expected) in case["expected_result"].as_object().unwrap() {
            let expected = expected.as_str().unwrap();
            let actual = match key.as_str() {
                "id" => order.id.as_ref().map(|id| id.to_string()),
                "status" => order.status.clone(),
                "referenceId" => order.reference_id.clone(),
                "grandTotal" => order.grand_total.map(|t| t.to_string()),
                other => order.get(other).and_then(Value::as_str).map(str::to_string),
            };
            assert_eq!(actual.as_deref(), Some(expected), "{name}: {key}");
        }
    }
}

// ---------------------------------------------------------------------------
// createTempCart
// ---------------------------------------------------------------------------

#[test]
fn create_temp_cart_test_vectors() {
    let raw = include_str!("../../test-vectors/create_temp_cart.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        if let Some(field) = case["expected_error"].as_str() {
            let err = TempCart::from_value(&case["input"]).unwrap_err();
            assert_eq!(err.field(), Some(field), "{name}: offending field");
            continue;
        }

        let cart = TempCart::from_value(&case["input"]).unwrap();
        let req = c.build_create_temp_cart(&cart).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let created = c.parse_create_temp_cart(simulated(case)).unwrap();
        assert_eq!(
            created.temp_cart_uuid.to_string(),
            case["expected_result"].as_str().unwrap(),
            "{name}: uuid"
        );
    }
}
