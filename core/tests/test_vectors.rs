//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use customer_core::{ApiError, Customer, CustomerClient, CustomerRequest, HttpMethod, HttpRequest, HttpResponse};
use serde_json::Value;
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1.0/customers";
const HOST: &str = "http://localhost:8080";

fn client() -> CustomerClient {
    CustomerClient::new(BASE_URL)
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: pairs(&sim["headers"]),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Method, path and query must match; bodies are checked per operation.
fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    let method: HttpMethod = expected["method"].as_str().unwrap().parse().unwrap();
    assert_eq!(req.method, method, "{name}: method");
    assert_eq!(req.path, format!("{HOST}{}", expected["path"].as_str().unwrap()), "{name}: path");
    assert_eq!(req.query, pairs(&expected["query"]), "{name}: query");
}

fn assert_expected_error(name: &str, err: ApiError, expected: &str) {
    match expected {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound, got {err:?}"),
        other => {
            let status: u16 = other
                .strip_prefix("HttpError:")
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(|| panic!("{name}: unknown expected_error: {other}"));
            assert!(
                matches!(err, ApiError::HttpError { status: s, .. } if s == status),
                "{name}: expected HTTP {status}, got {err:?}"
            );
        }
    }
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CustomerRequest = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_create_customer(&input).unwrap();
        assert_request(name, &req, expected_req);
        assert_eq!(req.headers, pairs(&expected_req["headers"]), "{name}: headers");
        let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        let customer = c.parse_create_customer(simulated(&case)).unwrap();
        let expected: Customer = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(customer, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id: Uuid = case["input_id"].as_str().unwrap().parse().unwrap();

        let req = c.build_get_customer(id);
        assert_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_get_customer(simulated(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let expected: Customer = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Patch contact
// ---------------------------------------------------------------------------

#[test]
fn patch_contact_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/patch_contact.json")) {
        let name = case["name"].as_str().unwrap();
        let id: Uuid = case["input_id"].as_str().unwrap().parse().unwrap();
        let number = case["input_contact_number"].as_str().unwrap();

        let req = c.build_patch_contact(id, number);
        assert_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_patch_contact(simulated(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let expected: Customer = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[test]
fn options_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/options.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_allowed_methods();
        assert_request(name, &req, &case["expected_request"]);

        let methods = c.parse_allowed_methods(simulated(&case)).unwrap();
        let expected: Vec<String> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(methods, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id: Uuid = case["input_id"].as_str().unwrap().parse().unwrap();

        let req = c.build_delete_customer(id);
        assert_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_delete_customer(simulated(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
