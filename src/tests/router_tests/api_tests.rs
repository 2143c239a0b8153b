use crate::router::handle;
use crate::sources::ApifyClient;
use crate::tests::utils::{body_string, get, header, test_config, test_state, StubSource};
use serde_json::{json, Value};
use std::sync::Arc;

#[test]
fn missing_token_is_a_500_with_error_body() {
    let client = ApifyClient::new(&test_config()).unwrap();
    let state = test_state(Arc::new(client));

    let resp = handle(get("/api/listings", None), &state).unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(body, json!({ "error": "API token not configured" }));
}

#[test]
fn upstream_records_are_passed_through() {
    let records = vec![json!({ "zpid": "1", "price": "$1" }), json!({ "zpid": "2" })];
    let state = test_state(StubSource::ok(records.clone()));

    let resp = handle(get("/api/listings", None), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "Access-Control-Allow-Origin"), "*");
    assert_eq!(header(&resp, "Access-Control-Allow-Methods"), "GET");

    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(body, Value::Array(records));
}

#[test]
fn normalized_flag_returns_canonical_listings() {
    let records = vec![json!({
        "id": "abc",
        "price": { "min": 1000, "max": 2000 },
        "offerType": "FOR_RENT",
        "city": "Austin"
    })];
    let state = test_state(StubSource::ok(records));

    let resp = handle(get("/api/listings?normalized=1", None), &state).unwrap();
    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();

    assert_eq!(body[0]["id"], "abc");
    assert_eq!(body[0]["price"], 1000.0);
    assert_eq!(body[0]["offerType"], "rent");
    assert_eq!(body[0]["origin"], "external");
    assert_eq!(body[0]["pictures"].as_array().map(Vec::len), Some(1));
}
