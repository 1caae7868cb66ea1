//! Integration tests for back-office order management.
//!
//! These tests require:
//! - The admin server running (cargo run -p tio-pelotte-admin)
//! - A reachable backend
//! - `ADMIN_OPERATOR_TOKEN` set to the server's token
//!
//! Run with: cargo test -p tio-pelotte-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use tio_pelotte_integration_tests::{admin_base_url, operator_token, session_client};

#[tokio::test]
#[ignore = "Requires running admin server and backend"]
async fn test_routes_reject_missing_token() {
    let client = session_client();

    for path in ["/products", "/orders", "/users", "/temp-orders"] {
        let resp = client
            .get(format!("{}{path}", admin_base_url()))
            .send()
            .await
            .expect("Failed to reach admin");

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "path: {path}");
    }
}

#[tokio::test]
#[ignore = "Requires running admin server and backend"]
async fn test_order_listing_shape() {
    let client = session_client();

    let resp = client
        .get(format!("{}/orders", admin_base_url()))
        .bearer_auth(operator_token())
        .send()
        .await
        .expect("Failed to list orders");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse orders");
    for order in body.as_array().expect("orders array") {
        assert!(order["id"].is_number());
        assert!(order["estado"].is_string());
    }
}

#[tokio::test]
#[ignore = "Requires running admin server and backend"]
async fn test_order_listing_estado_filter() {
    let client = session_client();

    let resp = client
        .get(format!("{}/orders?estado=Pendiente", admin_base_url()))
        .bearer_auth(operator_token())
        .send()
        .await
        .expect("Failed to list orders");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse orders");
    for order in body.as_array().expect("orders array") {
        assert_eq!(order["estado"], "Pendiente");
    }
}

#[tokio::test]
#[ignore = "Requires running admin server and backend"]
async fn test_invalid_estado_filter_is_rejected() {
    let client = session_client();

    let resp = client
        .get(format!("{}/orders?estado=NotAStatus", admin_base_url()))
        .bearer_auth(operator_token())
        .send()
        .await
        .expect("Failed to list orders");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running admin server and backend"]
async fn test_unknown_order_is_404() {
    let client = session_client();

    let resp = client
        .get(format!("{}/orders/999999999", admin_base_url()))
        .bearer_auth(operator_token())
        .send()
        .await
        .expect("Failed to get order");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running admin server and backend"]
async fn test_temp_orders_listing() {
    let client = session_client();

    let resp = client
        .get(format!("{}/temp-orders", admin_base_url()))
        .bearer_auth(operator_token())
        .send()
        .await
        .expect("Failed to list temp orders");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse temp orders");
    assert!(body.is_array());
}
