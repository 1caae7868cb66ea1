//! Integration tests for catalog browsing.
//!
//! These tests require:
//! - The storefront server running (cargo run -p tio-pelotte-storefront)
//! - A reachable backend with at least one active product
//!
//! Run with: cargo test -p tio-pelotte-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use tio_pelotte_integration_tests::{session_client, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront and backend"]
async fn test_health() {
    let client = session_client();
    let resp = client
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront and backend"]
async fn test_product_listing_shape() {
    let client = session_client();
    let resp = client
        .get(format!("{}/products", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get products");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body["products"].is_array());
    assert!(body["page"].is_number());
    assert!(body["total_pages"].is_number());
}

#[tokio::test]
#[ignore = "Requires running storefront and backend"]
async fn test_out_of_range_page_resets_to_first() {
    let client = session_client();
    let resp = client
        .get(format!("{}/products?page=9999", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get products");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["page"], 1);
}

#[tokio::test]
#[ignore = "Requires running storefront and backend"]
async fn test_offers_filter_only_returns_offers() {
    let client = session_client();
    let resp = client
        .get(format!("{}/products?offers=true", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get products");

    let body: Value = resp.json().await.expect("Failed to parse response");
    for product in body["products"].as_array().expect("products array") {
        assert_eq!(product["offer"], true);
    }
}

#[tokio::test]
#[ignore = "Requires running storefront and backend"]
async fn test_sort_price_asc_is_ordered() {
    let client = session_client();
    let resp = client
        .get(format!("{}/products?sort=price_asc", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get products");

    let body: Value = resp.json().await.expect("Failed to parse response");
    let prices: Vec<f64> = body["products"]
        .as_array()
        .expect("products array")
        .iter()
        .filter_map(|p| p["price"].as_str().and_then(|s| s.parse().ok()))
        .collect();

    let mut sorted = prices.clone();
    sorted.sort_by(f64::total_cmp);
    assert_eq!(prices, sorted);
}

#[tokio::test]
#[ignore = "Requires running storefront and backend"]
async fn test_unknown_product_is_404() {
    let client = session_client();
    let resp = client
        .get(format!(
            "{}/products/definitely-not-a-real-pasta",
            storefront_base_url()
        ))
        .send()
        .await
        .expect("Failed to get product");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
