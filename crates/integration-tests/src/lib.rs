//! Integration tests for Tío Pelotte.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the services against a test backend
//! cargo run -p tio-pelotte-storefront &
//! cargo run -p tio-pelotte-admin &
//!
//! # Run integration tests
//! cargo test -p tio-pelotte-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Catalog browsing, filtering, pagination
//! - `storefront_checkout` - Cart and checkout flows
//! - `admin_orders` - Back-office order management
//!
//! Tests are `#[ignore]`d by default because they need running services
//! and a reachable backend. Base URLs are overridable via
//! `STOREFRONT_BASE_URL` / `ADMIN_BASE_URL` / `ADMIN_OPERATOR_TOKEN`.

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin service (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Operator bearer token for the admin service.
#[must_use]
pub fn operator_token() -> String {
    std::env::var("ADMIN_OPERATOR_TOKEN").unwrap_or_default()
}

/// Create an HTTP client with a cookie store.
///
/// The storefront keeps the cart and user in the session cookie, so a
/// shared cookie store is what makes multi-step flows work.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn session_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
