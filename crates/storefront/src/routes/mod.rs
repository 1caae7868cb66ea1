//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Filtered/sorted/paginated product listing
//! GET  /products/{slug}        - Product detail
//! GET  /categories             - Category listing
//! GET  /ingredients            - Ingredient listing
//!
//! # Cart
//! GET  /cart                   - Cart contents
//! POST /cart/add               - Add to cart (merges duplicate products)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart count badge
//!
//! # Checkout
//! POST /checkout               - Start: temp order + payment preference
//! POST /checkout/confirm       - Confirm a payment by ID
//! GET  /checkout/confirm       - Gateway redirect landing (payment_id in query)
//!
//! # Orders
//! GET  /orders/lookup          - Most recent order by phone number
//!
//! # Auth (delegated to the backend)
//! POST /auth/login             - Login action
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires auth)
//! GET  /account                - Account overview
//! GET  /account/orders/latest  - The customer's most recent order
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{auth_rate_limiter, lookup_rate_limiter};
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{slug}", get(products::show))
        .route("/categories", get(products::categories))
        .route("/ingredients", get(products::ingredients))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::start))
        .route(
            "/confirm",
            post(checkout::confirm).get(checkout::confirm_redirect),
        )
}

/// Create the order lookup router (rate limited: keyed by phone number).
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/lookup", get(orders::lookup))
        .layer(lookup_rate_limiter())
}

/// Create the auth routes router (rate limited).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/orders/latest", get(account::latest_order))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/orders", order_routes())
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
}
