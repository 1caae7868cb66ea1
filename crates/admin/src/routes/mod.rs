//! HTTP route handlers for admin.
//!
//! Every route requires the operator bearer token.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Health check (unauthenticated)
//!
//! # Products
//! GET    /products               - All products, inactive included
//! POST   /products               - Create product
//! PUT    /products/{id}          - Update product
//! DELETE /products/{id}          - Delete product
//!
//! # Ingredients
//! GET    /ingredients            - All ingredients
//! POST   /ingredients            - Create ingredient
//! PUT    /ingredients/{id}       - Update ingredient
//! DELETE /ingredients/{id}       - Delete ingredient
//!
//! # Users
//! GET    /users                  - Registered customers
//!
//! # Orders
//! GET    /orders                 - Orders, newest first (?estado= filter)
//! GET    /orders/{id}            - Order detail
//! PUT    /orders/{id}/estado     - Update order status
//! GET    /temp-orders            - Temporary orders (abandoned checkouts)
//! ```

pub mod ingredients;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(products::index).post(products::create),
        )
        .route(
            "/products/{id}",
            put(products::update).delete(products::delete),
        )
        .route(
            "/ingredients",
            get(ingredients::index).post(ingredients::create),
        )
        .route(
            "/ingredients/{id}",
            put(ingredients::update).delete(ingredients::delete),
        )
        .route("/users", get(users::index))
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/estado", put(orders::update_estado))
        .route("/temp-orders", get(orders::temp_orders))
}
