//! Cart route handlers.
//!
//! The cart lives in the session and is written back after every
//! mutation. Handlers return the updated cart so clients never need a
//! second round trip.

use std::num::NonZeroU32;

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use tio_pelotte_core::ProductId;

use crate::cart::{Cart, CartLine, CartProduct};
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, defaulting to an empty one.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart back to the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> std::result::Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

// =============================================================================
// Views
// =============================================================================

/// Cart line data returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub slug: String,
    pub name: String,
    pub unit: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id,
            slug: line.product.slug.clone(),
            name: line.product.name.clone(),
            unit: line.product.unit.clone(),
            quantity: line.quantity,
            unit_price: line.product.price.amount,
            subtotal: line.subtotal(),
        }
    }
}

/// Cart data returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: Decimal,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCountView {
    pub count: u32,
}

// =============================================================================
// Request Types
// =============================================================================

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    /// Product slug.
    pub slug: String,
    /// Units to add; defaults to 1.
    pub quantity: Option<u32>,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartView> {
    let cart = load_cart(&session).await;
    Json(CartView::from(&cart))
}

/// Add an item to the cart.
///
/// Looks the product up by slug so the cart line carries a fresh price
/// snapshot, then merges it into the session cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let quantity = NonZeroU32::new(request.quantity.unwrap_or(1))
        .ok_or_else(|| AppError::BadRequest("quantity must be a positive integer".to_string()))?;

    let product = state.cms().get_product_by_slug(&request.slug).await?;
    if !product.active {
        return Err(AppError::NotFound(format!(
            "Product not found: {}",
            request.slug
        )));
    }

    let mut cart = load_cart(&session).await;
    cart.add(CartProduct::from(&product), quantity);

    save_cart(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist cart: {e}")))?;

    Ok(Json(CartView::from(&cart)))
}

/// Remove an item from the cart. No-op if the product is not in the cart.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await;
    cart.remove(request.product_id);

    save_cart(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist cart: {e}")))?;

    Ok(Json(CartView::from(&cart)))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await;
    cart.clear();

    save_cart(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist cart: {e}")))?;

    Ok(Json(CartView::from(&cart)))
}

/// Cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Json<CartCountView> {
    let cart = load_cart(&session).await;
    Json(CartCountView {
        count: cart.item_count(),
    })
}
