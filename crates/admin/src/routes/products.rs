//! Product management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use tio_pelotte_core::ProductId;

use crate::cms::types::{AdminProduct, ProductInput};
use crate::error::Result;
use crate::middleware::RequireOperator;
use crate::state::AppState;

/// Creation response.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: ProductId,
}

/// All products, inactive included.
#[instrument(skip(_auth, state))]
pub async fn index(
    _auth: RequireOperator,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminProduct>>> {
    let products = state.cms().list_products().await?;
    Ok(Json(products))
}

/// Create a product.
#[instrument(skip(_auth, state, input))]
pub async fn create(
    _auth: RequireOperator,
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let id = state.cms().create_product(&input).await?;
    tracing::info!(product_id = %id, slug = %input.slug, "Product created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Update a product.
#[instrument(skip(_auth, state, input))]
pub async fn update(
    _auth: RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(input): Json<ProductInput>,
) -> Result<StatusCode> {
    state.cms().update_product(id, &input).await?;
    // The storefront cache expires on its own TTL; writes here are not
    // visible there instantly
    tracing::info!(product_id = %id, "Product updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product.
#[instrument(skip(_auth, state))]
pub async fn delete(
    _auth: RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    state.cms().delete_product(id).await?;
    tracing::info!(product_id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
