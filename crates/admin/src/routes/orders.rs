//! Order management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use tio_pelotte_core::{OrderId, OrderStatus};

use crate::cms::types::{AdminOrder, AdminTempOrder};
use crate::error::{AppError, Result};
use crate::middleware::RequireOperator;
use crate::state::AppState;

/// Order listing query parameters.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Optional status filter ("Pendiente", "En camino", ...).
    pub estado: Option<String>,
}

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateEstadoRequest {
    pub estado: OrderStatus,
}

/// Orders, newest first, optionally filtered by status.
#[instrument(skip(_auth, state))]
pub async fn index(
    _auth: RequireOperator,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<AdminOrder>>> {
    let estado = query
        .estado
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let orders = state.cms().list_orders(estado).await?;
    Ok(Json(orders))
}

/// Order detail.
#[instrument(skip(_auth, state))]
pub async fn show(
    _auth: RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<AdminOrder>> {
    let order = state.cms().get_order(id).await?;
    Ok(Json(order))
}

/// Update an order's status.
#[instrument(skip(_auth, state))]
pub async fn update_estado(
    _auth: RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<UpdateEstadoRequest>,
) -> Result<StatusCode> {
    state.cms().update_order_status(id, request.estado).await?;
    tracing::info!(order_id = %id, estado = %request.estado, "Order status updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Temporary orders, newest first.
///
/// Checkouts abandoned before the payment redirect stay `Pendiente`
/// forever; this is the operators' audit view of them.
#[instrument(skip(_auth, state))]
pub async fn temp_orders(
    _auth: RequireOperator,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminTempOrder>>> {
    let temp_orders = state.cms().list_temp_orders().await?;
    Ok(Json(temp_orders))
}
