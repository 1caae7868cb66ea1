//! Order lookup route handlers.
//!
//! The recovery path for every stuck checkout: customers look up their
//! most recent order by phone number, no account required.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tio_pelotte_core::{OrderId, Phone};

use crate::cms::types::{Order, OrderItem};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Lookup query parameters.
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub telefono: String,
}

/// Order data returned to clients.
#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub name: String,
    pub zone: String,
    pub address: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub estado: String,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            name: order.name,
            zone: order.zone,
            address: order.address,
            items: order.items,
            total: order.total,
            estado: order.estado.to_string(),
            created_at: order.created_at,
        }
    }
}

/// Look up the most recent order for a phone number.
#[instrument(skip(state))]
pub async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<OrderView>> {
    let phone = Phone::parse(&query.telefono)
        .map_err(|e| AppError::BadRequest(format!("invalid phone number: {e}")))?;

    let order = state.cms().latest_order_by_phone(&phone).await?;

    Ok(Json(OrderView::from(order)))
}
