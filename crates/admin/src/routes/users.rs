//! User listing route handler.
//!
//! Accounts are owned by the backend; the back-office only reads them.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::cms::types::AdminUser;
use crate::error::Result;
use crate::middleware::RequireOperator;
use crate::state::AppState;

/// Registered customers.
#[instrument(skip(_auth, state))]
pub async fn index(
    _auth: RequireOperator,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminUser>>> {
    let users = state.cms().list_users().await?;
    Ok(Json(users))
}
