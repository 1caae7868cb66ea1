//! Account route handlers (require auth).

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::auth::UserView;
use super::orders::OrderView;

/// Account overview: the committed session profile.
#[instrument(skip(user))]
pub async fn index(RequireAuth(user): RequireAuth) -> Json<UserView> {
    Json(UserView::from(&user))
}

/// The logged-in customer's most recent order.
///
/// Orders are keyed by phone, so the account needs a registered phone
/// number for this to work.
#[instrument(skip(state, user))]
pub async fn latest_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<OrderView>> {
    let phone = user.phone.as_ref().ok_or_else(|| {
        AppError::BadRequest("no phone number registered on the account".to_string())
    })?;

    let order = state.cms().latest_order_by_phone(phone).await?;

    Ok(Json(OrderView::from(order)))
}
