//! Checkout route handlers.
//!
//! `start` runs the pre-redirect half of the flow and hands the client
//! the gateway's `init_point`; the flow then suspends (the customer is
//! on the gateway's hosted checkout) with the pending checkout stored in
//! the session. `confirm` resumes it when the gateway redirects back
//! with a payment ID.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use tio_pelotte_core::{OrderId, Phone};

use crate::checkout::{
    BackUrls, CheckoutContact, CheckoutOrchestrator, PendingCheckout,
};
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::session_keys;
use crate::state::AppState;

use super::cart::{load_cart, save_cart};

/// Checkout start request body.
#[derive(Debug, Deserialize)]
pub struct StartCheckoutRequest {
    /// Customer name.
    pub name: String,
    /// Customer phone.
    pub phone: String,
    /// Delivery zone.
    pub zone: String,
    /// Delivery address.
    pub address: String,
    /// Optional delivery references note.
    pub note: Option<String>,
}

/// Checkout start response: where to send the customer.
#[derive(Debug, Serialize)]
pub struct StartCheckoutResponse {
    pub init_point: String,
    pub preference_id: String,
}

/// Confirmation request body.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub payment_id: String,
}

/// Query parameters the gateway appends when redirecting back.
#[derive(Debug, Deserialize)]
pub struct ConfirmQuery {
    pub payment_id: Option<String>,
}

/// Confirmation response.
#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub status: &'static str,
    pub order_id: OrderId,
}

/// Start the checkout flow.
///
/// Assembles the order, creates the temporary order and payment
/// preference, stores the suspended checkout in the session, and returns
/// the gateway redirect.
#[instrument(skip(state, session, request))]
pub async fn start(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Json(request): Json<StartCheckoutRequest>,
) -> Result<Json<StartCheckoutResponse>> {
    let phone = Phone::parse(&request.phone)
        .map_err(|e| AppError::BadRequest(format!("invalid phone number: {e}")))?;

    let contact = CheckoutContact {
        name: request.name,
        phone,
        zone: request.zone,
        address: request.address,
        note: request.note,
        user_id: user.map(|u| u.id),
    };

    let cart = load_cart(&session).await;
    let back_urls = BackUrls::from_base_url(&state.config().base_url);

    let mut flow = CheckoutOrchestrator::new(state.cms().clone(), state.payments().clone());
    let (redirect, pending) = flow.begin(&cart, &contact, &back_urls).await?;

    session
        .insert(session_keys::PENDING_CHECKOUT, &pending)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist pending checkout: {e}")))?;

    tracing::info!(
        temp_order_id = %pending.temp_order_id,
        token = %pending.token,
        "Checkout started"
    );

    Ok(Json(StartCheckoutResponse {
        init_point: redirect.init_point,
        preference_id: redirect.preference_id,
    }))
}

/// Confirm a payment (API form).
#[instrument(skip(state, session))]
pub async fn confirm(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ConfirmRequest>,
) -> Result<Json<ConfirmResponse>> {
    confirm_payment(&state, &session, &request.payment_id).await
}

/// Confirm a payment (gateway redirect landing).
///
/// The gateway sends the customer back to this URL with the payment ID
/// in the query string.
#[instrument(skip(state, session))]
pub async fn confirm_redirect(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<ConfirmResponse>> {
    let payment_id = query.payment_id.ok_or_else(|| {
        AppError::BadRequest("missing payment_id in redirect".to_string())
    })?;

    confirm_payment(&state, &session, &payment_id).await
}

/// Shared confirmation logic.
///
/// On an approved payment the order is finalized, the cart cleared, and
/// the pending checkout consumed. On any other outcome the session is
/// left untouched so the customer can retry confirmation manually or
/// fall back to the phone-number order lookup.
async fn confirm_payment(
    state: &AppState,
    session: &Session,
    payment_id: &str,
) -> Result<Json<ConfirmResponse>> {
    let pending: PendingCheckout = session
        .get(session_keys::PENDING_CHECKOUT)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| AppError::BadRequest("no checkout in progress".to_string()))?;

    let mut cart = load_cart(session).await;

    let mut flow = CheckoutOrchestrator::new(state.cms().clone(), state.payments().clone());
    let order_id = flow.confirm(&mut cart, &pending, payment_id).await?;

    // The flow cleared the cart; commit that and consume the pending
    // checkout.
    save_cart(session, &cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist cart: {e}")))?;
    let _ = session
        .remove::<PendingCheckout>(session_keys::PENDING_CHECKOUT)
        .await;

    tracing::info!(order_id = %order_id, "Order confirmed");

    Ok(Json(ConfirmResponse {
        status: "ok",
        order_id,
    }))
}
