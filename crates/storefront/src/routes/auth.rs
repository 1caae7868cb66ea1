//! Auth route handlers.
//!
//! Credentials never live here: login and registration are proxied to
//! the backend, and the returned profile + JWT are committed to the
//! session. Logout drops them.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use tio_pelotte_core::{Email, Phone, UserId};

use crate::cms::types::BackendUser;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username or email.
    pub identifier: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// User profile returned to clients.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&CurrentUser> for UserView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.to_string(),
            phone: user.phone.as_ref().map(ToString::to_string),
        }
    }
}

/// Build the session identity from a backend profile.
fn current_user_from_backend(user: &BackendUser) -> Result<CurrentUser> {
    let email = Email::parse(&user.email)
        .map_err(|e| AppError::Internal(format!("backend returned invalid email: {e}")))?;

    // A malformed stored phone is dropped rather than rejected; it only
    // powers the convenience lookup on the account page.
    let phone = user
        .telefono
        .as_deref()
        .and_then(|p| Phone::parse(p).ok());

    Ok(CurrentUser {
        id: user.id,
        username: user.username.clone(),
        email,
        phone,
    })
}

/// Log in with backend credentials.
#[instrument(skip(state, session, request))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserView>> {
    let auth = state
        .cms()
        .login(&request.identifier, &request.password)
        .await?;

    let user = current_user_from_backend(&auth.user)?;

    set_current_user(&session, &user, &auth.jwt)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(UserView::from(&user)))
}

/// Register a new account.
#[instrument(skip(state, session, request))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserView>> {
    // Reject obviously invalid input before bothering the backend
    Email::parse(&request.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let phone = request
        .phone
        .as_deref()
        .map(Phone::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest(format!("invalid phone number: {e}")))?;

    let auth = state
        .cms()
        .register(
            &request.username,
            &request.email,
            phone.as_ref(),
            &request.password,
        )
        .await?;

    let user = current_user_from_backend(&auth.user)?;

    set_current_user(&session, &user, &auth.jwt)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(UserView::from(&user)))
}

/// Log out: drop the session identity and JWT.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}
