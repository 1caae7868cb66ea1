//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::cms::CmsError;
use crate::services::mercadopago::PaymentError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API operation failed.
    #[error("Backend error: {0}")]
    Cms(#[from] CmsError),

    /// Payment gateway operation failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Checkout flow failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Rate limited.
    #[error("Rate limited")]
    RateLimited,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    /// Whether this error should be captured to Sentry.
    ///
    /// Validation and not-found outcomes are expected traffic; transport
    /// and server failures are not.
    fn is_server_error(&self) -> bool {
        match self {
            Self::Internal(_) | Self::Payment(_) => true,
            Self::Cms(err) => !matches!(err, CmsError::NotFound(_) | CmsError::InvalidCredentials),
            Self::Checkout(err) => !matches!(
                err,
                CheckoutError::Validation(_) | CheckoutError::NotApproved(_)
            ),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Cms(err) => match err {
                CmsError::NotFound(_) => StatusCode::NOT_FOUND,
                CmsError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                CmsError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Payment(_) => StatusCode::BAD_GATEWAY,
            Self::Checkout(err) => match err {
                CheckoutError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutError::NotApproved(_) => StatusCode::CONFLICT,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Cms(err) => match err {
                CmsError::NotFound(_) => err.to_string(),
                CmsError::InvalidCredentials => "Invalid credentials".to_string(),
                _ => "External service error".to_string(),
            },
            Self::Payment(_) => "Payment service error".to_string(),
            Self::Checkout(err) => match err {
                CheckoutError::Validation(v) => v.to_string(),
                CheckoutError::NotApproved(_) => {
                    "We could not confirm your payment. Please check your order \
                     status later using your phone number."
                        .to_string()
                }
                _ => "External service error".to_string(),
            },
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::ValidationError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product: tallarines".to_string());
        assert_eq!(err.to_string(), "Not found: product: tallarines");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(AppError::RateLimited), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_maps_to_unprocessable() {
        let err = AppError::Checkout(CheckoutError::Validation(ValidationError::EmptyCart));
        assert_eq!(get_status(err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_backend_not_found_maps_to_404() {
        let err = AppError::Cms(CmsError::NotFound("no orders".to_string()));
        assert_eq!(get_status(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_backend_failure_maps_to_bad_gateway() {
        let err = AppError::Cms(CmsError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(get_status(err), StatusCode::BAD_GATEWAY);
    }
}
