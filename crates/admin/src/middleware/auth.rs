//! Operator authentication extractor.
//!
//! The admin service sits on the shop's private network; requests must
//! still present the operator bearer token. Token issuance and rotation
//! happen outside this service.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;

use crate::state::AppState;

/// Extractor that requires the operator bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     _auth: RequireOperator,
///     State(state): State<AppState>,
/// ) -> impl IntoResponse {
///     // only reachable with a valid token
/// }
/// ```
pub struct RequireOperator;

/// Error returned when the operator token is missing or wrong.
pub struct OperatorRejection;

impl IntoResponse for OperatorRejection {
    fn into_response(self) -> Response {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = OperatorRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(OperatorRejection)?;

        let expected = state.config().operator_token.expose_secret();

        if constant_time_eq(presented.as_bytes(), expected.as_bytes()) {
            Ok(Self)
        } else {
            Err(OperatorRejection)
        }
    }
}

/// Length-then-bytes comparison that does not short-circuit on the first
/// mismatching byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"token", b"token"));
        assert!(!constant_time_eq(b"token", b"tokeN"));
        assert!(!constant_time_eq(b"token", b"token-longer"));
        assert!(constant_time_eq(b"", b""));
    }
}
