//! Checkout idempotency token.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-generated token that identifies one temporary order.
///
/// Generated BEFORE the first backend call in the checkout flow, so the
/// draft record stays correlatable even when the creation response is
/// lost. The backend enforces uniqueness on this value, which makes
/// temp-order creation idempotent per token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PedidoToken(Uuid);

impl PedidoToken {
    /// Generate a fresh token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a token from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PedidoToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PedidoToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(PedidoToken::generate(), PedidoToken::generate());
    }

    #[test]
    fn test_parse_roundtrip() {
        let token = PedidoToken::generate();
        let parsed: PedidoToken = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PedidoToken::parse("not-a-uuid").is_err());
    }
}
