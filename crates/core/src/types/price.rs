//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts use `Decimal` so that cart totals never accumulate binary
/// floating point error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., pesos, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in Argentine pesos, the shop's currency.
    #[must_use]
    pub const fn ars(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::ARS)
    }

    /// Multiply the price by a quantity, keeping the currency.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${} {}", self.amount, self.currency_code.code())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    ARS,
    USD,
}

impl CurrencyCode {
    /// The ISO 4217 code as a string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ARS => "ARS",
            Self::USD => "USD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_times() {
        let price = Price::ars(dec("1500"));
        assert_eq!(price.times(3).amount, dec("4500"));
        assert_eq!(price.times(3).currency_code, CurrencyCode::ARS);
    }

    #[test]
    fn test_display() {
        let price = Price::ars(dec("1200.50"));
        assert_eq!(price.to_string(), "$1200.50 ARS");
    }

    #[test]
    fn test_default_currency_is_ars() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::ARS);
    }
}
