//! Status enums for orders and payments.

use serde::{Deserialize, Serialize};

/// Order preparation/delivery status.
///
/// Matches the backend's `estado` values verbatim: the kitchen staff reads
/// these in Spanish, so the wire values are Spanish too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order received, not yet in the kitchen.
    #[default]
    Pendiente,
    /// Pasta being made.
    #[serde(rename = "En elaboración")]
    EnElaboracion,
    /// Out for delivery.
    #[serde(rename = "En camino")]
    EnCamino,
    /// Delivered to the customer.
    Entregado,
    /// Cancelled by the shop or the customer.
    Cancelado,
}

impl OrderStatus {
    /// Whether the order still needs kitchen or delivery work.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Pendiente | Self::EnElaboracion | Self::EnCamino)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pendiente => write!(f, "Pendiente"),
            Self::EnElaboracion => write!(f, "En elaboración"),
            Self::EnCamino => write!(f, "En camino"),
            Self::Entregado => write!(f, "Entregado"),
            Self::Cancelado => write!(f, "Cancelado"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pendiente" => Ok(Self::Pendiente),
            "En elaboración" => Ok(Self::EnElaboracion),
            "En camino" => Ok(Self::EnCamino),
            "Entregado" => Ok(Self::Entregado),
            "Cancelado" => Ok(Self::Cancelado),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment status as reported by the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Approved,
    Pending,
    InProcess,
    Rejected,
    Cancelled,
    Refunded,
}

impl PaymentStatus {
    /// Whether the payment completed successfully.
    ///
    /// Anything other than `Approved` is treated as not-ok by the
    /// confirmation flow.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Pendiente,
            OrderStatus::EnElaboracion,
            OrderStatus::EnCamino,
            OrderStatus::Entregado,
            OrderStatus::Cancelado,
        ] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_order_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::EnElaboracion).unwrap();
        assert_eq!(json, "\"En elaboración\"");
    }

    #[test]
    fn test_is_open() {
        assert!(OrderStatus::Pendiente.is_open());
        assert!(OrderStatus::EnCamino.is_open());
        assert!(!OrderStatus::Entregado.is_open());
        assert!(!OrderStatus::Cancelado.is_open());
    }

    #[test]
    fn test_payment_approved() {
        assert!(PaymentStatus::Approved.is_approved());
        assert!(!PaymentStatus::Pending.is_approved());
        assert!(!PaymentStatus::Rejected.is_approved());
    }
}
