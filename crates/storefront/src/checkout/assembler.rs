//! Order assembly: cart + delivery fields -> backend order payload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tio_pelotte_core::{OrderStatus, Phone, UserId};

use crate::cart::Cart;
use crate::cms::types::OrderItem;

/// Checkout fields collected from the customer.
#[derive(Debug, Clone)]
pub struct CheckoutContact {
    /// Customer name.
    pub name: String,
    /// Customer phone (already normalized).
    pub phone: Phone,
    /// Delivery zone.
    pub zone: String,
    /// Delivery address.
    pub address: String,
    /// Optional delivery references note ("timbre roto", etc.).
    pub note: Option<String>,
    /// Backend user ID when the customer is logged in.
    pub user_id: Option<UserId>,
}

/// Why an order could not be assembled.
///
/// These block submission; the caller must not send anything to the
/// backend when assembly fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("the cart is empty")]
    EmptyCart,
    #[error("a contact name is required")]
    MissingName,
    #[error("a delivery zone is required")]
    MissingZone,
    #[error("a delivery address is required")]
    MissingAddress,
}

/// The normalized order payload sent to the backend.
///
/// Also the cart snapshot held by the pending checkout while the customer
/// is away at the payment processor, so it is serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Customer name.
    pub name: String,
    /// Customer phone.
    pub phone: Phone,
    /// Delivery zone.
    pub zone: String,
    /// Delivery address.
    pub address: String,
    /// Optional references note.
    pub note: Option<String>,
    /// Backend user ID when the customer is logged in.
    pub user_id: Option<UserId>,
    /// Order lines reduced to the backend's item shape.
    pub items: Vec<OrderItem>,
    /// Computed total; always equals the cart total it was built from.
    pub total: Decimal,
    /// Initial status.
    pub estado: OrderStatus,
}

impl OrderDraft {
    /// Assemble an order payload from the cart and checkout fields.
    ///
    /// Pure transform; performs no network I/O.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the cart is empty or a required
    /// field is blank.
    pub fn assemble(cart: &Cart, contact: &CheckoutContact) -> Result<Self, ValidationError> {
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart);
        }
        if contact.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if contact.zone.trim().is_empty() {
            return Err(ValidationError::MissingZone);
        }
        if contact.address.trim().is_empty() {
            return Err(ValidationError::MissingAddress);
        }

        let items = cart
            .lines()
            .iter()
            .map(|line| OrderItem {
                product_id: line.product.id,
                product_name: line.product.name.clone(),
                quantity: line.quantity,
                unit_price: line.product.price.amount,
            })
            .collect();

        Ok(Self {
            name: contact.name.trim().to_string(),
            phone: contact.phone.clone(),
            zone: contact.zone.trim().to_string(),
            address: contact.address.trim().to_string(),
            note: contact
                .note
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from),
            user_id: contact.user_id,
            items,
            total: cart.total(),
            estado: OrderStatus::Pendiente,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartProduct;
    use std::num::NonZeroU32;
    use tio_pelotte_core::{Price, ProductId};

    fn contact() -> CheckoutContact {
        CheckoutContact {
            name: "Ana".to_string(),
            phone: Phone::parse("1155550101").unwrap(),
            zone: "Centro".to_string(),
            address: "Mitre 1234".to_string(),
            note: None,
            user_id: None,
        }
    }

    fn full_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            CartProduct {
                id: ProductId::new(1),
                slug: "tallarines".to_string(),
                name: "Tallarines".to_string(),
                price: Price::ars("1500".parse().unwrap()),
                unit: "kg".to_string(),
            },
            NonZeroU32::new(2).unwrap(),
        );
        cart.add(
            CartProduct {
                id: ProductId::new(2),
                slug: "ravioles".to_string(),
                name: "Ravioles".to_string(),
                price: Price::ars("2000".parse().unwrap()),
                unit: "docena".to_string(),
            },
            NonZeroU32::new(1).unwrap(),
        );
        cart
    }

    #[test]
    fn test_empty_cart_fails() {
        let result = OrderDraft::assemble(&Cart::new(), &contact());
        assert_eq!(result.unwrap_err(), ValidationError::EmptyCart);
    }

    #[test]
    fn test_blank_address_fails() {
        let mut c = contact();
        c.address = "   ".to_string();
        let result = OrderDraft::assemble(&full_cart(), &c);
        assert_eq!(result.unwrap_err(), ValidationError::MissingAddress);
    }

    #[test]
    fn test_blank_zone_fails() {
        let mut c = contact();
        c.zone = String::new();
        let result = OrderDraft::assemble(&full_cart(), &c);
        assert_eq!(result.unwrap_err(), ValidationError::MissingZone);
    }

    #[test]
    fn test_assembled_payload_matches_cart() {
        let cart = full_cart();
        let draft = OrderDraft::assemble(&cart, &contact()).unwrap();

        assert_eq!(draft.items.len(), cart.lines().len());
        assert_eq!(draft.total, cart.total());
        assert_eq!(draft.estado, OrderStatus::Pendiente);

        let first = &draft.items[0];
        assert_eq!(first.product_id, ProductId::new(1));
        assert_eq!(first.product_name, "Tallarines");
        assert_eq!(first.quantity, 2);
        assert_eq!(first.unit_price, "1500".parse().unwrap());
    }

    #[test]
    fn test_blank_note_becomes_none() {
        let mut c = contact();
        c.note = Some("  ".to_string());
        let draft = OrderDraft::assemble(&full_cart(), &c).unwrap();
        assert_eq!(draft.note, None);

        c.note = Some(" porton verde ".to_string());
        let draft = OrderDraft::assemble(&full_cart(), &c).unwrap();
        assert_eq!(draft.note.as_deref(), Some("porton verde"));
    }
}
