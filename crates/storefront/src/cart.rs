//! Shopping cart.
//!
//! The cart is plain session state: a sequence of product-quantity lines
//! mutated only through its methods and written back to the session after
//! every change. Totals use `Decimal`, so repeated reads are exact and
//! idempotent.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tio_pelotte_core::{Price, ProductId};

use crate::cms::types::Product;

/// The product snapshot a cart line carries.
///
/// A snapshot rather than a reference: the cart must stay priceable even
/// if the catalog changes between page loads. Checkout re-reads nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartProduct {
    /// Backend record ID.
    pub id: ProductId,
    /// URL slug, for linking back to the product page.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Unit price at the time the line was added.
    pub price: Price,
    /// Unit of measure (e.g., "kg", "docena").
    pub unit: String,
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            slug: product.slug.clone(),
            name: product.name.clone(),
            price: product.price,
            unit: product.unit.clone(),
        }
    }
}

/// One product-quantity pairing in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product snapshot.
    pub product: CartProduct,
    /// Units of the product; always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// The line subtotal: unit price x quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price.times(self.quantity).amount
    }
}

/// A shopping cart.
///
/// Invariant: at most one line per product ID. Lines keep insertion
/// order; the order carries no meaning for the total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a quantity of a product.
    ///
    /// If a line for the product already exists its quantity is
    /// incremented; otherwise a new line is appended. No upper bound is
    /// enforced.
    pub fn add(&mut self, product: CartProduct, quantity: NonZeroU32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity.get());
        } else {
            self.lines.push(CartLine {
                product,
                quantity: quantity.get(),
            });
        }
    }

    /// Remove the line for a product. No-op if the product is not in the
    /// cart.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The cart total: sum of unit price x quantity over all lines.
    ///
    /// Pure; returns 0 for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn product(id: i32, price: &str) -> CartProduct {
        CartProduct {
            id: ProductId::new(id),
            slug: format!("product-{id}"),
            name: format!("Product {id}"),
            price: Price::ars(price.parse().unwrap()),
            unit: "kg".to_string(),
        }
    }

    #[test]
    fn test_add_merges_duplicate_products() {
        let mut cart = Cart::new();
        cart.add(product(1, "1000"), qty(2));
        cart.add(product(2, "500"), qty(1));
        cart.add(product(1, "1000"), qty(3));

        // One line per distinct product id, quantities summed
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.lines()[1].quantity, 1);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(product(3, "10"), qty(1));
        cart.add(product(1, "10"), qty(1));
        cart.add(product(2, "10"), qty(1));

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.product.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), Decimal::ZERO);

        cart.add(product(1, "1500.50"), qty(2));
        cart.add(product(2, "800"), qty(1));
        assert_eq!(cart.total(), "3801.00".parse().unwrap());

        // Pure: calling again yields the same result
        assert_eq!(cart.total(), "3801.00".parse().unwrap());
    }

    #[test]
    fn test_remove_absent_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(product(1, "100"), qty(1));
        cart.remove(ProductId::new(99));
        assert_eq!(cart.lines().len(), 1);

        cart.remove(ProductId::new(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_then_total_is_zero() {
        let mut cart = Cart::new();
        cart.add(product(1, "100"), qty(5));
        cart.clear();
        assert_eq!(cart.total(), Decimal::ZERO);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(product(1, "100"), qty(2));
        cart.add(product(2, "100"), qty(3));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add(product(1, "1200"), qty(2));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.total(), cart.total());
    }
}
