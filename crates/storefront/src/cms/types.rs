//! Domain types for the headless backend.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! envelope records the backend returns (see [`raw`]).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tio_pelotte_core::{CategoryId, IngredientId, OrderId, OrderStatus, Price, ProductId, UserId};

// =============================================================================
// Catalog Types
// =============================================================================

/// Product or category image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

/// A product in the shop.
///
/// Immutable from the storefront's perspective; the admin panel is the
/// only writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Backend record ID.
    pub id: ProductId,
    /// URL slug.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Plain text description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Unit of measure (e.g., "kg", "docena", "unidad").
    pub unit: String,
    /// Product images.
    pub images: Vec<Image>,
    /// Whether the product is visible in the storefront.
    pub active: bool,
    /// Whether the product is featured on the home page.
    pub featured: bool,
    /// Whether the product is a promoted offer.
    pub offer: bool,
    /// Category slug, if the product belongs to a category.
    pub category: Option<String>,
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Backend record ID.
    pub id: CategoryId,
    /// URL slug.
    pub slug: String,
    /// Display name.
    pub name: String,
}

/// A pasta ingredient (for made-to-order fillings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Backend record ID.
    pub id: IngredientId,
    /// Display name.
    pub name: String,
    /// Whether the kitchen currently has it.
    pub available: bool,
}

// =============================================================================
// Order Types
// =============================================================================

/// One line of an order, as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product record ID.
    pub product_id: ProductId,
    /// Product name at order time.
    pub product_name: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price at order time.
    pub unit_price: Decimal,
}

/// A confirmed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Backend record ID.
    pub id: OrderId,
    /// Customer name.
    pub name: String,
    /// Customer phone (normalized digits, as stored).
    pub phone: String,
    /// Delivery zone.
    pub zone: String,
    /// Delivery address.
    pub address: String,
    /// Optional delivery references note.
    pub note: Option<String>,
    /// Order lines.
    pub items: Vec<OrderItem>,
    /// Order total.
    pub total: Decimal,
    /// Current status.
    pub estado: OrderStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A user profile as returned by the backend's auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendUser {
    /// Backend record ID.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Phone number, if the user registered one.
    #[serde(default)]
    pub telefono: Option<String>,
}

/// A successful auth exchange: profile plus the backend-issued JWT.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    /// Backend-issued token for subsequent authenticated calls.
    pub jwt: String,
    /// The authenticated user's profile.
    pub user: BackendUser,
}

// =============================================================================
// Raw Wire Types
// =============================================================================

/// Raw envelope records as the backend returns them.
///
/// Responses arrive as `{"data": {"id": n, "attributes": {...}}}` (or a
/// list of such records). The conversions module flattens these into the
/// domain types above.
pub mod raw {
    use serde::Deserialize;

    /// Response envelope.
    #[derive(Debug, Deserialize)]
    pub struct Envelope<T> {
        pub data: T,
    }

    /// One entity record: numeric ID plus an attributes object.
    #[derive(Debug, Deserialize)]
    pub struct Entry<A> {
        pub id: i32,
        pub attributes: A,
    }

    /// Product attributes on the wire (backend field names are Spanish).
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductAttrs {
        pub nombre: String,
        pub slug: String,
        #[serde(default)]
        pub descripcion: String,
        pub precio: rust_decimal::Decimal,
        #[serde(default)]
        pub unidad_medida: String,
        #[serde(default)]
        pub is_active: bool,
        #[serde(default)]
        pub is_featured: bool,
        #[serde(default)]
        pub is_offer: bool,
        #[serde(default)]
        pub img: Vec<ImageAttrs>,
        #[serde(default)]
        pub category: Option<Envelope<Option<Entry<CategoryAttrs>>>>,
    }

    /// Image attributes on the wire.
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ImageAttrs {
        pub url: String,
        #[serde(default)]
        pub alternative_text: Option<String>,
    }

    /// Category attributes on the wire.
    #[derive(Debug, Deserialize)]
    pub struct CategoryAttrs {
        pub nombre: String,
        pub slug: String,
    }

    /// Ingredient attributes on the wire.
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IngredientAttrs {
        pub nombre: String,
        #[serde(default)]
        pub is_available: bool,
    }

    /// Order attributes on the wire.
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OrderAttrs {
        pub nombre: String,
        pub telefono: String,
        pub zona: String,
        pub direccion: String,
        #[serde(default)]
        pub referencias: Option<String>,
        #[serde(default)]
        pub items: Vec<super::OrderItem>,
        pub total: rust_decimal::Decimal,
        pub estado: tio_pelotte_core::OrderStatus,
        pub created_at: chrono::DateTime<chrono::Utc>,
    }

    /// Record-creation response: only the new ID is interesting.
    #[derive(Debug, Deserialize)]
    pub struct CreatedRecord {
        pub id: i32,
    }
}
