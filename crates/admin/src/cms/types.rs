//! Domain and wire types for the privileged backend client.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tio_pelotte_core::{
    CategoryId, IngredientId, OrderId, OrderStatus, ProductId, TempOrderId, UserId,
};

// =============================================================================
// Catalog Management
// =============================================================================

/// Product as the back-office sees it (inactive products included).
#[derive(Debug, Clone, Serialize)]
pub struct AdminProduct {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub unit: String,
    pub active: bool,
    pub featured: bool,
    pub offer: bool,
    pub category: Option<String>,
}

/// Fields accepted when creating or updating a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub unit: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub offer: bool,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl ProductInput {
    /// The backend's `{data: {...}}` creation/update body.
    #[must_use]
    pub fn to_wire(&self) -> serde_json::Value {
        serde_json::json!({
            "data": {
                "nombre": self.name,
                "slug": self.slug,
                "descripcion": self.description,
                "precio": self.price,
                "unidadMedida": self.unit,
                "isActive": self.active,
                "isFeatured": self.featured,
                "isOffer": self.offer,
                "category": self.category_id,
            }
        })
    }
}

/// Ingredient as the back-office sees it.
#[derive(Debug, Clone, Serialize)]
pub struct AdminIngredient {
    pub id: IngredientId,
    pub name: String,
    pub available: bool,
}

/// Fields accepted when creating or updating an ingredient.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientInput {
    pub name: String,
    #[serde(default)]
    pub available: bool,
}

impl IngredientInput {
    /// The backend's `{data: {...}}` creation/update body.
    #[must_use]
    pub fn to_wire(&self) -> serde_json::Value {
        serde_json::json!({
            "data": {
                "nombre": self.name,
                "isAvailable": self.available,
            }
        })
    }
}

// =============================================================================
// Users & Orders
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub telefono: Option<String>,
}

/// An order row in the back-office listing.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrder {
    pub id: OrderId,
    pub name: String,
    pub phone: String,
    pub zone: String,
    pub address: String,
    pub total: Decimal,
    pub estado: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// An abandoned or in-flight temporary order.
///
/// Kept as a permanent audit record; the storefront never cleans these
/// up, so the back-office lists them for operators.
#[derive(Debug, Clone, Serialize)]
pub struct AdminTempOrder {
    pub id: TempOrderId,
    pub name: String,
    pub phone: String,
    pub total: Decimal,
    pub pedido_token: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Raw Wire Types
// =============================================================================

/// Raw envelope records as the backend returns them.
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

    /// Product attributes on the wire.
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
        pub category: Option<Envelope<Option<Entry<CategoryAttrs>>>>,
    }

    /// Category attributes on the wire.
    #[derive(Debug, Deserialize)]
    pub struct CategoryAttrs {
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
        pub total: rust_decimal::Decimal,
        pub estado: tio_pelotte_core::OrderStatus,
        pub created_at: chrono::DateTime<chrono::Utc>,
    }

    /// Temporary-order attributes on the wire.
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TempOrderAttrs {
        pub nombre: String,
        pub telefono: String,
        pub total: rust_decimal::Decimal,
        pub pedido_token: String,
        pub created_at: chrono::DateTime<chrono::Utc>,
    }

    /// Record-creation response.
    #[derive(Debug, Deserialize)]
    pub struct CreatedRecord {
        pub id: i32,
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Flatten a raw product record.
#[must_use]
pub fn convert_product(entry: raw::Entry<raw::ProductAttrs>) -> AdminProduct {
    let attrs = entry.attributes;
    let category = attrs
        .category
        .and_then(|env| env.data)
        .map(|cat| cat.attributes.slug);

    AdminProduct {
        id: ProductId::new(entry.id),
        slug: attrs.slug,
        name: attrs.nombre,
        description: attrs.descripcion,
        price: attrs.precio,
        unit: attrs.unidad_medida,
        active: attrs.is_active,
        featured: attrs.is_featured,
        offer: attrs.is_offer,
        category,
    }
}

/// Flatten a raw ingredient record.
#[must_use]
pub fn convert_ingredient(entry: raw::Entry<raw::IngredientAttrs>) -> AdminIngredient {
    AdminIngredient {
        id: IngredientId::new(entry.id),
        name: entry.attributes.nombre,
        available: entry.attributes.is_available,
    }
}

/// Flatten a raw order record.
#[must_use]
pub fn convert_order(entry: raw::Entry<raw::OrderAttrs>) -> AdminOrder {
    let attrs = entry.attributes;
    AdminOrder {
        id: OrderId::new(entry.id),
        name: attrs.nombre,
        phone: attrs.telefono,
        zone: attrs.zona,
        address: attrs.direccion,
        total: attrs.total,
        estado: attrs.estado,
        created_at: attrs.created_at,
    }
}

/// Flatten a raw temporary-order record.
#[must_use]
pub fn convert_temp_order(entry: raw::Entry<raw::TempOrderAttrs>) -> AdminTempOrder {
    let attrs = entry.attributes;
    AdminTempOrder {
        id: TempOrderId::new(entry.id),
        name: attrs.nombre,
        phone: attrs.telefono,
        total: attrs.total,
        pedido_token: attrs.pedido_token,
        created_at: attrs.created_at,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_input_wire_shape() {
        let input = ProductInput {
            name: "Ñoquis".to_string(),
            slug: "noquis".to_string(),
            description: String::new(),
            price: "1800".parse().unwrap(),
            unit: "kg".to_string(),
            active: true,
            featured: false,
            offer: false,
            category_id: Some(CategoryId::new(2)),
        };

        let wire = input.to_wire();
        assert_eq!(wire["data"]["nombre"], "Ñoquis");
        assert_eq!(wire["data"]["isActive"], true);
        assert_eq!(wire["data"]["category"], 2);
    }

    #[test]
    fn test_convert_temp_order() {
        let json = serde_json::json!({
            "id": 5,
            "attributes": {
                "nombre": "Ana",
                "telefono": "1155550101",
                "total": 6400,
                "pedidoToken": "3e2c0cce-5f65-4af0-8c1e-23a3f9adbb6b",
                "createdAt": "2024-05-02T14:30:00Z"
            }
        });

        let entry: raw::Entry<raw::TempOrderAttrs> = serde_json::from_value(json).unwrap();
        let temp = convert_temp_order(entry);
        assert_eq!(temp.id, TempOrderId::new(5));
        assert_eq!(temp.pedido_token, "3e2c0cce-5f65-4af0-8c1e-23a3f9adbb6b");
    }
}
