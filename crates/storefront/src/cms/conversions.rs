//! Conversions from raw backend records to domain types.

use tio_pelotte_core::{CategoryId, IngredientId, OrderId, Price, ProductId};

use super::types::raw;
use super::types::{Category, Image, Ingredient, Order, Product};

/// Flatten a raw product record into a [`Product`].
pub fn convert_product(entry: raw::Entry<raw::ProductAttrs>) -> Product {
    let attrs = entry.attributes;

    // A missing or unpublished relation arrives as {"data": null}
    let category = attrs
        .category
        .and_then(|env| env.data)
        .map(|cat| cat.attributes.slug);

    Product {
        id: ProductId::new(entry.id),
        slug: attrs.slug,
        name: attrs.nombre,
        description: attrs.descripcion,
        price: Price::ars(attrs.precio),
        unit: attrs.unidad_medida,
        images: attrs.img.into_iter().map(convert_image).collect(),
        active: attrs.is_active,
        featured: attrs.is_featured,
        offer: attrs.is_offer,
        category,
    }
}

/// Flatten a raw image record into an [`Image`].
fn convert_image(attrs: raw::ImageAttrs) -> Image {
    Image {
        url: attrs.url,
        alt_text: attrs.alternative_text,
    }
}

/// Flatten a raw category record into a [`Category`].
pub fn convert_category(entry: raw::Entry<raw::CategoryAttrs>) -> Category {
    Category {
        id: CategoryId::new(entry.id),
        slug: entry.attributes.slug,
        name: entry.attributes.nombre,
    }
}

/// Flatten a raw ingredient record into an [`Ingredient`].
pub fn convert_ingredient(entry: raw::Entry<raw::IngredientAttrs>) -> Ingredient {
    Ingredient {
        id: IngredientId::new(entry.id),
        name: entry.attributes.nombre,
        available: entry.attributes.is_available,
    }
}

/// Flatten a raw order record into an [`Order`].
pub fn convert_order(entry: raw::Entry<raw::OrderAttrs>) -> Order {
    let attrs = entry.attributes;
    Order {
        id: OrderId::new(entry.id),
        name: attrs.nombre,
        phone: attrs.telefono,
        zone: attrs.zona,
        address: attrs.direccion,
        note: attrs.referencias,
        items: attrs.items,
        total: attrs.total,
        estado: attrs.estado,
        created_at: attrs.created_at,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_product_flattens_envelope() {
        let json = serde_json::json!({
            "id": 12,
            "attributes": {
                "nombre": "Sorrentinos de jamón y queso",
                "slug": "sorrentinos-jamon-queso",
                "descripcion": "Docena de sorrentinos frescos.",
                "precio": 3200,
                "unidadMedida": "docena",
                "isActive": true,
                "isFeatured": false,
                "isOffer": true,
                "img": [{"url": "https://img.example/sorrentinos.jpg", "alternativeText": null}],
                "category": {"data": {"id": 2, "attributes": {"nombre": "Pastas rellenas", "slug": "pastas-rellenas"}}}
            }
        });

        let entry: raw::Entry<raw::ProductAttrs> = serde_json::from_value(json).unwrap();
        let product = convert_product(entry);

        assert_eq!(product.id, ProductId::new(12));
        assert_eq!(product.name, "Sorrentinos de jamón y queso");
        assert_eq!(product.price.amount, "3200".parse().unwrap());
        assert_eq!(product.category.as_deref(), Some("pastas-rellenas"));
        assert!(product.active);
        assert!(product.offer);
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn test_convert_product_without_category() {
        let json = serde_json::json!({
            "id": 3,
            "attributes": {
                "nombre": "Tallarines",
                "slug": "tallarines",
                "precio": "1500.50",
                "category": {"data": null}
            }
        });

        let entry: raw::Entry<raw::ProductAttrs> = serde_json::from_value(json).unwrap();
        let product = convert_product(entry);

        assert_eq!(product.category, None);
        assert_eq!(product.price.amount, "1500.50".parse().unwrap());
        // Unset flags default to false
        assert!(!product.active);
        assert!(!product.offer);
    }

    #[test]
    fn test_convert_order() {
        let json = serde_json::json!({
            "id": 44,
            "attributes": {
                "nombre": "Ana",
                "telefono": "1155550101",
                "zona": "Centro",
                "direccion": "Mitre 1234",
                "referencias": "timbre roto, golpear",
                "items": [
                    {"productId": 12, "productName": "Sorrentinos", "quantity": 2, "unitPrice": 3200}
                ],
                "total": 6400,
                "estado": "En camino",
                "createdAt": "2024-05-02T14:30:00Z"
            }
        });

        let entry: raw::Entry<raw::OrderAttrs> = serde_json::from_value(json).unwrap();
        let order = convert_order(entry);

        assert_eq!(order.id, OrderId::new(44));
        assert_eq!(order.estado, tio_pelotte_core::OrderStatus::EnCamino);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total, "6400".parse().unwrap());
    }
}
