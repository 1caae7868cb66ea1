//! Catalog route handlers: products, categories, ingredients.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tio_pelotte_core::ProductId;

use crate::catalog::{Page, Pager, ProductFilter, SortOrder};
use crate::cms::types::{Category, Image, Ingredient, Product};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product data returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub unit: String,
    pub images: Vec<Image>,
    pub featured: bool,
    pub offer: bool,
    pub category: Option<String>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            slug: product.slug,
            name: product.name,
            description: product.description,
            price: product.price.amount,
            unit: product.unit,
            images: product.images,
            featured: product.featured,
            offer: product.offer,
            category: product.category,
        }
    }
}

/// Filter and pagination query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<SortOrder>,
    pub offers: Option<bool>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl CatalogQuery {
    fn filter(&self) -> ProductFilter {
        ProductFilter {
            search: self.search.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            min_price: self.min_price,
            max_price: self.max_price,
            only_offers: self.offers.unwrap_or(false),
            sort: self.sort.unwrap_or_default(),
        }
    }
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductView>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl From<Page<Product>> for ProductListResponse {
    fn from(page: Page<Product>) -> Self {
        Self {
            products: page.items.into_iter().map(ProductView::from).collect(),
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
        }
    }
}

/// Filtered, sorted, paginated product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ProductListResponse>> {
    let mut products = state.cms().get_products().await?;
    // Inactive products never reach the storefront
    products.retain(|p| p.active);

    let filtered = query.filter().apply(&products);

    let pager = query.per_page.map_or_else(Pager::default, Pager::new);
    let page = pager.page(&filtered, query.page.unwrap_or(1));

    Ok(Json(ProductListResponse::from(page)))
}

/// Product detail by slug.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductView>> {
    let product = state.cms().get_product_by_slug(&slug).await?;

    if !product.active {
        return Err(AppError::NotFound(format!("Product not found: {slug}")));
    }

    Ok(Json(ProductView::from(product)))
}

/// Category listing.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.cms().get_categories().await?;
    Ok(Json(categories))
}

/// Ingredient listing (for made-to-order fillings).
#[instrument(skip(state))]
pub async fn ingredients(State(state): State<AppState>) -> Result<Json<Vec<Ingredient>>> {
    let ingredients = state.cms().get_ingredients().await?;
    Ok(Json(ingredients))
}
