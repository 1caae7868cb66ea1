//! Backend REST client implementation.
//!
//! Uses `reqwest` with a bearer token and caches catalog reads using
//! `moka` (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use tio_pelotte_core::{OrderId, PedidoToken, Phone, TempOrderId};

use crate::checkout::assembler::OrderDraft;
use crate::checkout::orchestrator::OrderBackend;
use crate::config::CmsConfig;

use super::CmsError;
use super::cache::CacheValue;
use super::conversions::{
    convert_category, convert_ingredient, convert_order, convert_product,
};
use super::types::{AuthSession, Category, Ingredient, Order, Product, raw};

/// Client for the headless backend API.
///
/// Provides typed access to the catalog, orders, and auth endpoints.
/// Catalog reads are cached for 5 minutes.
#[derive(Clone)]
pub struct CmsClient {
    inner: Arc<CmsClientInner>,
}

struct CmsClientInner {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
    cache: Cache<String, CacheValue>,
}

impl CmsClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &CmsConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CmsClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
                api_token: config.api_token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Execute a GET request and deserialize the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, CmsError> {
        let url = format!("{}{path_and_query}", self.inner.api_url);

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.api_token)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Execute a POST request with a JSON body and deserialize the response.
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, CmsError> {
        let url = format!("{}{path}", self.inner.api_url);

        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(&self.inner.api_token)
            .json(body)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Check the response status and parse the body.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CmsError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CmsError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Backend returned non-success status"
            );
            return Err(CmsError::Api {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&response_text) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse backend response"
                );
                Err(CmsError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Get the full product list.
    ///
    /// The catalog is small enough to fetch whole; filtering, sorting, and
    /// pagination happen in memory on top of this list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, CmsError> {
        let cache_key = "products:all".to_string();

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let envelope: raw::Envelope<Vec<raw::Entry<raw::ProductAttrs>>> = self
            .get_json("/products?populate=*&pagination[limit]=200")
            .await?;

        let products: Vec<Product> = envelope.data.into_iter().map(convert_product).collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by its slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Product, CmsError> {
        let cache_key = format!("product:{slug}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let envelope: raw::Envelope<Vec<raw::Entry<raw::ProductAttrs>>> = self
            .get_json(&format!(
                "/products?populate=*&filters[slug][$eq]={}",
                urlencoding::encode(slug)
            ))
            .await?;

        let product = envelope
            .data
            .into_iter()
            .next()
            .map(convert_product)
            .ok_or_else(|| CmsError::NotFound(format!("Product not found: {slug}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, CmsError> {
        let cache_key = "categories:all".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let envelope: raw::Envelope<Vec<raw::Entry<raw::CategoryAttrs>>> =
            self.get_json("/categories").await?;

        let categories: Vec<Category> = envelope.data.into_iter().map(convert_category).collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Get all ingredients.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_ingredients(&self) -> Result<Vec<Ingredient>, CmsError> {
        let cache_key = "ingredients:all".to_string();

        if let Some(CacheValue::Ingredients(ingredients)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for ingredients");
            return Ok(ingredients);
        }

        let envelope: raw::Envelope<Vec<raw::Entry<raw::IngredientAttrs>>> =
            self.get_json("/ingredients?pagination[limit]=100").await?;

        let ingredients: Vec<Ingredient> =
            envelope.data.into_iter().map(convert_ingredient).collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Ingredients(ingredients.clone()))
            .await;

        Ok(ingredients)
    }

    // =========================================================================
    // Order Methods (not cached - mutable state)
    // =========================================================================

    /// Get the most recent order for a phone number.
    ///
    /// # Errors
    ///
    /// Returns `CmsError::NotFound` if the phone has no orders, or another
    /// error if the API request fails.
    #[instrument(skip(self))]
    pub async fn latest_order_by_phone(&self, phone: &Phone) -> Result<Order, CmsError> {
        let envelope: raw::Envelope<Vec<raw::Entry<raw::OrderAttrs>>> = self
            .get_json(&format!(
                "/pedidos?filters[telefono][$eq]={}&sort=createdAt:desc&pagination[limit]=1",
                urlencoding::encode(phone.as_str())
            ))
            .await?;

        envelope
            .data
            .into_iter()
            .next()
            .map(convert_order)
            .ok_or_else(|| CmsError::NotFound(format!("No orders for phone {phone}")))
    }

    // =========================================================================
    // Auth Methods (delegated to the backend)
    // =========================================================================

    /// Log in with backend credentials.
    ///
    /// # Errors
    ///
    /// Returns `CmsError::InvalidCredentials` when the backend rejects the
    /// identifier/password pair, or another error if the request fails.
    #[instrument(skip(self, password))]
    pub async fn login(&self, identifier: &str, password: &str) -> Result<AuthSession, CmsError> {
        let body = serde_json::json!({
            "identifier": identifier,
            "password": password,
        });

        match self.post_json("/auth/local", &body).await {
            Ok(session) => Ok(session),
            Err(CmsError::Api { status: 400, .. }) => Err(CmsError::InvalidCredentials),
            Err(e) => Err(e),
        }
    }

    /// Register a new account with the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the registration or the
    /// request fails.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        phone: Option<&Phone>,
        password: &str,
    ) -> Result<AuthSession, CmsError> {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "telefono": phone.map(Phone::as_str),
            "password": password,
        });

        self.post_json("/auth/local/register", &body).await
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached catalog data.
    pub async fn invalidate_catalog(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

// =============================================================================
// Checkout Port
// =============================================================================

impl OrderBackend for CmsClient {
    /// Create a temporary order draft, keyed by the idempotency token.
    async fn create_temp_order(
        &self,
        draft: &OrderDraft,
        token: &PedidoToken,
    ) -> Result<TempOrderId, CmsError> {
        let body = serde_json::json!({
            "data": {
                "nombre": draft.name,
                "telefono": draft.phone,
                "zona": draft.zone,
                "direccion": draft.address,
                "referencias": draft.note,
                "items": draft.items,
                "total": draft.total,
                "estado": draft.estado,
                "pedidoToken": token,
                "user": draft.user_id,
            }
        });

        let envelope: raw::Envelope<raw::CreatedRecord> =
            self.post_json("/pedido-temporals", &body).await?;

        Ok(TempOrderId::new(envelope.data.id))
    }

    /// Promote a confirmed draft to a final order.
    async fn create_order(
        &self,
        draft: &OrderDraft,
        token: &PedidoToken,
    ) -> Result<OrderId, CmsError> {
        let body = serde_json::json!({
            "data": {
                "nombre": draft.name,
                "telefono": draft.phone,
                "zona": draft.zone,
                "direccion": draft.address,
                "referencias": draft.note,
                "items": draft.items,
                "total": draft.total,
                "estado": draft.estado,
                "pedidoToken": token,
                "user": draft.user_id,
            }
        });

        let envelope: raw::Envelope<raw::CreatedRecord> =
            self.post_json("/pedidos", &body).await?;

        Ok(OrderId::new(envelope.data.id))
    }
}
