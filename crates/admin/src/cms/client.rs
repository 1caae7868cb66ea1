//! Privileged backend REST client implementation.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::instrument;

use tio_pelotte_core::{IngredientId, OrderId, OrderStatus, ProductId};

use crate::config::AdminCmsConfig;

use super::AdminCmsError;
use super::types::{
    AdminIngredient, AdminOrder, AdminProduct, AdminTempOrder, AdminUser, IngredientInput,
    ProductInput, convert_ingredient, convert_order, convert_product, convert_temp_order, raw,
};

/// Client for the backend API with the full-scope admin token.
#[derive(Clone)]
pub struct AdminCmsClient {
    inner: Arc<AdminCmsClientInner>,
}

struct AdminCmsClientInner {
    client: reqwest::Client,
    api_url: String,
    admin_token: String,
}

impl AdminCmsClient {
    /// Create a new privileged backend client.
    #[must_use]
    pub fn new(config: &AdminCmsConfig) -> Self {
        Self {
            inner: Arc::new(AdminCmsClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
                admin_token: config.admin_token.expose_secret().to_string(),
            }),
        }
    }

    /// Execute a request and parse the JSON response.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AdminCmsError> {
        let response = request
            .bearer_auth(&self.inner.admin_token)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Backend returned non-success status"
            );
            return Err(AdminCmsError::Api {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            AdminCmsError::Parse(e)
        })
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{path_and_query}", self.inner.api_url)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List all products, inactive ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<AdminProduct>, AdminCmsError> {
        let envelope: raw::Envelope<Vec<raw::Entry<raw::ProductAttrs>>> = self
            .send_json(
                self.inner
                    .client
                    .get(self.url("/products?populate=*&pagination[limit]=200")),
            )
            .await?;

        Ok(envelope.data.into_iter().map(convert_product).collect())
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the input or the request
    /// fails.
    #[instrument(skip(self, input), fields(slug = %input.slug))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<ProductId, AdminCmsError> {
        let envelope: raw::Envelope<raw::CreatedRecord> = self
            .send_json(
                self.inner
                    .client
                    .post(self.url("/products"))
                    .json(&input.to_wire()),
            )
            .await?;

        Ok(ProductId::new(envelope.data.id))
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self, input), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<(), AdminCmsError> {
        let _: raw::Envelope<raw::CreatedRecord> = self
            .send_json(
                self.inner
                    .client
                    .put(self.url(&format!("/products/{id}")))
                    .json(&input.to_wire()),
            )
            .await?;

        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), AdminCmsError> {
        let _: raw::Envelope<raw::CreatedRecord> = self
            .send_json(self.inner.client.delete(self.url(&format!("/products/{id}"))))
            .await?;

        Ok(())
    }

    // =========================================================================
    // Ingredients
    // =========================================================================

    /// List all ingredients.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_ingredients(&self) -> Result<Vec<AdminIngredient>, AdminCmsError> {
        let envelope: raw::Envelope<Vec<raw::Entry<raw::IngredientAttrs>>> = self
            .send_json(
                self.inner
                    .client
                    .get(self.url("/ingredients?pagination[limit]=100")),
            )
            .await?;

        Ok(envelope.data.into_iter().map(convert_ingredient).collect())
    }

    /// Create an ingredient.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the input or the request
    /// fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_ingredient(
        &self,
        input: &IngredientInput,
    ) -> Result<IngredientId, AdminCmsError> {
        let envelope: raw::Envelope<raw::CreatedRecord> = self
            .send_json(
                self.inner
                    .client
                    .post(self.url("/ingredients"))
                    .json(&input.to_wire()),
            )
            .await?;

        Ok(IngredientId::new(envelope.data.id))
    }

    /// Update an ingredient.
    ///
    /// # Errors
    ///
    /// Returns an error if the ingredient does not exist or the request
    /// fails.
    #[instrument(skip(self, input), fields(id = %id))]
    pub async fn update_ingredient(
        &self,
        id: IngredientId,
        input: &IngredientInput,
    ) -> Result<(), AdminCmsError> {
        let _: raw::Envelope<raw::CreatedRecord> = self
            .send_json(
                self.inner
                    .client
                    .put(self.url(&format!("/ingredients/{id}")))
                    .json(&input.to_wire()),
            )
            .await?;

        Ok(())
    }

    /// Delete an ingredient.
    ///
    /// # Errors
    ///
    /// Returns an error if the ingredient does not exist or the request
    /// fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_ingredient(&self, id: IngredientId) -> Result<(), AdminCmsError> {
        let _: raw::Envelope<raw::CreatedRecord> = self
            .send_json(
                self.inner
                    .client
                    .delete(self.url(&format!("/ingredients/{id}"))),
            )
            .await?;

        Ok(())
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// List registered customers.
    ///
    /// The backend's users endpoint returns a flat array, not the `data`
    /// envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<AdminUser>, AdminCmsError> {
        self.send_json(
            self.inner
                .client
                .get(self.url("/users?pagination[limit]=200")),
        )
        .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List orders, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        estado: Option<OrderStatus>,
    ) -> Result<Vec<AdminOrder>, AdminCmsError> {
        let mut path = "/pedidos?sort=createdAt:desc&pagination[limit]=100".to_string();
        if let Some(estado) = estado {
            path.push_str(&format!(
                "&filters[estado][$eq]={}",
                urlencoding::encode(&estado.to_string())
            ));
        }

        let envelope: raw::Envelope<Vec<raw::Entry<raw::OrderAttrs>>> =
            self.send_json(self.inner.client.get(self.url(&path))).await?;

        Ok(envelope.data.into_iter().map(convert_order).collect())
    }

    /// Get a single order.
    ///
    /// # Errors
    ///
    /// Returns `AdminCmsError::NotFound` if the order does not exist, or
    /// another error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_order(&self, id: OrderId) -> Result<AdminOrder, AdminCmsError> {
        let result: Result<raw::Envelope<raw::Entry<raw::OrderAttrs>>, AdminCmsError> = self
            .send_json(self.inner.client.get(self.url(&format!("/pedidos/{id}"))))
            .await;

        match result {
            Ok(envelope) => Ok(convert_order(envelope.data)),
            Err(AdminCmsError::Api { status: 404, .. }) => {
                Err(AdminCmsError::NotFound(format!("order {id}")))
            }
            Err(e) => Err(e),
        }
    }

    /// Update an order's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the request fails.
    #[instrument(skip(self), fields(id = %id, estado = %estado))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        estado: OrderStatus,
    ) -> Result<(), AdminCmsError> {
        let body = serde_json::json!({ "data": { "estado": estado } });

        let result: Result<raw::Envelope<raw::CreatedRecord>, AdminCmsError> = self
            .send_json(
                self.inner
                    .client
                    .put(self.url(&format!("/pedidos/{id}")))
                    .json(&body),
            )
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(AdminCmsError::Api { status: 404, .. }) => {
                Err(AdminCmsError::NotFound(format!("order {id}")))
            }
            Err(e) => Err(e),
        }
    }

    /// List temporary orders, newest first.
    ///
    /// Abandoned checkouts stay here forever; this is the audit view.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_temp_orders(&self) -> Result<Vec<AdminTempOrder>, AdminCmsError> {
        let envelope: raw::Envelope<Vec<raw::Entry<raw::TempOrderAttrs>>> = self
            .send_json(
                self.inner
                    .client
                    .get(self.url("/pedido-temporals?sort=createdAt:desc&pagination[limit]=100")),
            )
            .await?;

        Ok(envelope.data.into_iter().map(convert_temp_order).collect())
    }
}
