//! Mercado Pago API client for the checkout flow.
//!
//! Two operations only: create a checkout preference for an assembled
//! order, and look up a payment's status during confirmation. The
//! storefront never inspects a preference beyond its `id` and
//! `init_point`.

use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::prelude::ToPrimitive;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use tio_pelotte_core::{PaymentStatus, PedidoToken};

use crate::checkout::assembler::OrderDraft;
use crate::checkout::orchestrator::{BackUrls, PaymentGateway, PaymentPreference};
use crate::config::PaymentConfig;

/// Mercado Pago API base URL.
const BASE_URL: &str = "https://api.mercadopago.com";

/// Errors that can occur when interacting with the payment gateway.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body (truncated).
        message: String,
    },

    /// Failed to parse a response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Payment gateway client.
#[derive(Clone)]
pub struct MercadoPagoClient {
    client: reqwest::Client,
    base_url: String,
}

impl MercadoPagoClient {
    /// Create a new gateway client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.access_token.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| PaymentError::Parse(format!("Invalid access token format: {e}")))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different base URL (for tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Check a response status and surface non-success bodies as errors.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, PaymentError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %message.chars().take(500).collect::<String>(),
            "Payment gateway returned non-success status"
        );
        Err(PaymentError::Api {
            status: status.as_u16(),
            message: message.chars().take(200).collect(),
        })
    }
}

/// Raw payment-status response; only the status field is read.
#[derive(Debug, Deserialize)]
struct PaymentRecord {
    status: PaymentStatus,
}

impl PaymentGateway for MercadoPagoClient {
    /// Create a checkout preference for the assembled order.
    ///
    /// The pedido token travels as `external_reference`, so the payment
    /// can be correlated with the temporary order on the backend.
    async fn create_preference(
        &self,
        draft: &OrderDraft,
        token: &PedidoToken,
        back_urls: &BackUrls,
    ) -> Result<PaymentPreference, PaymentError> {
        let url = format!("{}/checkout/preferences", self.base_url);

        let items: Vec<serde_json::Value> = draft
            .items
            .iter()
            .map(|item| {
                serde_json::json!({
                    "title": item.product_name,
                    "quantity": item.quantity,
                    "unit_price": item.unit_price.to_f64().unwrap_or(0.0),
                    "currency_id": "ARS",
                })
            })
            .collect();

        let body = serde_json::json!({
            "items": items,
            "payer": {
                "name": draft.name,
                "phone": { "number": draft.phone },
            },
            "back_urls": back_urls,
            "external_reference": token,
            "auto_return": "approved",
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let response = Self::check(response).await?;

        response
            .json::<PaymentPreference>()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))
    }

    /// Look up a payment's status by the gateway's payment ID.
    async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatus, PaymentError> {
        let url = format!(
            "{}/v1/payments/{}",
            self.base_url,
            urlencoding::encode(payment_id)
        );

        let response = self.client.get(&url).send().await?;
        let response = Self::check(response).await?;

        let record = response
            .json::<PaymentRecord>()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        Ok(record.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_error_display() {
        let err = PaymentError::Api {
            status: 401,
            message: "invalid token".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 401 - invalid token");
    }

    #[test]
    fn test_payment_record_parses_gateway_statuses() {
        for (body, expected) in [
            (r#"{"status":"approved"}"#, PaymentStatus::Approved),
            (r#"{"status":"in_process"}"#, PaymentStatus::InProcess),
            (r#"{"status":"rejected"}"#, PaymentStatus::Rejected),
        ] {
            let record: PaymentRecord =
                serde_json::from_str(body).expect("gateway status should parse");
            assert_eq!(record.status, expected);
        }
    }
}
