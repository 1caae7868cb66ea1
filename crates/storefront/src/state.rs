//! Application state shared across handlers.

use std::sync::Arc;

use crate::cms::CmsClient;
use crate::config::StorefrontConfig;
use crate::services::mercadopago::{MercadoPagoClient, PaymentError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the backend and payment gateway clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cms: CmsClient,
    payments: MercadoPagoClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment gateway client cannot be built
    /// from the configured access token.
    pub fn new(config: StorefrontConfig) -> Result<Self, PaymentError> {
        let cms = CmsClient::new(&config.cms);
        let payments = MercadoPagoClient::new(&config.payments)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                cms,
                payments,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend client.
    #[must_use]
    pub fn cms(&self) -> &CmsClient {
        &self.inner.cms
    }

    /// Get a reference to the payment gateway client.
    #[must_use]
    pub fn payments(&self) -> &MercadoPagoClient {
        &self.inner.payments
    }
}
