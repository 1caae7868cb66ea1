//! Application state shared across admin handlers.

use std::sync::Arc;

use crate::cms::AdminCmsClient;
use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    cms: AdminCmsClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let cms = AdminCmsClient::new(&config.cms);

        Self {
            inner: Arc::new(AppStateInner { config, cms }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the privileged backend client.
    #[must_use]
    pub fn cms(&self) -> &AdminCmsClient {
        &self.inner.cms
    }
}
