//! Privileged backend (CMS) client for the back-office.
//!
//! Separate from the storefront's client on purpose: this one carries
//! the full-scope admin token and exposes write operations the public
//! binary must never have. No caching - operators want fresh data.

mod client;
pub mod types;

pub use client::AdminCmsClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the backend.
#[derive(Debug, Error)]
pub enum AdminCmsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body (truncated).
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_cms_error_display() {
        let err = AdminCmsError::NotFound("order 12".to_string());
        assert_eq!(err.to_string(), "Not found: order 12");
    }
}
