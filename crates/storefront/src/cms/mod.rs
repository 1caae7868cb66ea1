//! Headless backend (CMS) client.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local sync, direct API calls
//! - Strapi-style JSON surface: entity endpoints under `/api`, responses
//!   wrapped in a `{"data": ...}` envelope with `id` + `attributes` records
//! - In-memory caching via `moka` for catalog reads (5 minute TTL); order
//!   and auth calls are never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use tio_pelotte_storefront::cms::CmsClient;
//!
//! let client = CmsClient::new(&config.cms);
//!
//! // Fetch the catalog
//! let products = client.get_products().await?;
//!
//! // Look up the latest order for a phone number
//! let order = client.latest_order_by_phone(&phone).await?;
//! ```

mod cache;
mod client;
mod conversions;
pub mod types;

pub use client::CmsClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the backend.
#[derive(Debug, Error)]
pub enum CmsError {
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

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The backend rejected the credentials.
    #[error("Invalid credentials")]
    InvalidCredentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cms_error_display() {
        let err = CmsError::NotFound("product: tallarines".to_string());
        assert_eq!(err.to_string(), "Not found: product: tallarines");

        let err = CmsError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = CmsError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
