//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CMS_API_URL` - Base URL of the headless backend
//! - `CMS_ADMIN_TOKEN` - Backend API token with full CRUD scope
//! - `ADMIN_OPERATOR_TOKEN` - Bearer token operators present to this service
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! The admin service is expected to be reachable only over the shop's
//! private network; the operator token is defense in depth, not the only
//! wall.

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Minimum operator token length.
const MIN_TOKEN_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Privileged backend configuration
    pub cms: AdminCmsConfig,
    /// Bearer token operators must present
    pub operator_token: SecretString,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Privileged backend (CMS) configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct AdminCmsConfig {
    /// Base URL of the backend API, without a trailing slash
    pub api_url: String,
    /// Full-scope API token; never reaches the storefront binary
    pub admin_token: SecretString,
}

impl std::fmt::Debug for AdminCmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCmsConfig")
            .field("api_url", &self.api_url)
            .field("admin_token", &"[REDACTED]")
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;

        let cms = AdminCmsConfig {
            api_url: get_required_env("CMS_API_URL")?
                .trim_end_matches('/')
                .to_string(),
            admin_token: get_required_secret("CMS_ADMIN_TOKEN")?,
        };

        let operator_token = get_required_secret("ADMIN_OPERATOR_TOKEN")?;
        validate_token_length(&operator_token, "ADMIN_OPERATOR_TOKEN")?;

        let sentry_dsn = std::env::var("SENTRY_DSN").ok();

        Ok(Self {
            host,
            port,
            cms,
            operator_token,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that the operator token meets minimum length requirements.
fn validate_token_length(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_TOKEN_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_TOKEN_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_token_length_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_token_length(&secret, "TEST_TOKEN").is_err());
    }

    #[test]
    fn test_validate_token_length_ok() {
        let secret = SecretString::from("a".repeat(32));
        assert!(validate_token_length(&secret, "TEST_TOKEN").is_ok());
    }

    #[test]
    fn test_cms_config_debug_redacts_token() {
        let config = AdminCmsConfig {
            api_url: "http://localhost:1337/api".to_string(),
            admin_token: SecretString::from("super_private_token"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_private_token"));
    }
}
