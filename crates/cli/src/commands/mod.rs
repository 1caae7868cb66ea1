//! CLI command implementations.

pub mod orders;
pub mod seed;

use secrecy::SecretString;

use tio_pelotte_admin::cms::AdminCmsClient;
use tio_pelotte_admin::config::AdminCmsConfig;

/// Build a privileged backend client from the environment.
///
/// # Errors
///
/// Returns an error if `CMS_API_URL` or `CMS_ADMIN_TOKEN` is not set.
pub fn client_from_env() -> Result<AdminCmsClient, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let api_url = std::env::var("CMS_API_URL")
        .map_err(|_| "CMS_API_URL not set")?
        .trim_end_matches('/')
        .to_string();
    let admin_token = std::env::var("CMS_ADMIN_TOKEN")
        .map(SecretString::from)
        .map_err(|_| "CMS_ADMIN_TOKEN not set")?;

    Ok(AdminCmsClient::new(&AdminCmsConfig {
        api_url,
        admin_token,
    }))
}
