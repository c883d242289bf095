//! Remote registry configuration

use serde::Deserialize;
use std::time::Duration;

use super::client::Environment;
use super::error::ValidationError;

/// Where the session registry lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Base URL of the registry API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl RegistryConfig {
    /// Get the request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate registry configuration
    ///
    /// In production, requires HTTPS for the base URL.
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("REGISTRY__BASE_URL"));
        }
        let is_https = self.base_url.starts_with("https://");
        if !is_https && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidRegistryUrl);
        }
        if environment == Environment::Production && !is_https {
            return Err(ValidationError::RegistryMustBeHttps);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
