//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SESSION_BOOKING` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use session_booking::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Registry at {}", config.registry.base_url);
//! ```

mod client;
mod credentials;
mod error;
mod registry;

pub use client::{ClientConfig, Environment};
pub use credentials::CredentialsConfig;
pub use error::{ConfigError, ValidationError};
pub use registry::RegistryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a client
/// pointed at a local registry with no startup login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment and logging
    #[serde(default)]
    pub client: ClientConfig,

    /// Remote registry location and timeout
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Optional account to log in with at startup
    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SESSION_BOOKING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SESSION_BOOKING__REGISTRY__BASE_URL=...` -> `registry.base_url = ...`
    /// - `SESSION_BOOKING__CLIENT__JSON_LOGS=true` -> `client.json_logs = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SESSION_BOOKING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.registry.validate(self.client.environment)?;
        if let Some(credentials) = &self.credentials {
            credentials.validate()?;
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.client.is_production()
    }
}
