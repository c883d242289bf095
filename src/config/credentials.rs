//! Optional login credentials for unattended runs

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Account the binary logs in with at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    pub email: String,
    pub password: Secret<String>,
}

impl CredentialsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() {
            return Err(ValidationError::MissingRequired("CREDENTIALS__EMAIL"));
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("CREDENTIALS__PASSWORD"));
        }
        Ok(())
    }
}
