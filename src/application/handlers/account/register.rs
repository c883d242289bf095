//! RegisterHandler - creates an account. Does not log in.

use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::{AuthError, ValidationError};
use crate::ports::{AuthGateway, RegisterConfirmation, RegisterRequest};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: Secret<String>,
}

/// Handler for account registration.
pub struct RegisterHandler {
    gateway: Arc<dyn AuthGateway>,
}

impl RegisterHandler {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }

    /// Registers the account and returns the registry's confirmation.
    ///
    /// Blank fields are rejected locally as `RegistrationRejected`.
    pub async fn handle(&self, cmd: RegisterCommand) -> Result<RegisterConfirmation, AuthError> {
        validate(&cmd).map_err(|e| AuthError::RegistrationRejected(e.to_string()))?;

        let request = RegisterRequest {
            email: cmd.email,
            first_name: cmd.first_name,
            last_name: cmd.last_name,
            password: cmd.password,
        };

        let confirmation = self.gateway.register(&request).await?;
        tracing::info!(email = %request.email, "Account registered");
        Ok(confirmation)
    }
}

fn validate(cmd: &RegisterCommand) -> Result<(), ValidationError> {
    for (field, value) in [
        ("email", &cmd.email),
        ("firstName", &cmd.first_name),
        ("lastName", &cmd.last_name),
        ("password", cmd.password.expose_secret()),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field(field));
        }
    }
    if !cmd.email.contains('@') {
        return Err(ValidationError::invalid_format("email", "missing @ symbol"));
    }
    Ok(())
}
