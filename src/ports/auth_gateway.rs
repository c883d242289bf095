//! Auth gateway port for login and registration.
//!
//! The gateway only talks to the registry. Storing the resulting identity
//! is the job of `AuthSessionStore`, driven by the login handler.

use async_trait::async_trait;
use secrecy::Secret;

use crate::domain::foundation::{AuthError, Identity};

/// Email/password pair submitted to `/auth/login`.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Secret::new(password.into()),
        }
    }
}

/// Account details submitted to `/auth/register`.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: Secret<String>,
}

/// Acknowledgement returned by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterConfirmation {
    pub message: String,
}

/// Port for the registry's authentication endpoints.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for an identity.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` on 401
    /// - `ServiceUnavailable` on transport failure
    async fn login(&self, request: &LoginRequest) -> Result<Identity, AuthError>;

    /// Create a new account. Does not log in.
    ///
    /// # Errors
    ///
    /// - `RegistrationRejected` on 400 (e.g. email already taken)
    /// - `ServiceUnavailable` on transport failure
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterConfirmation, AuthError>;
}
