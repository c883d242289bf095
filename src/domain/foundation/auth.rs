//! Authentication types for the domain layer.
//!
//! An `Identity` is what a successful login yields: the opaque access token
//! plus the profile fields and role flag of the authenticated principal.
//! It is immutable; a new login replaces it wholesale and logout drops it.
//!
//! # Example
//!
//! ```ignore
//! let identity = Identity::new("jwt-token", UserId::new(1), true)
//!     .with_names("yoga@studio.com", "Admin", "Admin");
//!
//! store.log_in(identity);
//! ```

use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use super::UserId;

/// Token type reported by the registry when none is supplied.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// The authenticated principal.
///
/// The token is held as a `Secret` so it never shows up in `Debug` output
/// or logs.
#[derive(Debug, Clone)]
pub struct Identity {
    token: Secret<String>,
    token_type: String,
    user_id: UserId,
    username: String,
    first_name: String,
    last_name: String,
    is_administrator: bool,
}

impl Identity {
    /// Creates an identity with empty profile fields.
    pub fn new(token: impl Into<String>, user_id: UserId, is_administrator: bool) -> Self {
        Self {
            token: Secret::new(token.into()),
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            user_id,
            username: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_administrator,
        }
    }

    /// Sets the display fields.
    pub fn with_names(
        mut self,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Sets the token type (`Bearer` unless the registry says otherwise).
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// Exposes the access token for attaching to outgoing requests.
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Whether this principal may create, edit and delete sessions.
    pub fn is_administrator(&self) -> bool {
        self.is_administrator
    }

    /// Returns "First Last", or the username when both names are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.token.expose_secret() == other.token.expose_secret()
            && self.token_type == other.token_type
            && self.user_id == other.user_id
            && self.username == other.username
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.is_administrator == other.is_administrator
    }
}

impl Eq for Identity {}

/// Errors from the login and registration endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The registry rejected the email/password pair.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The registry refused to create the account.
    #[error("Registration rejected: {0}")]
    RegistrationRejected(String),

    /// The authentication endpoint could not be reached or failed.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
