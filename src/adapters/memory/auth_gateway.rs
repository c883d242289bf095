//! In-memory auth gateway.
//!
//! Accounts registered here can log in with their password. Tokens are
//! opaque strings of the form `token-<user id>`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::{AuthError, Identity, UserId};
use crate::ports::{AuthGateway, LoginRequest, RegisterConfirmation, RegisterRequest};

#[derive(Debug, Clone)]
struct Account {
    id: UserId,
    password: Secret<String>,
    first_name: String,
    last_name: String,
    is_administrator: bool,
}

/// Auth gateway backed by an email-keyed account map.
#[derive(Debug)]
pub struct InMemoryAuthGateway {
    accounts: RwLock<HashMap<String, Account>>,
    next_id: AtomicU64,
    force_error: RwLock<Option<AuthError>>,
}

impl InMemoryAuthGateway {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            force_error: RwLock::new(None),
        }
    }

    /// Seeds an administrator account.
    pub fn with_admin(self, email: &str, password: &str) -> Self {
        self.add_account(email, password, "Admin", "Admin", true);
        self
    }

    /// Seeds a regular account.
    pub fn with_user(self, email: &str, password: &str, first_name: &str, last_name: &str) -> Self {
        self.add_account(email, password, first_name, last_name, false);
        self
    }

    /// Forces every call to fail with the given error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    pub fn account_count(&self) -> usize {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn add_account(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        is_administrator: bool,
    ) -> UserId {
        let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                email.to_string(),
                Account {
                    id,
                    password: Secret::new(password.to_string()),
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    is_administrator,
                },
            );
        id
    }

    fn forced_error(&self) -> Option<AuthError> {
        self.force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for InMemoryAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthGateway for InMemoryAuthGateway {
    async fn login(&self, request: &LoginRequest) -> Result<Identity, AuthError> {
        if let Some(err) = self.forced_error() {
            return Err(err);
        }

        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        let account = accounts
            .get(&request.email)
            .filter(|a| a.password.expose_secret() == request.password.expose_secret())
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(
            Identity::new(format!("token-{}", account.id), account.id, account.is_administrator)
                .with_names(&request.email, &account.first_name, &account.last_name),
        )
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterConfirmation, AuthError> {
        if let Some(err) = self.forced_error() {
            return Err(err);
        }

        let taken = self
            .accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&request.email);
        if taken {
            return Err(AuthError::RegistrationRejected(
                "Error: Email is already taken!".to_string(),
            ));
        }

        self.add_account(
            &request.email,
            request.password.expose_secret(),
            &request.first_name,
            &request.last_name,
            false,
        );
        Ok(RegisterConfirmation {
            message: "User registered successfully!".to_string(),
        })
    }
}
