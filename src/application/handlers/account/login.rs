//! LoginHandler - exchanges credentials for an identity and stores it.

use std::sync::Arc;

use secrecy::Secret;

use crate::application::AuthSessionStore;
use crate::domain::foundation::{AuthError, Identity};
use crate::ports::{AuthGateway, LoginRequest};

/// Command to log in.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: Secret<String>,
}

/// Handler for logging in.
pub struct LoginHandler {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<AuthSessionStore>,
}

impl LoginHandler {
    pub fn new(gateway: Arc<dyn AuthGateway>, store: Arc<AuthSessionStore>) -> Self {
        Self { gateway, store }
    }

    /// Logs in and returns the new identity.
    ///
    /// On failure the store is left exactly as it was.
    pub async fn handle(&self, cmd: LoginCommand) -> Result<Identity, AuthError> {
        let request = LoginRequest {
            email: cmd.email,
            password: cmd.password,
        };

        let identity = match self.gateway.login(&request).await {
            Ok(identity) => identity,
            Err(err) => {
                tracing::warn!(email = %request.email, "Login failed: {}", err);
                return Err(err);
            }
        };

        self.store.log_in(identity.clone());
        tracing::info!(user_id = %identity.user_id(), "User logged in");
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::{RegisterConfirmation, RegisterRequest};
    use async_trait::async_trait;
    use secrecy::ExposeSecret;

    struct MockAuthGateway {
        password: &'static str,
        identity: Identity,
        unavailable: bool,
    }

    #[async_trait]
    impl AuthGateway for MockAuthGateway {
        async fn login(&self, request: &LoginRequest) -> Result<Identity, AuthError> {
            if self.unavailable {
                return Err(AuthError::service_unavailable("connection refused"));
            }
            if request.password.expose_secret() == self.password {
                Ok(self.identity.clone())
            } else {
                Err(AuthError::InvalidCredentials)
            }
        }

        async fn register(
            &self,
            _request: &RegisterRequest,
        ) -> Result<RegisterConfirmation, AuthError> {
            unreachable!("login tests never register")
        }
    }

    fn gateway(unavailable: bool) -> Arc<MockAuthGateway> {
        Arc::new(MockAuthGateway {
            password: "test!1234",
            identity: Identity::new("fakeToken", UserId::new(1), true),
            unavailable,
        })
    }

    fn command(password: &str) -> LoginCommand {
        LoginCommand {
            email: "yoga@studio.com".to_string(),
            password: Secret::new(password.to_string()),
        }
    }

    #[test]
    fn command_debug_hides_password() {
        let rendered = format!("{:?}", command("test!1234"));
        assert!(!rendered.contains("test!1234"));
    }

    #[tokio::test]
    async fn successful_login_updates_store() {
        let store = Arc::new(AuthSessionStore::new());
        let handler = LoginHandler::new(gateway(false), store.clone());

        let identity = handler.handle(command("test!1234")).await.unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.current_identity(), Some(identity));
    }

    #[tokio::test]
    async fn wrong_password_leaves_store_anonymous() {
        let store = Arc::new(AuthSessionStore::new());
        let handler = LoginHandler::new(gateway(false), store.clone());

        let err = handler.handle(command("nope")).await.unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn failed_login_keeps_previous_identity() {
        let store = Arc::new(AuthSessionStore::new());
        let previous = Identity::new("old", UserId::new(9), false);
        store.log_in(previous.clone());
        let handler = LoginHandler::new(gateway(true), store.clone());

        let err = handler.handle(command("test!1234")).await.unwrap_err();

        assert!(err.is_transient());
        assert_eq!(store.current_identity(), Some(previous));
    }
}
