//! HttpRegistryClient - reqwest implementation of the registry ports.
//!
//! One client serves every remote collaborator: sessions, authentication,
//! instructors and users all live under the same base URL.
//!
//! # Example
//!
//! ```ignore
//! let store = Arc::new(AuthSessionStore::new());
//! let config = RegistryClientConfig::new("http://localhost:8080/api")
//!     .with_timeout(Duration::from_secs(10));
//! let client = Arc::new(HttpRegistryClient::new(config, store.clone())?);
//!
//! let sessions = client.list().await?;
//! ```
//!
//! # Authorization
//!
//! Whenever the store holds an identity, registry requests carry
//! `Authorization: <type> <token>`. The auth endpoints never do.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

use crate::application::AuthSessionStore;
use crate::domain::foundation::{
    AuthError, DomainError, ErrorCode, Identity, InstructorId, SessionId, UserId,
};
use crate::domain::instructor::Instructor;
use crate::domain::session::{Session, SessionDraft};
use crate::domain::user::UserProfile;
use crate::ports::{
    AuthGateway, InstructorDirectory, LoginRequest, RegisterConfirmation, RegisterRequest,
    SessionRegistry, UserDirectory,
};

use super::config::RegistryClientConfig;
use super::dto::{IdentityPayload, LoginBody, MessageResponse, RegisterBody};
use super::errors::{decode_error, status_error, transport_error, Route};

/// HTTP client for the remote session registry.
pub struct HttpRegistryClient {
    config: RegistryClientConfig,
    client: Client,
    store: Arc<AuthSessionStore>,
}

impl HttpRegistryClient {
    /// Creates a client that reads its bearer token from `store`.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the underlying HTTP client cannot be built
    pub fn new(
        config: RegistryClientConfig,
        store: Arc<AuthSessionStore>,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            config,
            client,
            store,
        })
    }

    pub fn config(&self) -> &RegistryClientConfig {
        &self.config
    }

    /// Builds an authorized request against the registry.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url(path);
        tracing::debug!(%method, %url, "Registry request");

        let builder = self.client.request(method, url);
        match self.store.current_identity() {
            Some(identity) => builder.header(AUTHORIZATION, authorization_value(&identity)),
            None => builder,
        }
    }

    /// Sends a request and turns non-success statuses into errors.
    async fn send(&self, builder: RequestBuilder, route: Route) -> Result<Response, DomainError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Registry unreachable");
            transport_error(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = status_error(status, route, &body);
        tracing::warn!(status = status.as_u16(), code = %err.code, "Registry rejected request");
        Err(err)
    }

    /// Sends a request and decodes the JSON body; an empty body yields `None`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        route: Route,
    ) -> Result<Option<T>, DomainError> {
        let response = self.send(builder, route).await?;
        let body = response.text().await.map_err(transport_error)?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body).map(Some).map_err(decode_error)
    }

    /// Like `fetch`, but a missing body means the resource does not exist.
    async fn fetch_one<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        route: Route,
        what: String,
    ) -> Result<T, DomainError> {
        self.fetch(builder, route)
            .await?
            .ok_or_else(|| DomainError::new(route.not_found_code(), format!("{} not found", what)))
    }
}

fn authorization_value(identity: &Identity) -> String {
    format!("{} {}", identity.token_type(), identity.token())
}

#[async_trait]
impl SessionRegistry for HttpRegistryClient {
    async fn list(&self) -> Result<Vec<Session>, DomainError> {
        let sessions = self
            .fetch(self.request(Method::GET, "/session"), Route::Session)
            .await?
            .unwrap_or_default();
        Ok(sessions)
    }

    async fn get(&self, id: SessionId) -> Result<Session, DomainError> {
        self.fetch_one(
            self.request(Method::GET, &format!("/session/{}", id)),
            Route::Session,
            format!("Session {}", id),
        )
        .await
    }

    async fn create(&self, draft: &SessionDraft) -> Result<Session, DomainError> {
        let session: Session = self
            .fetch_one(
                self.request(Method::POST, "/session").json(draft),
                Route::Session,
                "Created session".to_string(),
            )
            .await?;
        tracing::info!(session_id = ?session.id(), "Session created");
        Ok(session)
    }

    async fn update(&self, id: SessionId, draft: &SessionDraft) -> Result<Session, DomainError> {
        self.fetch_one(
            self.request(Method::PUT, &format!("/session/{}", id)).json(draft),
            Route::Session,
            format!("Session {}", id),
        )
        .await
    }

    async fn delete(&self, id: SessionId) -> Result<(), DomainError> {
        self.send(
            self.request(Method::DELETE, &format!("/session/{}", id)),
            Route::Session,
        )
        .await?;
        Ok(())
    }

    async fn participate(&self, id: SessionId, user_id: UserId) -> Result<(), DomainError> {
        self.send(
            self.request(Method::POST, &format!("/session/{}/participate/{}", id, user_id)),
            Route::Join,
        )
        .await?;
        Ok(())
    }

    async fn un_participate(&self, id: SessionId, user_id: UserId) -> Result<(), DomainError> {
        self.send(
            self.request(Method::DELETE, &format!("/session/{}/participate/{}", id, user_id)),
            Route::Leave,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl InstructorDirectory for HttpRegistryClient {
    async fn list(&self) -> Result<Vec<Instructor>, DomainError> {
        let instructors = self
            .fetch(self.request(Method::GET, "/teacher"), Route::Instructor)
            .await?
            .unwrap_or_default();
        Ok(instructors)
    }

    async fn get(&self, id: InstructorId) -> Result<Instructor, DomainError> {
        self.fetch_one(
            self.request(Method::GET, &format!("/teacher/{}", id)),
            Route::Instructor,
            format!("Instructor {}", id),
        )
        .await
    }
}

#[async_trait]
impl UserDirectory for HttpRegistryClient {
    async fn get(&self, id: UserId) -> Result<UserProfile, DomainError> {
        self.fetch_one(
            self.request(Method::GET, &format!("/user/{}", id)),
            Route::User,
            format!("User {}", id),
        )
        .await
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        self.send(
            self.request(Method::DELETE, &format!("/user/{}", id)),
            Route::User,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AuthGateway for HttpRegistryClient {
    async fn login(&self, request: &LoginRequest) -> Result<Identity, AuthError> {
        let body = LoginBody {
            email: &request.email,
            password: request.password.expose_secret(),
        };

        let response = self
            .client
            .post(self.config.url("/auth/login"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(transport_error(e).message))?;

        let status = response.status();
        match status {
            s if s.is_success() => {
                let payload: IdentityPayload = response
                    .json()
                    .await
                    .map_err(|e| AuthError::service_unavailable(transport_error(e).message))?;
                Ok(Identity::from(payload))
            }
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST => {
                Err(AuthError::InvalidCredentials)
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::service_unavailable(format!(
                    "Login failed with status {}: {}",
                    status,
                    MessageResponse::extract(&body).unwrap_or_default()
                )))
            }
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterConfirmation, AuthError> {
        let body = RegisterBody {
            email: &request.email,
            first_name: &request.first_name,
            last_name: &request.last_name,
            password: request.password.expose_secret(),
        };

        let response = self
            .client
            .post(self.config.url("/auth/register"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(transport_error(e).message))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = MessageResponse::extract(&text);

        if status.is_success() {
            return Ok(RegisterConfirmation {
                message: message.unwrap_or_default(),
            });
        }

        let message = message.unwrap_or_else(|| status.to_string());
        if status.is_client_error() {
            Err(AuthError::RegistrationRejected(message))
        } else {
            Err(AuthError::service_unavailable(format!(
                "Registration failed with status {}: {}",
                status, message
            )))
        }
    }
}
