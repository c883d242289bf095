//! Session registry port.
//!
//! Defines the contract with the remote registry that owns booking
//! sessions. Every call is a single request/response exchange; the
//! registry serializes writes and is the source of truth for ids,
//! timestamps and participant lists.
//!
//! # Design
//!
//! - **No client-side authorization**: callers check roles before calling
//! - **Errors verbatim**: implementations report what the registry said

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::session::{Session, SessionDraft};
use async_trait::async_trait;

/// Port for the remote session registry.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// List all sessions in registry order.
    async fn list(&self) -> Result<Vec<Session>, DomainError>;

    /// Fetch one session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the registry has no such session
    async fn get(&self, id: SessionId) -> Result<Session, DomainError>;

    /// Create a session; the registry assigns id and timestamps.
    async fn create(&self, draft: &SessionDraft) -> Result<Session, DomainError>;

    /// Replace the editable fields of a session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    async fn update(&self, id: SessionId, draft: &SessionDraft) -> Result<Session, DomainError>;

    /// Delete a session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist (including a second delete)
    async fn delete(&self, id: SessionId) -> Result<(), DomainError>;

    /// Register a user into a session.
    ///
    /// Duplicate registration is registry-defined.
    async fn participate(&self, id: SessionId, user_id: UserId) -> Result<(), DomainError>;

    /// Remove a user from a session.
    ///
    /// # Errors
    ///
    /// - `NotParticipating` (or another not-found code) if the user wasn't registered
    async fn un_participate(&self, id: SessionId, user_id: UserId) -> Result<(), DomainError>;
}
