//! BookingCoordinator - façade over the remote session registry.
//!
//! Holds no state of its own between calls. Mutating session operations
//! are gated on the administrator role read from `AuthSessionStore`; the
//! check runs before any request is issued. All other failures are the
//! registry's, passed through without retries.

use std::sync::Arc;

use crate::application::AuthSessionStore;
use crate::domain::foundation::{
    require_administrator, AuthorizationResult, InstructorId, SessionId, UserId,
};
use crate::domain::instructor::Instructor;
use crate::domain::session::{BookingError, Session, SessionDraft};
use crate::domain::user::UserProfile;
use crate::ports::{InstructorDirectory, SessionRegistry, UserDirectory};

/// Which way a participation toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipationChange {
    Joined,
    Left,
}

/// Outcome of [`BookingCoordinator::toggle_participation`].
#[derive(Debug, Clone)]
pub struct ToggleResult {
    pub change: ParticipationChange,
    /// Session as the registry reports it after the change.
    pub session: Session,
}

/// Session CRUD and participation, authorized against the auth store.
pub struct BookingCoordinator {
    auth: Arc<AuthSessionStore>,
    sessions: Arc<dyn SessionRegistry>,
    instructors: Arc<dyn InstructorDirectory>,
    users: Arc<dyn UserDirectory>,
}

impl BookingCoordinator {
    pub fn new(
        auth: Arc<AuthSessionStore>,
        sessions: Arc<dyn SessionRegistry>,
        instructors: Arc<dyn InstructorDirectory>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            auth,
            sessions,
            instructors,
            users,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// All sessions, in the order the registry returns them.
    pub async fn list_sessions(&self) -> Result<Vec<Session>, BookingError> {
        let sessions = self.sessions.list().await?;
        tracing::debug!(count = sessions.len(), "Listed sessions");
        Ok(sessions)
    }

    pub async fn get_session(&self, id: SessionId) -> Result<Session, BookingError> {
        Ok(self.sessions.get(id).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates a session. Administrator only.
    pub async fn create_session(&self, draft: SessionDraft) -> Result<Session, BookingError> {
        self.authorize_admin("create", "new")?;

        let session = self.sessions.create(&draft).await?;
        tracing::info!(
            session_id = ?session.id(),
            name = session.name(),
            "Session created"
        );
        Ok(session)
    }

    /// Replaces a session's editable fields. Administrator only.
    pub async fn update_session(
        &self,
        id: SessionId,
        draft: SessionDraft,
    ) -> Result<Session, BookingError> {
        self.authorize_admin("update", id.to_string())?;

        let session = self.sessions.update(id, &draft).await?;
        tracing::info!(session_id = %id, "Session updated");
        Ok(session)
    }

    /// Deletes a session. Administrator only; a second delete is `NotFound`.
    pub async fn delete_session(&self, id: SessionId) -> Result<(), BookingError> {
        self.authorize_admin("delete", id.to_string())?;

        self.sessions.delete(id).await?;
        tracing::info!(session_id = %id, "Session deleted");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Participation
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers `user_id` into a session. Duplicate handling is the registry's.
    pub async fn participate(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<(), BookingError> {
        self.sessions.participate(session_id, user_id).await?;
        tracing::debug!(session_id = %session_id, user_id = %user_id, "Joined session");
        Ok(())
    }

    /// Removes `user_id` from a session; `NotFound` if they weren't registered.
    pub async fn un_participate(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<(), BookingError> {
        self.sessions.un_participate(session_id, user_id).await?;
        tracing::debug!(session_id = %session_id, user_id = %user_id, "Left session");
        Ok(())
    }

    /// Flips the current user's participation and returns the refreshed session.
    ///
    /// The returned session is whatever the registry acknowledges last;
    /// concurrent toggles are not reconciled client-side.
    pub async fn toggle_participation(
        &self,
        session_id: SessionId,
    ) -> Result<ToggleResult, BookingError> {
        let user_id = self
            .auth
            .current_identity()
            .map(|identity| identity.user_id())
            .ok_or(BookingError::Unauthorized)?;

        let session = self.sessions.get(session_id).await?;
        let change = if session.has_participant(user_id) {
            self.un_participate(session_id, user_id).await?;
            ParticipationChange::Left
        } else {
            self.participate(session_id, user_id).await?;
            ParticipationChange::Joined
        };

        let session = self.sessions.get(session_id).await?;
        Ok(ToggleResult { change, session })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reference lookups
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_instructors(&self) -> Result<Vec<Instructor>, BookingError> {
        Ok(self.instructors.list().await?)
    }

    pub async fn get_instructor(&self, id: InstructorId) -> Result<Instructor, BookingError> {
        Ok(self.instructors.get(id).await?)
    }

    pub async fn get_user(&self, id: UserId) -> Result<UserProfile, BookingError> {
        Ok(self.users.get(id).await?)
    }

    fn authorize_admin(
        &self,
        action: &'static str,
        resource_id: impl Into<String>,
    ) -> Result<(), BookingError> {
        let identity = self.auth.current_identity();
        let result = require_administrator(identity.as_ref(), action, resource_id);
        log_authorization(&result);
        if result.is_granted() {
            Ok(())
        } else {
            Err(BookingError::Forbidden)
        }
    }
}

fn log_authorization(result: &AuthorizationResult) {
    if result.is_granted() {
        tracing::debug!(
            action = result.action,
            resource_id = %result.resource_id,
            user_id = ?result.user_id,
            "Session mutation authorized"
        );
    } else {
        tracing::warn!(
            action = result.action,
            resource_id = %result.resource_id,
            user_id = ?result.user_id,
            reason = ?result.denial_reason,
            "Session mutation denied"
        );
    }
}
