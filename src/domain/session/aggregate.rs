//! Session entity: a scheduled, bookable event.
//!
//! # Participants
//!
//! The participant list keeps registration order and never holds the same
//! user twice. Payloads from the registry are normalised on the way in so
//! the invariant holds for every `Session` value in the process.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, InstructorId, SessionDate, SessionId, Timestamp, UserId,
};

use super::SessionDraft;

/// A booking session as known to the registry.
///
/// # Invariants
///
/// - `id` is `None` only before the registry persisted the session
/// - `participants` contains no duplicates
/// - `created_at` / `updated_at` are set by the registry only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<SessionId>,

    name: String,

    #[serde(default)]
    description: String,

    date: SessionDate,

    #[serde(rename = "teacher_id")]
    instructor_id: InstructorId,

    #[serde(
        rename = "users",
        default,
        deserialize_with = "deserialize_participants"
    )]
    participants: Vec<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<Timestamp>,
}

impl Session {
    /// Materialises a draft as a persisted session.
    ///
    /// Only registry implementations call this; the id is theirs to assign.
    pub fn from_draft(id: SessionId, draft: &SessionDraft, now: Timestamp) -> Self {
        Self {
            id: Some(id),
            name: draft.name().to_string(),
            description: draft.description().to_string(),
            date: draft.date(),
            instructor_id: draft.instructor_id(),
            participants: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> Option<SessionId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> SessionDate {
        self.date
    }

    pub fn instructor_id(&self) -> InstructorId {
        self.instructor_id
    }

    /// Participants in registration order.
    pub fn participants(&self) -> &[UserId] {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn has_participant(&self, user_id: UserId) -> bool {
        self.participants.contains(&user_id)
    }

    pub fn created_at(&self) -> Option<&Timestamp> {
        self.created_at.as_ref()
    }

    pub fn updated_at(&self) -> Option<&Timestamp> {
        self.updated_at.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registry-side mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the editable fields, keeping id, participants and creation time.
    pub fn apply_draft(&mut self, draft: &SessionDraft, now: Timestamp) {
        self.name = draft.name().to_string();
        self.description = draft.description().to_string();
        self.date = draft.date();
        self.instructor_id = draft.instructor_id();
        self.updated_at = Some(now);
    }

    /// Appends a participant.
    ///
    /// # Errors
    ///
    /// - `AlreadyParticipating` if the user is already registered
    pub fn add_participant(&mut self, user_id: UserId, now: Timestamp) -> Result<(), DomainError> {
        if self.has_participant(user_id) {
            return Err(self
                .participation_error(ErrorCode::AlreadyParticipating, user_id)
                .with_detail("reason", "already registered"));
        }
        self.participants.push(user_id);
        self.updated_at = Some(now);
        Ok(())
    }

    /// Removes a participant.
    ///
    /// # Errors
    ///
    /// - `NotParticipating` if the user was not registered
    pub fn remove_participant(
        &mut self,
        user_id: UserId,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        let position = self
            .participants
            .iter()
            .position(|p| *p == user_id)
            .ok_or_else(|| self.participation_error(ErrorCode::NotParticipating, user_id))?;
        self.participants.remove(position);
        self.updated_at = Some(now);
        Ok(())
    }

    fn participation_error(&self, code: ErrorCode, user_id: UserId) -> DomainError {
        let session = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unsaved".to_string());
        DomainError::new(
            code,
            format!("User {} participation conflict on session {}", user_id, session),
        )
        .with_detail("session_id", session)
        .with_detail("user_id", user_id.to_string())
    }
}

fn deserialize_participants<'de, D>(deserializer: D) -> Result<Vec<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<UserId>>::deserialize(deserializer)?.unwrap_or_default();
    let mut participants = Vec::with_capacity(raw.len());
    for user_id in raw {
        if !participants.contains(&user_id) {
            participants.push(user_id);
        }
    }
    Ok(participants)
}
