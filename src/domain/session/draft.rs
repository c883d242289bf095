//! Session draft: the editable fields of a session, without an id.

use serde::Serialize;

use crate::domain::foundation::{InstructorId, SessionDate, ValidationError};

/// Maximum length for a session name.
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum length for a session description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2500;

/// Payload for creating or updating a session.
///
/// Carries no id and no participants: the registry assigns the former and
/// the participation endpoints own the latter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionDraft {
    name: String,
    description: String,
    date: SessionDate,
    #[serde(rename = "teacher_id")]
    instructor_id: InstructorId,
}

impl SessionDraft {
    /// Creates a validated draft.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name or description is blank
    /// - `TooLong` if name exceeds 50 or description exceeds 2500 characters
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        date: SessionDate,
        instructor_id: InstructorId,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let description = description.into();
        validate_text("name", &name, MAX_NAME_LENGTH)?;
        validate_text("description", &description, MAX_DESCRIPTION_LENGTH)?;

        Ok(Self {
            name,
            description,
            date,
            instructor_id,
        })
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
}

fn validate_text(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let length = value.chars().count();
    if length > max {
        return Err(ValidationError::too_long(field, max, length));
    }
    Ok(())
}
