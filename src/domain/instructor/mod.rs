//! Instructor reference data.
//!
//! Instructors (`teacher` on the wire) are read-only for this client: they
//! are fetched on demand to label sessions and populate the session form.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InstructorId, Timestamp};

/// An instructor who runs sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub id: InstructorId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Instructor {
    pub fn new(
        id: InstructorId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            created_at: None,
            updated_at: None,
        }
    }

    /// "First LAST", the way session details label their instructor.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name.to_uppercase())
    }
}
