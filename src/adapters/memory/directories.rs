//! In-memory instructor and user directories.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, InstructorId, UserId};
use crate::domain::instructor::Instructor;
use crate::domain::user::UserProfile;
use crate::ports::{InstructorDirectory, UserDirectory};

/// Fixed set of instructors.
#[derive(Debug, Default)]
pub struct InMemoryInstructorDirectory {
    instructors: RwLock<BTreeMap<InstructorId, Instructor>>,
}

impl InMemoryInstructorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instructor(self, instructor: Instructor) -> Self {
        self.instructors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(instructor.id, instructor);
        self
    }
}

#[async_trait]
impl InstructorDirectory for InMemoryInstructorDirectory {
    async fn list(&self) -> Result<Vec<Instructor>, DomainError> {
        Ok(self
            .instructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect())
    }

    async fn get(&self, id: InstructorId) -> Result<Instructor, DomainError> {
        self.instructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InstructorNotFound,
                    format!("Instructor {} not found", id),
                )
            })
    }
}

/// User profiles keyed by id. Deletion removes the profile.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<BTreeMap<UserId, UserProfile>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, profile: UserProfile) -> Self {
        self.insert(profile);
        self
    }

    /// Adds or replaces a profile at runtime.
    pub fn insert(&self, profile: UserProfile) {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(profile.id, profile);
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }
}

fn user_not_found(id: UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User {} not found", id))
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get(&self, id: UserId) -> Result<UserProfile, DomainError> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| user_not_found(id))
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| user_not_found(id))
    }
}
