//! Instructor directory port (read-only reference data).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InstructorId};
use crate::domain::instructor::Instructor;

#[async_trait]
pub trait InstructorDirectory: Send + Sync {
    /// List all instructors.
    async fn list(&self) -> Result<Vec<Instructor>, DomainError>;

    /// Fetch one instructor.
    ///
    /// # Errors
    ///
    /// - `InstructorNotFound` if unknown
    async fn get(&self, id: InstructorId) -> Result<Instructor, DomainError>;
}
