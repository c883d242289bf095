//! User directory port.
//!
//! Simple lookups and account deletion against `/user/{id}`.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::UserProfile;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user profile.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if unknown
    async fn get(&self, id: UserId) -> Result<UserProfile, DomainError>;

    /// Delete a user account.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if unknown
    /// - `Unauthorized` if the caller may not delete this account
    async fn delete(&self, id: UserId) -> Result<(), DomainError>;
}
