//! DeleteAccountHandler - deletes the current user's account, then logs out.

use std::sync::Arc;

use crate::application::AuthSessionStore;
use crate::domain::foundation::UserId;
use crate::domain::session::BookingError;
use crate::ports::UserDirectory;

/// Handler for closing the logged-in user's account.
pub struct DeleteAccountHandler {
    users: Arc<dyn UserDirectory>,
    store: Arc<AuthSessionStore>,
}

impl DeleteAccountHandler {
    pub fn new(users: Arc<dyn UserDirectory>, store: Arc<AuthSessionStore>) -> Self {
        Self { users, store }
    }

    /// Deletes the account and returns its id.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if nobody is logged in (no remote call is made)
    /// - whatever the registry reports; the identity is kept in that case
    pub async fn handle(&self) -> Result<UserId, BookingError> {
        let user_id = self
            .store
            .current_identity()
            .map(|identity| identity.user_id())
            .ok_or(BookingError::Unauthorized)?;

        self.users.delete(user_id).await?;
        tracing::info!(user_id = %user_id, "Account deleted");

        self.store.log_out();
        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, Identity};
    use crate::domain::user::UserProfile;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockUserDirectory {
        deleted: Mutex<Vec<UserId>>,
        fail_with: Option<ErrorCode>,
    }

    impl MockUserDirectory {
        fn new(fail_with: Option<ErrorCode>) -> Self {
            Self {
                deleted: Mutex::new(Vec::new()),
                fail_with,
            }
        }
    }

    #[async_trait]
    impl UserDirectory for MockUserDirectory {
        async fn get(&self, _id: UserId) -> Result<UserProfile, DomainError> {
            unreachable!("account deletion never reads profiles")
        }

        async fn delete(&self, id: UserId) -> Result<(), DomainError> {
            if let Some(code) = self.fail_with {
                return Err(DomainError::new(code, "Simulated failure"));
            }
            self.deleted.lock().unwrap().push(id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn deletes_current_user_and_logs_out() {
        let users = Arc::new(MockUserDirectory::new(None));
        let store = Arc::new(AuthSessionStore::new());
        store.log_in(Identity::new("t", UserId::new(5), false));
        let handler = DeleteAccountHandler::new(users.clone(), store.clone());

        let deleted = handler.handle().await.unwrap();

        assert_eq!(deleted, UserId::new(5));
        assert_eq!(*users.deleted.lock().unwrap(), vec![UserId::new(5)]);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn anonymous_caller_is_unauthorized() {
        let users = Arc::new(MockUserDirectory::new(None));
        let handler = DeleteAccountHandler::new(users.clone(), Arc::new(AuthSessionStore::new()));

        let err = handler.handle().await.unwrap_err();

        assert_eq!(err, BookingError::Unauthorized);
        assert!(users.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn registry_failure_keeps_identity() {
        let users = Arc::new(MockUserDirectory::new(Some(ErrorCode::ServerError)));
        let store = Arc::new(AuthSessionStore::new());
        store.log_in(Identity::new("t", UserId::new(5), false));
        let handler = DeleteAccountHandler::new(users, store.clone());

        let err = handler.handle().await.unwrap_err();

        assert!(err.is_retryable());
        assert!(store.is_authenticated());
    }
}
