//! In-memory session registry.
//!
//! Behaves like the remote registry for the operations the client uses:
//! ids are assigned sequentially, duplicate participation is rejected and
//! removing a non-participant reports `NotParticipating`.
//!
//! # Example
//!
//! ```ignore
//! let registry = InMemorySessionRegistry::new().with_next_id(42);
//! let session = registry.create(&draft).await?;
//! assert_eq!(session.id(), Some(SessionId::new(42)));
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp, UserId};
use crate::domain::session::{Session, SessionDraft};
use crate::ports::SessionRegistry;

/// Session registry backed by a map, ordered by id.
#[derive(Debug)]
pub struct InMemorySessionRegistry {
    sessions: RwLock<BTreeMap<SessionId, Session>>,
    next_id: AtomicU64,
    calls: AtomicUsize,
    force_error: RwLock<Option<DomainError>>,
}

impl InMemorySessionRegistry {
    /// Creates an empty registry whose first session gets id 1.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            calls: AtomicUsize::new(0),
            force_error: RwLock::new(None),
        }
    }

    /// Sets the id the next created session receives.
    pub fn with_next_id(self, id: u64) -> Self {
        self.next_id.store(id, Ordering::SeqCst);
        self
    }

    /// Seeds a session as if it had been created remotely.
    pub fn with_session(self, draft: &SessionDraft) -> Self {
        self.insert(draft);
        self
    }

    /// Forces every operation to fail with the given error.
    pub fn with_error(self, error: DomainError) -> Self {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    /// Clears the forced error.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Number of port calls received, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn insert(&self, draft: &SessionDraft) -> Session {
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let session = Session::from_draft(id, draft, Timestamp::now());
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, session.clone());
        session
    }

    /// Counts the call and returns the forced error, if any.
    fn enter(&self) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn with_existing<T>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut Session) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        f(session)
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: SessionId) -> DomainError {
    DomainError::new(ErrorCode::SessionNotFound, format!("Session {} not found", id))
        .with_detail("session_id", id.to_string())
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn list(&self) -> Result<Vec<Session>, DomainError> {
        self.enter()?;
        Ok(self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect())
    }

    async fn get(&self, id: SessionId) -> Result<Session, DomainError> {
        self.enter()?;
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, draft: &SessionDraft) -> Result<Session, DomainError> {
        self.enter()?;
        Ok(self.insert(draft))
    }

    async fn update(&self, id: SessionId, draft: &SessionDraft) -> Result<Session, DomainError> {
        self.enter()?;
        self.with_existing(id, |session| {
            session.apply_draft(draft, Timestamp::now());
            Ok(session.clone())
        })
    }

    async fn delete(&self, id: SessionId) -> Result<(), DomainError> {
        self.enter()?;
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn participate(&self, id: SessionId, user_id: UserId) -> Result<(), DomainError> {
        self.enter()?;
        self.with_existing(id, |session| session.add_participant(user_id, Timestamp::now()))
    }

    async fn un_participate(&self, id: SessionId, user_id: UserId) -> Result<(), DomainError> {
        self.enter()?;
        self.with_existing(id, |session| {
            session.remove_participant(user_id, Timestamp::now())
        })
    }
}
