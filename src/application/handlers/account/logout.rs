//! LogoutHandler - clears the in-memory identity.

use std::sync::Arc;

use crate::application::AuthSessionStore;

/// Handler for logging out.
///
/// Only in-memory state is cleared; durable credentials, if a host keeps
/// any, belong to that host.
pub struct LogoutHandler {
    store: Arc<AuthSessionStore>,
}

impl LogoutHandler {
    pub fn new(store: Arc<AuthSessionStore>) -> Self {
        Self { store }
    }

    pub fn handle(&self) {
        self.store.log_out();
    }
}
