//! AuthSessionStore - single source of truth for "who is logged in".
//!
//! One store is constructed per running client and shared by `Arc` with
//! every component that needs authentication state (coordinator, HTTP
//! adapter, navigation, route guards).
//!
//! # Notification model
//!
//! Observers live in one ordered registry. `log_in` / `log_out` update the
//! identity and fan out synchronously to every observer in subscription
//! order, all under one emission lock, so concurrent calls deliver in the
//! order their writes happened. Subscribing takes the same lock to replay
//! the current value and register, so no transition falls in between.
//! Every call emits, including `log_out` while already anonymous; rapid
//! transitions are never coalesced.
//!
//! Callbacks run under the emission lock: they may unsubscribe, but must
//! not call `log_in`, `log_out` or subscribe on the same store.
//!
//! ```text
//! Anonymous --log_in(a)--> Authenticated(a) --log_in(b)--> Authenticated(b)
//!     ^  |                        |
//!     |  +------log_out-----+     +--log_out--> Anonymous
//!     +---------------------+
//! ```

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::domain::foundation::Identity;

type Callback = Arc<dyn Fn(bool) + Send + Sync>;

#[derive(Clone)]
enum Observer {
    Callback(Callback),
    Channel(mpsc::UnboundedSender<bool>),
}

struct StoreInner {
    /// Serializes identity writes with their fan-out, and replay with registration.
    emission: Mutex<()>,
    identity: RwLock<Option<Identity>>,
    observers: Mutex<Vec<(u64, Observer)>>,
    next_subscription: AtomicU64,
}

impl StoreInner {
    fn remove(&self, id: u64) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(observer_id, _)| *observer_id != id);
    }
}

/// Process-wide authentication state with change notification.
pub struct AuthSessionStore {
    inner: Arc<StoreInner>,
}

impl AuthSessionStore {
    /// Creates a store in the `Anonymous` state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                emission: Mutex::new(()),
                identity: RwLock::new(None),
                observers: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
            }),
        }
    }

    /// Replaces the current identity and emits `true`.
    pub fn log_in(&self, identity: Identity) {
        tracing::debug!(
            user_id = %identity.user_id(),
            administrator = identity.is_administrator(),
            "Logging in"
        );
        let _emission = self.lock_emission();
        *self
            .inner
            .identity
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(identity);
        self.emit(true);
    }

    /// Clears the current identity and emits `false`, even if already anonymous.
    pub fn log_out(&self) {
        let _emission = self.lock_emission();
        let previous = self
            .inner
            .identity
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match previous {
            Some(identity) => tracing::debug!(user_id = %identity.user_id(), "Logging out"),
            None => tracing::debug!("Logout requested while anonymous"),
        }
        self.emit(false);
    }

    /// Returns a snapshot of the current identity.
    pub fn current_identity(&self) -> Option<Identity> {
        self.inner
            .identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Registers a synchronous observer.
    ///
    /// The callback runs immediately with the current value, then once per
    /// `log_in` / `log_out` call. It must not block. Dropping the returned
    /// handle unsubscribes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let callback: Callback = Arc::new(callback);
        let _emission = self.lock_emission();
        callback(self.is_authenticated());
        self.register(Observer::Callback(callback))
    }

    /// Returns a stream of authentication changes.
    ///
    /// The first item is the current value; each later item is one
    /// `log_in` (`true`) or `log_out` (`false`) call, in call order. The
    /// stream never ends on its own; drop it to unsubscribe.
    pub fn observe_authenticated(&self) -> AuthStateStream {
        let (sender, receiver) = mpsc::unbounded_channel();
        let _emission = self.lock_emission();
        // Cannot fail: the receiver is still in scope.
        let _ = sender.send(self.is_authenticated());
        let subscription = self.register(Observer::Channel(sender));
        AuthStateStream {
            receiver,
            _subscription: subscription,
        }
    }

    /// Number of live observers.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn lock_emission(&self) -> MutexGuard<'_, ()> {
        self.inner
            .emission
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn register(&self, observer: Observer) -> Subscription {
        let id = self.inner.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    fn emit(&self, authenticated: bool) {
        // Snapshot so observers may subscribe or unsubscribe from inside a callback.
        let observers: Vec<(u64, Observer)> = self
            .inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut closed = Vec::new();
        for (id, observer) in observers {
            match observer {
                Observer::Callback(callback) => callback(authenticated),
                Observer::Channel(sender) => {
                    if sender.send(authenticated).is_err() {
                        closed.push(id);
                    }
                }
            }
        }
        for id in closed {
            self.inner.remove(id);
        }
    }
}

impl Default for AuthSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AuthSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle for a registered observer. Unsubscribes on drop.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    store: Weak<StoreInner>,
}

impl Subscription {
    /// Stops delivery to this observer.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.remove(self.id);
        }
    }
}

/// Stream returned by [`AuthSessionStore::observe_authenticated`].
pub struct AuthStateStream {
    receiver: mpsc::UnboundedReceiver<bool>,
    _subscription: Subscription,
}

impl Stream for AuthStateStream {
    type Item = bool;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<bool>> {
        self.receiver.poll_recv(cx)
    }
}
