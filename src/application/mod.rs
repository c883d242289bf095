//! Application layer - authentication state, booking façade and handlers.
//!
//! `AuthSessionStore` owns the identity; `BookingCoordinator` and the
//! account handlers read it to authorize and update it after login,
//! logout and account deletion.

mod auth_store;
mod booking_coordinator;
pub mod handlers;

pub use auth_store::{AuthSessionStore, AuthStateStream, Subscription};
pub use booking_coordinator::{BookingCoordinator, ParticipationChange, ToggleResult};
pub use handlers::{
    DeleteAccountHandler, LoginCommand, LoginHandler, LogoutHandler, RegisterCommand,
    RegisterHandler,
};
