//! Application handlers.
//!
//! Command handlers that orchestrate identity-affecting operations.

pub mod account;

pub use account::{
    DeleteAccountHandler, LoginCommand, LoginHandler, LogoutHandler, RegisterCommand,
    RegisterHandler,
};
