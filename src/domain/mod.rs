//! Domain layer containing business types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, identity, errors)
//! - `session` - Booking sessions, drafts and the booking error taxonomy
//! - `instructor` - Read-only instructor reference data
//! - `user` - User profiles

pub mod foundation;
pub mod instructor;
pub mod session;
pub mod user;
