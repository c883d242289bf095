//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the booking domain.

mod auth;
mod authorization;
mod errors;
mod ids;
mod session_date;
mod timestamp;

pub use auth::{AuthError, Identity, DEFAULT_TOKEN_TYPE};
pub use authorization::{require_administrator, AuthorizationResult};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{InstructorId, SessionId, UserId};
pub use session_date::SessionDate;
pub use timestamp::Timestamp;
