//! Booking error taxonomy surfaced to callers of the coordinator.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors returned by booking operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// No identity is present.
    #[error("Authentication required")]
    Unauthorized,

    /// An identity is present but lacks the required role.
    #[error("Permission denied")]
    Forbidden,

    /// The referenced session, user or instructor does not exist remotely.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The registry rejected a state that is already satisfied.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request payload was rejected.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Network or server failure.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl BookingError {
    pub fn not_found(message: impl Into<String>) -> Self {
        BookingError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        BookingError::Conflict(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        BookingError::Transport(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when the caller should be routed to authentication.
    pub fn requires_authentication(&self) -> bool {
        matches!(self, BookingError::Unauthorized | BookingError::Forbidden)
    }

    /// True for failures worth offering a retry on.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::Transport(_))
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Unauthorized => BookingError::Unauthorized,
            ErrorCode::Forbidden => BookingError::Forbidden,
            code if code.is_not_found() => BookingError::NotFound(err.message),
            ErrorCode::AlreadyParticipating | ErrorCode::Conflict => {
                BookingError::Conflict(err.message)
            }
            ErrorCode::ValidationFailed => BookingError::Validation {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => BookingError::Transport(err.to_string()),
        }
    }
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
