//! Mapping of HTTP failures onto domain error codes.

use reqwest::StatusCode;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::MessageResponse;

/// Which family of endpoint a request targeted.
///
/// The same status means different things on different routes: a 400 on
/// `participate` is a duplicate registration, on `unParticipate` a missing
/// one, and on a session write a rejected payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Session,
    Join,
    Leave,
    Instructor,
    User,
}

impl Route {
    pub fn not_found_code(self) -> ErrorCode {
        match self {
            Route::Session | Route::Join | Route::Leave => ErrorCode::SessionNotFound,
            Route::Instructor => ErrorCode::InstructorNotFound,
            Route::User => ErrorCode::UserNotFound,
        }
    }
}

/// Converts a non-success status into a `DomainError`.
pub(crate) fn status_error(status: StatusCode, route: Route, body: &str) -> DomainError {
    let message = MessageResponse::extract(body).unwrap_or_else(|| status.to_string());

    match status.as_u16() {
        400 => match route {
            Route::Join => DomainError::new(ErrorCode::AlreadyParticipating, message),
            Route::Leave => DomainError::new(ErrorCode::NotParticipating, message),
            _ => DomainError::validation("request", message),
        },
        401 => DomainError::new(ErrorCode::Unauthorized, message),
        403 => DomainError::new(ErrorCode::Forbidden, message),
        404 => DomainError::new(route.not_found_code(), message),
        409 => DomainError::new(ErrorCode::Conflict, message),
        500..=599 => DomainError::new(
            ErrorCode::ServerError,
            format!("Server error {}: {}", status, message),
        ),
        _ => DomainError::new(
            ErrorCode::NetworkError,
            format!("Unexpected status {}: {}", status, message),
        ),
    }
    .with_detail("status", status.as_u16().to_string())
}

/// Converts a reqwest failure (no usable response) into a `DomainError`.
pub(crate) fn transport_error(err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::new(ErrorCode::NetworkError, "Request timed out")
    } else if err.is_connect() {
        DomainError::new(ErrorCode::NetworkError, format!("Connection failed: {}", err))
    } else if err.is_decode() {
        DomainError::new(ErrorCode::DecodeError, format!("Failed to read response: {}", err))
    } else {
        DomainError::new(ErrorCode::NetworkError, err.to_string())
    }
}

/// Converts a body that is not the expected JSON into a `DomainError`.
pub(crate) fn decode_error(err: serde_json::Error) -> DomainError {
    DomainError::new(ErrorCode::DecodeError, format!("Failed to parse response: {}", err))
}
