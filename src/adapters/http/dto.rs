//! Wire shapes for the authentication endpoints.
//!
//! Session, instructor and user payloads deserialize straight into the
//! domain types; only the auth routes need separate request/response
//! structs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Identity, UserId, DEFAULT_TOKEN_TYPE};

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterBody<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
}

/// Successful login payload.
///
/// `token` is optional because some registries (and recorded fixtures)
/// omit it; the identity then carries an empty token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IdentityPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub admin: bool,
}

impl From<IdentityPayload> for Identity {
    fn from(payload: IdentityPayload) -> Self {
        Identity::new(payload.token.unwrap_or_default(), payload.id, payload.admin)
            .with_names(payload.username, payload.first_name, payload.last_name)
            .with_token_type(
                payload
                    .token_type
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
            )
    }
}

/// `{ "message": "..." }` body used by register and by error responses.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Extracts `message` from a JSON body, falling back to the raw text.
    pub fn extract(body: &str) -> Option<String> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<MessageResponse>(trimmed) {
            Ok(parsed) => Some(parsed.message),
            Err(_) => Some(trimmed.to_string()),
        }
    }
}
