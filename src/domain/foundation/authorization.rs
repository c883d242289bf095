//! Authorization support types.
//!
//! Mutating session operations are gated on the administrator role. The
//! check is local and runs before any request reaches the registry:
//!
//! ```ignore
//! let result = require_administrator(store.current_identity().as_ref(), "create", "new");
//! log_authorization(&result);
//! if !result.is_granted() {
//!     return Err(BookingError::Forbidden);
//! }
//! ```

use super::Identity;

/// Result of an authorization check.
///
/// Contains both the decision and context for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResult {
    /// Whether access was granted.
    pub granted: bool,

    /// The action being attempted (e.g. "create", "delete").
    pub action: &'static str,

    /// The ID of the resource being accessed, or "new" for creation.
    pub resource_id: String,

    /// The requesting user, if anyone is logged in.
    pub user_id: Option<String>,

    /// Reason for denial (if denied).
    pub denial_reason: Option<String>,
}

impl AuthorizationResult {
    /// Creates a successful authorization result.
    pub fn granted(
        action: &'static str,
        resource_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            granted: true,
            action,
            resource_id: resource_id.into(),
            user_id: Some(user_id.into()),
            denial_reason: None,
        }
    }

    /// Creates a denied authorization result.
    pub fn denied(
        action: &'static str,
        resource_id: impl Into<String>,
        user_id: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            granted: false,
            action,
            resource_id: resource_id.into(),
            user_id,
            denial_reason: Some(reason.into()),
        }
    }

    /// Returns true if access was granted.
    pub fn is_granted(&self) -> bool {
        self.granted
    }
}

/// Checks that the caller holds the administrator role.
///
/// An absent identity is denied exactly like a non-administrator.
pub fn require_administrator(
    identity: Option<&Identity>,
    action: &'static str,
    resource_id: impl Into<String>,
) -> AuthorizationResult {
    match identity {
        Some(identity) if identity.is_administrator() => {
            AuthorizationResult::granted(action, resource_id, identity.user_id().to_string())
        }
        Some(identity) => AuthorizationResult::denied(
            action,
            resource_id,
            Some(identity.user_id().to_string()),
            format!("User {} is not an administrator", identity.user_id()),
        ),
        None => AuthorizationResult::denied(action, resource_id, None, "No user is logged in"),
    }
}
