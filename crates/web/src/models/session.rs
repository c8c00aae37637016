//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use edureach_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the signed-in person.
/// Admin status is not stored here; extractors look it up per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Identity ID.
    pub id: UserId,
    /// Identity email address.
    pub email: Email,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";
}
