//! Session-related types.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::{UserId, Username};

/// Session-stored user identity.
///
/// Minimal data stored in the server-side session to identify the logged-in
/// user. Expiry is enforced by the session layer (inactivity timeout).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's username.
    pub username: Username,
    /// When this session was authenticated.
    pub authenticated_at: DateTime<Utc>,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
