//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use catalog_core::{UserId, Username};

/// A site account.
///
/// The password hash is deliberately not part of this type; it is only read
/// by [`crate::db::UserRepository::get_password_hash`] during login.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique account name.
    pub username: Username,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
