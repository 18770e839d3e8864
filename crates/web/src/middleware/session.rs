//! Session middleware configuration.
//!
//! Sessions are stored server-side in `SQLite` through tower-sessions; the
//! cookie only carries the signed session ID.

use axum::Router;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::state::AppState;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "catalog_session";

/// Session expiry time in seconds (7 days of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Wrap a router in the session layer.
///
/// The sessions table must already exist (see [`crate::db::migrate`]).
#[must_use]
pub fn with_sessions(router: Router, state: &AppState) -> Router {
    let store = SqliteStore::new(state.pool().clone());

    let layer = SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(state.config().is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(state.session_key().clone());

    router.layer(layer)
}
