//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use tower_sessions::cookie::Key;

use crate::config::{CatalogConfig, MIN_SESSION_SECRET_LENGTH};

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("session secret must be at least {MIN_SESSION_SECRET_LENGTH} bytes (got {0})")]
    SessionSecretTooShort(usize),
}

/// Application state shared across all handlers.
///
/// This is the explicit application context: it is constructed once at
/// startup and handed to every handler through axum's `State` extractor.
/// Cloning is cheap (one `Arc`).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CatalogConfig,
    pool: SqlitePool,
    session_key: Key,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Catalog configuration
    /// * `pool` - `SQLite` connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the session secret is too short to derive a
    /// cookie signing key.
    pub fn new(config: CatalogConfig, pool: SqlitePool) -> Result<Self, StateError> {
        let secret = config.session_secret.expose_secret().as_bytes();
        if secret.len() < MIN_SESSION_SECRET_LENGTH {
            return Err(StateError::SessionSecretTooShort(secret.len()));
        }
        let session_key = Key::from(secret);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                session_key,
            }),
        })
    }

    /// Get a reference to the catalog configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get the key used to sign session cookies.
    #[must_use]
    pub fn session_key(&self) -> &Key {
        &self.inner.session_key
    }
}
