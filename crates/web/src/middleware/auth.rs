//! Authentication extractors.
//!
//! The session record ([`CurrentUser`]) is checked explicitly on every
//! request that needs it; nothing about authentication is implicit.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that requires an authenticated session.
///
/// Rejects with `401 Unauthorized` when there is no logged-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but the user is not logged in.
#[derive(Debug)]
pub enum AuthRejection {
    /// No session layer is installed for this route.
    MissingSession,
    /// The session exists but holds no user.
    NotLoggedIn,
    /// The session record could not be loaded or decoded.
    SessionUnavailable(tower_sessions::session::Error),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::MissingSession => {
                tracing::error!("RequireAuth used on a route without the session layer");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::NotLoggedIn => (StatusCode::UNAUTHORIZED, "Login required").into_response(),
            Self::SessionUnavailable(e) => {
                tracing::error!(error = %e, "failed to read session");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::MissingSession)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .map_err(AuthRejection::SessionUnavailable)?
            .ok_or(AuthRejection::NotLoggedIn)?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this never rejects the request.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "failed to read session, treating as anonymous");
                    None
                }),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Store the current user in the session.
///
/// The session ID is cycled first so an ID issued before login cannot be
/// reused to ride the authenticated session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove the current user and destroy the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use catalog_core::{UserId, Username};
    use chrono::Utc;
    use tower_sessions::MemoryStore;

    use super::*;

    fn parts_with(session: Option<Session>) -> Parts {
        let (mut parts, ()) = Request::builder().body(()).unwrap().into_parts();
        if let Some(session) = session {
            parts.extensions.insert(session);
        }
        parts
    }

    fn empty_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn alice() -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            username: Username::parse("alice").unwrap(),
            authenticated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_require_auth_with_user() {
        let session = empty_session();
        session
            .insert(session_keys::CURRENT_USER, alice())
            .await
            .unwrap();

        let mut parts = parts_with(Some(session));
        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_require_auth_without_user() {
        let result =
            RequireAuth::from_request_parts(&mut parts_with(Some(empty_session())), &()).await;
        assert!(matches!(result, Err(AuthRejection::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_require_auth_without_session_layer() {
        let result = RequireAuth::from_request_parts(&mut parts_with(None), &()).await;
        assert!(matches!(result, Err(AuthRejection::MissingSession)));
    }

    #[tokio::test]
    async fn test_unreadable_session_is_server_error() {
        let session = empty_session();
        session
            .insert(session_keys::CURRENT_USER, "not a user record")
            .await
            .unwrap();

        let result =
            RequireAuth::from_request_parts(&mut parts_with(Some(session.clone())), &()).await;
        let Err(rejection) = result else {
            panic!("expected rejection");
        };
        assert!(matches!(rejection, AuthRejection::SessionUnavailable(_)));
        assert_eq!(
            rejection.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let mut parts = parts_with(Some(session));
        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn test_not_logged_in_is_unauthorized() {
        assert_eq!(
            AuthRejection::NotLoggedIn.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
