//! Authentication route handlers.
//!
//! Username/password login, registration and logout backed by
//! [`AuthService`] and the server-side session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub current_user: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub current_user: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    LoginTemplate {
        current_user: user.map(|u| u.username.into_inner()),
    }
}

/// Handle login form submission.
///
/// On success the session ID is rotated and the user is stored in the
/// session. Unknown usernames and wrong passwords fail identically.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let user = AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await?;

    let current = CurrentUser {
        id: user.id,
        username: user.username,
        authenticated_at: Utc::now(),
    };
    set_current_user(&session, &current).await?;
    set_sentry_user(&current.id, current.username.as_str());

    tracing::info!(user_id = %current.id, "user logged in");
    Ok(Redirect::to("/"))
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    RegisterTemplate {
        current_user: user.map(|u| u.username.into_inner()),
    }
}

/// Handle registration form submission.
#[instrument(skip(state, form), fields(username = %form.username))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect> {
    AuthService::new(state.pool())
        .register(&form.username, &form.password, &form.confirm_password)
        .await?;

    Ok(Redirect::to("/login"))
}

// =============================================================================
// Logout
// =============================================================================

/// Log the current user out and destroy the session.
#[instrument(skip(session, user), fields(user_id = %user.id))]
pub async fn logout(RequireAuth(user): RequireAuth, session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();

    tracing::info!("user logged out");
    Ok(Redirect::to("/"))
}
