//! HTTP route handlers for the catalog.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Product list
//! GET  /health          - Liveness check
//! GET  /health/ready    - Readiness check (database)
//!
//! # Auth
//! GET  /login           - Login page
//! POST /login           - Login action
//! GET  /register        - Register page
//! POST /register        - Register action
//! GET  /logout          - Logout action (requires auth)
//!
//! # Products
//! GET  /create_product  - Product form
//! POST /create_product  - Create product
//! ```

pub mod auth;
pub mod health;
pub mod home;
pub mod products;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id_middleware, security_headers_middleware, with_sessions};
use crate::state::AppState;

/// Create all routes for the catalog.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        .route(
            "/create_product",
            get(products::new_page).post(products::create),
        )
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Build the full application: routes, sessions and the middleware stack.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let router = routes().with_state(state.clone());

    with_sessions(router, &state)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
}
