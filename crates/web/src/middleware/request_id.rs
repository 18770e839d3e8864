//! Request ID middleware for request tracing and correlation.
//!
//! Every request gets an ID, either forwarded from an upstream proxy or
//! freshly generated. It is recorded on the tracing span opened by
//! `TraceLayer`, tagged on the Sentry scope, and echoed back to the client.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upstream IDs longer than this are replaced with a generated one.
const MAX_FORWARDED_ID_LENGTH: usize = 128;

/// Pick the forwarded ID if it is usable, otherwise generate a UUID v4.
fn resolve_request_id(forwarded: Option<&HeaderValue>) -> String {
    forwarded
        .and_then(|h| h.to_str().ok())
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_FORWARDED_ID_LENGTH
                && id.chars().all(|c| c.is_ascii_graphic())
        })
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers().get(REQUEST_ID_HEADER));

    Span::current().record("request_id", &request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
