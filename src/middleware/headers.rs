//! Response header middleware
//!
//! Applied to every route:
//! - no-cache headers so browsers and proxies never store API responses
//! - CORS origin check against `cors_allow_origin`
//! - `X-Timestamp` with the current UTC time (RFC 3339)
//!
//! # Example
//!
//! ```ignore
//! use convoai_gateway::middleware::response_headers_middleware;
//!
//! let app = Router::new()
//!     .route("/ping", get(ping))
//!     .layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         response_headers_middleware,
//!     ));
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::state::AppState;

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Origin, Content-Type, Authorization, X-Requested-With";

/// Whether `origin` may make cross-origin requests under `allowed`.
///
/// `allowed` is `"*"` or a comma-separated list matched exactly after
/// trimming. An empty origin is never allowed.
pub fn is_origin_allowed(origin: &str, allowed: Option<&str>) -> bool {
    if origin.is_empty() {
        return false;
    }
    match allowed {
        Some("*") => true,
        Some(list) => list.split(',').any(|entry| entry.trim() == origin),
        None => false,
    }
}

fn insert_no_cache(headers: &mut HeaderMap) {
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("private, no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::EXPIRES, HeaderValue::from_static("-1"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
}

fn insert_cors(headers: &mut HeaderMap, origin: &HeaderValue) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

fn insert_timestamp(headers: &mut HeaderMap) {
    let now = OffsetDateTime::now_utc();
    match now.format(&Rfc3339) {
        Ok(ts) => {
            if let Ok(value) = HeaderValue::from_str(&ts) {
                headers.insert("x-timestamp", value);
            }
        }
        Err(e) => tracing::warn!(error = %e, "Failed to format response timestamp"),
    }
}

/// Middleware that sets no-cache, CORS and timestamp headers.
///
/// Requests carrying a non-allowed `Origin` get `403 Forbidden`; an allowed
/// `OPTIONS` preflight is answered with `204 No Content` without reaching
/// the handler. Requests without `Origin` pass through unchanged.
pub async fn response_headers_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = request.headers().get(header::ORIGIN).cloned();

    let mut response = match &origin {
        Some(value) => {
            let allowed = value
                .to_str()
                .map(|o| is_origin_allowed(o, state.config.cors_allow_origin.as_deref()))
                .unwrap_or(false);

            if !allowed {
                tracing::debug!(origin = ?value, "Rejected cross-origin request");
                StatusCode::FORBIDDEN.into_response()
            } else if request.method() == Method::OPTIONS {
                let mut preflight = StatusCode::NO_CONTENT.into_response();
                insert_cors(preflight.headers_mut(), value);
                preflight
            } else {
                let mut response = next.run(request).await;
                insert_cors(response.headers_mut(), value);
                response
            }
        }
        None => next.run(request).await,
    };

    let headers = response.headers_mut();
    insert_no_cache(headers);
    insert_timestamp(headers);
    response
}
