//! HTTP request handlers.

pub mod items;
pub mod system;

use axum::http::HeaderMap;
use uuid::Uuid;

/// Resolves the request id: the `x-request-id` header when the caller sent
/// one, otherwise a fresh UUID.
#[must_use]
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), ToString::to_string)
}
