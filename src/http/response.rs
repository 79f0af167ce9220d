//! Response shaping for relayed backend answers.
//!
//! # Responsibilities
//! - Relay a successful backend body unchanged
//! - Map an upstream rejection to the same status with the route's
//!   error envelope
//! - Map a transport/decode failure to 500 with the route's fixed message
//!
//! # Design Decisions
//! - Every response the gateway produces is JSON
//! - The backend's own message wins over the route default when present

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::upstream::UpstreamResponse;

/// Which JSON envelope a route uses for failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorShape {
    /// `{ "success": false, "error": "..." }`
    Envelope,
    /// `{ "error": "..." }`
    Plain,
}

impl ErrorShape {
    pub fn body(self, message: &str) -> Value {
        match self {
            ErrorShape::Envelope => json!({ "success": false, "error": message }),
            ErrorShape::Plain => json!({ "error": message }),
        }
    }
}

/// A JSON error response in the given shape.
pub fn error_response(shape: ErrorShape, status: StatusCode, message: &str) -> Response {
    (status, Json(shape.body(message))).into_response()
}

/// Pull a human-readable message out of a backend error body.
pub fn upstream_message(body: &Value) -> Option<&str> {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(key))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
            Value::Object(inner) => inner.get("message").and_then(Value::as_str),
            _ => None,
        })
}

/// Success passthrough: status and body as the backend sent them.
pub fn relay_json(response: UpstreamResponse) -> Response {
    (response.status, Json(response.body)).into_response()
}

/// Upstream rejection: same status, backend message or the route default.
pub fn relay_rejection(shape: ErrorShape, response: &UpstreamResponse, default: &str) -> Response {
    let message = upstream_message(&response.body).unwrap_or(default);
    error_response(shape, response.status, message)
}

/// Transport or decode failure.
pub fn transport_failure(shape: ErrorShape, message: &str) -> Response {
    error_response(shape, StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// The fixed acknowledgment for routes that discard the backend body.
pub fn acknowledged() -> Response {
    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}
