//! Inbound request helpers.
//!
//! # Responsibilities
//! - Expose the request ID assigned by the middleware stack
//! - Parse JSON bodies regardless of the declared content type
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing, and forwarded to
//!   the backend so both sides log the same ID
//! - Body parsing never produces an axum rejection; routes turn failures
//!   into their own error shape

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderName;
use serde_json::Value;
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// The request's correlation ID.
///
/// A missing or unreadable (non-ASCII) inbound ID is replaced with a fresh
/// UUID v4, so the backend and the logs always see a usable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let inbound = parts
            .headers
            .get(&X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty());

        let id = match inbound {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                tracing::debug!(request_id = %id, "Assigned request ID");
                id
            }
        };
        Ok(RequestId(id))
    }
}

/// Parse a request body as JSON. An empty body is an error.
pub fn parse_json_body(body: &Bytes) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    #[tokio::test]
    async fn test_request_id_from_header() {
        let (mut parts, _) = Request::builder()
            .header("x-request-id", "abc-123")
            .body(())
            .unwrap()
            .into_parts();

        let id = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id.as_str(), "abc-123");
    }

    #[tokio::test]
    async fn test_request_id_missing_is_generated() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let id = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[tokio::test]
    async fn test_non_ascii_request_id_is_replaced() {
        let (mut parts, _) = Request::builder()
            .header("x-request-id", HeaderValue::from_bytes(b"caf\xe9").unwrap())
            .body(())
            .unwrap()
            .into_parts();

        let id = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_parse_json_body() {
        let body = Bytes::from_static(br#"{"email":"a@example.com"}"#);
        assert_eq!(
            parse_json_body(&body).unwrap(),
            serde_json::json!({"email": "a@example.com"})
        );
        assert!(parse_json_body(&Bytes::new()).is_err());
        assert!(parse_json_body(&Bytes::from_static(b"email=a")).is_err());
    }
}
