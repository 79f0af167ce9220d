//! Forwarded request/response values and error definitions.

use axum::body::Bytes;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

// Re-export BackendConfig from config module to avoid duplication
pub use crate::config::schema::BackendConfig;

/// Errors that can occur while talking to the backend API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The target URL could not be built from the base origin.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Connection, TLS, timeout or body read failure.
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a success status but the body is not JSON.
    #[error("Backend returned {status} with an unreadable body: {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::InvalidUrl(_) => "invalid_url",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Decode { .. } => "decode",
        }
    }
}

impl From<url::ParseError> for UpstreamError {
    fn from(error: url::ParseError) -> Self {
        UpstreamError::InvalidUrl(error.to_string())
    }
}

/// Result type for backend calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Body carried by a forwarded request.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardBody {
    Empty,
    Json(Value),
    /// Raw bytes, sent as-is (webhook payloads must stay byte-exact).
    Raw(Bytes),
}

/// A single outbound call to the backend API.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    /// Path segments below the backend origin, unencoded.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: ForwardBody,
    pub headers: Vec<(HeaderName, HeaderValue)>,
}

impl ForwardRequest {
    /// Start a request to a fixed backend path such as `/api/blog/categories`.
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            segments: Vec::new(),
            query: Vec::new(),
            body: ForwardBody::Empty,
            headers: Vec::new(),
        }
        .path(path)
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    /// Append a fixed path, split on `/`.
    pub fn path(mut self, path: &str) -> Self {
        self.segments.extend(
            path.split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Append one caller-supplied segment. Slashes inside it are encoded,
    /// so it can never escape into a different backend path.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = ForwardBody::Json(body);
        self
    }

    pub fn raw(mut self, body: impl Into<Bytes>) -> Self {
        self.body = ForwardBody::Raw(body.into());
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }
}

/// What the backend answered.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    /// Parsed JSON body; `Null` when the body was empty, or when a
    /// non-success response was not JSON.
    pub body: Value,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
