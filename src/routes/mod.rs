//! Backend-forwarding routes.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → handler (extract path/query/body, build ForwardRequest)
//!     → Route::relay (one backend call, logging, metrics)
//!     → success: route-specific body (passthrough, ack, boolean)
//!     → rejection: same status, backend message or route default
//!     → transport failure: 500, route default
//! ```
//!
//! # Design Decisions
//! - One linear request → forward → respond flow per handler
//! - Each route is a `const Route` carrying its name, error shape and
//!   default message, so the failure mapping lives in one place
//! - No retries; nothing propagates past a handler as an error

pub mod auth;
pub mod blog;
pub mod content;
pub mod password;
pub mod payments;
pub mod user;

use std::time::Instant;

use axum::body::Bytes;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;

use crate::http::request::{parse_json_body, RequestId, X_REQUEST_ID};
use crate::http::response::{
    error_response, relay_json, relay_rejection, transport_failure, ErrorShape,
};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::{ForwardRequest, UpstreamResult, UpstreamResponse};

/// Static description of one forwarding route.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    /// Label for logs and metrics.
    pub name: &'static str,
    pub shape: ErrorShape,
    /// Used when the call fails in transport, or the backend gives no message.
    pub default_error: &'static str,
}

impl Route {
    pub const fn envelope(name: &'static str, default_error: &'static str) -> Self {
        Self {
            name,
            shape: ErrorShape::Envelope,
            default_error,
        }
    }

    pub const fn plain(name: &'static str, default_error: &'static str) -> Self {
        Self {
            name,
            shape: ErrorShape::Plain,
            default_error,
        }
    }

    /// Make the backend call, logging rejections and failures.
    pub async fn forward(
        &self,
        state: &AppState,
        request_id: &RequestId,
        mut request: ForwardRequest,
    ) -> UpstreamResult<UpstreamResponse> {
        if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
            request = request.header(X_REQUEST_ID, value);
        }

        match state.backend.forward(request).await {
            Ok(response) => {
                if !response.is_success() {
                    tracing::warn!(
                        route = self.name,
                        request_id = %request_id,
                        status = response.status.as_u16(),
                        "Backend rejected request"
                    );
                }
                Ok(response)
            }
            Err(e) => {
                tracing::error!(
                    route = self.name,
                    request_id = %request_id,
                    kind = e.kind(),
                    error = %e,
                    "Backend call failed"
                );
                metrics::record_upstream_failure(self.name, e.kind());
                Err(e)
            }
        }
    }

    /// Forward and relay, shaping a successful answer with `on_success`.
    pub async fn relay_with<F>(
        &self,
        state: &AppState,
        request_id: &RequestId,
        request: ForwardRequest,
        on_success: F,
    ) -> Response
    where
        F: FnOnce(UpstreamResponse) -> Response,
    {
        let start = Instant::now();
        let method = request.method.clone();

        let response = match self.forward(state, request_id, request).await {
            Ok(upstream) if upstream.is_success() => on_success(upstream),
            Ok(upstream) => relay_rejection(self.shape, &upstream, self.default_error),
            Err(_) => transport_failure(self.shape, self.default_error),
        };

        metrics::record_request(self.name, method.as_str(), response.status().as_u16(), start);
        response
    }

    /// Forward and relay the backend body unchanged on success.
    pub async fn relay(
        &self,
        state: &AppState,
        request_id: &RequestId,
        request: ForwardRequest,
    ) -> Response {
        self.relay_with(state, request_id, request, relay_json).await
    }

    /// Answer locally without contacting the backend.
    pub fn reject(&self, method: &Method, status: StatusCode, message: &str) -> Response {
        metrics::record_request(self.name, method.as_str(), status.as_u16(), Instant::now());
        error_response(self.shape, status, message)
    }

    /// Parse a JSON request body. An unparseable body fails like a broken
    /// backend call: 500 with the route's default message.
    pub fn json_body(&self, body: &Bytes) -> Result<Value, Response> {
        parse_json_body(body).map_err(|e| {
            tracing::warn!(route = self.name, error = %e, "Unparseable request body");
            self.reject(&Method::POST, StatusCode::INTERNAL_SERVER_ERROR, self.default_error)
        })
    }
}

/// Every forwarding route, ready to merge into the server router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/google", post(auth::google))
        .route("/api/auth/register", post(auth::register))
        .route("/api/blog", get(blog::list))
        .route("/api/blog/categories", get(blog::categories))
        .route("/api/blog/recent", get(blog::recent))
        .route("/api/blog/tags", get(blog::tags))
        .route("/api/blog/slug/{slug}", get(blog::by_slug))
        .route("/api/blog/{id}/related", get(blog::related))
        .route("/api/blog/{id}/view", post(blog::record_view))
        .route("/api/destinations", get(content::destinations))
        .route("/api/destinations/{slug}", get(content::destination))
        .route("/api/newsletter/subscribe", post(content::subscribe))
        .route("/api/password/reset-password", post(password::reset_password))
        .route("/api/password/validate-token", get(password::validate_token))
        .route("/api/payments/webhook", post(payments::webhook))
        .route("/api/user/request-reset-password", post(user::request_reset_password))
}
