//! Payment provider webhook ingestion.
//!
//! The payload is forwarded byte-for-byte with the provider's signature
//! header; the backend verifies the signature against the raw body.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, Method, StatusCode};
use axum::response::Response;

use crate::http::request::RequestId;
use crate::http::server::AppState;
use crate::routes::Route;
use crate::upstream::ForwardRequest;

/// Signature header set by the payment provider.
pub const SIGNATURE_HEADER: HeaderName = HeaderName::from_static("stripe-signature");

const WEBHOOK: Route = Route::plain("payments.webhook", "Internal server error");

/// `POST /api/payments/webhook`
pub async fn webhook(
    State(state): State<AppState>,
    request_id: RequestId,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(signature) = headers.get(&SIGNATURE_HEADER).cloned() else {
        tracing::warn!(request_id = %request_id, "Webhook without signature header");
        return WEBHOOK.reject(
            &Method::POST,
            StatusCode::BAD_REQUEST,
            "Missing stripe-signature header",
        );
    };

    let request = ForwardRequest::post("/api/payments/webhook")
        .raw(body)
        .header(SIGNATURE_HEADER, signature);
    WEBHOOK.relay(&state, &request_id, request).await
}
