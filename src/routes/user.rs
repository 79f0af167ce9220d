//! Account self-service: password reset requests.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::http::request::RequestId;
use crate::http::server::AppState;
use crate::routes::Route;
use crate::upstream::{ForwardRequest, UpstreamResponse};

const REQUEST_RESET: Route =
    Route::envelope("user.request_reset_password", "Failed to request password reset");

/// `POST /api/user/request-reset-password`
///
/// Answers `{ "success": true }`. The backend's reset token is added as
/// `token` only when `security.expose_reset_token` is on.
pub async fn request_reset_password(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Bytes,
) -> Response {
    let payload = match REQUEST_RESET.json_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let expose_token = state.security.expose_reset_token;
    REQUEST_RESET
        .relay_with(
            &state,
            &request_id,
            ForwardRequest::post("/api/user/request-reset-password").json(payload),
            |upstream| reset_requested(upstream, expose_token),
        )
        .await
}

fn reset_requested(upstream: UpstreamResponse, expose_token: bool) -> Response {
    let mut body = json!({ "success": true });
    if expose_token {
        if let Some(token) = reset_token(&upstream.body) {
            tracing::warn!("Echoing password reset token; never enable this in production");
            body["token"] = Value::String(token.to_string());
        }
    }
    (StatusCode::OK, Json(body)).into_response()
}

fn reset_token(body: &Value) -> Option<&str> {
    ["token", "resetToken"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
}
