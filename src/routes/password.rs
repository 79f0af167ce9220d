//! Password reset confirmation and reset-token validation.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::http::request::RequestId;
use crate::http::response::acknowledged;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routes::Route;
use crate::upstream::ForwardRequest;

const RESET: Route = Route::envelope("password.reset", "Failed to reset password");
const VALIDATE: Route = Route::envelope("password.validate_token", "Invalid or expired token");

/// `POST /api/password/reset-password`: set a new password with a reset
/// token. Answers `{ "success": true }` on success.
pub async fn reset_password(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Bytes,
) -> Response {
    let payload = match RESET.json_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    RESET
        .relay_with(
            &state,
            &request_id,
            ForwardRequest::post("/api/password/reset-password").json(payload),
            |_| acknowledged(),
        )
        .await
}

#[derive(Debug, Deserialize)]
pub struct ValidateParams {
    pub email: Option<String>,
    pub token: Option<String>,
}

/// `GET /api/password/validate-token?email=&token=`
///
/// Always 200 with a JSON boolean. Any failure reads as `false`.
pub async fn validate_token(
    State(state): State<AppState>,
    request_id: RequestId,
    params: Result<Query<ValidateParams>, QueryRejection>,
) -> Response {
    let start = Instant::now();

    let valid = match params {
        Ok(Query(params)) => check_token(&state, &request_id, params).await,
        Err(e) => {
            tracing::debug!(request_id = %request_id, error = %e, "Unreadable validate-token query");
            false
        }
    };

    metrics::record_request(VALIDATE.name, "GET", StatusCode::OK.as_u16(), start);
    (StatusCode::OK, Json(valid)).into_response()
}

async fn check_token(state: &AppState, request_id: &RequestId, params: ValidateParams) -> bool {
    let (Some(email), Some(token)) = (non_empty(params.email), non_empty(params.token)) else {
        return false;
    };

    let request = ForwardRequest::get("/api/password/validate-token")
        .query("email", email)
        .query("token", token);

    match VALIDATE.forward(state, request_id, request).await {
        Ok(response) if response.is_success() => token_is_valid(&response.body),
        _ => false,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reduce the backend's answer to a boolean.
///
/// Accepts a bare boolean or an object with `valid`, `isValid` or `success`.
pub fn token_is_valid(body: &Value) -> bool {
    match body {
        Value::Bool(valid) => *valid,
        Value::Object(map) => ["valid", "isValid", "success"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_bool))
            .unwrap_or(false),
        _ => false,
    }
}
