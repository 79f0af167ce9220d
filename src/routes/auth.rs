//! Sign-in and registration.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;

use crate::http::request::RequestId;
use crate::http::response::acknowledged;
use crate::http::server::AppState;
use crate::routes::Route;
use crate::upstream::ForwardRequest;

const GOOGLE: Route = Route::envelope("auth.google", "Google sign-in failed");
const REGISTER: Route = Route::envelope("auth.register", "Registration failed");

/// `POST /api/auth/google`: exchange a Google credential for a session.
/// The backend's body (user and token) is relayed as-is.
pub async fn google(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Bytes,
) -> Response {
    let payload = match GOOGLE.json_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    GOOGLE
        .relay(&state, &request_id, ForwardRequest::post("/api/auth/google").json(payload))
        .await
}

/// `POST /api/auth/register`: answers `{ "success": true }` on success.
pub async fn register(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Bytes,
) -> Response {
    let payload = match REGISTER.json_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    REGISTER
        .relay_with(
            &state,
            &request_id,
            ForwardRequest::post("/api/auth/register").json(payload),
            |_| acknowledged(),
        )
        .await
}
