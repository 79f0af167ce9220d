//! Destinations and newsletter sign-up.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::Response;

use crate::http::request::RequestId;
use crate::http::server::AppState;
use crate::routes::Route;
use crate::upstream::ForwardRequest;

const DESTINATIONS: Route = Route::plain("destinations.list", "Failed to fetch destinations");
const DESTINATION: Route = Route::plain("destinations.slug", "Failed to fetch destination");
const SUBSCRIBE: Route = Route::envelope("newsletter.subscribe", "Subscription failed");

/// `GET /api/destinations`: query parameters (region, page, ...) pass through.
pub async fn destinations(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let request = params
        .into_iter()
        .fold(ForwardRequest::get("/api/destinations"), |req, (k, v)| req.query(k, v));
    DESTINATIONS.relay(&state, &request_id, request).await
}

/// `GET /api/destinations/{slug}`
pub async fn destination(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(slug): Path<String>,
) -> Response {
    let request = ForwardRequest::get("/api/destinations").segment(slug);
    DESTINATION.relay(&state, &request_id, request).await
}

/// `POST /api/newsletter/subscribe`
pub async fn subscribe(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Bytes,
) -> Response {
    let payload = match SUBSCRIBE.json_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    SUBSCRIBE
        .relay(
            &state,
            &request_id,
            ForwardRequest::post("/api/newsletter/subscribe").json(payload),
        )
        .await
}
