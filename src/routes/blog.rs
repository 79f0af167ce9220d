//! Blog content: listings, single posts, categories, tags and view counts.

use axum::extract::{Path, Query, State};
use axum::response::Response;

use crate::http::request::RequestId;
use crate::http::server::AppState;
use crate::routes::Route;
use crate::upstream::ForwardRequest;

const LIST: Route = Route::plain("blog.list", "Failed to fetch posts");
const RELATED: Route = Route::plain("blog.related", "Failed to fetch related posts");
const VIEW: Route = Route::plain("blog.view", "Failed to register view");
const CATEGORIES: Route = Route::plain("blog.categories", "Failed to fetch categories");
const RECENT: Route = Route::plain("blog.recent", "Failed to fetch recent posts");
const BY_SLUG: Route = Route::plain("blog.slug", "Failed to fetch post");
const TAGS: Route = Route::plain("blog.tags", "Failed to fetch tags");

pub const DEFAULT_RELATED_LIMIT: &str = "3";
pub const DEFAULT_RECENT_LIMIT: &str = "5";
pub const DEFAULT_TAGS_LIMIT: &str = "10";

/// First non-blank `limit` the client sent, else `default`. Forwarded
/// verbatim; the backend validates it. Repeated keys never reject the request.
fn limit_or(params: &[(String, String)], default: &'static str) -> String {
    params
        .iter()
        .filter(|(key, _)| key == "limit")
        .map(|(_, value)| value.trim())
        .find(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// `GET /api/blog`: paginated listing. Query parameters pass through.
pub async fn list(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let request = params
        .into_iter()
        .fold(ForwardRequest::get("/api/blog"), |req, (k, v)| req.query(k, v));
    LIST.relay(&state, &request_id, request).await
}

/// `GET /api/blog/{id}/related?limit=N`
pub async fn related(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let request = ForwardRequest::get("/api/blog")
        .segment(id)
        .path("related")
        .query("limit", limit_or(&params, DEFAULT_RELATED_LIMIT));
    RELATED.relay(&state, &request_id, request).await
}

/// `POST /api/blog/{id}/view`: bump the view counter.
pub async fn record_view(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(id): Path<String>,
) -> Response {
    let request = ForwardRequest::post("/api/blog").segment(id).path("view");
    VIEW.relay(&state, &request_id, request).await
}

/// `GET /api/blog/categories`
pub async fn categories(State(state): State<AppState>, request_id: RequestId) -> Response {
    CATEGORIES
        .relay(&state, &request_id, ForwardRequest::get("/api/blog/categories"))
        .await
}

/// `GET /api/blog/recent?limit=N`
pub async fn recent(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let request = ForwardRequest::get("/api/blog/recent")
        .query("limit", limit_or(&params, DEFAULT_RECENT_LIMIT));
    RECENT.relay(&state, &request_id, request).await
}

/// `GET /api/blog/slug/{slug}`
pub async fn by_slug(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(slug): Path<String>,
) -> Response {
    let request = ForwardRequest::get("/api/blog/slug").segment(slug);
    BY_SLUG.relay(&state, &request_id, request).await
}

/// `GET /api/blog/tags?limit=N`
pub async fn tags(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let request = ForwardRequest::get("/api/blog/tags")
        .query("limit", limit_or(&params, DEFAULT_TAGS_LIMIT));
    TAGS.relay(&state, &request_id, request).await
}
