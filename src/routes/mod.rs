use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{middleware::request_id, state::AppState};

pub mod jobs;
pub mod users;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users/:username", get(users::profile))
        .route("/users/:username/watchlist", get(users::watchlist))
        .route("/users/:username/top-rated", get(users::top_rated))
        .route("/jobs/sync-tmdb", post(jobs::sync_tmdb))
        .layer(TraceLayer::new_for_http().make_span_with(request_id::request_span))
        // request ids must be assigned before the trace span reads them
        .layer(middleware::from_fn(request_id::propagate_request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
