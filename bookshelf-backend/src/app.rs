use std::sync::Arc;

use axum::{
    extract::Extension,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::handlers::{books, debug, jobs};
use crate::state::AppState;

/// Build the primary axum router with the provided shared application state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/books", get(books::list::list).post(books::create::create))
        .route(
            "/books/{id}",
            put(books::update::update).delete(books::delete::delete),
        )
        .route("/calc/sum", post(jobs::submit::submit_sum))
        .route("/calc/factorial", post(jobs::submit::submit_factorial))
        .route("/jobs", get(jobs::list::list_runs))
        .route("/jobs/{id}", get(jobs::status::get))
        .route("/debug/queue", get(debug::queue))
        .route("/debug/cache", get(debug::cache_dump))
        .layer(Extension(state))
}

async fn health_handler() -> impl IntoResponse {
    // Liveness only; readiness of the store and queue is their own concern.
    Json(json!({ "message": "Healthy" }))
}
