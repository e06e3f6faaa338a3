use std::sync::Arc;

use axum::extract::{Extension, Json};
use serde_json::{json, Value};

use crate::handlers::books::{cache, dto::BookPayload};
use crate::validation;
use crate::{error::ApiError, state::AppState};
use bookshelf_db::books as db_books;

/// Insert a new catalog entry.
///
/// The insert commits before any cache side effect; only then are the list
/// snapshots purged, so a concurrent read can never repopulate the cache
/// with pre-mutation data.
pub async fn create(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<BookPayload>,
) -> Result<Json<Value>, ApiError> {
    payload
        .validate()
        .map_err(|issues| ApiError::Validation(validation::to_payload(&issues)))?;

    let mut tx = state.db_pool.begin().await.map_err(ApiError::from)?;
    let id = db_books::insert_book(&mut *tx, &payload.as_new_book())
        .await
        .map_err(ApiError::from)?;
    tx.commit().await.map_err(ApiError::from)?;

    cache::invalidate(state.cache.as_ref()).await;

    Ok(Json(json!({
        "id": id,
        "title": payload.title,
        "author": payload.author,
        "year": payload.year,
        "message": "book created",
    })))
}
