use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use serde_json::{json, Value};

use crate::handlers::books::{cache, dto::BookPayload};
use crate::validation;
use crate::{error::ApiError, state::AppState};
use bookshelf_db::books as db_books;

/// Replace every mutable field of one catalog entry.
pub async fn update(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<BookPayload>,
) -> Result<Json<Value>, ApiError> {
    payload
        .validate()
        .map_err(|issues| ApiError::Validation(validation::to_payload(&issues)))?;

    let mut tx = state.db_pool.begin().await.map_err(ApiError::from)?;
    let affected = db_books::update_book(&mut *tx, id, &payload.as_new_book())
        .await
        .map_err(ApiError::from)?;
    if affected == 0 {
        // Dropping the transaction rolls it back; nothing changed, so the
        // cache is left alone.
        return Err(ApiError::not_found(format!("no book with id {id}")));
    }
    tx.commit().await.map_err(ApiError::from)?;

    cache::invalidate(state.cache.as_ref()).await;

    Ok(Json(json!({
        "id": id,
        "message": "book updated",
    })))
}
