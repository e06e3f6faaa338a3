use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use serde_json::{json, Value};

use crate::handlers::books::cache;
use crate::{error::ApiError, state::AppState};
use bookshelf_db::books as db_books;

/// Remove one catalog entry.
pub async fn delete(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let mut tx = state.db_pool.begin().await.map_err(ApiError::from)?;
    let affected = db_books::delete_book(&mut *tx, id)
        .await
        .map_err(ApiError::from)?;
    if affected == 0 {
        return Err(ApiError::not_found(format!("no book with id {id}")));
    }
    tx.commit().await.map_err(ApiError::from)?;

    cache::invalidate(state.cache.as_ref()).await;

    Ok(Json(json!({
        "id": id,
        "message": "book deleted",
    })))
}
