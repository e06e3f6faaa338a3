use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Json, Query};

use crate::handlers::books::cache;
use crate::handlers::books::dto::{BookResponse, CatalogPage};
use crate::handlers::utils::parse_positive_usize;
use crate::{error::ApiError, state::AppState};
use bookshelf_db::books as db_books;

/// List the catalog one page at a time, read-through cached.
///
/// Pagination is validated before the cache or the store is touched. A hit
/// returns the cached snapshot verbatim; a miss queries the slice plus the
/// total count, writes the snapshot back with the configured ttl and returns
/// it. Cache trouble degrades to a plain store query.
pub async fn list(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<CatalogPage>, ApiError> {
    let page = parse_positive_usize(params.get("page"), 1, "page")?;
    let limit = parse_positive_usize(params.get("limit"), 10, "limit")?;

    let key = cache::list_key(page, limit);
    if let Some(snapshot) = cache::lookup_page(state.cache.as_ref(), &key).await {
        return Ok(Json(snapshot));
    }

    let offset = ((page - 1) * limit) as i64;
    let mut conn = state.db_pool.acquire().await.map_err(ApiError::from)?;
    let rows = db_books::list_page(&mut *conn, limit as i64, offset)
        .await
        .map_err(ApiError::from)?;
    let total = db_books::count_books(&mut *conn)
        .await
        .map_err(ApiError::from)?;

    let snapshot = CatalogPage {
        page,
        limit,
        total,
        books: rows.into_iter().map(BookResponse::from).collect(),
    };
    cache::store_page(state.cache.as_ref(), &key, &snapshot, state.list_ttl).await;

    Ok(Json(snapshot))
}
