use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Json, Query};
use serde_json::{json, Value};

use crate::handlers::jobs::run_to_payload;
use crate::handlers::utils::parse_positive_usize;
use crate::{error::ApiError, state::AppState};

/// List job runs most recent first, optionally filtered by kind.
pub async fn list_runs(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let page = parse_positive_usize(params.get("page"), 1, "page")?;
    let per_page = parse_positive_usize(params.get("perPage"), 20, "perPage")?;
    let offset = (page - 1) * per_page;
    let kind_filter = params.get("kind").map(|s| s.as_str());

    let total = state.job_queue.count_runs(kind_filter).await;
    let runs = state.job_queue.list_runs(kind_filter, per_page, offset).await;

    let items: Vec<Value> = runs.iter().map(run_to_payload).collect();

    Ok(Json(json!({
        "items": items,
        "pagination": {
            "page": page,
            "perPage": per_page,
            "total": total,
        }
    })))
}
