use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use serde_json::Value;
use uuid::Uuid;

use crate::handlers::jobs::run_to_payload;
use crate::{error::ApiError, state::AppState};

/// Poll one job run by id.
pub async fn get(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let run = state
        .job_queue
        .get_run(id)
        .await
        .ok_or_else(|| ApiError::not_found(format!("no job run with id {id}")))?;

    Ok(Json(run_to_payload(&run)))
}
