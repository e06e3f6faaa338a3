use std::sync::Arc;

use axum::extract::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::ApiError, state::AppState};
use bookshelf_job_queue::{JobRequest, JobStatus};
use bookshelf_jobs::job_kinds;

#[derive(Debug, Deserialize)]
pub struct SumBody {
    pub a: i64,
    pub b: i64,
}

/// Dispatch a calc.sum job and return its handle immediately.
pub async fn submit_sum(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<SumBody>,
) -> Result<Json<Value>, ApiError> {
    let enqueued = state
        .job_queue
        .enqueue(JobRequest::new(
            job_kinds::SUM,
            json!({"a": body.a, "b": body.b}),
        ))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(json!({
        "id": enqueued.job_id,
        "status": JobStatus::Pending.to_string(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct FactorialBody {
    pub n: i64,
}

/// Dispatch a calc.factorial job and return its handle immediately.
///
/// The argument is accepted as signed here and validated by the executor, so
/// a negative submission surfaces as a recorded job failure rather than a
/// rejected request.
pub async fn submit_factorial(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<FactorialBody>,
) -> Result<Json<Value>, ApiError> {
    let enqueued = state
        .job_queue
        .enqueue(JobRequest::new(job_kinds::FACTORIAL, json!({"n": body.n})))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(json!({
        "id": enqueued.job_id,
        "status": JobStatus::Pending.to_string(),
    })))
}
