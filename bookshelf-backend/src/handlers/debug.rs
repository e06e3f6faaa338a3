//! Best-effort introspection endpoints.
//!
//! These read the queue's backing list and the cache keyspace directly. They
//! are diagnostic tooling, not a stable contract.

use std::sync::Arc;

use axum::extract::{Extension, Json};
use serde_json::{json, Value};

use crate::handlers::books::cache::LIST_NAMESPACE;
use crate::handlers::jobs::run_to_payload;
use crate::{error::ApiError, state::AppState};

const MAX_QUEUE_ENTRIES: usize = 100;

/// GET /debug/queue
/// Raw pending entries of the job queue, in queue order.
pub async fn queue(Extension(state): Extension<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let entries = state.job_queue.queued(MAX_QUEUE_ENTRIES).await;
    let tasks: Vec<Value> = entries.iter().map(run_to_payload).collect();

    Ok(Json(json!({
        "total": tasks.len(),
        "tasks": tasks,
    })))
}

/// GET /debug/cache
/// Live cached list snapshots with their remaining ttl.
///
/// Unlike the read path this propagates cache errors: an unreachable backend
/// is exactly what the caller is probing for.
pub async fn cache_dump(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let keys = state.cache.scan_keys(LIST_NAMESPACE).await?;

    let mut items = Vec::with_capacity(keys.len());
    for key in keys {
        let value = state.cache.get(&key).await?;
        let ttl = state.cache.ttl_remaining(&key).await?;
        let parsed = value.and_then(|raw| serde_json::from_str::<Value>(&raw).ok());
        items.push(json!({
            "key": key,
            "ttlSecs": ttl.map(|d| d.as_secs()),
            "value": parsed,
        }));
    }

    Ok(Json(json!(items)))
}
