use std::sync::Arc;
use std::time::Duration;

use bookshelf_cache::Cache;
use bookshelf_job_queue::JobQueueClient;

/// Shared application state passed to every route handler.
///
/// The pool, cache and queue client are process-wide singletons built once at
/// startup; handlers receive them through this container so tests can
/// substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: Arc<bookshelf_db::DbPool>,
    pub cache: Arc<dyn Cache>,
    pub job_queue: JobQueueClient,
    pub list_ttl: Duration,
}

impl AppState {
    /// Build a fully initialised state container from its constituent parts.
    pub fn new(
        db_pool: bookshelf_db::DbPool,
        cache: Arc<dyn Cache>,
        job_queue: JobQueueClient,
        list_ttl: Duration,
    ) -> Self {
        Self {
            db_pool: Arc::new(db_pool),
            cache,
            job_queue,
            list_ttl,
        }
    }
}
