//! Job queue client and worker pool.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

use tokio::sync::{Notify, RwLock};
use uuid::Uuid;

use crate::error::JobQueueError;
use crate::executor::JobExecutor;
use crate::types::{EnqueueResult, JobRequest, JobRun, JobStatus};

/// Maximum number of job runs to keep in memory.
const MAX_JOB_RUNS: usize = 1000;

/// Internal storage optimized for both iteration and lookup by ID.
#[derive(Debug, Default)]
struct QueueState {
    /// Ordered list of job run IDs (oldest first).
    order: VecDeque<Uuid>,
    /// Map from ID to job run for O(1) lookup.
    runs: HashMap<Uuid, JobRun>,
    /// Backing queue of submitted-but-unclaimed run IDs.
    pending: VecDeque<Uuid>,
}

impl QueueState {
    /// Insert a new job run, maintaining the size limit.
    fn insert(&mut self, run: JobRun) {
        let id = run.id;
        self.runs.insert(id, run);
        self.order.push_back(id);

        while self.order.len() > MAX_JOB_RUNS {
            if let Some(old_id) = self.order.pop_front() {
                self.runs.remove(&old_id);
            }
        }
    }

    /// Iterate over all runs in reverse order (most recent first).
    fn iter_recent(&self) -> impl Iterator<Item = &JobRun> {
        self.order.iter().rev().filter_map(|id| self.runs.get(id))
    }

    fn count(&self, kind: Option<&str>) -> usize {
        match kind {
            Some(kind) => self.runs.values().filter(|r| r.kind == kind).count(),
            None => self.runs.len(),
        }
    }

    fn clear(&mut self) {
        self.order.clear();
        self.runs.clear();
        self.pending.clear();
    }
}

/// Interface for enqueuing jobs and tracking their execution.
///
/// Cloning is cheap; clones share the same run store, backing queue and
/// executor registry.
#[derive(Clone)]
pub struct JobQueueClient {
    state: Arc<RwLock<QueueState>>,
    executors: Arc<RwLock<HashMap<String, Arc<dyn JobExecutor>>>>,
    notify: Arc<Notify>,
}

impl fmt::Debug for JobQueueClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobQueueClient")
            .field("state", &"<RwLock<QueueState>>")
            .field(
                "executors",
                &"<RwLock<HashMap<String, Arc<dyn JobExecutor>>>>",
            )
            .finish()
    }
}

impl Default for JobQueueClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JobQueueClient {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(QueueState::default())),
            executors: Arc::new(RwLock::new(HashMap::new())),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Register a job executor for a specific job kind.
    pub async fn register_executor<E: JobExecutor + 'static>(&self, executor: E) {
        let kind = executor.job_kind().to_owned();
        let mut executors = self.executors.write().await;
        executors.insert(kind, Arc::new(executor));
    }

    /// Enqueue a job for asynchronous processing.
    ///
    /// Records a pending run, pushes it onto the backing queue and returns
    /// immediately; execution never blocks the caller. Every submission gets
    /// its own id, so identical requests produce independent runs.
    pub async fn enqueue(&self, request: JobRequest) -> Result<EnqueueResult, JobQueueError> {
        let job_id = Uuid::new_v4();
        let run = JobRun::with_id(job_id, &request.kind, request.payload);

        let mut state = self.state.write().await;
        state.insert(run);
        state.pending.push_back(job_id);
        drop(state);

        self.notify.notify_one();
        Ok(EnqueueResult { job_id })
    }

    /// Spawn `count` worker tasks that drain the backing queue.
    ///
    /// Workers are decoupled from request lifetime and run until the process
    /// exits. There is no cancellation primitive: once claimed, a job runs to
    /// a terminal state, and a truly stuck executor leaves its run `started`.
    pub fn spawn_workers(&self, count: usize) -> Vec<tokio::task::JoinHandle<()>> {
        (0..count)
            .map(|worker| {
                let client = self.clone();
                tokio::spawn(async move {
                    tracing::debug!(worker, "job worker started");
                    loop {
                        let next = {
                            let mut state = client.state.write().await;
                            let id = state.pending.pop_front();
                            // Wake a sibling if work remains; a single Notify
                            // permit does not accumulate per submission.
                            if id.is_some() && !state.pending.is_empty() {
                                client.notify.notify_one();
                            }
                            id
                        };
                        match next {
                            Some(id) => client.process(id).await,
                            None => client.notify.notified().await,
                        }
                    }
                })
            })
            .collect()
    }

    /// Claim and execute one queued run, recording its terminal state.
    async fn process(&self, id: Uuid) {
        let claimed = {
            let mut state = self.state.write().await;
            match state.runs.get_mut(&id) {
                Some(run) if run.status == JobStatus::Pending => {
                    run.start();
                    Some((run.kind.clone(), run.payload.clone()))
                }
                // Trimmed from history or already claimed elsewhere.
                _ => None,
            }
        };
        let Some((kind, payload)) = claimed else {
            return;
        };

        let executor = {
            let executors = self.executors.read().await;
            executors.get(&kind).cloned()
        };

        let outcome = match executor {
            Some(executor) => executor.execute(payload).await,
            None => Err(JobQueueError::ExecutionFailed(format!(
                "no executor registered for job kind '{kind}'"
            ))),
        };

        let mut state = self.state.write().await;
        if let Some(run) = state.runs.get_mut(&id) {
            if run.status.is_terminal() {
                return;
            }
            match outcome {
                Ok(result) => {
                    tracing::debug!(%id, %kind, "job succeeded");
                    run.succeed(result);
                }
                Err(e) => {
                    tracing::warn!(%id, %kind, error = %e, "job failed");
                    run.fail(e.to_string());
                }
            }
        }
    }

    /// Get a specific job run by ID.
    pub async fn get_run(&self, id: Uuid) -> Option<JobRun> {
        let state = self.state.read().await;
        state.runs.get(&id).cloned()
    }

    /// List job runs most recent first, optionally filtered by kind.
    pub async fn list_runs(&self, kind: Option<&str>, limit: usize, offset: usize) -> Vec<JobRun> {
        let state = self.state.read().await;
        let iter = state.iter_recent();
        match kind {
            Some(kind) => iter
                .filter(|r| r.kind == kind)
                .skip(offset)
                .take(limit)
                .cloned()
                .collect(),
            None => iter.skip(offset).take(limit).cloned().collect(),
        }
    }

    /// Get total count of job runs, optionally filtered by kind.
    pub async fn count_runs(&self, kind: Option<&str>) -> usize {
        let state = self.state.read().await;
        state.count(kind)
    }

    /// Clear all job runs and the backing queue.
    pub async fn clear_runs(&self) {
        let mut state = self.state.write().await;
        state.clear();
    }

    /// Raw view of the backing queue: submitted-but-unclaimed runs in queue
    /// order. Best-effort introspection, not a stable contract.
    pub async fn queued(&self, limit: usize) -> Vec<JobRun> {
        let state = self.state.read().await;
        state
            .pending
            .iter()
            .take(limit)
            .filter_map(|id| state.runs.get(id))
            .cloned()
            .collect()
    }
}
