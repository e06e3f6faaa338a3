//! Core types for the job queue.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Minimal representation of a job submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    pub kind: String,
    pub payload: Value,
}

impl JobRequest {
    #[inline]
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

/// Result returned after a job has been enqueued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnqueueResult {
    pub job_id: Uuid,
}

/// Status of a job run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Started,
    Success,
    Failure,
}

impl JobStatus {
    /// Returns true if this status represents a terminal state.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Started => "started",
            Self::Success => "success",
            Self::Failure => "failure",
        })
    }
}

/// A record of one job execution.
///
/// The run is process-wide shared state keyed by its id. Once terminal it is
/// never mutated again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRun {
    pub id: Uuid,
    pub kind: String,
    pub status: JobStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    pub result: Option<Value>,
    pub error_message: Option<String>,
    pub payload: Value,
}

impl JobRun {
    /// Create a new pending run with a specific ID.
    #[inline]
    pub fn with_id(id: Uuid, kind: impl Into<String>, payload: Value) -> Self {
        Self {
            id,
            kind: kind.into(),
            status: JobStatus::Pending,
            submitted_at: chrono::Utc::now(),
            finished_at: None,
            result: None,
            error_message: None,
            payload,
        }
    }

    /// Mark the run as claimed by a worker.
    #[inline]
    pub fn start(&mut self) {
        self.status = JobStatus::Started;
    }

    /// Record a successful result.
    #[inline]
    pub fn succeed(&mut self, result: Value) {
        self.status = JobStatus::Success;
        self.finished_at = Some(chrono::Utc::now());
        self.result = Some(result);
    }

    /// Record a failure with an error description.
    #[inline]
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = JobStatus::Failure;
        self.finished_at = Some(chrono::Utc::now());
        self.error_message = Some(message.into());
    }
}
