//! Job executor trait implemented per job kind.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::JobQueueError;

/// Trait for implementing job executors.
///
/// Each job kind has a corresponding executor registered with the client.
/// The returned value becomes the run's recorded result; an error becomes
/// its recorded failure. Errors never propagate to the submitting request.
#[async_trait]
pub trait JobExecutor: Send + Sync {
    /// Returns the job kind this executor handles.
    fn job_kind(&self) -> &str;

    /// Execute the job with the given payload and produce its result.
    async fn execute(&self, payload: Value) -> Result<Value, JobQueueError>;
}

/// An executor that immediately succeeds with a null result.
///
/// Useful in tests and as a placeholder while a real implementation is
/// being wired up.
#[derive(Debug, Default, Clone)]
pub struct NoOpExecutor {
    kind: String,
}

impl NoOpExecutor {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

#[async_trait]
impl JobExecutor for NoOpExecutor {
    fn job_kind(&self) -> &str {
        &self.kind
    }

    async fn execute(&self, _payload: Value) -> Result<Value, JobQueueError> {
        Ok(Value::Null)
    }
}
