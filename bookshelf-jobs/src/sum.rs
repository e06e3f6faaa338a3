//! Sum job implementation.

use std::time::Duration;

use bookshelf_job_queue::{async_trait, JobExecutor, JobQueueError};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::job_kinds;

/// Payload for the calc.sum job.
#[derive(Debug, Deserialize)]
pub struct SumPayload {
    pub a: i64,
    pub b: i64,
}

/// Executor for calc.sum jobs.
#[derive(Debug, Clone)]
pub struct SumExecutor {
    delay: Duration,
}

impl SumExecutor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl JobExecutor for SumExecutor {
    fn job_kind(&self) -> &str {
        job_kinds::SUM
    }

    async fn execute(&self, payload: Value) -> Result<Value, JobQueueError> {
        let parsed: SumPayload = serde_json::from_value(payload)
            .map_err(|e| JobQueueError::InvalidPayload(e.to_string()))?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let sum = parsed
            .a
            .checked_add(parsed.b)
            .ok_or_else(|| JobQueueError::ExecutionFailed("sum overflows i64".into()))?;

        debug!(a = parsed.a, b = parsed.b, sum, "calc.sum completed");
        Ok(json!(sum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn adds_two_integers() {
        let executor = SumExecutor::new(Duration::ZERO);
        let result = executor.execute(json!({"a": 2, "b": 3})).await.unwrap();
        assert_eq!(result, json!(5));

        let result = executor.execute(json!({"a": -3, "b": 3})).await.unwrap();
        assert_eq!(result, json!(0));

        let result = executor.execute(json!({"a": 100, "b": 200})).await.unwrap();
        assert_eq!(result, json!(300));
    }

    #[tokio::test]
    async fn rejects_malformed_payloads() {
        let executor = SumExecutor::new(Duration::ZERO);
        let err = executor.execute(json!({"a": 1})).await.unwrap_err();
        assert!(matches!(err, JobQueueError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn overflow_is_an_execution_failure() {
        let executor = SumExecutor::new(Duration::ZERO);
        let err = executor
            .execute(json!({"a": i64::MAX, "b": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, JobQueueError::ExecutionFailed(_)));
    }
}
