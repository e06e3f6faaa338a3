//! Factorial job implementation.

use std::time::Duration;

use bookshelf_job_queue::{async_trait, JobExecutor, JobQueueError};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::job_kinds;

/// Payload for the calc.factorial job.
///
/// The field is unsigned on purpose: a negative `n` fails deserialization and
/// is recorded as a job failure instead of silently producing 1.
#[derive(Debug, Deserialize)]
pub struct FactorialPayload {
    pub n: u32,
}

/// Executor for calc.factorial jobs.
#[derive(Debug, Clone)]
pub struct FactorialExecutor {
    delay: Duration,
}

impl FactorialExecutor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

/// Descending product from n down to 1, with 0! = 1.
fn factorial(n: u32) -> Option<u64> {
    let mut result: u64 = 1;
    for i in (1..=u64::from(n)).rev() {
        result = result.checked_mul(i)?;
    }
    Some(result)
}

#[async_trait]
impl JobExecutor for FactorialExecutor {
    fn job_kind(&self) -> &str {
        job_kinds::FACTORIAL
    }

    async fn execute(&self, payload: Value) -> Result<Value, JobQueueError> {
        let parsed: FactorialPayload = serde_json::from_value(payload)
            .map_err(|e| JobQueueError::InvalidPayload(e.to_string()))?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = factorial(parsed.n).ok_or_else(|| {
            JobQueueError::ExecutionFailed(format!("factorial({}) overflows u64", parsed.n))
        })?;

        debug!(n = parsed.n, result, "calc.factorial completed");
        Ok(json!(result))
    }
}
