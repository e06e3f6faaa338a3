//! Concrete job implementations for the bookshelf backend.
//!
//! Implementations of the [`JobExecutor`](bookshelf_job_queue::JobExecutor)
//! trait for the arithmetic demonstration jobs.
//!
//! # Job Kinds
//!
//! - `calc.sum` - add two integers
//! - `calc.factorial` - factorial of a non-negative integer
//!
//! Both executors sleep for a configurable delay before computing, standing
//! in for a long-running computation. Pass [`std::time::Duration::ZERO`] to
//! disable the delay in tests.

mod factorial;
mod sum;

pub use factorial::FactorialExecutor;
pub use sum::SumExecutor;

use std::time::Duration;

use bookshelf_job_queue::JobQueueClient;

/// Artificial delay applied before each computation by default.
pub const DEFAULT_TASK_DELAY: Duration = Duration::from_secs(3);

/// Register all available job executors with the job queue client.
pub async fn register_all_executors(client: &JobQueueClient, delay: Duration) {
    client.register_executor(SumExecutor::new(delay)).await;
    client.register_executor(FactorialExecutor::new(delay)).await;
}

/// Job kind constants for type-safe job references.
pub mod job_kinds {
    pub const SUM: &str = "calc.sum";
    pub const FACTORIAL: &str = "calc.factorial";
}
