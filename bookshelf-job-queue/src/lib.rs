//! Asynchronous job dispatch used by the backend.
//!
//! Submissions return immediately with an id; a pool of worker tasks pulls
//! queued jobs, executes them through registered [`JobExecutor`]s and writes
//! the terminal status and result back to the shared run store. A submission
//! survives the submitting request returning, and anyone holding the id can
//! poll the run.
//!
//! # Architecture
//!
//! - [`JobQueueClient`] - enqueue jobs, spawn workers, poll runs
//! - [`JobExecutor`] - trait implemented per job kind
//! - [`JobRun`] - record of one execution, immutable once terminal
//! - [`JobRequest`] - a request to enqueue a job
//!
//! # Example
//!
//! ```rust,no_run
//! use bookshelf_job_queue::{JobQueueClient, JobRequest, JobExecutor, JobQueueError};
//! use serde_json::{json, Value};
//! use async_trait::async_trait;
//!
//! struct Doubler;
//!
//! #[async_trait]
//! impl JobExecutor for Doubler {
//!     fn job_kind(&self) -> &str {
//!         "math.double"
//!     }
//!
//!     async fn execute(&self, payload: Value) -> Result<Value, JobQueueError> {
//!         let n = payload["n"].as_i64().unwrap_or(0);
//!         Ok(json!(n * 2))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = JobQueueClient::new();
//!     client.register_executor(Doubler).await;
//!     client.spawn_workers(2);
//!
//!     let result = client
//!         .enqueue(JobRequest::new("math.double", json!({"n": 21})))
//!         .await
//!         .unwrap();
//!     println!("enqueued job: {}", result.job_id);
//! }
//! ```

mod client;
mod error;
mod executor;
mod types;

pub use client::JobQueueClient;
pub use error::JobQueueError;
pub use executor::{JobExecutor, NoOpExecutor};
pub use types::{EnqueueResult, JobRequest, JobRun, JobStatus};

// Re-export async_trait for convenience when implementing JobExecutor
pub use async_trait::async_trait;
