pub mod list;
pub mod status;
pub mod submit;

use bookshelf_job_queue::JobRun;
use serde_json::{json, Value};

pub(crate) fn run_to_payload(run: &JobRun) -> Value {
    json!({
        "id": run.id,
        "kind": run.kind,
        "status": run.status.to_string(),
        "result": run.result,
        "errorMessage": run.error_message,
        "submittedAt": run.submitted_at.to_rfc3339(),
        "finishedAt": run.finished_at.map(|dt| dt.to_rfc3339()),
    })
}
