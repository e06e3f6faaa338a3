use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Extension, Path};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use bookshelf_backend::error::ApiError;
use bookshelf_backend::handlers::debug;
use bookshelf_backend::handlers::jobs::{status, submit};
use bookshelf_backend::state::AppState;
use bookshelf_cache::{Cache, MemoryCache};
use bookshelf_db::{create_pool, ensure_schema, DbConnectionConfig};
use bookshelf_job_queue::JobQueueClient;

/// State with registered executors (no artificial delay) and two workers.
async fn job_state(spawn_workers: bool) -> Arc<AppState> {
    let config = DbConnectionConfig::new("sqlite::memory:").with_max_connections(1);
    let pool = create_pool(&config).await.expect("create pool");
    ensure_schema(&pool).await.expect("ensure schema");

    let job_queue = JobQueueClient::new();
    bookshelf_jobs::register_all_executors(&job_queue, Duration::ZERO).await;
    if spawn_workers {
        job_queue.spawn_workers(2);
    }

    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    Arc::new(AppState::new(pool, cache, job_queue, Duration::from_secs(60)))
}

fn submitted_id(body: &serde_json::Value) -> Uuid {
    body.get("id")
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("submission id")
}

async fn wait_terminal(state: &AppState, id: Uuid) -> serde_json::Value {
    for _ in 0..200 {
        let run = status::get(Extension(Arc::new(state.clone())), Path(id))
            .await
            .expect("status")
            .0;
        let status_str = run.get("status").and_then(|v| v.as_str()).unwrap_or("");
        if status_str == "success" || status_str == "failure" {
            return run;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("job {id} never reached a terminal state");
}

#[tokio::test]
async fn repeated_sum_submissions_get_distinct_ids_and_results() {
    let state = job_state(true).await;

    let first = submit::submit_sum(
        Extension(state.clone()),
        Json(submit::SumBody { a: 2, b: 3 }),
    )
    .await
    .expect("submit");
    let second = submit::submit_sum(
        Extension(state.clone()),
        Json(submit::SumBody { a: 2, b: 3 }),
    )
    .await
    .expect("submit");

    assert_eq!(first.0.get("status").and_then(|v| v.as_str()), Some("pending"));
    let first_id = submitted_id(&first.0);
    let second_id = submitted_id(&second.0);
    assert_ne!(first_id, second_id);

    let first_run = wait_terminal(&state, first_id).await;
    let second_run = wait_terminal(&state, second_id).await;
    assert_eq!(first_run.get("result"), Some(&json!(5)));
    assert_eq!(second_run.get("result"), Some(&json!(5)));
}

#[tokio::test]
async fn sum_handles_signed_arguments() {
    let state = job_state(true).await;

    for (a, b, expected) in [(-3, 3, 0), (100, 200, 300)] {
        let submitted = submit::submit_sum(
            Extension(state.clone()),
            Json(submit::SumBody { a, b }),
        )
        .await
        .expect("submit");
        let run = wait_terminal(&state, submitted_id(&submitted.0)).await;
        assert_eq!(run.get("status").and_then(|v| v.as_str()), Some("success"));
        assert_eq!(run.get("result"), Some(&json!(expected)));
    }
}

#[tokio::test]
async fn factorial_computes_known_values() {
    let state = job_state(true).await;

    for (n, expected) in [(0, 1), (1, 1), (5, 120)] {
        let submitted = submit::submit_factorial(
            Extension(state.clone()),
            Json(submit::FactorialBody { n }),
        )
        .await
        .expect("submit");
        let run = wait_terminal(&state, submitted_id(&submitted.0)).await;
        assert_eq!(run.get("status").and_then(|v| v.as_str()), Some("success"));
        assert_eq!(run.get("result"), Some(&json!(expected)));
    }
}

#[tokio::test]
async fn negative_factorial_is_a_recorded_failure() {
    let state = job_state(true).await;

    let submitted = submit::submit_factorial(
        Extension(state.clone()),
        Json(submit::FactorialBody { n: -4 }),
    )
    .await
    .expect("submit");

    let run = wait_terminal(&state, submitted_id(&submitted.0)).await;
    assert_eq!(run.get("status").and_then(|v| v.as_str()), Some("failure"));
    assert!(run
        .get("errorMessage")
        .and_then(|v| v.as_str())
        .unwrap()
        .contains("invalid payload"));
    assert!(run.get("result").unwrap().is_null());
}

#[tokio::test]
async fn unknown_job_ids_are_not_found() {
    let state = job_state(false).await;

    let err = status::get(Extension(state.clone()), Path(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn debug_queue_lists_pending_submissions() {
    // No workers: submissions stay on the backing queue.
    let state = job_state(false).await;

    submit::submit_sum(
        Extension(state.clone()),
        Json(submit::SumBody { a: 1, b: 1 }),
    )
    .await
    .expect("submit");
    submit::submit_factorial(
        Extension(state.clone()),
        Json(submit::FactorialBody { n: 3 }),
    )
    .await
    .expect("submit");

    let listing = debug::queue(Extension(state.clone())).await.expect("queue").0;
    assert_eq!(listing.get("total"), Some(&json!(2)));
    let tasks = listing.get("tasks").and_then(|v| v.as_array()).unwrap();
    assert_eq!(
        tasks[0].get("kind").and_then(|v| v.as_str()),
        Some("calc.sum")
    );
    assert_eq!(
        tasks[1].get("kind").and_then(|v| v.as_str()),
        Some("calc.factorial")
    );
}
