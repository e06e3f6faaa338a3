use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Extension, Path, Query};
use axum::Json;

use bookshelf_backend::error::ApiError;
use bookshelf_backend::handlers::books::cache as list_cache;
use bookshelf_backend::handlers::books::dto::BookPayload;
use bookshelf_backend::handlers::books::{create, delete, list, update};
use bookshelf_backend::state::AppState;
use bookshelf_cache::{Cache, MemoryCache};
use bookshelf_db::books as db_books;
use bookshelf_db::{create_pool, ensure_schema, DbConnectionConfig};
use bookshelf_job_queue::JobQueueClient;

async fn test_state() -> Arc<AppState> {
    // A single connection keeps the whole test on one in-memory database.
    let config = DbConnectionConfig::new("sqlite::memory:").with_max_connections(1);
    let pool = create_pool(&config).await.expect("create pool");
    ensure_schema(&pool).await.expect("ensure schema");

    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    Arc::new(AppState::new(
        pool,
        cache,
        JobQueueClient::new(),
        Duration::from_secs(60),
    ))
}

fn page_query(page: usize, limit: usize) -> Query<HashMap<String, String>> {
    let mut params = HashMap::new();
    params.insert("page".to_string(), page.to_string());
    params.insert("limit".to_string(), limit.to_string());
    Query(params)
}

fn payload(title: &str, year: i64) -> BookPayload {
    BookPayload {
        title: title.to_string(),
        author: "Jorge Amado".to_string(),
        year,
    }
}

async fn seed_directly(state: &AppState, count: usize) {
    for i in 0..count {
        db_books::insert_book(
            &*state.db_pool,
            &db_books::NewBook {
                title: &format!("Seed {i}"),
                author: "Anon",
                year: 1900 + i as i64,
            },
        )
        .await
        .expect("seed insert");
    }
}

#[tokio::test]
async fn books_crud_round_trip() {
    let state = test_state().await;

    let created = create::create(
        Extension(state.clone()),
        Json(payload("Capitães da Areia", 1937)),
    )
    .await
    .expect("create");
    let id = created.0.get("id").and_then(|v| v.as_i64()).expect("id");

    let listed = list::list(Extension(state.clone()), page_query(1, 10))
        .await
        .expect("list");
    assert_eq!(listed.0.total, 1);
    assert_eq!(listed.0.books[0].title, "Capitães da Areia");

    update::update(
        Extension(state.clone()),
        Path(id),
        Json(payload("Gabriela, Cravo e Canela", 1958)),
    )
    .await
    .expect("update");

    let listed = list::list(Extension(state.clone()), page_query(1, 10))
        .await
        .expect("list");
    assert_eq!(listed.0.books[0].title, "Gabriela, Cravo e Canela");
    assert_eq!(listed.0.books[0].year, 1958);

    delete::delete(Extension(state.clone()), Path(id))
        .await
        .expect("delete");

    let listed = list::list(Extension(state.clone()), page_query(1, 10))
        .await
        .expect("list");
    assert_eq!(listed.0.total, 0);
    assert!(listed.0.books.is_empty());
}

#[tokio::test]
async fn unknown_ids_are_client_errors() {
    let state = test_state().await;

    let err = update::update(
        Extension(state.clone()),
        Path(4711),
        Json(payload("Ghost", 2000)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let err = delete::delete(Extension(state.clone()), Path(4711))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn invalid_pagination_is_rejected_before_any_lookup() {
    let state = test_state().await;

    let err = list::list(Extension(state.clone()), page_query(0, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    let err = list::list(Extension(state.clone()), page_query(1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    // Nothing reached the cache: no snapshot was written.
    let keys = state
        .cache
        .scan_keys(list_cache::LIST_NAMESPACE)
        .await
        .expect("scan");
    assert!(keys.is_empty());
}

#[tokio::test]
async fn pagination_boundaries_over_exactly_ten_rows() {
    let state = test_state().await;
    seed_directly(&state, 10).await;

    let first = list::list(Extension(state.clone()), page_query(1, 10))
        .await
        .expect("list");
    assert_eq!(first.0.total, 10);
    assert_eq!(first.0.books.len(), 10);

    let second = list::list(Extension(state.clone()), page_query(2, 10))
        .await
        .expect("list");
    assert_eq!(second.0.total, 10);
    assert!(second.0.books.is_empty());
}

#[tokio::test]
async fn mutation_invalidates_cached_list_snapshots() {
    let state = test_state().await;
    seed_directly(&state, 15).await;

    // Populate the cache for page 1.
    let before = list::list(Extension(state.clone()), page_query(1, 10))
        .await
        .expect("list");
    assert_eq!(before.0.total, 15);
    let key = list_cache::list_key(1, 10);
    assert!(state.cache.get(&key).await.expect("get").is_some());

    // Mutate through the handler so the invalidation policy runs.
    create::create(Extension(state.clone()), Json(payload("Tenda dos Milagres", 1969)))
        .await
        .expect("create");

    // The old snapshot is gone; the re-query reflects the mutation and
    // repopulates the cache.
    let after = list::list(Extension(state.clone()), page_query(1, 10))
        .await
        .expect("list");
    assert_eq!(after.0.total, 16);

    let cached = list_cache::lookup_page(state.cache.as_ref(), &key)
        .await
        .expect("repopulated snapshot");
    assert_eq!(cached.total, 16);
}

#[tokio::test]
async fn second_identical_read_is_served_from_cache() {
    let state = test_state().await;
    seed_directly(&state, 3).await;

    let first = list::list(Extension(state.clone()), page_query(1, 10))
        .await
        .expect("list");
    assert_eq!(first.0.total, 3);

    // Remove a row behind the cache's back: no handler, no invalidation.
    let victim = first.0.books[0].id;
    db_books::delete_book(&*state.db_pool, victim)
        .await
        .expect("raw delete");

    // Within the ttl the identical query still sees the snapshot, proving
    // the second read never touched the store.
    let second = list::list(Extension(state.clone()), page_query(1, 10))
        .await
        .expect("list");
    assert_eq!(second.0.total, 3);
    assert_eq!(second.0.books.len(), 3);

    // A different (page, limit) misses the cache and sees the raw state.
    let fresh = list::list(Extension(state.clone()), page_query(1, 5))
        .await
        .expect("list");
    assert_eq!(fresh.0.total, 2);
}

#[tokio::test]
async fn blank_payload_fields_are_rejected() {
    let state = test_state().await;

    let err = create::create(Extension(state.clone()), Json(payload("  ", 1980)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let listed = list::list(Extension(state.clone()), page_query(1, 10))
        .await
        .expect("list");
    assert_eq!(listed.0.total, 0);
}
