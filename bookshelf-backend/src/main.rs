//! Bookshelf backend server.
//!
//! Entry point wiring configuration, the catalog store, the list cache, the
//! job queue workers and the HTTP router together.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use bookshelf_backend::state::AppState;
use bookshelf_cache::{Cache, MemoryCache, RedisCache};
use bookshelf_db::DbConnectionConfig;
use bookshelf_job_queue::JobQueueClient;

mod tracing_setup;

#[derive(Debug, Parser)]
#[command(name = "bookshelf-backend", about = "Book catalog HTTP service")]
struct CliArgs {
    /// Path to a TOML/YAML/JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    // Resolve config path: CLI > environment variable
    let config_path = args
        .config
        .or_else(|| std::env::var("BOOKSHELF_CONFIG_PATH").ok().map(PathBuf::from));
    let config = bookshelf_config::load_config(config_path.as_deref())?;

    tracing_setup::install_tracing(&config.logging);

    let db_cfg = DbConnectionConfig::new(&config.database.url)
        .with_max_connections(config.database.max_connections);
    let db_pool = bookshelf_db::create_pool(&db_cfg).await?;
    bookshelf_db::ensure_schema(&db_pool).await?;
    tracing::info!(db_url = %db_cfg.url, max_connections = db_cfg.max_connections, "database ready");

    let cache = build_cache(&config.cache).await;

    let job_queue = JobQueueClient::new();
    bookshelf_jobs::register_all_executors(&job_queue, config.jobs.task_delay()).await;
    job_queue.spawn_workers(config.jobs.workers);
    tracing::info!(
        workers = config.jobs.workers,
        task_delay_secs = config.jobs.task_delay_secs,
        "job workers started"
    );

    let state = Arc::new(AppState::new(
        db_pool,
        cache,
        job_queue,
        config.cache.list_ttl(),
    ));
    let app = bookshelf_backend::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "bookshelf backend listening");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Pick the cache backend: Redis when configured, in-memory otherwise.
/// An unreachable Redis degrades to the in-memory cache instead of refusing
/// to start; reads fall through to the store either way.
async fn build_cache(cfg: &bookshelf_config::CacheConfig) -> Arc<dyn Cache> {
    match cfg.redis_url.as_deref() {
        Some(url) => match RedisCache::connect(url).await {
            Ok(redis) => Arc::new(redis),
            Err(e) => {
                tracing::warn!(error = %e, "redis unreachable, falling back to in-memory cache");
                Arc::new(MemoryCache::new())
            }
        },
        None => {
            tracing::info!("no redis url configured, using in-memory cache");
            Arc::new(MemoryCache::new())
        }
    }
}
