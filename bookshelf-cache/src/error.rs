use thiserror::Error;

/// Errors surfaced by a cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend is unavailable: {0}")]
    Unavailable(String),
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}
