//! Key-value cache layer used to memoize paginated catalog queries.
//!
//! The backend talks to the cache exclusively through the [`Cache`] trait so
//! the backing store can be swapped without touching the handlers. Two
//! implementations are provided:
//!
//! - [`MemoryCache`] - in-process dashmap with per-key expiry, the default
//!   for local development and tests.
//! - [`RedisCache`] - shared Redis backend, selected when a Redis URL is
//!   configured.
//!
//! Expired entries are indistinguishable from never-written ones. Values are
//! always replaced wholesale; there are no partial updates.

use std::time::Duration;

use async_trait::async_trait;

mod error;
mod memory;
mod redis_cache;

pub use error::CacheError;
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

/// Async key-value store with per-key expiry.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the last written value for the key if it has not expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores the value and resets its expiry to now + ttl, overwriting any
    /// prior value.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Removes the entry. No-op if the key is absent.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// All currently live keys beginning with the prefix. Snapshot semantics
    /// at call time; no ordering guarantee.
    async fn scan_keys(&self, prefix: &str) -> Result<Vec<String>, CacheError>;

    /// Remaining time-to-live of a key, or None if the key is absent or
    /// already expired.
    async fn ttl_remaining(&self, key: &str) -> Result<Option<Duration>, CacheError>;
}
