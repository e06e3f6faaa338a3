//! In-process cache backed by a concurrent map with lazy expiry.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::{Cache, CacheError};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    #[inline]
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// In-memory cache with per-key expiry.
///
/// Expiry is lazy: entries are dropped when a read or scan encounters them
/// past their deadline. Per-key operations are atomic through the underlying
/// map; there is no cross-key locking.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let hit = self
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone());
        if hit.is_none() {
            // Lazy expiry. The read guard above is released before this
            // takes the shard write lock.
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        }
        Ok(hit)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn scan_keys(&self, prefix: &str) -> Result<Vec<String>, CacheError> {
        let now = Instant::now();
        let mut live = Vec::new();
        let mut expired = Vec::new();
        for entry in self.entries.iter() {
            if entry.value().is_expired(now) {
                expired.push(entry.key().clone());
            } else if entry.key().starts_with(prefix) {
                live.push(entry.key().clone());
            }
        }
        // Removal happens after iteration; removing mid-iteration can
        // deadlock on the shard lock.
        for key in expired {
            self.entries.remove(&key);
        }
        Ok(live)
    }

    async fn ttl_remaining(&self, key: &str) -> Result<Option<Duration>, CacheError> {
        let now = Instant::now();
        Ok(self
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.expires_at - now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn get_returns_what_was_set() {
        let cache = MemoryCache::new();
        cache.set("k", "v", TTL).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn expired_entries_read_as_absent() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::from_millis(10)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.get("k").await.unwrap().is_none());
        assert!(cache.ttl_remaining("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_overwrites_and_resets_expiry() {
        let cache = MemoryCache::new();
        cache.set("k", "old", Duration::from_millis(10)).await.unwrap();
        cache.set("k", "new", Duration::from_secs(60)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn delete_is_a_noop_on_absent_keys() {
        let cache = MemoryCache::new();
        cache.delete("missing").await.unwrap();
        cache.set("k", "v", TTL).await.unwrap();
        cache.delete("k").await.unwrap();
        assert!(cache.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn scan_returns_only_live_keys_under_prefix() {
        let cache = MemoryCache::new();
        cache.set("books:page=1:limit=10", "a", TTL).await.unwrap();
        cache.set("books:page=2:limit=10", "b", TTL).await.unwrap();
        cache.set("jobs:1", "c", TTL).await.unwrap();
        cache
            .set("books:stale", "d", Duration::from_millis(5))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let mut keys = cache.scan_keys("books:").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["books:page=1:limit=10", "books:page=2:limit=10"]);
    }
}
