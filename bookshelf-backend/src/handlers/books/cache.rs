//! Read-through cache for paginated catalog snapshots.
//!
//! Cache failures are never fatal to the primary operation: reads degrade to
//! the store, writes are skipped, and a failed purge leaves entries to age
//! out through their ttl.

use std::time::Duration;

use bookshelf_cache::Cache;
use tracing::warn;

use crate::handlers::books::dto::CatalogPage;

/// Namespace prefix for all cached list snapshots.
pub const LIST_NAMESPACE: &str = "books:";

/// Deterministic key for one paginated list query. Identical (page, limit)
/// pairs share one cached snapshot.
pub fn list_key(page: usize, limit: usize) -> String {
    format!("{LIST_NAMESPACE}page={page}:limit={limit}")
}

/// Fetch a cached snapshot. Any cache error or undecodable entry is treated
/// as a miss.
pub async fn lookup_page(cache: &dyn Cache, key: &str) -> Option<CatalogPage> {
    match cache.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(page) => Some(page),
            Err(e) => {
                warn!(%key, error = %e, "discarding undecodable cache entry");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(%key, error = %e, "cache read failed, falling through to the store");
            None
        }
    }
}

/// Store a snapshot with the configured ttl. Best-effort.
pub async fn store_page(cache: &dyn Cache, key: &str, page: &CatalogPage, ttl: Duration) {
    let raw = match serde_json::to_string(page) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(%key, error = %e, "failed to serialize list snapshot");
            return;
        }
    };
    if let Err(e) = cache.set(key, &raw, ttl).await {
        warn!(%key, error = %e, "cache write failed, skipping");
    }
}

/// Purge every cached list snapshot.
///
/// Called only after a mutation has durably committed. Deliberately coarse:
/// all paginated views are dropped rather than only the affected page. A
/// failure here is surfaced as a warning, not an error, since the mutation
/// already stands; stale reads remain possible until the next ttl expiry.
pub async fn invalidate(cache: &dyn Cache) {
    let keys = match cache.scan_keys(LIST_NAMESPACE).await {
        Ok(keys) => keys,
        Err(e) => {
            warn!(error = %e, "cache scan failed, stale list snapshots may be served until ttl expiry");
            return;
        }
    };
    for key in keys {
        if let Err(e) = cache.delete(&key).await {
            warn!(%key, error = %e, "cache delete failed, stale list snapshots may be served until ttl expiry");
        }
    }
}
