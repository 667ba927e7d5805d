//! Response cache with per-entry time-to-live
//!
//! Backed by a sharded concurrent map, so `get`, `put`, and `invalidate` are
//! safe from any number of tasks without external locking. Expiry is lazy:
//! a stale entry is dropped when a read finds it, and [`ResponseCache::sweep`]
//! reclaims the ones nobody reads.
//!
//! Read-miss-then-populate is *not* atomic. Two callers may both miss and both
//! compute the value; the later `put` wins.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Entries physically present (may include not-yet-swept stale ones)
    pub entries: u64,
    /// Reads that returned a value
    pub hits: u64,
    /// Reads that found nothing or found a stale entry
    pub misses: u64,
    /// `hits / (hits + misses)`, 0.0 before any read
    pub hit_rate: f64,
}

/// A cached value with its creation time and TTL
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// Stamp a value with the current time
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Entry is servable while `now - created_at <= ttl` (inclusive)
    #[inline]
    fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) <= self.ttl
    }
}

/// Concurrent string-keyed cache with independent per-entry TTLs
///
/// Generic over the stored value; the cache itself does not pick TTLs.
#[derive(Debug)]
pub struct ResponseCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> ResponseCache<V> {
    /// Create empty cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get a fresh value
    ///
    /// Unknown and expired keys both read as `None`; an expired entry is
    /// removed as a side effect.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();

        let stale = match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if stale {
            // A concurrent put may have refreshed the key since the read.
            self.entries.remove_if(key, |_, entry| !entry.is_fresh(now));
            tracing::debug!(key, "cache entry expired");
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Insert or overwrite, stamping the current time
    pub fn put(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        tracing::trace!(key = %key, ttl_secs = ttl.as_secs(), "cache put");
        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    /// Remove an entry; returns whether one was present
    pub fn invalidate(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Remove every expired entry; returns how many were removed
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        self.entries.retain(|_, entry| {
            let keep = entry.is_fresh(now);
            if !keep {
                removed += 1;
            }
            keep
        });

        if removed > 0 {
            tracing::debug!(removed, remaining = self.entries.len(), "cache sweep");
        }
        removed
    }

    /// Remove everything
    #[inline]
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Check for a fresh entry without touching hit/miss counters
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .get(key)
            .is_some_and(|entry| entry.is_fresh(now))
    }

    /// Entries physically present, stale ones included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache holds no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of size and hit statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        #[allow(clippy::cast_precision_loss)]
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };

        CacheStats {
            entries: self.entries.len() as u64,
            hits,
            misses,
            hit_rate,
        }
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::advance;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test(start_paused = true)]
    async fn put_then_get() {
        let cache = ResponseCache::new();
        cache.put("quote-2024-06-01", "Stay the course.".to_string(), 24 * HOUR);

        assert_eq!(
            cache.get("quote-2024-06-01").as_deref(),
            Some("Stay the course.")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_key_is_none() {
        let cache: ResponseCache<String> = ResponseCache::new();
        assert!(cache.get("nope").is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ttl_boundary_is_inclusive() {
        let cache = ResponseCache::new();
        cache.put("k", 1u32, Duration::from_secs(10));

        advance(Duration::from_secs(10)).await;
        assert_eq!(cache.get("k"), Some(1));

        advance(Duration::from_millis(1)).await;
        assert_eq!(cache.get("k"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_read_removes_entry() {
        let cache = ResponseCache::new();
        cache.put("k", 1u32, Duration::from_secs(1));
        assert_eq!(cache.len(), 1);

        advance(Duration::from_secs(2)).await;
        assert!(cache.get("k").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_independently() {
        let cache = ResponseCache::new();
        cache.put("daily", "a", 24 * HOUR);
        cache.put("volatile", "b", 6 * HOUR);

        advance(7 * HOUR).await;
        assert_eq!(cache.get("daily"), Some("a"));
        assert_eq!(cache.get("volatile"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn put_overwrites_and_restamps() {
        let cache = ResponseCache::new();
        cache.put("k", "old", Duration::from_secs(10));
        advance(Duration::from_secs(8)).await;

        cache.put("k", "new", Duration::from_secs(10));
        advance(Duration::from_secs(8)).await;

        assert_eq!(cache.get("k"), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_and_clear() {
        let cache = ResponseCache::new();
        cache.put("a", 1, HOUR);
        cache.put("b", 2, HOUR);

        assert!(cache.invalidate("a"));
        assert!(!cache.invalidate("a"));
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_removes_only_expired() {
        let cache = ResponseCache::new();
        cache.put("short-1", 1, Duration::from_secs(5));
        cache.put("short-2", 2, Duration::from_secs(5));
        cache.put("long", 3, HOUR);

        advance(Duration::from_secs(6)).await;
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.sweep(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.sweep(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stats_track_hits_and_misses() {
        let cache = ResponseCache::new();
        cache.put("k", 1, HOUR);

        let _ = cache.get("k");
        let _ = cache.get("k");
        let _ = cache.get("other");
        let _ = cache.contains("k");

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_get_sees_old_or_new() {
        let cache = Arc::new(ResponseCache::new());
        cache.put("shared", "old".to_string(), HOUR);

        let mut handles = Vec::new();
        for i in 0..32 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    cache.put("shared", "new".to_string(), HOUR);
                    None
                } else {
                    cache.get("shared")
                }
            }));
        }

        for result in futures::future::join_all(handles).await {
            if let Some(value) = result.unwrap() {
                assert!(value == "old" || value == "new");
            }
        }
        assert_eq!(cache.get("shared").as_deref(), Some("new"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_distinct_keys_are_not_lost() {
        let cache = Arc::new(ResponseCache::new());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.put(format!("k{i}"), i, HOUR) })
            })
            .collect();
        futures::future::join_all(handles).await;

        assert_eq!(cache.len(), 64);
        for i in 0..64 {
            assert_eq!(cache.get(&format!("k{i}")), Some(i));
        }
    }
}
