//! Route resolution caching.
//!
//! [`ResolutionCache`] memoizes [`RouteTable::resolve`](crate::RouteTable::resolve)
//! results in an LRU keyed by the requested path. It is gated behind the
//! `cache` feature flag and uses the [`lru`] crate internally.
//!
//! Only resolutions are cached. The table is immutable, so a resolution can
//! never go stale; decisions depend on the origin and are recomputed for
//! every navigation.
//!
//! # Examples
//!
//! ```
//! use route_gate::cache::ResolutionCache;
//! use route_gate::{Route, RouteTable};
//!
//! let table = RouteTable::builder()
//!     .route(Route::new("/track", "Track", "TrackPage"))
//!     .build()
//!     .unwrap();
//! let mut cache = ResolutionCache::new();
//!
//! cache.resolve(&table, "/track");
//! cache.resolve(&table, "/track");
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

use crate::table::{Resolution, RouteTable};
use crate::{debug_log, trace_log};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Hit/miss counters for a [`ResolutionCache`].
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that went to the route table.
    pub misses: usize,
    /// Number of [`ResolutionCache::clear`] calls.
    pub invalidations: usize,
}

impl CacheStats {
    /// Hit rate in `0.0..=1.0`; `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of path resolutions.
#[derive(Debug)]
pub struct ResolutionCache {
    entries: LruCache<String, Resolution>,
    stats: CacheStats,
}

impl ResolutionCache {
    /// Capacity used by [`new`](Self::new).
    pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
        Some(capacity) => capacity,
        None => unreachable!(),
    };

    /// Create a cache with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY) entries.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache holding at most `capacity` resolutions.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Resolve `path` through the cache.
    pub fn resolve(&mut self, table: &RouteTable, path: &str) -> Resolution {
        if let Some(hit) = self.entries.get(path) {
            self.stats.hits += 1;
            trace_log!("Resolution cache hit for '{}'", path);
            return hit.clone();
        }
        self.stats.misses += 1;
        trace_log!("Resolution cache miss for '{}'", path);
        let resolution = table.resolve(path);
        self.entries.put(path.to_string(), resolution.clone());
        resolution
    }

    /// Drop every cached resolution.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "Resolution cache cleared: {} entries removed (hit rate {:.1}%)",
            removed,
            self.stats.hit_rate() * 100.0
        );
    }

    /// Get hit/miss counters
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of cached paths
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;

    fn table() -> RouteTable {
        RouteTable::builder()
            .route(Route::new("/", "Home", "HomePage"))
            .route(Route::new("/track", "Track", "TrackPage"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_cache_creation() {
        let cache = ResolutionCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 0);
        assert!(cache.stats().hit_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_returns_same_resolution() {
        let table = table();
        let mut cache = ResolutionCache::new();
        let first = cache.resolve(&table, "/track");
        let second = cache.resolve(&table, "/track");
        assert_eq!(first, second);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_catch_all_is_cached_by_raw_path() {
        let table = table();
        let mut cache = ResolutionCache::new();
        cache.resolve(&table, "/data/history?from=1");
        cache.resolve(&table, "/data/history?from=2");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_eviction() {
        let table = table();
        let mut cache = ResolutionCache::with_capacity(NonZeroUsize::new(2).unwrap());
        cache.resolve(&table, "/a");
        cache.resolve(&table, "/b");
        cache.resolve(&table, "/c");
        assert_eq!(cache.len(), 2);
        cache.resolve(&table, "/a");
        assert_eq!(cache.stats().misses, 4);
    }

    #[test]
    fn test_clear_and_hit_rate() {
        let table = table();
        let mut cache = ResolutionCache::new();
        cache.resolve(&table, "/");
        cache.resolve(&table, "/");
        cache.resolve(&table, "/");
        cache.resolve(&table, "/track");
        assert!((cache.stats().hit_rate() - 0.5).abs() < 0.001);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }
}
