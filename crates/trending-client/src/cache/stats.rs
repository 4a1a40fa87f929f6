use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cache statistics tracker using atomic counters for thread-safe operation.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Lookups answered by a fresh entry
    pub hits: AtomicUsize,
    /// Lookups that found nothing usable, stale entries included
    pub misses: AtomicUsize,
    /// Lookups that found an entry past its freshness window
    pub stale: AtomicUsize,
    /// Current number of keys held, fresh or not
    pub entry_count: AtomicUsize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_stale(&self) {
        self.stale.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn set_entry_count(&self, count: usize) {
        self.entry_count.store(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            entry_count: self.entry_count.load(Ordering::Relaxed),
        }
    }
}

/// Immutable snapshot of cache statistics at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStatsSnapshot {
    pub hits: usize,
    pub misses: usize,
    pub stale: usize,
    pub entry_count: usize,
}

impl CacheStatsSnapshot {
    /// Hit rate as a percentage (0.0 - 100.0)
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 0.0;
        }
        (self.hits as f64 / total as f64) * 100.0
    }

    pub fn total_requests(&self) -> usize {
        self.hits + self.misses
    }
}
