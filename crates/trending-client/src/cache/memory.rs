use std::{hash::Hash, sync::Arc};

use dashmap::DashMap;
use time::Duration;

use super::{
    clock::{Clock, SystemClock},
    stats::CacheStats,
};
use crate::types::CacheEntry;

/// In-process TTL map. Entries are never evicted; a stale entry stays until
/// the next `insert` for its key overwrites it.
#[derive(Debug)]
pub struct MemoryCache<K, T>
where
    K: Eq + Hash,
{
    entries: DashMap<K, CacheEntry<T>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    stats: CacheStats,
}

impl<K, T> MemoryCache<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
            stats: CacheStats::new(),
        }
    }

    /// Whether `entry` is still inside the freshness window.
    pub fn is_fresh(&self, entry: &CacheEntry<T>) -> bool {
        self.clock.now() - entry.timestamp < self.ttl
    }

    /// Fresh value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<T> {
        let result = match self.entries.get(key) {
            Some(entry) if self.is_fresh(&entry) => Some(entry.data.clone()),
            Some(_) => {
                self.stats.record_stale();
                None
            }
            None => None,
        };

        if result.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }

        result
    }

    /// Raw entry for `key` regardless of freshness. Does not touch stats.
    pub fn entry(&self, key: &K) -> Option<CacheEntry<T>> {
        self.entries.get(key).map(|entry| entry.clone())
    }

    /// Store `value` stamped with the current instant, replacing any previous entry.
    pub fn insert(&self, key: K, value: T) {
        let entry = CacheEntry {
            data: value,
            timestamp: self.clock.now(),
        };
        self.entries.insert(key, entry);
        self.stats.set_entry_count(self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn cache_with_clock(ttl: Duration) -> (MemoryCache<String, i32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (MemoryCache::with_clock(ttl, clock.clone()), clock)
    }

    #[test]
    fn respects_ttl() {
        let (cache, clock) = cache_with_clock(Duration::minutes(15));
        cache.insert("key".to_string(), 42);
        assert_eq!(cache.get(&"key".to_string()), Some(42));

        clock.advance(Duration::minutes(14) + Duration::seconds(59));
        assert_eq!(cache.get(&"key".to_string()), Some(42));

        clock.advance(Duration::seconds(1));
        assert!(cache.get(&"key".to_string()).is_none());
    }

    #[test]
    fn stale_entries_are_kept_until_overwritten() {
        let (cache, clock) = cache_with_clock(Duration::minutes(1));
        cache.insert("key".to_string(), 1);
        clock.advance(Duration::minutes(5));

        assert!(cache.get(&"key".to_string()).is_none());
        let stale = cache.entry(&"key".to_string()).expect("entry retained");
        assert_eq!(stale.data, 1);
        assert!(!cache.is_fresh(&stale));

        cache.insert("key".to_string(), 2);
        assert_eq!(cache.get(&"key".to_string()), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn tracks_mixed_hits_and_misses() {
        let (cache, clock) = cache_with_clock(Duration::hours(1));
        cache.insert("exists".to_string(), 42);

        assert_eq!(cache.get(&"exists".to_string()), Some(42));
        assert_eq!(cache.get(&"not_exists".to_string()), None);
        clock.advance(Duration::hours(2));
        assert_eq!(cache.get(&"exists".to_string()), None);

        let snapshot = cache.stats().snapshot();
        assert_eq!(snapshot.hits, 1);
        assert_eq!(snapshot.misses, 2);
        assert_eq!(snapshot.stale, 1);
        assert_eq!(snapshot.entry_count, 1);
    }

    #[test]
    fn entry_count_follows_distinct_keys() {
        let cache = MemoryCache::new(Duration::hours(1));
        assert!(cache.is_empty());
        cache.insert("key1".to_string(), "value1".to_string());
        cache.insert("key2".to_string(), "value2".to_string());
        cache.insert("key1".to_string(), "value3".to_string());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().snapshot().entry_count, 2);
    }
}
