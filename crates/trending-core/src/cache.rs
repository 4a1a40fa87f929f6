use std::sync::Arc;

use time::Duration;
use tracing::{debug, info, warn};
use trending_client::{
    cache::{CacheStatsSnapshot, Clock, MemoryCache, SystemClock},
    Repository, Since,
};

use crate::source::{SourceError, TrendingSource};

pub const DEFAULT_TTL: Duration = Duration::minutes(15);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub language: String,
    pub since: Since,
}

impl CacheKey {
    pub fn new(language: &str, since: Since) -> Self {
        Self {
            language: language.to_string(),
            since,
        }
    }
}

/// Read-through cache in front of a [`TrendingSource`], keyed by (language, window).
///
/// Concurrent misses on the same key each go to the source; whichever result
/// lands last is the one kept.
pub struct TrendingCache<S> {
    entries: MemoryCache<CacheKey, Vec<Repository>>,
    source: S,
}

impl<S: TrendingSource> TrendingCache<S> {
    pub fn new(source: S) -> Self {
        Self::with_clock(source, DEFAULT_TTL, Arc::new(SystemClock))
    }

    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        Self::with_clock(source, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(source: S, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: MemoryCache::with_clock(ttl, clock),
            source,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fresh cached data for the key, if any.
    pub fn get(&self, language: &str, since: Since) -> Option<Vec<Repository>> {
        self.entries.get(&CacheKey::new(language, since))
    }

    pub fn put(&self, language: &str, since: Since, data: Vec<Repository>) {
        self.entries.insert(CacheKey::new(language, since), data);
    }

    pub fn is_fresh(&self, language: &str, since: Since) -> bool {
        self.entries
            .entry(&CacheKey::new(language, since))
            .is_some_and(|entry| self.entries.is_fresh(&entry))
    }

    /// Serve from cache when fresh, otherwise fetch and store.
    ///
    /// A failed fetch leaves whatever entry was there untouched.
    pub async fn get_or_fetch(
        &self,
        language: &str,
        since: Since,
    ) -> Result<Vec<Repository>, SourceError> {
        if let Some(data) = self.get(language, since) {
            debug!(language, %since, "using cached data");
            return Ok(data);
        }

        info!(language, %since, "fetching fresh data");
        match self.source.fetch(language, since).await {
            Ok(data) => {
                self.put(language, since, data.clone());
                Ok(data)
            }
            Err(error) => {
                warn!(language, %since, error = %error, "error fetching trending data");
                Err(error)
            }
        }
    }

    pub fn stats(&self) -> CacheStatsSnapshot {
        self.entries.stats().snapshot()
    }
}
