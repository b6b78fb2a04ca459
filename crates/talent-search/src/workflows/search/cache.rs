//! LRU cache of evaluated match sets.
//!
//! Entries are keyed by the full structural value of the criteria, the as-of
//! instant and the source revision, so a new revision never serves stale rows.
//! Only evaluation is cached; ranking and slicing run per request because they
//! depend on the caller's sort clauses and bookmarks.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use lru::LruCache;

use super::criteria::PoolCriteria;
use super::evaluation::MatchResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub criteria: PoolCriteria,
    pub as_of: DateTime<Utc>,
    pub revision: u64,
}

/// Matched results of one evaluation pass plus its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvaluatedMatches {
    pub matches: Vec<MatchResult>,
    pub evaluated: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

pub struct MatchCache {
    entries: Mutex<LruCache<CacheKey, Arc<EvaluatedMatches>>>,
    stats: Mutex<CacheStats>,
}

impl MatchCache {
    /// Returns `None` for a zero capacity, which disables caching.
    pub fn new(capacity: usize) -> Option<Self> {
        let capacity = NonZeroUsize::new(capacity)?;
        Some(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(CacheStats::default()),
        })
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<EvaluatedMatches>> {
        let found = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();

        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        if found.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        found
    }

    pub fn put(&self, key: CacheKey, value: Arc<EvaluatedMatches>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        *self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
