//! Short-lived memoization of formatted search pages.
//!
//! Process-wide map keyed by the canonical query + pagination + feed label.
//! Entries expire by TTL and are evicted lazily when a read finds them stale;
//! there is no background sweep and no capacity bound (payloads are small and
//! short-lived — under very high filter cardinality this would need one).
//!
//! Concurrency: the map is guarded by a mutex; concurrent misses on one key
//! may both compute and the last writer wins. Values are cloned out on read,
//! so a caller can never mutate the stored copy.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::clock::Clock;
use crate::models::job::JobPage;
use crate::storage::JobQuery;

/// Fallback TTL when none is configured: 5 minutes.
pub const DEFAULT_TTL: StdDuration = StdDuration::from_secs(300);

struct CacheEntry {
    value: JobPage,
    inserted_at: DateTime<Utc>,
    ttl: Duration,
}

#[derive(Clone)]
pub struct SearchCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SearchCache {
    pub fn new(default_ttl: StdDuration, clock: Arc<dyn Clock>) -> Self {
        let default_ttl =
            Duration::from_std(default_ttl).unwrap_or_else(|_| Duration::seconds(300));
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            default_ttl,
            clock,
        }
    }

    /// Deterministic key for one (query, page, limit, label) combination.
    /// The query serializes canonically (fixed field order, eligibility
    /// instant excluded), so equal filter inputs map to the same entry.
    pub fn derive_key(query: &JobQuery, page: u32, limit: u32, label: &str) -> String {
        let query_json = serde_json::to_string(query).unwrap_or_default();
        format!("{query_json}_{page}_{limit}_{label}")
    }

    /// Returns the cached page if present and fresh; a stale entry is
    /// removed on the spot. A miss is the normal path, not an error.
    pub fn get(&self, key: &str) -> Option<JobPage> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let now = self.clock.now();
        match entries.get(key) {
            Some(entry) if now - entry.inserted_at < entry.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                debug!(key, "evicted stale search cache entry");
                None
            }
            None => None,
        }
    }

    /// Inserts or overwrites unconditionally with the default TTL.
    pub fn set(&self, key: String, value: JobPage) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    pub fn set_with_ttl(&self, key: String, value: JobPage, ttl: Duration) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: self.clock.now(),
                ttl,
            },
        );
    }

    /// Removes one entry, or every entry when no key is given.
    pub fn clear(&self, key: Option<&str>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match key {
            Some(key) => {
                entries.remove(key);
            }
            None => entries.clear(),
        }
    }

    /// Number of live-or-stale entries currently held.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
