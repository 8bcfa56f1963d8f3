//! Single-slot, process-lifetime cache for the fetched feature collection.
//!
//! The slot holds at most one [`CacheEntry`]. Entries are never evicted
//! proactively; a stale entry stays available until a successful fetch
//! overwrites it, so the integration boundary can still serve it when
//! every source is down.

mod entry;

pub use entry::{CacheEntry, DEFAULT_TTL};

use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;

/// Freshness of the cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheState {
    /// Never populated.
    Empty,
    Fresh,
    Stale,
}

/// Point-in-time description of the cache slot for status output.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub state: CacheState,
    pub age_secs: Option<u64>,
    pub source: Option<String>,
    pub fetched_at: Option<String>,
}

/// The single cache slot.
#[derive(Debug, Default)]
pub struct FeatureCache {
    slot: RwLock<Option<CacheEntry>>,
}

impl FeatureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry if it is fresh under `ttl`.
    pub fn fresh(&self, ttl: Duration) -> Option<CacheEntry> {
        self.slot
            .read()
            .as_ref()
            .filter(|entry| entry.is_fresh(ttl))
            .cloned()
    }

    /// Returns the entry regardless of freshness.
    pub fn get(&self) -> Option<CacheEntry> {
        self.slot.read().clone()
    }

    /// Overwrites the slot, fresh or stale.
    pub fn store(&self, entry: CacheEntry) {
        *self.slot.write() = Some(entry);
    }

    pub fn status(&self, ttl: Duration) -> CacheStatus {
        match self.slot.read().as_ref() {
            None => CacheStatus {
                state: CacheState::Empty,
                age_secs: None,
                source: None,
                fetched_at: None,
            },
            Some(entry) => CacheStatus {
                state: if entry.is_fresh(ttl) {
                    CacheState::Fresh
                } else {
                    CacheState::Stale
                },
                age_secs: Some(entry.age().as_secs()),
                source: Some(entry.source().to_string()),
                fetched_at: Some(entry.fetched_at().to_rfc3339()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::GeoDocument;
    use bytes::Bytes;
    use std::sync::Arc;

    fn entry(source: &str) -> CacheEntry {
        let doc = GeoDocument::parse("mem://doc", Bytes::from_static(br#"{"features":[]}"#))
            .unwrap();
        CacheEntry::new(Arc::new(doc), source)
    }

    #[test]
    fn test_empty_cache() {
        let cache = FeatureCache::new();
        assert!(cache.get().is_none());
        assert!(cache.fresh(DEFAULT_TTL).is_none());
        assert_eq!(cache.status(DEFAULT_TTL).state, CacheState::Empty);
    }

    #[test]
    fn test_stale_entry_is_kept() {
        let cache = FeatureCache::new();
        cache.store(entry("a"));

        assert!(cache.fresh(Duration::ZERO).is_none());
        assert!(cache.get().is_some());
        assert_eq!(cache.status(Duration::ZERO).state, CacheState::Stale);
    }

    #[test]
    fn test_store_overwrites() {
        let cache = FeatureCache::new();
        cache.store(entry("a"));
        cache.store(entry("b"));

        let status = cache.status(DEFAULT_TTL);
        assert_eq!(status.state, CacheState::Fresh);
        assert_eq!(status.source.as_deref(), Some("b"));
    }
}
