//! Cache entry and freshness.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::provider::GeoDocument;

/// Default time-to-live for a fetched collection (10 hours).
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60 * 60);

/// The last successfully fetched document and when it was acquired.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    document: Arc<GeoDocument>,
    acquired_at: Instant,
    fetched_at: DateTime<Utc>,
    source: String,
}

impl CacheEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(document: Arc<GeoDocument>, source: impl Into<String>) -> Self {
        Self {
            document,
            acquired_at: Instant::now(),
            fetched_at: Utc::now(),
            source: source.into(),
        }
    }

    pub fn document(&self) -> &Arc<GeoDocument> {
        &self.document
    }

    /// Name of the source that supplied the document.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Wall-clock acquisition time, for reporting.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn age(&self) -> Duration {
        self.acquired_at.elapsed()
    }

    /// An entry is fresh iff `now - acquired_at < ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.is_fresh_at(Instant::now(), ttl)
    }

    pub fn is_fresh_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.acquired_at) < ttl
    }
}
