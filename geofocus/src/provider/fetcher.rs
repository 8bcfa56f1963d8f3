//! Multi-source fetch with fallback and TTL caching.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex as SyncMutex;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::http::AsyncHttpClient;
use super::source::{GeoDocument, GeoSource};
use super::types::{DataUnavailable, SourceError};
use crate::cache::{CacheEntry, CacheStatus, FeatureCache, DEFAULT_TTL};

/// Counters describing provider network activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProviderStats {
    /// Requests served from a fresh cache entry.
    pub cache_hits: u64,
    /// Refresh cycles that went to the network.
    pub refreshes: u64,
    /// Individual source fetches attempted.
    pub source_attempts: u64,
    /// Individual source fetches that failed.
    pub source_failures: u64,
    /// Callers answered by a refresh they waited on instead of their own.
    pub shared_refreshes: u64,
}

/// Supplies the feature collection from an ordered list of sources.
///
/// Cloning is cheap and every clone shares the same cache slot. Separate
/// `GeoDataProvider::new` calls produce fully independent caches.
///
/// # Concurrency
///
/// A cache miss runs one refresh at a time behind an async mutex.
/// Callers that arrive during a refresh wait for it and then take the
/// outcome it produced, success or failure, so a burst of requests during
/// an outage costs one pass over the sources. The refresh runs on a
/// spawned task, so a caller that is dropped mid-fetch does not cancel it
/// and the result still lands in the cache.
pub struct GeoDataProvider<C> {
    inner: Arc<Inner<C>>,
}

struct Inner<C> {
    client: C,
    sources: Vec<GeoSource>,
    ttl: Duration,
    cache: FeatureCache,
    refresh_guard: Mutex<()>,
    /// Completed refresh passes; bumped under `refresh_guard`.
    generation: AtomicU64,
    last_outcome: SyncMutex<Option<Result<Arc<GeoDocument>, DataUnavailable>>>,
    cache_hits: AtomicU64,
    refreshes: AtomicU64,
    source_attempts: AtomicU64,
    source_failures: AtomicU64,
    shared_refreshes: AtomicU64,
}

impl<C> Clone for GeoDataProvider<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: AsyncHttpClient + 'static> GeoDataProvider<C> {
    /// Creates a provider with the default 10 hour TTL.
    pub fn new(client: C, sources: Vec<GeoSource>) -> Self {
        Self::with_ttl(client, sources, DEFAULT_TTL)
    }

    pub fn with_ttl(client: C, sources: Vec<GeoSource>, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                sources,
                ttl,
                cache: FeatureCache::new(),
                refresh_guard: Mutex::new(()),
                generation: AtomicU64::new(0),
                last_outcome: SyncMutex::new(None),
                cache_hits: AtomicU64::new(0),
                refreshes: AtomicU64::new(0),
                source_attempts: AtomicU64::new(0),
                source_failures: AtomicU64::new(0),
                shared_refreshes: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the feature collection, from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`DataUnavailable`] when there is no fresh entry and every
    /// source fails. A stale entry is never substituted here; use
    /// [`cached`](Self::cached) to apply a stale-data policy.
    pub async fn get_feature_collection(&self) -> Result<Arc<GeoDocument>, DataUnavailable> {
        if let Some(entry) = self.inner.cache.fresh(self.inner.ttl) {
            self.inner.cache_hits.fetch_add(1, Ordering::Relaxed);
            debug!(source = entry.source(), "Serving feature collection from cache");
            return Ok(Arc::clone(entry.document()));
        }

        let inner = Arc::clone(&self.inner);
        let seen = inner.generation.load(Ordering::Acquire);
        tokio::spawn(async move { inner.refresh(seen).await })
            .await
            .map_err(|e| DataUnavailable::RefreshAborted(e.to_string()))?
    }

    /// The cached entry, fresh or stale.
    pub fn cached(&self) -> Option<CacheEntry> {
        self.inner.cache.get()
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.inner.cache.status(self.inner.ttl)
    }

    pub fn sources(&self) -> &[GeoSource] {
        &self.inner.sources
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    pub fn stats(&self) -> ProviderStats {
        ProviderStats {
            cache_hits: self.inner.cache_hits.load(Ordering::Relaxed),
            refreshes: self.inner.refreshes.load(Ordering::Relaxed),
            source_attempts: self.inner.source_attempts.load(Ordering::Relaxed),
            source_failures: self.inner.source_failures.load(Ordering::Relaxed),
            shared_refreshes: self.inner.shared_refreshes.load(Ordering::Relaxed),
        }
    }
}

impl<C: AsyncHttpClient> Inner<C> {
    /// Runs a refresh pass unless one finished after generation `seen`.
    async fn refresh(&self, seen: u64) -> Result<Arc<GeoDocument>, DataUnavailable> {
        let _guard = self.refresh_guard.lock().await;

        // Another caller may have refreshed while we waited for the guard.
        if let Some(entry) = self.cache.fresh(self.ttl) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            debug!(
                source = entry.source(),
                "Feature collection refreshed by concurrent request"
            );
            return Ok(Arc::clone(entry.document()));
        }

        // A pass completed while we waited; its outcome is ours too.
        if self.generation.load(Ordering::Acquire) != seen {
            let shared = self.last_outcome.lock().clone();
            if let Some(outcome) = shared {
                self.shared_refreshes.fetch_add(1, Ordering::Relaxed);
                debug!(ok = outcome.is_ok(), "Sharing outcome of concurrent refresh");
                return outcome;
            }
        }

        let outcome = self.fetch_sources().await;
        *self.last_outcome.lock() = Some(outcome.clone());
        self.generation.fetch_add(1, Ordering::Release);
        outcome
    }

    async fn fetch_sources(&self) -> Result<Arc<GeoDocument>, DataUnavailable> {
        self.refreshes.fetch_add(1, Ordering::Relaxed);

        let mut last_error: Option<SourceError> = None;
        for (attempt, source) in self.sources.iter().enumerate() {
            self.source_attempts.fetch_add(1, Ordering::Relaxed);

            match self.fetch_source(source).await {
                Ok(document) => {
                    let document = Arc::new(document);
                    self.cache
                        .store(CacheEntry::new(Arc::clone(&document), source.name.clone()));
                    info!(
                        source = %source.name,
                        attempt = attempt + 1,
                        features = document.features().len(),
                        bytes = document.body().len(),
                        "Feature collection fetched"
                    );
                    return Ok(document);
                }
                Err(e) => {
                    self.source_failures.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        source = %source.name,
                        url = %source.url,
                        error = %e,
                        "Geo data source failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last) => Err(DataUnavailable::AllSourcesFailed {
                attempts: self.sources.len(),
                last,
            }),
            None => Err(DataUnavailable::NoSources),
        }
    }

    async fn fetch_source(&self, source: &GeoSource) -> Result<GeoDocument, SourceError> {
        let body = self.client.get(&source.url).await?;
        GeoDocument::parse(&source.url, body)
    }
}
