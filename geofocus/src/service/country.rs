//! Country lookup service.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use super::policy::StalePolicy;
use crate::cache::CacheStatus;
use crate::centroid::{CentroidEstimator, EstimationError, LatLon};
use crate::index::{Feature, FeatureIndex, FeatureIndexer};
use crate::provider::{AsyncHttpClient, DataUnavailable, GeoDataProvider, GeoDocument};
use crate::resolve::{CountryResolver, MatchKind};

/// A resolved country and its focus point.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub feature: Feature,
    pub point: Result<LatLon, EstimationError>,
}

/// Owns the provider and the indexed dataset.
///
/// The index is rebuilt only when the provider hands out a different
/// document, so repeated lookups against a cached collection reuse it.
pub struct CountryService<C> {
    provider: GeoDataProvider<C>,
    policy: StalePolicy,
    indexer: FeatureIndexer,
    resolver: CountryResolver,
    estimator: CentroidEstimator,
    indexed: Mutex<Option<(Arc<GeoDocument>, Arc<FeatureIndex>)>>,
}

impl<C: AsyncHttpClient + 'static> CountryService<C> {
    pub fn new(provider: GeoDataProvider<C>) -> Self {
        Self {
            provider,
            policy: StalePolicy::default(),
            indexer: FeatureIndexer::default(),
            resolver: CountryResolver::new(),
            estimator: CentroidEstimator::default(),
            indexed: Mutex::new(None),
        }
    }

    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_indexer(mut self, indexer: FeatureIndexer) -> Self {
        self.indexer = indexer;
        self
    }

    pub fn with_estimator(mut self, estimator: CentroidEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn provider(&self) -> &GeoDataProvider<C> {
        &self.provider
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn estimator(&self) -> CentroidEstimator {
        self.estimator
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.provider.cache_status()
    }

    /// Returns the feature collection, applying the stale policy.
    ///
    /// # Errors
    ///
    /// [`DataUnavailable`] when every source fails and either the policy is
    /// [`StalePolicy::Fail`] or nothing was ever cached.
    pub async fn collection(&self) -> Result<Arc<GeoDocument>, DataUnavailable> {
        match self.provider.get_feature_collection().await {
            Ok(document) => Ok(document),
            Err(e) => match (self.policy, self.provider.cached()) {
                (StalePolicy::ServeStale, Some(entry)) => {
                    warn!(
                        source = entry.source(),
                        age_secs = entry.age().as_secs(),
                        error = %e,
                        "All sources failed, serving stale feature collection"
                    );
                    Ok(Arc::clone(entry.document()))
                }
                _ => Err(e),
            },
        }
    }

    /// Returns the indexed features of the current collection.
    pub async fn feature_index(&self) -> Result<Arc<FeatureIndex>, DataUnavailable> {
        let document = self.collection().await?;

        let mut indexed = self.indexed.lock();
        if let Some((doc, index)) = indexed.as_ref() {
            if Arc::ptr_eq(doc, &document) {
                return Ok(Arc::clone(index));
            }
        }

        let index = Arc::new(self.indexer.index(&document));
        *indexed = Some((document, Arc::clone(&index)));
        Ok(index)
    }

    /// Resolves `query` and estimates its focus point.
    ///
    /// `Ok(None)` means nothing matched.
    pub async fn locate(&self, query: &str) -> Result<Option<Located>, DataUnavailable> {
        let index = self.feature_index().await?;
        let Some(feature) = self.resolver.resolve(query, index.features()) else {
            return Ok(None);
        };

        let point = self.estimator.estimate_feature(feature);
        if let Err(e) = &point {
            warn!(
                name = feature.canonical_name(),
                error = %e,
                "Cannot estimate focus point"
            );
        }

        Ok(Some(Located {
            feature: feature.clone(),
            point,
        }))
    }

    /// Every feature matching `query`, in collection order.
    pub async fn locate_all(
        &self,
        query: &str,
    ) -> Result<Vec<(Feature, MatchKind)>, DataUnavailable> {
        let index = self.feature_index().await?;
        Ok(self
            .resolver
            .resolve_all(query, index.features())
            .into_iter()
            .map(|(feature, kind)| (feature.clone(), kind))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheState;
    use crate::provider::{GeoSource, MockAsyncHttpClient, SourceError};
    use std::time::Duration;

    const PRIMARY: &str = "https://primary.test/countries.geojson";
    const BACKUP: &str = "https://backup.test/world.geojson";

    const WORLD: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"ADMIN":"France","ISO_A3":"FRA","ISO_A2":"FR"},
         "geometry":{"type":"Polygon","coordinates":[[[2,46],[4,46],[4,48],[2,48]]]}},
        {"type":"Feature","properties":{"ADMIN":"Kiribati","ISO_A3":"KIR"},
         "geometry":{"type":"Point","coordinates":[173,1]}}
    ]}"#;

    fn sources() -> Vec<GeoSource> {
        vec![GeoSource::new("primary", PRIMARY), GeoSource::new("backup", BACKUP)]
    }

    fn service(mock: &MockAsyncHttpClient, ttl: Duration) -> CountryService<MockAsyncHttpClient> {
        CountryService::new(GeoDataProvider::with_ttl(mock.clone(), sources(), ttl))
    }

    fn outage(mock: &MockAsyncHttpClient) {
        mock.fail(PRIMARY, SourceError::Http("connection refused".to_string()));
        mock.fail(BACKUP, SourceError::Http("connection refused".to_string()));
    }

    #[tokio::test]
    async fn test_locate_focuses_match() {
        let mock = MockAsyncHttpClient::new();
        mock.respond(PRIMARY, WORLD);
        let service = service(&mock, Duration::from_secs(60));

        let located = service.locate("fr").await.unwrap().unwrap();
        assert_eq!(located.feature.canonical_name(), "France");
        assert_eq!(located.point, Ok(LatLon::new(47.0, 3.0)));
    }

    #[tokio::test]
    async fn test_locate_no_match() {
        let mock = MockAsyncHttpClient::new();
        mock.respond(PRIMARY, WORLD);
        let service = service(&mock, Duration::from_secs(60));

        assert!(service.locate("Narnia").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_locate_reports_estimation_failure() {
        let mock = MockAsyncHttpClient::new();
        mock.respond(PRIMARY, WORLD);
        let service = service(&mock, Duration::from_secs(60));

        let located = service.locate("Kiribati").await.unwrap().unwrap();
        assert_eq!(
            located.point,
            Err(EstimationError::UnsupportedGeometry("Point".to_string()))
        );
    }

    #[tokio::test]
    async fn test_index_reused_while_document_cached() {
        let mock = MockAsyncHttpClient::new();
        mock.respond(PRIMARY, WORLD);
        let service = service(&mock, Duration::from_secs(60));

        let first = service.feature_index().await.unwrap();
        let second = service.feature_index().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_index_rebuilt_after_refresh() {
        let mock = MockAsyncHttpClient::new();
        mock.respond(PRIMARY, WORLD);
        let service = service(&mock, Duration::ZERO);

        let first = service.feature_index().await.unwrap();
        let second = service.feature_index().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_serve_stale_on_outage() {
        let mock = MockAsyncHttpClient::new();
        mock.respond(PRIMARY, WORLD);
        let service = service(&mock, Duration::ZERO).with_policy(StalePolicy::ServeStale);

        let fresh = service.collection().await.unwrap();
        outage(&mock);

        let stale = service.collection().await.unwrap();
        assert!(Arc::ptr_eq(&fresh, &stale));
        assert_eq!(service.cache_status().state, CacheState::Stale);
    }

    #[tokio::test]
    async fn test_fail_policy_reports_outage() {
        let mock = MockAsyncHttpClient::new();
        mock.respond(PRIMARY, WORLD);
        let service = service(&mock, Duration::ZERO).with_policy(StalePolicy::Fail);

        service.collection().await.unwrap();
        outage(&mock);

        let err = service.collection().await.unwrap_err();
        assert!(matches!(err, DataUnavailable::AllSourcesFailed { attempts: 2, .. }));
    }

    #[tokio::test]
    async fn test_serve_stale_without_cache_still_fails() {
        let mock = MockAsyncHttpClient::new();
        outage(&mock);
        let service = service(&mock, Duration::from_secs(60));

        assert!(service.locate("France").await.is_err());
        assert_eq!(service.cache_status().state, CacheState::Empty);
    }

    #[tokio::test]
    async fn test_locate_all_lists_matches() {
        let mock = MockAsyncHttpClient::new();
        mock.respond(PRIMARY, WORLD);
        let service = service(&mock, Duration::from_secs(60));

        let matches = service.locate_all("i").await.unwrap();
        let names: Vec<&str> = matches.iter().map(|(f, _)| f.canonical_name()).collect();
        assert_eq!(names, vec!["Kiribati"]);
    }
}
