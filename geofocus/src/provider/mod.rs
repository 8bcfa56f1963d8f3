//! Geo data acquisition.
//!
//! This module fetches the country polygon collection from an ordered list
//! of remote GeoJSON sources and keeps the last good copy in a TTL cache.
//!
//! # Example
//!
//! ```ignore
//! use geofocus::provider::{AsyncReqwestClient, GeoDataProvider, GeoSource};
//!
//! let client = AsyncReqwestClient::new()?;
//! let provider = GeoDataProvider::new(client, GeoSource::defaults());
//! let document = provider.get_feature_collection().await?;
//! println!("{} features", document.features().len());
//! ```

mod fetcher;
mod http;
mod source;
mod types;

pub use fetcher::{GeoDataProvider, ProviderStats};
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use source::{DocumentLayout, GeoDocument, GeoSource, D3_WORLD_URL, GEO_COUNTRIES_URL};
pub use types::{DataUnavailable, SourceError};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
