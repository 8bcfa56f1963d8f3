//! GeoFocus - country lookup and camera focusing over public polygon datasets
//!
//! This library fetches a country polygon collection from an ordered list of
//! remote GeoJSON sources, caches it in-process with a time-to-live, resolves
//! free-text queries to a feature, and estimates a point to aim a globe
//! camera at.
//!
//! # Data Flow
//!
//! ```text
//! GeoDataProvider ──► GeoDocument ──► FeatureIndexer ──► FeatureIndex
//!   (sources +                                              │
//!    TTL cache)                         query ──► CountryResolver
//!                                                           │
//!                                                        Feature
//!                                                           │
//!                                             CentroidEstimator ──► LatLon ──► RenderSink
//! ```

pub mod cache;
pub mod centroid;
pub mod config;
pub mod focus;
pub mod index;
pub mod logging;
pub mod provider;
pub mod resolve;
pub mod server;
pub mod service;

/// Library version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
