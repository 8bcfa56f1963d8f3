//! Remote sources and the documents they return.

use std::fmt;

use bytes::Bytes;
use serde_json::Value;

use super::types::SourceError;

/// Natural Earth derived country polygons maintained by the datasets project.
pub const GEO_COUNTRIES_URL: &str =
    "https://raw.githubusercontent.com/datasets/geo-countries/master/data/countries.geojson";

/// World polygons from the D3 graph gallery, used as a fallback.
pub const D3_WORLD_URL: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";

/// A remote GeoJSON document location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoSource {
    /// Short name used in logs and status output.
    pub name: String,
    /// Document URL.
    pub url: String,
}

impl GeoSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Builds a source from a bare URL, naming it after the last path segment.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let name = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(&url)
            .to_string();
        Self { name, url }
    }

    /// The built-in source list, in priority order.
    pub fn defaults() -> Vec<GeoSource> {
        vec![
            GeoSource::new("geo-countries", GEO_COUNTRIES_URL),
            GeoSource::new("d3-graph-gallery", D3_WORLD_URL),
        ]
    }
}

impl fmt::Display for GeoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// Which top-level array made a document structurally valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLayout {
    /// GeoJSON `FeatureCollection` with a `features` array.
    Features,
    /// Alternative layout with an `objects` array, passed through as-is.
    Objects,
}

/// A structurally valid feature collection as received from a source.
///
/// The original body bytes are kept so that the document can be served
/// to clients unmodified.
#[derive(Debug, Clone)]
pub struct GeoDocument {
    body: Bytes,
    value: Value,
    layout: DocumentLayout,
}

impl GeoDocument {
    /// Parses and validates a source payload.
    ///
    /// # Errors
    ///
    /// - [`SourceError::InvalidJson`] if the body is not JSON
    /// - [`SourceError::MissingCollection`] if there is no array-valued
    ///   `features` or `objects` field
    pub fn parse(url: &str, body: Bytes) -> Result<Self, SourceError> {
        let value: Value =
            serde_json::from_slice(&body).map_err(|e| SourceError::InvalidJson {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let layout = if value.get("features").is_some_and(Value::is_array) {
            DocumentLayout::Features
        } else if value.get("objects").is_some_and(Value::is_array) {
            DocumentLayout::Objects
        } else {
            return Err(SourceError::MissingCollection {
                url: url.to_string(),
            });
        };

        Ok(Self {
            body,
            value,
            layout,
        })
    }

    /// The raw body exactly as the source sent it.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn layout(&self) -> DocumentLayout {
        self.layout
    }

    /// Feature records in document order.
    ///
    /// `objects` documents carry no GeoJSON features and yield an empty slice.
    pub fn features(&self) -> &[Value] {
        match self.layout {
            DocumentLayout::Features => self
                .value
                .get("features")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            DocumentLayout::Objects => &[],
        }
    }
}
