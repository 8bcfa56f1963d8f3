//! Centroid types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A point in flat latitude/longitude degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Why a representative point could not be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    /// The feature carries no geometry.
    #[error("Feature has no geometry")]
    MissingGeometry,

    /// Only Polygon and MultiPolygon are supported.
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    /// The selected outer ring has no points.
    #[error("Outer ring is empty")]
    EmptyRing,

    /// The coordinate nesting does not match the geometry type.
    #[error("Malformed {0} coordinates")]
    MalformedRing(String),

    /// A ring position is not a pair of finite numbers.
    #[error("Malformed coordinate at ring position {position}")]
    MalformedCoordinate { position: usize },
}
