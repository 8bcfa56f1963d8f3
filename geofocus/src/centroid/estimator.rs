//! Approximate representative point of a polygon feature.

use serde_json::Value;

use super::types::{EstimationError, LatLon};
use crate::index::Feature;

/// Maximum number of ring positions averaged.
pub const DEFAULT_MAX_POINTS: usize = 200;

/// Estimates a camera focus point for polygon geometries.
///
/// The estimate is the unweighted mean of the first `max_points` positions
/// of the outer ring of the first polygon. It is not area weighted and
/// ignores ring orientation and antimeridian wraparound.
#[derive(Debug, Clone, Copy)]
pub struct CentroidEstimator {
    max_points: usize,
}

impl Default for CentroidEstimator {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

impl CentroidEstimator {
    /// Creates an estimator averaging at most `max_points` positions.
    ///
    /// A cap of zero is raised to one.
    pub fn new(max_points: usize) -> Self {
        Self {
            max_points: max_points.max(1),
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn estimate_feature(&self, feature: &Feature) -> Result<LatLon, EstimationError> {
        self.estimate(feature.geometry())
    }

    /// Estimates the focus point of a GeoJSON geometry object.
    ///
    /// # Errors
    ///
    /// Fails when the geometry is missing, is not a Polygon or
    /// MultiPolygon, has an empty outer ring, or contains a malformed
    /// position among those averaged.
    pub fn estimate(&self, geometry: Option<&Value>) -> Result<LatLon, EstimationError> {
        let geometry = geometry
            .filter(|g| !g.is_null())
            .ok_or(EstimationError::MissingGeometry)?;

        let ring = outer_ring(geometry)?;
        if ring.is_empty() {
            return Err(EstimationError::EmptyRing);
        }

        let (mut lon_sum, mut lat_sum) = (0.0, 0.0);
        let taken = ring.len().min(self.max_points);
        for (position, point) in ring.iter().take(taken).enumerate() {
            let (lon, lat) =
                position_pair(point).ok_or(EstimationError::MalformedCoordinate { position })?;
            lon_sum += lon;
            lat_sum += lat;
        }

        let n = taken as f64;
        Ok(LatLon::new(lat_sum / n, lon_sum / n))
    }
}

/// First ring of the first polygon.
fn outer_ring(geometry: &Value) -> Result<&[Value], EstimationError> {
    let kind = geometry
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("<missing>");
    let coordinates = geometry.get("coordinates");

    let polygon = match kind {
        "Polygon" => coordinates,
        "MultiPolygon" => match coordinates.and_then(Value::as_array) {
            Some(polygons) if polygons.is_empty() => return Err(EstimationError::EmptyRing),
            Some(polygons) => polygons.first(),
            None => None,
        },
        other => return Err(EstimationError::UnsupportedGeometry(other.to_string())),
    };

    let rings = polygon
        .and_then(Value::as_array)
        .ok_or_else(|| EstimationError::MalformedRing(kind.to_string()))?;

    match rings.first() {
        None => Err(EstimationError::EmptyRing),
        Some(ring) => ring
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| EstimationError::MalformedRing(kind.to_string())),
    }
}

/// `[lon, lat, ...]` as finite numbers; extra dimensions are ignored.
fn position_pair(point: &Value) -> Option<(f64, f64)> {
    let pair = point.as_array()?;
    let lon = pair.first()?.as_f64()?;
    let lat = pair.get(1)?.as_f64()?;
    (lon.is_finite() && lat.is_finite()).then_some((lon, lat))
}
