//! Representative point estimation for camera focus.

mod estimator;
mod types;

pub use estimator::{CentroidEstimator, DEFAULT_MAX_POINTS};
pub use types::{EstimationError, LatLon};
