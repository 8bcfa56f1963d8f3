//! Country focus flow.
//!
//! A [`FocusController`] owns the selection and drives a [`RenderSink`]:
//! a search or click selects a feature, restyles every polygon, and moves
//! the camera to the estimated centre of the selection. When estimation
//! fails the selection still changes but the camera stays put.

mod controller;
mod sink;
mod style;

pub use controller::{
    FocusConfig, FocusController, FocusOutcome, SelectionState, DEFAULT_FOCUS_ALTITUDE,
    DEFAULT_FOCUS_TRANSITION,
};
pub use sink::{GlobeControls, PointOfView, RenderSink, DEFAULT_AUTO_ROTATE_SPEED};
pub use style::{
    PolygonStyle, SELECTED_ALTITUDE, SELECTED_CAP_COLOR, SELECTED_STROKE_COLOR, SIDE_COLOR,
    STYLE_TRANSITION, UNSELECTED_ALTITUDE, UNSELECTED_CAP_COLOR, UNSELECTED_STROKE_COLOR,
};
