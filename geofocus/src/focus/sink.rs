//! Rendering sink abstraction.

use std::time::Duration;

use serde::Serialize;

use super::style::PolygonStyle;
use crate::centroid::LatLon;
use crate::index::FeatureIndex;

/// Camera target on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointOfView {
    pub lat: f64,
    pub lon: f64,
    pub altitude: f64,
}

impl PointOfView {
    pub fn at(point: LatLon, altitude: f64) -> Self {
        Self {
            lat: point.lat,
            lon: point.lon,
            altitude,
        }
    }
}

/// Default idle rotation speed of the globe.
pub const DEFAULT_AUTO_ROTATE_SPEED: f64 = 0.6;

/// Interactive camera controls of the globe surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlobeControls {
    /// Spin the globe while the user is idle.
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
    pub enable_zoom: bool,
}

impl Default for GlobeControls {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            auto_rotate_speed: DEFAULT_AUTO_ROTATE_SPEED,
            enable_zoom: true,
        }
    }
}

/// The 3D surface that draws polygons and moves the camera.
///
/// Implementations own the actual rendering; the focus flow only tells
/// them what to draw and where to look.
pub trait RenderSink {
    /// Draws every feature. `styles[i]` applies to `features.get(i)`.
    fn render(&mut self, features: &FeatureIndex, styles: &[PolygonStyle]);

    /// Animates the camera to `target` over `transition`.
    fn point_of_view(&mut self, target: PointOfView, transition: Duration);

    /// Applies camera controls. Surfaces without interactive controls
    /// ignore it.
    fn controls(&mut self, _controls: GlobeControls) {}
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn render(&mut self, features: &FeatureIndex, styles: &[PolygonStyle]) {
        (**self).render(features, styles)
    }

    fn point_of_view(&mut self, target: PointOfView, transition: Duration) {
        (**self).point_of_view(target, transition)
    }

    fn controls(&mut self, controls: GlobeControls) {
        (**self).controls(controls)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Records every sink call for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub renders: Vec<Vec<PolygonStyle>>,
        pub views: Vec<(PointOfView, Duration)>,
        pub controls: Vec<GlobeControls>,
    }

    impl RenderSink for RecordingSink {
        fn render(&mut self, _features: &FeatureIndex, styles: &[PolygonStyle]) {
            self.renders.push(styles.to_vec());
        }

        fn point_of_view(&mut self, target: PointOfView, transition: Duration) {
            self.views.push((target, transition));
        }

        fn controls(&mut self, controls: GlobeControls) {
            self.controls.push(controls);
        }
    }

    #[test]
    fn test_point_of_view_from_lat_lon() {
        let pov = PointOfView::at(LatLon::new(10.0, 20.0), 1.6);
        assert_eq!(
            pov,
            PointOfView {
                lat: 10.0,
                lon: 20.0,
                altitude: 1.6
            }
        );
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn look<S: RenderSink>(mut sink: S) {
            sink.point_of_view(PointOfView::at(LatLon::new(1.0, 2.0), 1.0), Duration::ZERO);
        }

        let mut sink = RecordingSink::default();
        look(&mut sink);
        assert_eq!(sink.views.len(), 1);
    }

    #[test]
    fn test_default_controls_spin_slowly_with_zoom() {
        let controls = GlobeControls::default();
        assert!(controls.auto_rotate);
        assert_eq!(controls.auto_rotate_speed, 0.6);
        assert!(controls.enable_zoom);
    }

    #[test]
    fn test_controls_are_optional_for_sinks() {
        struct Flat;
        impl RenderSink for Flat {
            fn render(&mut self, _: &FeatureIndex, _: &[PolygonStyle]) {}
            fn point_of_view(&mut self, _: PointOfView, _: Duration) {}
        }

        let mut flat = Flat;
        flat.controls(GlobeControls::default());
    }
}
