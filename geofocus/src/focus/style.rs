//! Polygon styling for selected and unselected countries.

use std::time::Duration;

use serde::Serialize;

/// Cap colour of the selected country.
pub const SELECTED_CAP_COLOR: &str = "rgba(34,197,94,0.85)";
/// Stroke colour of the selected country.
pub const SELECTED_STROKE_COLOR: &str = "rgba(16,185,129,1)";
/// Extrusion of the selected country above the globe surface.
pub const SELECTED_ALTITUDE: f64 = 0.06;

pub const UNSELECTED_CAP_COLOR: &str = "rgba(59,130,246,0.18)";
pub const UNSELECTED_STROKE_COLOR: &str = "rgba(59,130,246,0.5)";
pub const UNSELECTED_ALTITUDE: f64 = 0.01;

/// Side colour shared by every polygon.
pub const SIDE_COLOR: &str = "rgba(30,58,138,0.35)";

/// Animation time when a polygon changes style.
pub const STYLE_TRANSITION: Duration = Duration::from_millis(400);

/// Visual attributes for one rendered polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolygonStyle {
    pub cap_color: &'static str,
    pub side_color: &'static str,
    pub stroke_color: &'static str,
    pub altitude: f64,
    #[serde(rename = "transition_ms", serialize_with = "serialize_millis")]
    pub transition: Duration,
}

impl PolygonStyle {
    pub const SELECTED: PolygonStyle = PolygonStyle {
        cap_color: SELECTED_CAP_COLOR,
        side_color: SIDE_COLOR,
        stroke_color: SELECTED_STROKE_COLOR,
        altitude: SELECTED_ALTITUDE,
        transition: STYLE_TRANSITION,
    };

    pub const UNSELECTED: PolygonStyle = PolygonStyle {
        cap_color: UNSELECTED_CAP_COLOR,
        side_color: SIDE_COLOR,
        stroke_color: UNSELECTED_STROKE_COLOR,
        altitude: UNSELECTED_ALTITUDE,
        transition: STYLE_TRANSITION,
    };

    pub fn for_selection(selected: bool) -> Self {
        if selected {
            Self::SELECTED
        } else {
            Self::UNSELECTED
        }
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}
