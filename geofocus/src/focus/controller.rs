//! Search and click driven camera focus.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::sink::{GlobeControls, PointOfView, RenderSink};
use super::style::PolygonStyle;
use crate::centroid::{CentroidEstimator, EstimationError};
use crate::index::{Feature, FeatureIndex};
use crate::resolve::CountryResolver;

/// Default camera altitude when focusing a country.
pub const DEFAULT_FOCUS_ALTITUDE: f64 = 1.6;

/// Default camera animation time when focusing a country.
pub const DEFAULT_FOCUS_TRANSITION: Duration = Duration::from_millis(1000);

/// Camera parameters for focus moves and the idle globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusConfig {
    pub altitude: f64,
    pub transition: Duration,
    pub controls: GlobeControls,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            altitude: DEFAULT_FOCUS_ALTITUDE,
            transition: DEFAULT_FOCUS_TRANSITION,
            controls: GlobeControls::default(),
        }
    }
}

/// The currently selected feature.
///
/// A selection is the feature at an index *of a particular dataset*: it
/// only matches features of the [`FeatureIndex`] it was made in. Loading a
/// different dataset leaves it in place but nothing in the new data is
/// selected until the next search or click.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<(Arc<FeatureIndex>, usize)>,
}

impl SelectionState {
    /// Index of the selected feature within the dataset it was made in.
    pub fn selected(&self) -> Option<usize> {
        self.selected.as_ref().map(|(_, index)| *index)
    }

    /// The selected index, if the selection belongs to `features`.
    pub fn selected_in(&self, features: &Arc<FeatureIndex>) -> Option<usize> {
        match &self.selected {
            Some((dataset, index)) if Arc::ptr_eq(dataset, features) => Some(*index),
            _ => None,
        }
    }

    /// Identity test: the feature at `index` of `features` is the selection.
    pub fn is_selected(&self, features: &Arc<FeatureIndex>, index: usize) -> bool {
        self.selected_in(features) == Some(index)
    }

    fn select(&mut self, features: &Arc<FeatureIndex>, index: usize) {
        self.selected = Some((Arc::clone(features), index));
    }
}

/// Result of a search or click.
#[derive(Debug, Clone, PartialEq)]
pub enum FocusOutcome {
    /// The feature was selected and the camera moved to it.
    Focused { index: usize, target: PointOfView },
    /// The feature was selected but its geometry gave no focus point.
    SelectedWithoutFocus {
        index: usize,
        error: EstimationError,
    },
    /// Nothing matched; selection and camera are unchanged.
    NoMatch,
}

/// Connects resolution and estimation to a [`RenderSink`].
pub struct FocusController<S> {
    sink: S,
    features: Arc<FeatureIndex>,
    selection: SelectionState,
    resolver: CountryResolver,
    estimator: CentroidEstimator,
    config: FocusConfig,
}

impl<S: RenderSink> FocusController<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, FocusConfig::default(), CentroidEstimator::default())
    }

    /// Takes ownership of `sink` and applies the configured controls.
    pub fn with_config(mut sink: S, config: FocusConfig, estimator: CentroidEstimator) -> Self {
        sink.controls(config.controls);
        Self {
            sink,
            features: Arc::new(FeatureIndex::default()),
            selection: SelectionState::default(),
            resolver: CountryResolver::new(),
            estimator,
            config,
        }
    }

    /// Replaces the rendered dataset and draws it.
    ///
    /// The selection is kept but only styles features of the dataset it
    /// was made in, so reloading the same `Arc` keeps the highlight while
    /// a different dataset renders unselected.
    pub fn load(&mut self, features: Arc<FeatureIndex>) {
        self.features = features;
        self.redraw();
    }

    /// Resolves `query`, selects the match, and focuses the camera on it.
    pub fn search(&mut self, query: &str) -> FocusOutcome {
        let index = match self.resolver.resolve(query, self.features.features()) {
            Some(feature) => feature.index(),
            None => {
                debug!(query = query, "Search matched nothing");
                return FocusOutcome::NoMatch;
            }
        };
        self.focus(index)
    }

    /// Selects and focuses a clicked feature.
    ///
    /// Returns [`FocusOutcome::NoMatch`] for an index outside the dataset.
    pub fn click(&mut self, index: usize) -> FocusOutcome {
        if self.features.get(index).is_none() {
            return FocusOutcome::NoMatch;
        }
        self.focus(index)
    }

    /// Style for the feature at `index`, by identity with the selection.
    pub fn style(&self, index: usize) -> PolygonStyle {
        PolygonStyle::for_selection(self.selection.is_selected(&self.features, index))
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The selected feature, if it belongs to the loaded dataset.
    pub fn selected_feature(&self) -> Option<&Feature> {
        self.selection
            .selected_in(&self.features)
            .and_then(|index| self.features.get(index))
    }

    pub fn features(&self) -> &Arc<FeatureIndex> {
        &self.features
    }

    pub fn config(&self) -> FocusConfig {
        self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn focus(&mut self, index: usize) -> FocusOutcome {
        self.selection.select(&self.features, index);
        self.redraw();

        let Some(feature) = self.features.get(index) else {
            return FocusOutcome::NoMatch;
        };

        match self.estimator.estimate_feature(feature) {
            Ok(point) => {
                let target = PointOfView::at(point, self.config.altitude);
                debug!(
                    name = feature.canonical_name(),
                    lat = target.lat,
                    lon = target.lon,
                    "Focusing camera"
                );
                self.sink.point_of_view(target, self.config.transition);
                FocusOutcome::Focused { index, target }
            }
            Err(error) => {
                warn!(
                    name = feature.canonical_name(),
                    index = index,
                    error = %error,
                    "Cannot estimate focus point, camera unchanged"
                );
                FocusOutcome::SelectedWithoutFocus { index, error }
            }
        }
    }

    fn redraw(&mut self) {
        let styles: Vec<PolygonStyle> = (0..self.features.len()).map(|i| self.style(i)).collect();
        self.sink.render(&self.features, &styles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::sink::tests::RecordingSink;
    use crate::index::FeatureIndexer;
    use serde_json::json;

    fn square(lon: f64, lat: f64) -> serde_json::Value {
        json!({
            "type": "Polygon",
            "coordinates": [[[lon, lat], [lon + 2.0, lat], [lon + 2.0, lat + 2.0], [lon, lat + 2.0]]]
        })
    }

    fn dataset() -> Arc<FeatureIndex> {
        Arc::new(FeatureIndexer::default().index_features(&[
            json!({"properties": {"ADMIN": "France", "ISO_A3": "FRA"}, "geometry": square(2.0, 46.0)}),
            json!({"properties": {"ADMIN": "Atlantis", "ISO_A3": "ATL"}, "geometry": {"type": "Point", "coordinates": [0, 0]}}),
            json!({"properties": {"ADMIN": "Peru", "ISO_A3": "PER"}, "geometry": square(-76.0, -10.0)}),
        ]))
    }

    fn controller() -> FocusController<RecordingSink> {
        let mut controller = FocusController::new(RecordingSink::default());
        controller.load(dataset());
        controller
    }

    #[test]
    fn test_load_renders_all_unselected() {
        let controller = controller();
        let sink = controller.sink();
        assert_eq!(sink.controls, vec![GlobeControls::default()]);
        assert_eq!(sink.renders.len(), 1);
        assert_eq!(sink.renders[0], vec![PolygonStyle::UNSELECTED; 3]);
        assert!(sink.views.is_empty());
    }

    #[test]
    fn test_search_focuses_camera() {
        let mut controller = controller();
        let outcome = controller.search("france");

        let target = PointOfView {
            lat: 47.0,
            lon: 3.0,
            altitude: DEFAULT_FOCUS_ALTITUDE,
        };
        assert_eq!(outcome, FocusOutcome::Focused { index: 0, target });
        assert_eq!(controller.selection().selected(), Some(0));
        assert_eq!(
            controller.sink().views,
            vec![(target, DEFAULT_FOCUS_TRANSITION)]
        );
        assert_eq!(controller.style(0), PolygonStyle::SELECTED);
        assert_eq!(controller.style(2), PolygonStyle::UNSELECTED);
    }

    #[test]
    fn test_search_restyles_after_selection() {
        let mut controller = controller();
        controller.search("PER");
        let last = controller.sink().renders.last().unwrap();
        assert_eq!(
            last,
            &vec![
                PolygonStyle::UNSELECTED,
                PolygonStyle::UNSELECTED,
                PolygonStyle::SELECTED
            ]
        );
    }

    #[test]
    fn test_no_match_keeps_previous_selection() {
        let mut controller = controller();
        controller.search("Peru");
        let renders = controller.sink().renders.len();

        assert_eq!(controller.search("Narnia"), FocusOutcome::NoMatch);
        assert_eq!(controller.selection().selected(), Some(2));
        assert_eq!(controller.sink().views.len(), 1);
        assert_eq!(controller.sink().renders.len(), renders);
    }

    #[test]
    fn test_estimation_failure_selects_without_moving_camera() {
        let mut controller = controller();
        let outcome = controller.search("Atlantis");

        assert!(matches!(
            outcome,
            FocusOutcome::SelectedWithoutFocus {
                index: 1,
                error: EstimationError::UnsupportedGeometry(_)
            }
        ));
        assert_eq!(controller.selection().selected(), Some(1));
        assert!(controller.sink().views.is_empty());
    }

    #[test]
    fn test_click_focuses() {
        let mut controller = controller();
        let outcome = controller.click(2);
        assert!(matches!(outcome, FocusOutcome::Focused { index: 2, .. }));
        assert_eq!(controller.selected_feature().unwrap().canonical_name(), "Peru");
    }

    #[test]
    fn test_click_out_of_range_is_no_match() {
        let mut controller = controller();
        assert_eq!(controller.click(99), FocusOutcome::NoMatch);
        assert_eq!(controller.selection().selected(), None);
    }

    #[test]
    fn test_custom_config() {
        let controls = GlobeControls {
            auto_rotate: false,
            ..GlobeControls::default()
        };
        let config = FocusConfig {
            altitude: 2.5,
            transition: Duration::from_millis(250),
            controls,
        };
        let mut controller =
            FocusController::with_config(RecordingSink::default(), config, CentroidEstimator::default());
        controller.load(dataset());
        controller.search("France");

        let (target, transition) = controller.sink().views[0];
        assert_eq!(target.altitude, 2.5);
        assert_eq!(transition, Duration::from_millis(250));
        assert_eq!(controller.sink().controls, vec![controls]);
    }

    #[test]
    fn test_reload_same_dataset_keeps_selection() {
        let mut controller = controller();
        controller.search("France");
        let same = Arc::clone(controller.features());
        controller.load(same);
        assert_eq!(controller.selection().selected(), Some(0));
        assert_eq!(controller.selected_feature().unwrap().canonical_name(), "France");
        assert_eq!(controller.sink().renders.last().unwrap()[0], PolygonStyle::SELECTED);
    }

    #[test]
    fn test_reload_other_dataset_does_not_transfer_selection() {
        let mut controller = FocusController::new(RecordingSink::default());
        controller.load(Arc::new(FeatureIndexer::default().index_features(&[
            json!({"properties": {"ADMIN": "France"}, "geometry": square(2.0, 46.0)}),
            json!({"properties": {"ADMIN": "Peru"}, "geometry": square(-76.0, -10.0)}),
        ])));
        controller.search("Peru");
        assert_eq!(controller.style(1), PolygonStyle::SELECTED);

        controller.load(Arc::new(FeatureIndexer::default().index_features(&[
            json!({"properties": {"ADMIN": "Chile"}, "geometry": square(-71.0, -35.0)}),
            json!({"properties": {"ADMIN": "Japan"}, "geometry": square(138.0, 36.0)}),
        ])));

        // Kept, but Japan at the old index is not Peru.
        assert_eq!(controller.selection().selected(), Some(1));
        assert!(controller.selected_feature().is_none());
        assert_eq!(controller.style(1), PolygonStyle::UNSELECTED);
        assert_eq!(
            controller.sink().renders.last().unwrap(),
            &vec![PolygonStyle::UNSELECTED; 2]
        );

        controller.click(1);
        assert_eq!(controller.selected_feature().unwrap().canonical_name(), "Japan");
        assert_eq!(controller.style(1), PolygonStyle::SELECTED);
    }

    #[test]
    fn test_reindexed_copy_is_a_different_dataset() {
        let mut controller = controller();
        controller.search("France");
        controller.load(dataset());
        assert!(controller.selected_feature().is_none());
        assert_eq!(controller.style(0), PolygonStyle::UNSELECTED);
    }
}
