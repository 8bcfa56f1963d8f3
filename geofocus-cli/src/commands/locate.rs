//! Locate command - resolve a country and print its focus point.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use geofocus::centroid::CentroidEstimator;
use geofocus::focus::{
    FocusConfig, FocusController, FocusOutcome, PointOfView, PolygonStyle, RenderSink,
};
use geofocus::index::FeatureIndex;
use geofocus::resolve::MatchKind;

use super::common::{build_service, load_config, runtime, start_logging, LogMode, SourceArgs};
use crate::error::CliError;

/// Arguments for the locate command.
#[derive(Debug, Args)]
pub struct LocateArgs {
    /// Country name, partial name, or ISO code
    pub query: String,

    /// List every matching country instead of focusing one
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Run the locate command.
pub fn run(args: LocateArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let mut config = load_config(config_path)?;
    args.source.apply(&mut config)?;

    let _guard = start_logging(&config, LogMode::OneShot)?;

    let service = build_service(&config)?;
    let rt = runtime()?;

    if args.all {
        let matches = rt.block_on(service.locate_all(&args.query))?;
        if matches.is_empty() {
            return Err(CliError::NoMatch(args.query));
        }
        for (feature, kind) in &matches {
            println!(
                "[{}] {} ({}) - {}",
                feature.index(),
                feature.canonical_name(),
                codes(feature.iso_code(), feature.iso_a2()),
                describe_kind(*kind)
            );
        }
        return Ok(());
    }

    let index = rt.block_on(service.feature_index())?;
    let stdout = io::stdout();
    focus(
        index,
        &args.query,
        config.focus_config(),
        config.estimator(),
        stdout.lock(),
    )?;
    Ok(())
}

/// Drives a [`FocusController`] over a console sink and reports the result.
fn focus<W: Write>(
    features: Arc<FeatureIndex>,
    query: &str,
    focus: FocusConfig,
    estimator: CentroidEstimator,
    out: W,
) -> Result<W, CliError> {
    let mut controller = FocusController::with_config(ConsoleSink::new(out), focus, estimator);
    controller.load(features);

    let outcome = controller.search(query);
    let summary = match (&outcome, controller.selected_feature()) {
        (FocusOutcome::NoMatch, _) | (_, None) => return Err(CliError::NoMatch(query.to_string())),
        (FocusOutcome::Focused { .. }, Some(feature)) => format!(
            "Matched: {} ({})",
            feature.canonical_name(),
            codes(feature.iso_code(), feature.iso_a2())
        ),
        (FocusOutcome::SelectedWithoutFocus { error, .. }, Some(feature)) => format!(
            "Matched: {} ({}), camera unchanged: {}",
            feature.canonical_name(),
            codes(feature.iso_code(), feature.iso_a2()),
            error
        ),
    };

    let mut out = controller.into_sink().finish().map_err(CliError::Output)?;
    writeln!(out, "{}", summary).map_err(CliError::Output)?;
    Ok(out)
}

fn codes(iso_a3: &str, iso_a2: &str) -> String {
    match (iso_a3.is_empty(), iso_a2.is_empty()) {
        (true, true) => "no ISO code".to_string(),
        (false, true) => iso_a3.to_string(),
        (true, false) => iso_a2.to_string(),
        (false, false) => format!("{}/{}", iso_a3, iso_a2),
    }
}

fn describe_kind(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::ExactName => "exact name",
        MatchKind::NameContains => "name contains query",
        MatchKind::AlternateNameContains => "alternate name contains query",
        MatchKind::IsoAlpha2 => "ISO alpha-2",
        MatchKind::IsoAlpha3 => "ISO alpha-3",
    }
}

/// Prints camera moves as text.
///
/// Sink callbacks cannot fail, so the first write error is held until
/// [`finish`](Self::finish).
struct ConsoleSink<W> {
    out: W,
    rendered: usize,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleSink<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            rendered: 0,
            error: None,
        }
    }

    fn finish(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl<W: Write> RenderSink for ConsoleSink<W> {
    fn render(&mut self, features: &FeatureIndex, _styles: &[PolygonStyle]) {
        self.rendered = features.len();
    }

    fn point_of_view(&mut self, target: PointOfView, transition: Duration) {
        if self.error.is_some() {
            return;
        }
        let written = writeln!(
            self.out,
            "Focus: lat {:.4}, lon {:.4} (altitude {}, {} ms, {} countries loaded)",
            target.lat,
            target.lon,
            target.altitude,
            transition.as_millis(),
            self.rendered
        );
        if let Err(e) = written {
            self.error = Some(e);
        }
    }
}
