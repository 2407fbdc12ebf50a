//! Startup loading and headless single-prediction runs.

use std::fmt::Write as _;

use tracing::{info, warn};

use crate::artifacts::{ArtifactError, ArtifactSet};
use crate::config::AppConfig;
use crate::features::FeatureRecord;
use crate::inputs::{Field, InputPanel};
use crate::predictor::{OUTPUT_LABEL, Prediction, PredictionError, Predictor};

/// Loads the configured artifacts into a predictor.
///
/// # Errors
///
/// Returns the [`ArtifactError`] for the first artifact that fails to load
/// or the schema mismatches found.
pub fn load_predictor(cfg: &AppConfig) -> Result<Predictor, ArtifactError> {
    let paths = cfg.artifacts.paths();
    let artifacts = ArtifactSet::load(&paths)?;
    Ok(Predictor::new(artifacts))
}

/// Builds the slider panel from configured defaults and applies overrides.
///
/// Overrides are snapped to the slider grid and clamped to its bounds, the
/// same way a slider control would.
pub fn panel_with_overrides(cfg: &AppConfig, overrides: &[(Field, f64)]) -> InputPanel {
    let mut panel = InputPanel::with_defaults(&cfg.defaults.record());
    for &(field, value) in overrides {
        if let Some(slider) = panel.slider_mut(field) {
            slider.set_value(value);
            let applied = slider.value();
            if applied != value {
                warn!(
                    input = field.key(),
                    requested = value,
                    applied,
                    "input adjusted to slider grid"
                );
            }
        }
    }
    panel
}

/// Result of one headless run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnceReport {
    pub record: FeatureRecord,
    pub prediction: Prediction,
}

impl OnceReport {
    /// Text block printed by `--once`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Your Selected Input Features:");
        let _ = writeln!(out, "{}", self.record);
        let _ = writeln!(out);
        let _ = writeln!(out, "Predicted AC Power Output:");
        let _ = writeln!(out, "{OUTPUT_LABEL}: {}", self.prediction);
        out
    }
}

/// Predicts for the panel's current positions.
///
/// # Errors
///
/// Returns the [`PredictionError`] from the pipeline.
pub fn run_once(predictor: &Predictor, panel: &InputPanel) -> Result<OnceReport, PredictionError> {
    let record = panel.record();
    let prediction = predictor.predict(&record)?;
    info!(%prediction, "prediction complete");
    Ok(OnceReport { record, prediction })
}
