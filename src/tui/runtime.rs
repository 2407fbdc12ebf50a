//! Interactive application state.

use tracing::debug;

use crate::features::FeatureRecord;
use crate::inputs::InputPanel;
use crate::predictor::{Prediction, PredictionError, Predictor};

/// Steps moved by a coarse key press.
pub const COARSE_STEPS: i32 = 10;

/// TUI application state.
pub struct App {
    predictor: Predictor,
    /// Slider positions and selection cursor.
    pub panel: InputPanel,
    /// Record built from the current positions.
    pub record: FeatureRecord,
    /// Prediction for `record`.
    pub prediction: Prediction,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates the app and computes the first prediction.
    ///
    /// # Errors
    ///
    /// Returns the prediction failure for the starting positions.
    pub fn new(predictor: Predictor, panel: InputPanel) -> Result<Self, PredictionError> {
        let record = panel.record();
        let prediction = predictor.predict(&record)?;
        Ok(Self {
            predictor,
            panel,
            record,
            prediction,
            quit: false,
        })
    }

    /// Re-runs the pipeline for the current slider positions.
    ///
    /// # Errors
    ///
    /// Returns the prediction failure, leaving the previous output in place.
    pub fn refresh(&mut self) -> Result<(), PredictionError> {
        let record = self.panel.record();
        let prediction = self.predictor.predict(&record)?;
        debug!(%prediction, "inputs changed");
        self.record = record;
        self.prediction = prediction;
        Ok(())
    }

    pub fn select_next(&mut self) {
        self.panel.select_next();
    }

    pub fn select_prev(&mut self) {
        self.panel.select_prev();
    }

    /// Moves the selected slider by `n` steps and re-predicts.
    pub fn nudge(&mut self, n: i32) -> Result<(), PredictionError> {
        self.panel.selected_slider_mut().step_by(n);
        self.refresh()
    }

    pub fn selected_to_min(&mut self) -> Result<(), PredictionError> {
        self.panel.selected_slider_mut().to_min();
        self.refresh()
    }

    pub fn selected_to_max(&mut self) -> Result<(), PredictionError> {
        self.panel.selected_slider_mut().to_max();
        self.refresh()
    }

    pub fn reset_selected(&mut self) -> Result<(), PredictionError> {
        self.panel.selected_slider_mut().reset();
        self.refresh()
    }

    pub fn reset_all(&mut self) -> Result<(), PredictionError> {
        self.panel.reset_all();
        self.refresh()
    }
}

/// Output is `100 * hour - 1000`, so early hours clamp to zero.
#[cfg(test)]
pub(super) fn hourly_app() -> App {
    use crate::artifacts::ArtifactSet;
    use crate::artifacts::model::{LinearModel, Model};
    use crate::artifacts::scaler::{Scaler, StandardScaler};
    use crate::features::{FEATURE_COUNT, FEATURE_NAMES};

    let scaler = Scaler::Standard(StandardScaler {
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        mean: vec![0.0; FEATURE_COUNT],
        scale: vec![1.0; FEATURE_COUNT],
    });
    let model = Model::Linear(LinearModel {
        intercept: -1000.0,
        coefficients: vec![0.0, 0.0, 0.0, 0.0, 0.0, 100.0, 0.0],
    });
    let set = ArtifactSet::from_parts(model, scaler).expect("test artifacts should be valid");
    App::new(Predictor::new(set), InputPanel::new()).expect("defaults should predict")
}
