//! Scale → predict → clamp pipeline over the loaded artifacts.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::artifacts::{ArtifactSet, Regressor, Transform};
use crate::features::{FEATURE_COUNT, FEATURE_NAMES, FeatureRecord};

/// Display label for the prediction readout.
pub const OUTPUT_LABEL: &str = "Power Output";

/// Runtime failures while transforming or predicting.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("input {name} is not a finite number ({value})")]
    NonFiniteInput { name: &'static str, value: f64 },

    #[error("scaler produced {got} values, model expects {expected}")]
    ScaledWidth { got: usize, expected: usize },

    #[error("model produced a non-finite prediction ({0})")]
    NonFiniteOutput(f64),

    #[error("batch row {row}: {source}")]
    Batch {
        row: usize,
        #[source]
        source: Box<PredictionError>,
    },
}

/// One prediction, clamped at zero for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Unclamped model output (kW).
    pub raw_kw: f64,
    /// Output floor-clamped at zero (kW).
    pub power_kw: f64,
}

impl Prediction {
    /// Wraps a raw model output, applying the zero floor.
    pub fn from_raw(raw_kw: f64) -> Self {
        Self {
            raw_kw,
            power_kw: raw_kw.max(0.0),
        }
    }

    /// Returns `true` if the zero floor changed the value.
    pub fn was_clamped(&self) -> bool {
        self.raw_kw < 0.0
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kW", self.power_kw)
    }
}

/// Holds the read-only artifacts for the rest of the process.
#[derive(Debug, Clone)]
pub struct Predictor {
    artifacts: ArtifactSet,
}

impl Predictor {
    /// Creates a predictor over a schema-checked artifact set.
    pub fn new(artifacts: ArtifactSet) -> Self {
        Self { artifacts }
    }

    /// Runs the full pipeline for one record.
    ///
    /// # Errors
    ///
    /// Returns a [`PredictionError`] if any input or the output is not
    /// finite, or the scaler output width disagrees with the model.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Prediction, PredictionError> {
        let row = record.to_vector();
        if let Some((i, value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(PredictionError::NonFiniteInput {
                name: FEATURE_NAMES[i],
                value: *value,
            });
        }

        let scaled = self.artifacts.scaler.transform(&row);
        let expected = self.artifacts.model.feature_count();
        if scaled.len() != expected || scaled.len() != FEATURE_COUNT {
            return Err(PredictionError::ScaledWidth {
                got: scaled.len(),
                expected,
            });
        }

        let raw = self.artifacts.model.predict(&scaled);
        if !raw.is_finite() {
            return Err(PredictionError::NonFiniteOutput(raw));
        }
        let prediction = Prediction::from_raw(raw);
        debug!(
            raw_kw = prediction.raw_kw,
            power_kw = prediction.power_kw,
            "prediction"
        );
        Ok(prediction)
    }

    /// Predicts every record, or none.
    ///
    /// # Errors
    ///
    /// Returns the first failure, tagged with its zero-based row index.
    pub fn predict_batch(
        &self,
        records: &[FeatureRecord],
    ) -> Result<Vec<Prediction>, PredictionError> {
        records
            .iter()
            .enumerate()
            .map(|(row, r)| {
                self.predict(r).map_err(|e| PredictionError::Batch {
                    row,
                    source: Box::new(e),
                })
            })
            .collect()
    }
}
