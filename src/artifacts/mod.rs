//! Loading and schema checking of the fitted model and scaler.

/// Regression model artifacts.
pub mod model;
/// Feature scaler artifacts.
pub mod scaler;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::features::{FEATURE_COUNT, FEATURE_NAMES};

pub use model::{Model, Regressor};
pub use scaler::{Scaler, Transform};

/// Default model file name.
pub const MODEL_FILE: &str = "xgb_model.json";
/// Default scaler file name.
pub const SCALER_FILE: &str = "scaler.json";

/// Startup failures while loading artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{what} file not found: \"{}\"", .path.display())]
    Missing { what: &'static str, path: PathBuf },

    #[error("cannot read {what} file \"{}\": {source}", .path.display())]
    Unreadable {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {what} file \"{}\": {source}", .path.display())]
    Parse {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact schema mismatch: {}", .problems.join("; "))]
    Schema { problems: Vec<String> },
}

impl ArtifactError {
    /// Returns `true` for the "file absent" case.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

/// Locations of the two artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::with_names(dir, MODEL_FILE, SCALER_FILE)
    }

    /// Custom file names inside `dir`.
    pub fn with_names(dir: &Path, model_file: &str, scaler_file: &str) -> Self {
        Self {
            model: dir.join(model_file),
            scaler: dir.join(scaler_file),
        }
    }
}

/// The loaded, schema-checked model/scaler pair. Read-only after load.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub model: Model,
    pub scaler: Scaler,
}

impl ArtifactSet {
    /// Loads both artifacts and checks them against the feature schema.
    ///
    /// # Errors
    ///
    /// Returns an [`ArtifactError`] if either file is absent, unreadable,
    /// malformed, or does not match [`FEATURE_NAMES`].
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let model: Model = read_json("model", &paths.model)?;
        info!(
            path = %paths.model.display(),
            kind = model.model_type(),
            size = %model.summary(),
            "loaded model"
        );
        let scaler: Scaler = read_json("scaler", &paths.scaler)?;
        info!(
            path = %paths.scaler.display(),
            kind = scaler.scaler_type(),
            features = scaler.feature_names().len(),
            "loaded scaler"
        );
        Self::from_parts(model, scaler)
    }

    /// Builds a set from already-deserialized artifacts, checking the schema.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Schema`] listing every mismatch found.
    pub fn from_parts(model: Model, scaler: Scaler) -> Result<Self, ArtifactError> {
        let set = Self { model, scaler };
        let problems = set.check_schema();
        if problems.is_empty() {
            debug!("artifact schema check passed");
            Ok(set)
        } else {
            Err(ArtifactError::Schema { problems })
        }
    }

    /// Lists every way the pair disagrees with the feature schema.
    pub fn check_schema(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let names = self.scaler.feature_names();
        if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            problems.push(format!(
                "scaler features [{}] do not match expected [{}]",
                names.join(", "),
                FEATURE_NAMES.join(", ")
            ));
        }
        for (param, len) in self.scaler.param_lens() {
            if len != FEATURE_COUNT {
                problems.push(format!(
                    "scaler {param} has {len} entries, expected {FEATURE_COUNT}"
                ));
            }
        }

        let n = self.model.feature_count();
        if n != FEATURE_COUNT {
            problems.push(format!(
                "model expects {n} features, expected {FEATURE_COUNT}"
            ));
        }
        problems.extend(self.model.structural_errors());

        problems
    }
}

fn read_json<T: DeserializeOwned>(what: &'static str, path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ArtifactError::Missing {
                what,
                path: path.to_path_buf(),
            }
        } else {
            ArtifactError::Unreadable {
                what,
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        what,
        path: path.to_path_buf(),
        source,
    })
}
