//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use solar_predict::artifacts::{ArtifactPaths, ArtifactSet};
use solar_predict::predictor::Predictor;

/// Prediction for the documented defaults with the fixture artifacts (kW).
pub const DEFAULTS_KW: f64 = 325.0;
/// Prediction with every slider at its maximum (kW).
pub const ALL_MAX_KW: f64 = 295.0;
/// Raw model output with every slider at its minimum (kW), before clamping.
pub const ALL_MIN_RAW_KW: f64 = -355.0;

/// Directory holding `xgb_model.json` and `scaler.json` fixtures.
pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Default-named paths inside the fixture directory.
pub fn fixture_paths() -> ArtifactPaths {
    ArtifactPaths::in_dir(&fixture_dir())
}

/// Predictor over the fixture artifacts.
pub fn fixture_predictor() -> Predictor {
    let set = ArtifactSet::load(&fixture_paths()).expect("fixture artifacts should load");
    Predictor::new(set)
}

/// Fresh, empty scratch directory unique to `name` and this process.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("solar-predict-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("scratch dir should be created");
    dir
}

/// Copies one fixture file into `dir`.
pub fn copy_fixture(file: &str, dir: &Path) {
    fs::copy(fixture_dir().join(file), dir.join(file)).expect("fixture should copy");
}

/// Writes `content` to `dir/file`.
pub fn write_file(dir: &Path, file: &str, content: &str) {
    fs::write(dir.join(file), content).expect("scratch file should be written");
}
