//! Solar plant AC power prediction from weather and time-of-day inputs.

/// Model and scaler loading.
pub mod artifacts;
pub mod cli;
pub mod config;
pub mod features;
/// Slider controls for the seven inputs.
pub mod inputs;
pub mod io;
pub mod logging;
pub mod predictor;
pub mod runner;
#[cfg(feature = "tui")]
pub mod tui;
