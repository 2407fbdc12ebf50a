//! File input/output helpers.

/// CSV batch prediction.
pub mod batch;
