//! CSV batch prediction: feature rows in, feature rows plus power out.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::features::{FEATURE_NAMES, FeatureRecord};
use crate::predictor::{PredictionError, Predictor};

/// Name of the appended output column.
pub const OUTPUT_COLUMN: &str = "POWER_OUTPUT_KW";

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("cannot open \"{}\": {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid input CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// Reads feature records from CSV with a schema-named header row.
///
/// # Errors
///
/// Returns [`BatchError::Csv`] on a malformed row or header.
pub fn read_records(reader: impl Read) -> Result<Vec<FeatureRecord>, BatchError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = rdr
        .deserialize::<FeatureRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Predicts every row of `reader` and writes the annotated rows to `writer`.
///
/// Nothing is written unless every row predicts successfully. Returns the
/// number of rows written.
///
/// # Errors
///
/// Returns a [`BatchError`] on malformed input, a prediction failure, or a
/// write failure.
pub fn run_batch(
    predictor: &Predictor,
    reader: impl Read,
    writer: impl Write,
) -> Result<usize, BatchError> {
    let records = read_records(reader)?;
    let predictions = predictor.predict_batch(&records)?;

    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(FEATURE_NAMES.iter().copied().chain([OUTPUT_COLUMN]))?;
    for (record, p) in records.iter().zip(&predictions) {
        let mut row: Vec<String> = record.to_vector().iter().map(f64::to_string).collect();
        row.push(format!("{:.2}", p.power_kw));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(records.len())
}

/// Runs a batch from a file path to a file path, or to stdout.
///
/// # Errors
///
/// See [`run_batch`]; also fails if either file cannot be opened.
pub fn run_batch_files(
    predictor: &Predictor,
    input: &Path,
    output: Option<&Path>,
) -> Result<usize, BatchError> {
    let file = File::open(input).map_err(|source| BatchError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let rows = match output {
        Some(path) => {
            // Buffer so a failed batch leaves no output file behind.
            let mut buf = Vec::new();
            let rows = run_batch(predictor, file, &mut buf)?;
            let mut out = File::create(path).map_err(|source| BatchError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            out.write_all(&buf)?;
            rows
        }
        None => run_batch(predictor, file, io::stdout().lock())?,
    };
    info!(rows, input = %input.display(), "batch complete");
    Ok(rows)
}
