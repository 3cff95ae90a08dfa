//! Structural error tier for input loading.
//!
//! Only malformed input files are fatal. Data-quality problems (unparsable
//! cells, out-of-range values, missing fields) never use this tier; they
//! become nulls or excluded rows and are tallied in the cohort flow.

use std::path::Path;

use thiserror::Error;

/// Errors raised when the input file cannot be read as tabular data.
#[derive(Debug, Error)]
pub enum DataFormatError {
    /// The file could not be parsed as a delimited table with a header row.
    #[error("Failed to read '{path}' as tabular data: {message}")]
    Malformed { path: String, message: String },

    /// The file extension is not a supported tabular format.
    #[error("Unsupported file format: {extension}. Supported formats: csv, parquet")]
    UnsupportedFormat { extension: String },

    /// The file parsed but yielded a table with no columns.
    #[error("'{path}' contains no columns")]
    EmptyTable { path: String },
}

impl DataFormatError {
    pub(crate) fn malformed(path: &Path, err: impl std::fmt::Display) -> Self {
        DataFormatError::Malformed {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
