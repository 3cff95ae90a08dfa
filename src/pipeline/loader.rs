//! Dataset loader for CSV and Parquet survey exports

use std::path::Path;

use polars::prelude::*;

use crate::pipeline::error::DataFormatError;

/// Load a survey export into an eager DataFrame (CSV or Parquet based on extension).
///
/// Column order and row order are preserved exactly as they appear in the file.
/// `infer_schema_length` controls how many rows the CSV reader inspects for
/// type inference; 0 means a full table scan.
///
/// This is the only place the pipeline can fail hard: a file that cannot be
/// parsed as a delimited table aborts the run before any output is written.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame, DataFormatError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let infer = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(infer)
            .finish()
            .map_err(|e| DataFormatError::malformed(path, e))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .map_err(|e| DataFormatError::malformed(path, e))?,
        _ => return Err(DataFormatError::UnsupportedFormat { extension }),
    };

    let df = lf
        .collect()
        .map_err(|e| DataFormatError::malformed(path, e))?;

    if df.width() == 0 {
        return Err(DataFormatError::EmptyTable {
            path: path.display().to_string(),
        });
    }

    Ok(df)
}

/// Rows, columns, and estimated in-memory size (MB) for the console stats block.
pub fn dataset_stats(df: &DataFrame) -> (usize, usize, f64) {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    (rows, cols, memory_mb)
}
