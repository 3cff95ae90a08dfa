//! Command-line argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

/// Cohortflow - Audit and clean a survey export into an analysis sample
#[derive(Parser, Debug)]
#[command(name = "cohortflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input survey export (CSV or Parquet, with a header row)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output path for the cleaned analysis sample (CSV or Parquet by extension).
    /// Defaults to the input directory with an '_analysis_sample.csv' suffix.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output path for the cohort flow chart image.
    /// Defaults to the input directory with a '_cohort_flow.png' suffix.
    #[arg(short = 'c', long)]
    pub chart: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Higher values improve type detection for ambiguous columns but may be slower.
    /// Use 0 for a full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Get the analysis-sample output path, deriving from the input if not
    /// explicitly provided.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.derived_sibling("_analysis_sample.csv"))
    }

    /// Get the chart output path, deriving from the input if not explicitly
    /// provided.
    pub fn chart_path(&self) -> PathBuf {
        self.chart
            .clone()
            .unwrap_or_else(|| self.derived_sibling("_cohort_flow.png"))
    }

    fn derived_sibling(&self, suffix: &str) -> PathBuf {
        let parent = self.input.parent().unwrap_or_else(|| Path::new("."));
        let stem = self
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        parent.join(format!("{}{}", stem, suffix))
    }
}
