//! Tests for CLI argument parsing and end-to-end binary runs

use assert_cmd::Command;
use clap::Parser;
use cohortflow::cli::Cli;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["cohortflow", "-i", "survey.csv"]);

    assert_eq!(cli.input, PathBuf::from("survey.csv"));
    assert!(cli.output.is_none());
    assert!(cli.chart.is_none());
    assert_eq!(
        cli.infer_schema_length, 10000,
        "Default schema inference should be 10000"
    );
}

#[test]
fn test_cli_output_path_derivation() {
    let cli = Cli::parse_from(["cohortflow", "-i", "/data/survey.csv"]);

    assert_eq!(
        cli.output_path(),
        PathBuf::from("/data/survey_analysis_sample.csv")
    );
    assert_eq!(
        cli.chart_path(),
        PathBuf::from("/data/survey_cohort_flow.png")
    );
}

#[test]
fn test_cli_explicit_paths() {
    let cli = Cli::parse_from([
        "cohortflow",
        "--input",
        "survey.csv",
        "--output",
        "sample.parquet",
        "--chart",
        "flow.png",
    ]);

    assert_eq!(cli.output_path(), PathBuf::from("sample.parquet"));
    assert_eq!(cli.chart_path(), PathBuf::from("flow.png"));
}

#[test]
fn test_cli_relative_path_derivation() {
    let cli = Cli::parse_from(["cohortflow", "-i", "./exports/wave1.csv"]);

    assert_eq!(
        cli.output_path(),
        PathBuf::from("./exports/wave1_analysis_sample.csv")
    );
}

#[test]
fn test_cli_requires_input() {
    assert!(Cli::try_parse_from(["cohortflow"]).is_err());
}

#[test]
fn test_cli_custom_schema_inference() {
    let cli = Cli::parse_from(["cohortflow", "-i", "survey.csv", "--infer-schema-length", "0"]);
    assert_eq!(cli.infer_schema_length, 0);
}

// End-to-end runs of the compiled binary

#[test]
fn test_binary_produces_outputs() {
    let mut raw = raw_survey_dataframe();
    let (temp_dir, csv_path) = create_temp_csv(&mut raw);
    let output_path = temp_dir.path().join("analysis_sample.csv");
    let chart_path = temp_dir.path().join("cohort_flow.png");

    Command::cargo_bin("cohortflow")
        .unwrap()
        .args([
            "-i",
            csv_path.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
            "--chart",
            chart_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data-quality audit complete"));

    assert!(output_path.exists(), "Analysis sample CSV should be written");
    assert!(chart_path.exists(), "Cohort flow chart should be written");

    let csv = std::fs::read_to_string(&output_path).unwrap();
    let mut lines = csv.lines();
    let header = lines.next().unwrap();
    assert!(header.contains("cv_burden_count"));
    assert_eq!(lines.count(), 5, "Five respondents survive the audit");
}

#[test]
fn test_binary_fails_on_missing_input() {
    Command::cargo_bin("cohortflow")
        .unwrap()
        .args(["-i", "/nonexistent/survey.csv"])
        .assert()
        .failure();
}

#[test]
fn test_binary_fails_on_malformed_input_without_partial_outputs() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("broken.csv");
    let output_path = temp_dir.path().join("analysis_sample.csv");
    let chart_path = temp_dir.path().join("cohort_flow.png");

    // Ragged row: more fields than the header declares.
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b").unwrap();
    writeln!(file, "1,2,3,4,5").unwrap();
    drop(file);

    Command::cargo_bin("cohortflow")
        .unwrap()
        .args([
            "-i",
            csv_path.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
            "--chart",
            chart_path.to_str().unwrap(),
        ])
        .assert()
        .failure();

    assert!(
        !output_path.exists(),
        "No partial sample may be written on structural failure"
    );
    assert!(
        !chart_path.exists(),
        "No partial chart may be written on structural failure"
    );
}

#[test]
fn test_binary_rejects_unsupported_extension() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("survey.xlsx");
    std::fs::write(&path, b"binary blob").unwrap();

    Command::cargo_bin("cohortflow")
        .unwrap()
        .args(["-i", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}
