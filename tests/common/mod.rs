//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a raw survey DataFrame as an export would look before any cleaning.
///
/// Ten respondents with known characteristics:
/// - rows 0, 1, 6, 7, 9 are fully valid (5 survive the outlier step)
/// - rows 2, 3, 8 have an invalid age (150, empty, non-numeric)
/// - rows 4, 5 have an invalid arrival year (1880, empty)
/// - outcome cells use the full zoo of checkbox tokens
///
/// Column names use the instrument's verbose question text, mixed case, plus
/// two extra columns the projection step must drop.
pub fn raw_survey_dataframe() -> DataFrame {
    df! {
        "Record ID" => ["r01", "r02", "r03", "r04", "r05", "r06", "r07", "r08", "r09", "r10"],
        "Survey Date" => [
            "2024-06-15", "2024-06-15", "2024-06-16", "2024-06-16", "2024-06-17",
            "2024-06-17", "2024-06-18", "2024-06-18", "2024-06-19", "2024-06-19",
        ],
        "What is your age?" => ["34", "71", "150", "", "52", "61", "45", "29", "abc", "68"],
        "What is your biological sex?" => ["F", "M", "F", "M", "F", "M", "F", "M", "F", "M"],
        "What is your household income?" => [
            "<25k", "25-50k", "50-75k", "<25k", "75k+",
            "25-50k", "50-75k", "<25k", "75k+", "25-50k",
        ],
        "In what year did you or your family arrive to the United States?" => [
            "2010", "1998", "2005", "2012", "1880", "", "2019", "2005", "2014", "2021",
        ],
        "Have you been diagnosed with any of the following  (choice=Heart Failure)" => [
            "Unchecked", "Checked", "Unchecked", "Unchecked", "Unchecked",
            "Unchecked", "", "Unchecked", "Unchecked", "Checked",
        ],
        "Have you been diagnosed with any of the following  (choice=Hypertension)" => [
            "Checked", "Checked", "Unchecked", "Checked", "Unchecked",
            "Checked", "Unchecked", "banana", "Unchecked", "Unchecked",
        ],
        "Heart attack (choice=Yes)" => [
            "No", "Yes", "No", "No", "No", "No", "No", "No", "No", "No",
        ],
        "Stroke (choice=Yes)" => [
            "Unchecked", "Unchecked", "Unchecked", "Unchecked", "Unchecked",
            "Unchecked", "Checked", "Unchecked", "Unchecked", "Unchecked",
        ],
        "What's your favorite color?" => [
            "blue", "green", "red", "blue", "green", "red", "blue", "green", "red", "blue",
        ],
    }
    .unwrap()
}

/// Create a larger randomized survey frame for stress tests. Every row is
/// valid, so the whole frame should survive cleaning.
pub fn create_large_survey_dataframe(rows: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let ages: Vec<f64> = (0..rows).map(|_| rng.gen_range(18..95) as f64).collect();
    let years: Vec<f64> = (0..rows).map(|_| rng.gen_range(1950..2023) as f64).collect();
    let dates: Vec<&str> = (0..rows).map(|_| "2024-01-15").collect();
    let flags: Vec<&str> = (0..rows)
        .map(|_| if rng.gen_bool(0.3) { "Checked" } else { "Unchecked" })
        .collect();

    df! {
        "survey_date" => dates,
        "age" => ages,
        "year_arrived_us" => years,
        "dx_htn" => flags,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("survey_export.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
