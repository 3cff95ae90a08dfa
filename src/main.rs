//! Cohortflow: Survey Data-Quality Audit CLI Tool
//!
//! A command-line tool that cleans a raw survey export into an analysis
//! sample and reports the cohort flow, missing data, and summary statistics.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use cli::Cli;
use pipeline::{
    add_composite_measures, add_derived_fields, binarize_outcomes, coerce_types, dataset_stats,
    filter_final_sample, load_dataset, normalize_columns, remove_outliers, select_needed_columns,
    CohortFlow, OUTCOME_COLUMNS,
};
use report::{
    analyze_missing, display_missing_table, render_cohort_flow_chart, write_analysis_sample,
    AuditSummary,
};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output_path = cli.output_path();
    let chart_path = cli.chart_path();

    // Print styled banner and configuration card
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, &output_path, &chart_path);

    let mut flow = CohortFlow::new();

    // Step 1: Load raw data
    print_step_header(1, "Load Raw Data");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading survey export...");
    let df_raw = load_dataset(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols, memory_mb) = dataset_stats(&df_raw);
    println!("\n    {} Initial data state:", style("✧").cyan());
    println!("      Participants: {}", rows);
    println!("      Variables: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    flow.record("1. Raw data loaded", rows, 0, "Initial load");
    print_step_time(step_start.elapsed());

    // Step 2: Normalize columns
    print_step_header(2, "Normalize Columns");

    let step_start = Instant::now();
    let mut df = df_raw;
    normalize_columns(&mut df)?;
    let mut df = select_needed_columns(&df)?;
    print_success("Column names cleaned and standardized");
    print_count("variable(s) retained", df.width(), None);
    print_step_time(step_start.elapsed());

    // Step 3: Clean and derive
    print_step_header(3, "Clean & Derive");

    let step_start = Instant::now();
    coerce_types(&mut df)?;

    let (df_cleaned, outliers) = remove_outliers(&df)?;
    println!(
        "      Age < 0 or > 120: {} record(s)",
        style(outliers.invalid_age).yellow().bold()
    );
    println!(
        "      Year arrived < 1900 or > 2023: {} record(s)",
        style(outliers.invalid_year).yellow().bold()
    );
    print_count("record(s) excluded as outliers", outliers.excluded, None);
    flow.record(
        "2. Outliers removed",
        df_cleaned.height(),
        outliers.excluded,
        "Invalid age or year of arrival",
    );
    print_success("Outlier exclusion complete");

    let mut df = df_cleaned;
    add_derived_fields(&mut df)?;
    print_success("Derived variables created (years_in_us, year_arrived_bin3)");

    binarize_outcomes(&mut df, &OUTCOME_COLUMNS)?;
    print_success("CV outcomes converted to binary (0/1)");

    let (mut df_analysis, excluded_final) = filter_final_sample(&df)?;
    flow.record(
        "3. Final analysis sample",
        df_analysis.height(),
        excluded_final,
        "Missing year of arrival data",
    );
    if excluded_final == 0 {
        print_info("No records lost to missing arrival-year data");
    }
    println!(
        "      Analysis sample: {} record(s) ({} excluded)",
        style(df_analysis.height()).yellow().bold(),
        excluded_final
    );

    add_composite_measures(&mut df_analysis)?;
    print_success("Composite CV measures created");
    print_step_time(step_start.elapsed());

    // Step 4: Report and save
    print_step_header(4, "Report & Save");

    let step_start = Instant::now();
    let missing = analyze_missing(&df_analysis);
    display_missing_table(&missing);

    let summary = AuditSummary::from_frame(&df_analysis, &flow)?;
    summary.display();
    println!();

    let spinner = create_spinner("Rendering cohort flow chart...");
    render_cohort_flow_chart(&flow, &chart_path)?;
    finish_with_success(&spinner, &format!("Chart saved to {}", chart_path.display()));

    let spinner = create_spinner("Writing analysis sample...");
    write_analysis_sample(&mut df_analysis, &output_path)?;
    finish_with_success(
        &spinner,
        &format!("Analysis sample saved to {}", output_path.display()),
    );
    print_step_time(step_start.elapsed());

    print_completion();

    Ok(())
}
