//! Data-quality summary report generation

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::*;

use crate::pipeline::binary::column_to_string_vec;
use crate::pipeline::cohort::CohortFlow;
use crate::pipeline::derive::BIN_LABELS;
use crate::pipeline::normalize::has_column;

/// Prevalence of one binary outcome in the analysis sample.
#[derive(Debug, Clone)]
pub struct OutcomePrevalence {
    pub label: String,
    pub count: usize,
    pub pct: f64,
}

/// Count and share of one arrival-year bucket.
#[derive(Debug, Clone)]
pub struct BucketFrequency {
    pub label: String,
    pub count: usize,
    pub pct: f64,
}

/// Read-only summary of the audit: cohort flow, retention, continuous-field
/// statistics, outcome prevalences, and the arrival-year distribution.
#[derive(Debug, Clone)]
pub struct AuditSummary {
    pub flow: CohortFlow,
    pub age_mean_sd: Option<(f64, f64)>,
    pub years_in_us_mean_sd: Option<(f64, f64)>,
    pub prevalence: Vec<OutcomePrevalence>,
    pub bucket_frequencies: Vec<BucketFrequency>,
}

/// Outcome columns summarized in the prevalence block, with display labels.
const PREVALENCE_FIELDS: [(&str, &str); 4] = [
    ("dx_htn", "Hypertension"),
    ("hx_mi", "Heart attack"),
    ("hx_stroke", "Stroke"),
    ("any_cv_condition", "Any CV condition"),
];

impl AuditSummary {
    /// Compute the summary from the final analysis sample. Never mutates the
    /// frame; absent optional columns are simply left out of their block.
    pub fn from_frame(df: &DataFrame, flow: &CohortFlow) -> Result<Self> {
        let height = df.height();

        let mut prevalence = Vec::new();
        for (name, label) in PREVALENCE_FIELDS {
            if !has_column(df, name) {
                continue;
            }
            let flags = df.column(name)?.cast(&DataType::Int32)?;
            let count = flags
                .i32()?
                .into_iter()
                .filter(|v| *v == Some(1))
                .count();
            let pct = if height == 0 {
                0.0
            } else {
                count as f64 / height as f64 * 100.0
            };
            prevalence.push(OutcomePrevalence {
                label: label.to_string(),
                count,
                pct,
            });
        }

        let mut bucket_frequencies = Vec::new();
        if has_column(df, "year_arrived_bin3") {
            let buckets = column_to_string_vec(df.column("year_arrived_bin3")?)?;
            for label in BIN_LABELS {
                let count = buckets
                    .iter()
                    .filter(|v| v.as_deref() == Some(label))
                    .count();
                let pct = if height == 0 {
                    0.0
                } else {
                    count as f64 / height as f64 * 100.0
                };
                bucket_frequencies.push(BucketFrequency {
                    label: label.to_string(),
                    count,
                    pct,
                });
            }
        }

        Ok(Self {
            flow: flow.clone(),
            age_mean_sd: mean_sd(df, "age"),
            years_in_us_mean_sd: mean_sd(df, "years_in_us"),
            prevalence,
            bucket_frequencies,
        })
    }

    /// Print the cohort-flow table and the data-quality summary blocks.
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("⧉").cyan(),
            style("COHORT FLOW SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Stage").add_attribute(Attribute::Bold),
            Cell::new("N").add_attribute(Attribute::Bold),
            Cell::new("Excluded").add_attribute(Attribute::Bold),
            Cell::new("Reason").add_attribute(Attribute::Bold),
        ]);

        for stage in self.flow.stages() {
            table.add_row(vec![
                Cell::new(&stage.stage),
                Cell::new(stage.n).fg(Color::Green),
                Cell::new(stage.excluded).fg(if stage.excluded == 0 {
                    Color::White
                } else {
                    Color::Red
                }),
                Cell::new(&stage.reason),
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!(
            "    {} {}",
            style("◎").cyan(),
            style("SAMPLE RETENTION").white().bold()
        );
        println!("      Raw sample: {}", self.flow.initial_n());
        println!("      Analysis sample: {}", self.flow.final_n());
        println!(
            "      Retention rate: {}",
            style(format!("{:.1}%", self.flow.retention_pct())).green().bold()
        );
        println!(
            "      Total excluded: {} ({:.1}%)",
            self.flow.initial_n() - self.flow.final_n(),
            100.0 - self.flow.retention_pct()
        );

        println!();
        println!(
            "    {} {}",
            style("≋").cyan(),
            style("ANALYSIS SAMPLE CHARACTERISTICS").white().bold()
        );
        print_mean_sd("Age", self.age_mean_sd);
        print_mean_sd("Years in US", self.years_in_us_mean_sd);

        if !self.prevalence.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("♥").cyan(),
                style("CV OUTCOME PREVALENCE").white().bold()
            );
            for outcome in &self.prevalence {
                println!(
                    "      {}: {} ({:.1}%)",
                    outcome.label,
                    style(outcome.count).yellow().bold(),
                    outcome.pct
                );
            }
        }

        if !self.bucket_frequencies.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("▤").cyan(),
                style("YEAR OF ARRIVAL DISTRIBUTION").white().bold()
            );
            for bucket in &self.bucket_frequencies {
                println!(
                    "      {}: {} ({:.1}%)",
                    bucket.label,
                    style(bucket.count).yellow().bold(),
                    bucket.pct
                );
            }
        }
    }
}

/// Mean and sample standard deviation (ddof = 1) for a numeric column.
/// Returns None when the column is absent or has no non-null values.
fn mean_sd(df: &DataFrame, name: &str) -> Option<(f64, f64)> {
    if !has_column(df, name) {
        return None;
    }
    let series = df.column(name).ok()?.as_materialized_series();
    let mean = series.mean()?;
    let sd = series.std(1)?;
    Some((mean, sd))
}

fn print_mean_sd(label: &str, stats: Option<(f64, f64)>) {
    match stats {
        Some((mean, sd)) => println!("      {}, mean (SD): {:.1} ({:.1})", label, mean, sd),
        None => println!("      {}, mean (SD): n/a", label),
    }
}
