//! Missing-data analysis over the analysis sample

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::style;
use polars::prelude::*;

/// Missing-data statistics for one retained column.
#[derive(Debug, Clone)]
pub struct MissingEntry {
    pub column: String,
    pub missing_n: usize,
    pub missing_pct: f64,
    pub non_missing_n: usize,
}

/// Compute per-column missing counts and percentages, sorted by missing
/// percentage descending. Ties keep the table's column order.
pub fn analyze_missing(df: &DataFrame) -> Vec<MissingEntry> {
    let height = df.height();
    if height == 0 {
        return Vec::new();
    }

    let mut entries: Vec<MissingEntry> = df
        .get_columns()
        .iter()
        .map(|col| {
            let missing_n = col.null_count();
            MissingEntry {
                column: col.name().to_string(),
                missing_n,
                missing_pct: missing_n as f64 / height as f64 * 100.0,
                non_missing_n: height - missing_n,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.missing_pct
            .partial_cmp(&a.missing_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    entries
}

/// Print the missing-data table.
pub fn display_missing_table(entries: &[MissingEntry]) {
    println!();
    println!(
        "    {} {}",
        style("▦").cyan(),
        style("MISSING DATA (Analysis Sample)").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Variable").add_attribute(Attribute::Bold),
        Cell::new("Missing N").add_attribute(Attribute::Bold),
        Cell::new("Missing %").add_attribute(Attribute::Bold),
        Cell::new("Non-Missing N").add_attribute(Attribute::Bold),
    ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.column),
            Cell::new(entry.missing_n),
            Cell::new(format!("{:.1}%", entry.missing_pct)),
            Cell::new(entry.non_missing_n),
        ]);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
