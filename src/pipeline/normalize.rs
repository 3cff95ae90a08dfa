//! Column-name normalization and projection to the analysis variable set

use anyhow::Result;
use polars::prelude::*;

/// Core demographic fields required by the downstream stages.
pub const CORE_COLUMNS: [&str; 5] = ["survey_date", "age", "sex", "income", "year_arrived_us"];

/// Cardiovascular outcome flags. Optional: absent columns are tolerated.
pub const OUTCOME_COLUMNS: [&str; 4] = ["dx_hf", "dx_htn", "hx_mi", "hx_stroke"];

/// Fixed mapping from the instrument's question text (after cleaning) to the
/// short field names used in the analysis sample. The double space before
/// `(choice=` is part of the instrument text.
const RENAME_TABLE: [(&str, &str); 9] = [
    ("survey date", "survey_date"),
    ("what is your age?", "age"),
    ("what is your biological sex?", "sex"),
    ("what is your household income?", "income"),
    (
        "in what year did you or your family arrive to the united states?",
        "year_arrived_us",
    ),
    (
        "have you been diagnosed with any of the following  (choice=heart failure)",
        "dx_hf",
    ),
    (
        "have you been diagnosed with any of the following  (choice=hypertension)",
        "dx_htn",
    ),
    ("heart attack (choice=yes)", "hx_mi"),
    ("stroke (choice=yes)", "hx_stroke"),
];

/// Clean a single column name: strip literal apostrophes, replace
/// non-breaking spaces with ordinary spaces, trim, and lowercase.
pub fn clean_column_name(name: &str) -> String {
    name.replace('\'', "")
        .replace('\u{00a0}', " ")
        .trim()
        .to_lowercase()
}

/// Normalize every column name in place and apply the rename table.
pub fn normalize_columns(df: &mut DataFrame) -> Result<()> {
    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

    for name in &names {
        let cleaned = clean_column_name(name);
        let renamed = RENAME_TABLE
            .iter()
            .find(|(question, _)| *question == cleaned)
            .map(|(_, short)| (*short).to_string())
            .unwrap_or(cleaned);

        if renamed != *name {
            df.rename(name, renamed.into())?;
        }
    }

    Ok(())
}

/// Project the table down to the columns needed downstream, preserving the
/// core-then-outcome order. Columns absent from the source are silently
/// omitted rather than causing failure.
pub fn select_needed_columns(df: &DataFrame) -> Result<DataFrame> {
    let present: Vec<String> = CORE_COLUMNS
        .iter()
        .chain(OUTCOME_COLUMNS.iter())
        .filter(|wanted| has_column(df, wanted))
        .map(|wanted| wanted.to_string())
        .collect();

    Ok(df.select(present)?)
}

/// True when the DataFrame has a column with this exact name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|n| n.as_str() == name)
}
