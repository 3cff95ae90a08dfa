//! Type coercion and outlier exclusion
//!
//! Coercion is forgiving: cells that cannot be parsed become nulls, never
//! errors. The outlier step then removes rows whose age or arrival year is
//! null or implausible, using a conjunctive keep-mask over both rules.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::pipeline::normalize::has_column;

/// Plausible age range, inclusive.
pub const AGE_MIN: f64 = 0.0;
pub const AGE_MAX: f64 = 120.0;

/// Plausible arrival-year range, inclusive.
pub const ARRIVAL_YEAR_MIN: f64 = 1900.0;
pub const ARRIVAL_YEAR_MAX: f64 = 2023.0;

/// Days between 0001-01-01 (CE) and the Unix epoch, for date column encoding.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

/// Per-rule counts from the outlier exclusion step.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlierReport {
    /// Rows with a null, negative, or > 120 age.
    pub invalid_age: usize,
    /// Rows with a null, < 1900, or > 2023 arrival year.
    pub invalid_year: usize,
    /// Rows removed by the conjunctive keep-mask.
    pub excluded: usize,
}

/// Coerce `survey_date` to a date column and `age` / `year_arrived_us` to
/// numeric columns, in place. Unparsable cells become nulls.
pub fn coerce_types(df: &mut DataFrame) -> Result<()> {
    if has_column(df, "survey_date") {
        let dates = column_to_date_vec(df.column("survey_date")?)?;
        df.with_column(date_series("survey_date", &dates))?;
    }

    for name in ["age", "year_arrived_us"] {
        if has_column(df, name) {
            let values = column_to_f64_vec(df.column(name)?)?;
            df.with_column(Column::new(name.into(), values))?;
        }
    }

    Ok(())
}

/// Remove rows whose age or arrival year is missing or out of range.
///
/// A row is kept only when BOTH fields are present and plausible. A frame
/// without one of the columns keeps nothing: every row counts as missing
/// that field.
pub fn remove_outliers(df: &DataFrame) -> Result<(DataFrame, OutlierReport)> {
    let height = df.height();
    let ages = f64_values_or_missing(df, "age")?;
    let years = f64_values_or_missing(df, "year_arrived_us")?;

    let mut report = OutlierReport::default();
    let mut keep = Vec::with_capacity(height);

    for i in 0..height {
        let age_ok = ages[i].is_some_and(|a| (AGE_MIN..=AGE_MAX).contains(&a));
        let year_ok = years[i].is_some_and(|y| (ARRIVAL_YEAR_MIN..=ARRIVAL_YEAR_MAX).contains(&y));

        if !age_ok {
            report.invalid_age += 1;
        }
        if !year_ok {
            report.invalid_year += 1;
        }
        keep.push(age_ok && year_ok);
    }

    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let filtered = df.filter(&mask)?;
    report.excluded = height - filtered.height();

    Ok((filtered, report))
}

/// Numeric values for a column, or all-null when the column is absent.
pub fn f64_values_or_missing(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    if has_column(df, name) {
        column_to_f64_vec(df.column(name)?)
    } else {
        Ok(vec![None; df.height()])
    }
}

/// Convert a column to numeric values with forgiving parsing.
pub fn column_to_f64_vec(col: &Column) -> Result<Vec<Option<f64>>> {
    let values = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.and_then(|s| s.trim().parse::<f64>().ok()))
            .collect(),
        dt if dt.is_primitive_numeric() => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?.into_iter().collect()
        }
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.and_then(|s| s.trim().parse::<f64>().ok()))
                .collect()
        }
    };

    Ok(values)
}

/// Convert a column to dates with forgiving parsing. Works for both raw
/// string columns and already-coerced date columns (which round-trip through
/// their ISO representation).
pub fn column_to_date_vec(col: &Column) -> Result<Vec<Option<NaiveDate>>> {
    let cast = col.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|v| v.and_then(parse_flexible_date))
        .collect())
}

/// Parse a date cell in the formats survey exports actually contain.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// Build a polars Date series from chrono dates.
pub fn date_series(name: &str, dates: &[Option<NaiveDate>]) -> Series {
    let days = dates
        .iter()
        .map(|d| d.map(|d| d.num_days_from_ce() - UNIX_EPOCH_CE_DAYS));
    Int32Chunked::from_iter_options(name.into(), days)
        .into_date()
        .into_series()
}
