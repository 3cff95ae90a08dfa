//! Derived variables, final sample filtering, and composite measures

use anyhow::Result;
use chrono::NaiveDate;
use polars::prelude::*;

use crate::pipeline::clean::{column_to_date_vec, date_series, f64_values_or_missing};
use crate::pipeline::normalize::{has_column, OUTCOME_COLUMNS};

/// Arrival-year bucket labels, in display order.
pub const BIN_LABELS: [&str; 3] = ["Before 2005", "2005-2015", "2015-2023"];

/// `years_in_us` values outside this range are nulled out.
const YEARS_IN_US_MAX: f64 = 120.0;

/// Bucket an arrival year with edges [0, 2005, 2015, 2025], lowest edge
/// included: [0, 2005] -> "Before 2005", (2005, 2015] -> "2005-2015",
/// (2015, 2025] -> "2015-2023". Outside [0, 2025] or missing -> no bucket.
pub fn arrival_year_bucket(year: Option<f64>) -> Option<&'static str> {
    let y = year?;
    if !(0.0..=2025.0).contains(&y) {
        return None;
    }

    if y <= 2005.0 {
        Some(BIN_LABELS[0])
    } else if y <= 2015.0 {
        Some(BIN_LABELS[1])
    } else {
        Some(BIN_LABELS[2])
    }
}

/// Real-valued years elapsed between two dates.
pub fn years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64 / 365.25
}

/// Append `arrival_date`, `years_in_us`, and `year_arrived_bin3`.
///
/// The arrival date is pinned to July 1 of the arrival year: a fixed
/// mid-year convention, not configurable.
pub fn add_derived_fields(df: &mut DataFrame) -> Result<()> {
    let height = df.height();

    let years = f64_values_or_missing(df, "year_arrived_us")?;
    let surveys: Vec<Option<NaiveDate>> = if has_column(df, "survey_date") {
        column_to_date_vec(df.column("survey_date")?)?
    } else {
        vec![None; height]
    };

    let arrivals: Vec<Option<NaiveDate>> = years
        .iter()
        .map(|y| y.and_then(|y| NaiveDate::from_ymd_opt(y as i32, 7, 1)))
        .collect();

    let years_in_us: Vec<Option<f64>> = surveys
        .iter()
        .zip(&arrivals)
        .map(|(survey, arrival)| match (survey, arrival) {
            (Some(survey), Some(arrival)) => {
                let elapsed = years_between(*arrival, *survey);
                if (0.0..=YEARS_IN_US_MAX).contains(&elapsed) {
                    Some(elapsed)
                } else {
                    None
                }
            }
            _ => None,
        })
        .collect();

    let buckets: Vec<Option<&str>> = years.iter().map(|y| arrival_year_bucket(*y)).collect();

    df.with_column(date_series("arrival_date", &arrivals))?;
    df.with_column(Column::new("years_in_us".into(), years_in_us))?;
    df.with_column(Column::new("year_arrived_bin3".into(), buckets))?;

    Ok(())
}

/// Drop rows without an arrival-year bucket. Returns the final analysis
/// sample and the number of rows excluded.
pub fn filter_final_sample(df: &DataFrame) -> Result<(DataFrame, usize)> {
    let height = df.height();
    let bucket_col = df.column("year_arrived_bin3")?;

    let keep: Vec<bool> = bucket_col
        .as_materialized_series()
        .iter()
        .map(|v| !v.is_null())
        .collect();

    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let filtered = df.filter(&mask)?;
    let excluded = height - filtered.height();

    Ok((filtered, excluded))
}

/// Append the composite cardiovascular measures over the binarized flags:
/// `cv_burden_count` (sum of the four flags), `any_cv_condition`
/// (burden > 0), and `major_cv_event` (heart attack or stroke).
///
/// An absent or null flag contributes 0 to every composite.
pub fn add_composite_measures(df: &mut DataFrame) -> Result<()> {
    let height = df.height();

    let mut burden = vec![0i32; height];
    for name in OUTCOME_COLUMNS {
        for (i, flag) in flag_values_or_zero(df, name)?.iter().enumerate() {
            burden[i] += flag;
        }
    }

    let any_condition: Vec<i32> = burden.iter().map(|&b| i32::from(b > 0)).collect();

    let mi = flag_values_or_zero(df, "hx_mi")?;
    let stroke = flag_values_or_zero(df, "hx_stroke")?;
    let major_event: Vec<i32> = mi
        .iter()
        .zip(&stroke)
        .map(|(m, s)| i32::from(*m == 1 || *s == 1))
        .collect();

    df.with_column(Column::new("cv_burden_count".into(), burden))?;
    df.with_column(Column::new("any_cv_condition".into(), any_condition))?;
    df.with_column(Column::new("major_cv_event".into(), major_event))?;

    Ok(())
}

/// A flag column as 0/1 values, with nulls and absent columns read as 0.
fn flag_values_or_zero(df: &DataFrame, name: &str) -> Result<Vec<i32>> {
    if !has_column(df, name) {
        return Ok(vec![0; df.height()]);
    }

    let cast = df.column(name)?.cast(&DataType::Int32)?;
    Ok(cast.i32()?.into_iter().map(|v| v.unwrap_or(0)).collect())
}
