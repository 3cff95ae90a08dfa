//! Binary normalization of categorical/free-text outcome responses
//!
//! Survey exports encode the same answer many ways ("Yes", "Checked", "1",
//! "1.0", "x"). `to_binary` collapses them all to a strict 0/1 flag.
//!
//! Caveat for upstream data validation: any non-empty token that matches
//! neither set is treated as affirmative ("some value present" = 1), while a
//! null cell maps to 0. This asymmetric default matches the source
//! instrument's checkbox exports and is kept deliberately.

use anyhow::Result;
use polars::prelude::*;

use crate::pipeline::normalize::has_column;

/// Tokens that map to 1, compared case-insensitively after trimming.
const AFFIRMATIVE_TOKENS: [&str; 9] = [
    "yes", "y", "true", "1", "1.0", "checked", "check", "x", "selected",
];

/// Tokens that map to 0, compared case-insensitively after trimming.
const NEGATIVE_TOKENS: [&str; 8] = ["no", "n", "false", "0", "0.0", "unchecked", "uncheck", ""];

/// Map an arbitrary cell to a 0/1 flag.
pub fn to_binary(value: Option<&str>) -> i32 {
    let Some(raw) = value else {
        return 0;
    };

    let token = raw.trim().to_lowercase();
    if AFFIRMATIVE_TOKENS.contains(&token.as_str()) {
        return 1;
    }
    if NEGATIVE_TOKENS.contains(&token.as_str()) {
        return 0;
    }

    // Unmatched non-empty token: treat a present value as affirmative.
    if token.is_empty() {
        0
    } else {
        1
    }
}

/// Replace each listed column (where present) with its 0/1 flag, in place.
/// Absent columns are skipped.
pub fn binarize_outcomes(df: &mut DataFrame, columns: &[&str]) -> Result<()> {
    for &name in columns {
        if !has_column(df, name) {
            continue;
        }

        let values = column_to_string_vec(df.column(name)?)?;
        let flags: Vec<i32> = values.iter().map(|v| to_binary(v.as_deref())).collect();
        df.with_column(Column::new(name.into(), flags))?;
    }

    Ok(())
}

/// Convert a column of any dtype to string cells for token matching.
pub fn column_to_string_vec(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        dt if dt.is_primitive_numeric() => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_tokens() {
        for token in ["Yes", "y", "TRUE", "1", "1.0", "Checked", "check", "X", "selected"] {
            assert_eq!(to_binary(Some(token)), 1, "'{}' should map to 1", token);
        }
    }

    #[test]
    fn test_negative_tokens() {
        for token in ["No", "n", "FALSE", "0", "0.0", "Unchecked", "uncheck", ""] {
            assert_eq!(to_binary(Some(token)), 0, "'{}' should map to 0", token);
        }
    }

    #[test]
    fn test_missing_maps_to_zero() {
        assert_eq!(to_binary(None), 0);
    }

    #[test]
    fn test_unmatched_non_empty_maps_to_one() {
        assert_eq!(to_binary(Some("banana")), 1);
        assert_eq!(to_binary(Some("  maybe  ")), 1);
    }

    #[test]
    fn test_whitespace_only_maps_to_zero() {
        assert_eq!(to_binary(Some("   ")), 0);
    }

    #[test]
    fn test_binarize_string_column() {
        let mut df = df! {
            "hx_mi" => [Some("Checked"), Some("Unchecked"), None, Some("Yes")],
        }
        .unwrap();

        binarize_outcomes(&mut df, &["hx_mi"]).unwrap();

        let flags: Vec<Option<i32>> = df.column("hx_mi").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(flags, vec![Some(1), Some(0), Some(0), Some(1)]);
    }

    #[test]
    fn test_binarize_numeric_column() {
        let mut df = df! {
            "dx_htn" => [Some(1.0f64), Some(0.0), None],
        }
        .unwrap();

        binarize_outcomes(&mut df, &["dx_htn"]).unwrap();

        let flags: Vec<Option<i32>> = df.column("dx_htn").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(flags, vec![Some(1), Some(0), Some(0)]);
    }

    #[test]
    fn test_binarize_skips_absent_column() {
        let mut df = df! {
            "age" => [40i32, 50],
        }
        .unwrap();

        binarize_outcomes(&mut df, &["dx_hf"]).unwrap();
        assert!(df.column("dx_hf").is_err());
    }
}
