//! Column projection and type coercion.
//!
//! The raw Scorecard field-of-study file carries ~2500 columns; the pipeline
//! works with a fixed 12-column subset. Projection is checked against an
//! explicit schema so a renamed or dropped column fails the run immediately,
//! instead of silently vanishing downstream. Numeric coercion is non-strict:
//! cells that cannot be parsed (the dataset marks suppressed values with
//! `PrivacySuppressed`) become null.

use std::path::Path;

use anyhow::Result;
use polars::prelude::*;

use super::error::PipelineError;

/// Median earnings 5 years after completion.
pub const EARN_MDN_5YR: &str = "EARN_MDN_5YR";
/// Median accumulated federal loan debt, all students.
pub const DEBT_ANY_MDN: &str = "DEBT_ALL_STGP_ANY_MDN";
/// Median debt for the evaluated cohort.
pub const DEBT_EVAL_MDN: &str = "DEBT_ALL_STGP_EVAL_MDN";
/// Monthly payment on a standard 10-year plan, all students.
pub const DEBT_ANY_10YR_PAY: &str = "DEBT_ALL_STGP_ANY_MDN10YRPAY";
/// Monthly payment on a standard 10-year plan, evaluated cohort.
pub const DEBT_EVAL_10YR_PAY: &str = "DEBT_ALL_STGP_EVAL_MDN10YRPAY";
/// Institution name.
pub const INSTNM: &str = "INSTNM";
/// 4-digit CIP code of the field of study.
pub const CIPCODE: &str = "CIPCODE";
/// CIP code description.
pub const CIPDESC: &str = "CIPDESC";
/// Credential level code (1-8).
pub const CREDLEV: &str = "CREDLEV";
/// Credential level description.
pub const CREDDESC: &str = "CREDDESC";
/// Institution control (Public / Private nonprofit / Private for-profit).
pub const CONTROL: &str = "CONTROL";
/// IPEDS completer count for the program (cohort size).
pub const IPEDSCOUNT2: &str = "IPEDSCOUNT2";

/// Columns kept for ROI analysis, in output order.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    EARN_MDN_5YR,
    DEBT_ANY_MDN,
    DEBT_EVAL_MDN,
    DEBT_ANY_10YR_PAY,
    DEBT_EVAL_10YR_PAY,
    INSTNM,
    CIPCODE,
    CIPDESC,
    CREDLEV,
    CREDDESC,
    CONTROL,
    IPEDSCOUNT2,
];

/// Columns coerced to Float64; unparseable cells become null.
pub const NUMERIC_COLUMNS: [&str; 6] = [
    EARN_MDN_5YR,
    DEBT_ANY_MDN,
    DEBT_EVAL_MDN,
    DEBT_ANY_10YR_PAY,
    DEBT_EVAL_10YR_PAY,
    IPEDSCOUNT2,
];

/// Project the raw table down to the required columns (in declared order) and
/// coerce the numeric subset.
///
/// Fails with [`PipelineError::MissingColumn`] when any required column is
/// absent. Row order is preserved; the input is not mutated.
pub fn project_and_coerce(df: &DataFrame, source_path: &Path) -> Result<DataFrame> {
    check_required_columns(df, source_path)?;

    let mut projected = df.select(REQUIRED_COLUMNS)?;

    // Non-strict casts: parse failures become null, never an error.
    for name in NUMERIC_COLUMNS {
        let coerced = projected.column(name)?.cast(&DataType::Float64)?;
        projected.with_column(coerced)?;
    }

    // Code columns are integers in the data model. CIPCODE may arrive as a
    // zero-padded string depending on schema inference.
    for name in [CIPCODE, CREDLEV] {
        let coerced = projected.column(name)?.cast(&DataType::Int64)?;
        projected.with_column(coerced)?;
    }

    Ok(projected)
}

/// Verify that every required column exists in the table.
pub fn check_required_columns(df: &DataFrame, source_path: &Path) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !present.iter().any(|c| c == required) {
            return Err(PipelineError::MissingColumn {
                column: required.to_string(),
                path: source_path.to_path_buf(),
            }
            .into());
        }
    }

    Ok(())
}

/// Per-column null counts and percentages, sorted by percentage descending.
///
/// This is the aggregate view of coercion failures and source gaps; individual
/// cell failures are never raised.
pub fn missing_value_summary(df: &DataFrame) -> Vec<(String, usize, f64)> {
    let height = df.height();
    if height == 0 {
        return Vec::new();
    }

    let mut summary: Vec<(String, usize, f64)> = df
        .get_columns()
        .iter()
        .map(|col| {
            let nulls = col.null_count();
            let pct = nulls as f64 / height as f64 * 100.0;
            (col.name().to_string(), nulls, pct)
        })
        .collect();

    summary.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
    summary
}
