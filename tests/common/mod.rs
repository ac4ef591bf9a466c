//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a raw field-of-study DataFrame with known characteristics.
///
/// Numeric columns arrive as strings, the way schema inference reads the real
/// file (it mixes numbers with `PrivacySuppressed` markers). Rows:
/// - row 0: the reference scenario (40000 earnings / 20000 debt / cohort 15)
/// - row 1: zero debt, all derived ratios must be missing
/// - row 2: suppressed earnings
/// - row 3: cohort below the floor
/// - row 4: earnings below the window
/// - row 5: earnings exactly at the exclusive upper bound
/// - row 6: earnings and cohort exactly at the inclusive lower bounds
/// - row 7: high-ROI survivor
pub fn create_raw_dataframe() -> DataFrame {
    df! {
        "EARN_MDN_5YR" => [
            "40000", "30000", "PrivacySuppressed", "50000",
            "8000", "500000", "10000", "100000",
        ],
        "DEBT_ALL_STGP_ANY_MDN" => [
            "20000", "0", "15000", "25000",
            "4000", "100000", "10000", "20000",
        ],
        "DEBT_ALL_STGP_EVAL_MDN" => [
            "21000", "0", "14000", "24000",
            "3900", "99000", "9500", "21000",
        ],
        "DEBT_ALL_STGP_ANY_MDN10YRPAY" => [
            "2000", "0", "150", "250",
            "40", "1000", "100", "200",
        ],
        "DEBT_ALL_STGP_EVAL_MDN10YRPAY" => [
            "2100", "0", "140", "240",
            "39", "990", "95", "210",
        ],
        "INSTNM" => [
            "Alpha University", "Alpha University", "Beta College", "Beta College",
            "Gamma Institute", "Gamma Institute", "Delta College", "Delta College",
        ],
        "CIPCODE" => [1107i64, 5203, 5101, 2401, 1509, 1401, 101, 2701],
        "CIPDESC" => [
            "Computer Science.", "Accounting.", "Nursing.", "Liberal Arts.",
            "Engineering Tech.", "Engineering.", "Agriculture.", "Mathematics.",
        ],
        "CREDLEV" => [3i64, 3, 5, 1, 2, 3, 2, 6],
        "CREDDESC" => [
            "Bachelors Degree", "Bachelors Degree", "Masters Degree",
            "Undergraduate Certificate", "Associates Degree", "Bachelors Degree",
            "Associates Degree", "Doctoral Degree",
        ],
        "CONTROL" => [
            "Public", "Public", "Private, nonprofit", "Private, for-profit",
            "Public", "Private, nonprofit", "Public", "Public",
        ],
        "IPEDSCOUNT2" => ["15", "50", "20", "5", "30", "12", "10", "100"],
    }
    .unwrap()
}

/// Indices of the raw fixture rows that survive filtering with defaults.
pub const SURVIVING_RAW_ROWS: [usize; 3] = [0, 6, 7];

/// Create a processed-shaped DataFrame with enough rows for VIF regressions.
///
/// ROI and debt-to-income are exact functions of earnings and debt, so the
/// derived set is heavily collinear, while cohort size is independent noise.
pub fn create_processed_dataframe(rows: usize) -> DataFrame {
    let earnings: Vec<f64> = (0..rows).map(|i| 30_000.0 + (i as f64) * 1_500.0).collect();
    let debt: Vec<f64> = (0..rows)
        .map(|i| 12_000.0 + ((i * 37) % 23) as f64 * 800.0)
        .collect();
    let cohort: Vec<f64> = (0..rows).map(|i| 10.0 + ((i * 7919) % 97) as f64).collect();
    let payment: Vec<f64> = debt.iter().map(|d| d / 100.0).collect();

    let roi: Vec<f64> = earnings.iter().zip(&debt).map(|(e, d)| e / d).collect();
    let dti: Vec<f64> = debt.iter().zip(&earnings).map(|(d, e)| d / e).collect();
    let payment_pct: Vec<f64> = payment
        .iter()
        .zip(&earnings)
        .map(|(p, e)| p / (e / 12.0) * 100.0)
        .collect();

    let institutions: Vec<String> = (0..rows)
        .map(|i| format!("School {}", i % 4))
        .collect();
    let cipdesc: Vec<String> = (0..rows).map(|i| format!("Program {}.", i)).collect();
    let control: Vec<&str> = (0..rows)
        .map(|i| if i % 2 == 0 { "Public" } else { "Private, nonprofit" })
        .collect();

    df! {
        "EARN_MDN_5YR" => earnings,
        "DEBT_ALL_STGP_ANY_MDN" => debt,
        "IPEDSCOUNT2" => cohort,
        "ROI_EARNINGS_TO_DEBT" => roi,
        "DEBT_TO_INCOME_RATIO" => dti.clone(),
        "PAYBACK_YEARS" => dti,
        "MONTHLY_PAYMENT_PCT" => payment_pct,
        "INSTNM" => institutions,
        "CIPDESC" => cipdesc,
        "CONTROL" => control,
        "CREDENTIAL_LEVEL_NAME" => vec!["Bachelor Degree"; rows],
        "MAJOR_FIELD" => vec!["Business"; rows],
        "ROI_CATEGORY" => vec!["Average (1.5-2.5)"; rows],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

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

/// Fetch a single optional f64 cell.
pub fn cell_f64(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
    df.column(column).unwrap().f64().unwrap().get(row)
}

/// Fetch a single optional string cell.
pub fn cell_str(df: &DataFrame, column: &str, row: usize) -> Option<String> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .get(row)
        .map(|s| s.to_string())
}
