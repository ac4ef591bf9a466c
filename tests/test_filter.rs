//! Unit tests for the row filter

use std::path::Path;

use roiscope::pipeline::{add_roi_features, filter_rows, project_and_coerce, FilterConfig};

#[path = "common/mod.rs"]
mod common;

fn featured_fixture() -> polars::prelude::DataFrame {
    let raw = common::create_raw_dataframe();
    let coerced = project_and_coerce(&raw, Path::new("raw.csv")).unwrap();
    add_roi_features(&coerced).unwrap()
}

#[test]
fn test_default_filter_keeps_expected_rows() {
    let df = featured_fixture();
    let (filtered, report) = filter_rows(&df, &FilterConfig::default()).unwrap();

    assert_eq!(filtered.height(), common::SURVIVING_RAW_ROWS.len());
    assert_eq!(report.initial_rows(), df.height());
    assert_eq!(report.final_rows(), filtered.height());

    // Survivors keep their original relative order.
    assert_eq!(
        common::cell_str(&filtered, "INSTNM", 0).as_deref(),
        Some("Alpha University")
    );
    assert_eq!(
        common::cell_str(&filtered, "INSTNM", 1).as_deref(),
        Some("Delta College")
    );
    assert_eq!(
        common::cell_str(&filtered, "INSTNM", 2).as_deref(),
        Some("Delta College")
    );
}

#[test]
fn test_lower_earnings_bound_is_inclusive() {
    let df = featured_fixture();
    let (filtered, _) = filter_rows(&df, &FilterConfig::default()).unwrap();

    // Row 6 sits exactly on both inclusive floors (earnings 10000, cohort 10).
    let earnings: Vec<Option<f64>> = filtered
        .column("EARN_MDN_5YR")
        .unwrap()
        .f64()
        .unwrap()
        .iter()
        .collect();
    assert!(earnings.contains(&Some(10_000.0)));
}

#[test]
fn test_upper_earnings_bound_is_exclusive() {
    let df = featured_fixture();
    let (filtered, _) = filter_rows(&df, &FilterConfig::default()).unwrap();

    // Row 5 earns exactly 500000 and must be excluded.
    let earnings = filtered.column("EARN_MDN_5YR").unwrap().f64().unwrap();
    for value in earnings.iter().flatten() {
        assert!(value < 500_000.0);
    }
}

#[test]
fn test_filter_is_idempotent() {
    let df = featured_fixture();
    let config = FilterConfig::default();
    let (once, _) = filter_rows(&df, &config).unwrap();
    let (twice, report) = filter_rows(&once, &config).unwrap();

    assert!(once.equals(&twice));
    for stage in &report.stages {
        assert_eq!(stage.rows_before, stage.rows_after, "stage '{}'", stage.name);
    }
}

#[test]
fn test_stage_counts_are_chained() {
    let df = featured_fixture();
    let (_, report) = filter_rows(&df, &FilterConfig::default()).unwrap();

    assert_eq!(report.stages.len(), 3);
    for window in report.stages.windows(2) {
        assert_eq!(
            window[0].rows_after, window[1].rows_before,
            "each stage consumes the previous stage's output"
        );
    }
}

#[test]
fn test_custom_thresholds() {
    let df = featured_fixture();
    let config = FilterConfig {
        min_cohort: 100.0,
        min_earnings: 10_000.0,
        max_earnings: 500_000.0,
    };
    let (filtered, _) = filter_rows(&df, &config).unwrap();

    // Only row 7 has a cohort of 100.
    assert_eq!(filtered.height(), 1);
    assert_eq!(
        common::cell_f64(&filtered, "IPEDSCOUNT2", 0),
        Some(100.0)
    );
}
