//! Row filtering with retention reporting.
//!
//! Three validity predicates applied in sequence. Each removes the rows that
//! fail it and records before/after counts; the retention percentages are
//! diagnostic only, the surviving set is the same regardless of predicate
//! order. Null comparisons fail the predicate.

use anyhow::Result;
use polars::prelude::*;

use super::features::ROI_EARNINGS_TO_DEBT;
use super::schema::{EARN_MDN_5YR, IPEDSCOUNT2};

/// Default minimum cohort size (IPEDS completer count).
pub const DEFAULT_MIN_COHORT: f64 = 10.0;
/// Default lower bound (inclusive) of the earnings window.
pub const DEFAULT_MIN_EARNINGS: f64 = 10_000.0;
/// Default upper bound (exclusive) of the earnings window.
pub const DEFAULT_MAX_EARNINGS: f64 = 500_000.0;

/// Validity thresholds for the row filter.
#[derive(Debug, Clone, Copy)]
pub struct FilterConfig {
    pub min_cohort: f64,
    /// Inclusive lower earnings bound.
    pub min_earnings: f64,
    /// Exclusive upper earnings bound.
    pub max_earnings: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_cohort: DEFAULT_MIN_COHORT,
            min_earnings: DEFAULT_MIN_EARNINGS,
            max_earnings: DEFAULT_MAX_EARNINGS,
        }
    }
}

/// Row counts around a single predicate.
#[derive(Debug, Clone)]
pub struct FilterStage {
    pub name: String,
    pub rows_before: usize,
    pub rows_after: usize,
}

impl FilterStage {
    /// Percentage of rows kept by this predicate, relative to its input.
    pub fn retained_pct(&self) -> f64 {
        if self.rows_before == 0 {
            100.0
        } else {
            self.rows_after as f64 / self.rows_before as f64 * 100.0
        }
    }
}

/// Per-stage row counts for the whole filter pass.
#[derive(Debug, Clone, Default)]
pub struct FilterReport {
    pub stages: Vec<FilterStage>,
}

impl FilterReport {
    pub fn initial_rows(&self) -> usize {
        self.stages.first().map(|s| s.rows_before).unwrap_or(0)
    }

    pub fn final_rows(&self) -> usize {
        self.stages.last().map(|s| s.rows_after).unwrap_or(0)
    }

    /// Overall retention against the pre-filter row count.
    pub fn overall_retained_pct(&self) -> f64 {
        let initial = self.initial_rows();
        if initial == 0 {
            100.0
        } else {
            self.final_rows() as f64 / initial as f64 * 100.0
        }
    }
}

/// Apply the three validity predicates and report per-stage row counts.
///
/// Predicates, in order: ROI present; cohort size at or above the floor;
/// earnings inside the half-open `[min, max)` window. Re-applying the filter
/// to its own output is a no-op.
pub fn filter_rows(df: &DataFrame, config: &FilterConfig) -> Result<(DataFrame, FilterReport)> {
    let mut report = FilterReport::default();

    let rows_before = df.height();
    let roi_present = df.column(ROI_EARNINGS_TO_DEBT)?.f64()?.is_not_null();
    let df = df.filter(&roi_present)?;
    report.stages.push(FilterStage {
        name: "ROI present".to_string(),
        rows_before,
        rows_after: df.height(),
    });

    let rows_before = df.height();
    let cohort_ok = df.column(IPEDSCOUNT2)?.f64()?.gt_eq(config.min_cohort);
    let df = df.filter(&cohort_ok)?;
    report.stages.push(FilterStage {
        name: format!("cohort size >= {}", config.min_cohort),
        rows_before,
        rows_after: df.height(),
    });

    let rows_before = df.height();
    let earnings = df.column(EARN_MDN_5YR)?.f64()?;
    let earnings_ok = earnings.gt_eq(config.min_earnings) & earnings.lt(config.max_earnings);
    let df = df.filter(&earnings_ok)?;
    report.stages.push(FilterStage {
        name: format!(
            "earnings in [{}, {})",
            config.min_earnings, config.max_earnings
        ),
        rows_before,
        rows_after: df.height(),
    });

    Ok((df, report))
}
