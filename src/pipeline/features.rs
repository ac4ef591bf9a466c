//! ROI feature engineering.
//!
//! Derives the four ratio metrics from the coerced numeric columns. Each
//! derived value is computed independently per row; it is present exactly when
//! both of its inputs are present and non-zero. Zero denominators and zero
//! numerators both yield null - a NaN or infinity never enters the table.

use anyhow::Result;
use polars::prelude::*;

use super::schema::{DEBT_ANY_10YR_PAY, DEBT_ANY_MDN, EARN_MDN_5YR};

/// Median earnings divided by median debt.
pub const ROI_EARNINGS_TO_DEBT: &str = "ROI_EARNINGS_TO_DEBT";
/// Median debt divided by median earnings.
pub const DEBT_TO_INCOME_RATIO: &str = "DEBT_TO_INCOME_RATIO";
/// Same formula as DEBT_TO_INCOME_RATIO; the duplication is inherited from
/// the original analysis and preserved deliberately. See DESIGN.md.
pub const PAYBACK_YEARS: &str = "PAYBACK_YEARS";
/// 10-year-plan monthly payment as a percentage of monthly earnings.
pub const MONTHLY_PAYMENT_PCT: &str = "MONTHLY_PAYMENT_PCT";

/// The derived columns added by [`add_roi_features`], in output order.
pub const DERIVED_COLUMNS: [&str; 4] = [
    ROI_EARNINGS_TO_DEBT,
    DEBT_TO_INCOME_RATIO,
    PAYBACK_YEARS,
    MONTHLY_PAYMENT_PCT,
];

/// Guarded division: defined only when both operands are present and non-zero.
fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if n != 0.0 && d != 0.0 => Some(n / d),
        _ => None,
    }
}

/// Monthly payment as a percentage of monthly earnings.
fn monthly_payment_pct(payment: Option<f64>, earnings: Option<f64>) -> Option<f64> {
    ratio(payment, earnings.map(|e| e / 12.0)).map(|r| r * 100.0)
}

/// Append the four derived ROI columns to the table.
///
/// Output schema is the input schema plus the columns in [`DERIVED_COLUMNS`].
/// Purely functional per row; the input is not mutated.
pub fn add_roi_features(df: &DataFrame) -> Result<DataFrame> {
    let earnings = df.column(EARN_MDN_5YR)?.f64()?;
    let debt = df.column(DEBT_ANY_MDN)?.f64()?;
    let payment = df.column(DEBT_ANY_10YR_PAY)?.f64()?;

    let roi: Float64Chunked = earnings
        .iter()
        .zip(debt.iter())
        .map(|(e, d)| ratio(e, d))
        .collect();
    let debt_to_income: Float64Chunked = debt
        .iter()
        .zip(earnings.iter())
        .map(|(d, e)| ratio(d, e))
        .collect();
    let payback: Float64Chunked = debt
        .iter()
        .zip(earnings.iter())
        .map(|(d, e)| ratio(d, e))
        .collect();
    let payment_pct: Float64Chunked = payment
        .iter()
        .zip(earnings.iter())
        .map(|(p, e)| monthly_payment_pct(p, e))
        .collect();

    let mut out = df.clone();
    out.with_column(roi.with_name(ROI_EARNINGS_TO_DEBT.into()).into_series())?;
    out.with_column(
        debt_to_income
            .with_name(DEBT_TO_INCOME_RATIO.into())
            .into_series(),
    )?;
    out.with_column(payback.with_name(PAYBACK_YEARS.into()).into_series())?;
    out.with_column(
        payment_pct
            .with_name(MONTHLY_PAYMENT_PCT.into())
            .into_series(),
    )?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_defined() {
        assert_eq!(ratio(Some(40000.0), Some(20000.0)), Some(2.0));
    }

    #[test]
    fn test_ratio_zero_denominator_is_none() {
        assert_eq!(ratio(Some(40000.0), Some(0.0)), None);
    }

    #[test]
    fn test_ratio_zero_numerator_is_none() {
        assert_eq!(ratio(Some(0.0), Some(20000.0)), None);
    }

    #[test]
    fn test_ratio_missing_operand_is_none() {
        assert_eq!(ratio(None, Some(20000.0)), None);
        assert_eq!(ratio(Some(40000.0), None), None);
    }

    #[test]
    fn test_monthly_payment_pct() {
        // 2000 / (40000 / 12) * 100 = 60.0
        let pct = monthly_payment_pct(Some(2000.0), Some(40000.0)).unwrap();
        assert!((pct - 60.0).abs() < 1e-9);
    }
}
