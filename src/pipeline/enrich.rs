//! Categorical enrichment.
//!
//! Pure per-row mappings: credential level codes to names, CIP two-digit
//! prefixes to major field labels, and ordinal bucketing of the ROI and
//! affordability metrics. All bins are left-inclusive `[low, high)` with the
//! last bucket unbounded above, so a value exactly on a boundary falls into
//! the higher bucket. Every finite input maps to exactly one bucket; null
//! inputs map to null.

use anyhow::Result;
use polars::prelude::*;

use super::features::{MONTHLY_PAYMENT_PCT, ROI_EARNINGS_TO_DEBT};
use super::schema::{CIPCODE, CREDLEV};

/// Human-readable credential level.
pub const CREDENTIAL_LEVEL_NAME: &str = "CREDENTIAL_LEVEL_NAME";
/// Major field label derived from the two-digit CIP prefix.
pub const MAJOR_FIELD: &str = "MAJOR_FIELD";
/// Ordinal ROI bucket.
pub const ROI_CATEGORY: &str = "ROI_CATEGORY";
/// Ordinal affordability bucket over the monthly payment percentage.
pub const AFFORDABILITY: &str = "AFFORDABILITY";

/// Map a credential level code (1-8) to its name. Unmapped codes yield None.
pub fn credential_name(level: i64) -> Option<&'static str> {
    match level {
        1 => Some("Undergraduate Certificate"),
        2 => Some("Associate Degree"),
        3 => Some("Bachelor Degree"),
        4 => Some("Post-baccalaureate Certificate"),
        5 => Some("Master Degree"),
        6 => Some("Doctoral Degree"),
        7 => Some("First Professional Degree"),
        8 => Some("Graduate Certificate"),
        _ => None,
    }
}

/// Map the two-digit CIP prefix to a major field label.
///
/// The CIP code is the 4-digit `ff.pp` family/program encoding; codes are
/// zero-padded to 4 digits before the prefix is taken, so code 101 (CIP
/// 01.01) resolves to prefix "01". Unmapped prefixes yield "Other".
pub fn major_field(cip_code: Option<i64>) -> &'static str {
    let Some(code) = cip_code else {
        return "Other";
    };
    let padded = format!("{:04}", code);
    match &padded[..2] {
        "11" => "Computer Science",
        "14" => "Engineering",
        "15" => "Engineering Technology",
        "26" => "Biological Sciences",
        "27" => "Mathematics",
        "40" => "Physical Sciences",
        "52" => "Business",
        "51" => "Health Professions",
        "42" => "Psychology",
        "45" => "Social Sciences",
        "23" => "English Language",
        "24" => "Liberal Arts & Humanities",
        "50" => "Visual & Performing Arts",
        "13" => "Education",
        _ => "Other",
    }
}

/// Five-bucket ordinal over the earnings-to-debt ratio, left-inclusive.
pub fn roi_category(roi: f64) -> &'static str {
    if roi < 1.0 {
        "Poor (<1)"
    } else if roi < 1.5 {
        "Low (1-1.5)"
    } else if roi < 2.5 {
        "Average (1.5-2.5)"
    } else if roi < 4.0 {
        "Good (2.5-4)"
    } else {
        "Excellent (>4)"
    }
}

/// Four-bucket ordinal over the monthly payment percentage, left-inclusive.
pub fn affordability_category(payment_pct: f64) -> &'static str {
    if payment_pct < 8.0 {
        "Very Affordable (<8%)"
    } else if payment_pct < 12.0 {
        "Affordable (8-12%)"
    } else if payment_pct < 20.0 {
        "Moderate (12-20%)"
    } else {
        "Expensive (>20%)"
    }
}

/// Append the four categorical columns to the table.
pub fn add_categories(df: &DataFrame) -> Result<DataFrame> {
    let credlev = df.column(CREDLEV)?.i64()?;
    let cipcode = df.column(CIPCODE)?.i64()?;
    let roi = df.column(ROI_EARNINGS_TO_DEBT)?.f64()?;
    let payment_pct = df.column(MONTHLY_PAYMENT_PCT)?.f64()?;

    let credential: StringChunked = credlev
        .iter()
        .map(|level| level.and_then(credential_name))
        .collect();
    let major: StringChunked = cipcode.iter().map(|code| Some(major_field(code))).collect();
    let roi_cat: StringChunked = roi.iter().map(|v| v.map(roi_category)).collect();
    let afford: StringChunked = payment_pct
        .iter()
        .map(|v| v.map(affordability_category))
        .collect();

    let mut out = df.clone();
    out.with_column(credential.with_name(CREDENTIAL_LEVEL_NAME.into()).into_series())?;
    out.with_column(major.with_name(MAJOR_FIELD.into()).into_series())?;
    out.with_column(roi_cat.with_name(ROI_CATEGORY.into()).into_series())?;
    out.with_column(afford.with_name(AFFORDABILITY.into()).into_series())?;

    Ok(out)
}

/// Normalized value counts of the ROI buckets, in bucket order.
///
/// Diagnostic output mirroring the original analysis; buckets with no rows are
/// still listed with a zero share.
pub fn roi_category_distribution(df: &DataFrame) -> Result<Vec<(String, usize, f64)>> {
    const BUCKET_ORDER: [&str; 5] = [
        "Poor (<1)",
        "Low (1-1.5)",
        "Average (1.5-2.5)",
        "Good (2.5-4)",
        "Excellent (>4)",
    ];

    let categories = df.column(ROI_CATEGORY)?.str()?;
    let total = categories.len() - categories.null_count();

    let mut counts = vec![0usize; BUCKET_ORDER.len()];
    for value in categories.iter().flatten() {
        if let Some(idx) = BUCKET_ORDER.iter().position(|b| *b == value) {
            counts[idx] += 1;
        }
    }

    Ok(BUCKET_ORDER
        .iter()
        .zip(counts)
        .map(|(name, count)| {
            let share = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            (name.to_string(), count, share)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_map_complete() {
        for level in 1..=8 {
            assert!(credential_name(level).is_some(), "level {} unmapped", level);
        }
        assert!(credential_name(0).is_none());
        assert!(credential_name(9).is_none());
    }

    #[test]
    fn test_major_field_known_prefixes() {
        assert_eq!(major_field(Some(1107)), "Computer Science");
        assert_eq!(major_field(Some(5201)), "Business");
        assert_eq!(major_field(Some(1401)), "Engineering");
    }

    #[test]
    fn test_major_field_zero_padding() {
        // CIP 01.01 (Agriculture) arrives as the integer 101; the padded
        // prefix is "01", which is unmapped.
        assert_eq!(major_field(Some(101)), "Other");
    }

    #[test]
    fn test_major_field_missing_code() {
        assert_eq!(major_field(None), "Other");
    }

    #[test]
    fn test_roi_boundaries_fall_upward() {
        assert_eq!(roi_category(1.0), "Low (1-1.5)");
        assert_eq!(roi_category(1.5), "Average (1.5-2.5)");
        assert_eq!(roi_category(2.5), "Good (2.5-4)");
        assert_eq!(roi_category(4.0), "Excellent (>4)");
    }

    #[test]
    fn test_roi_covers_real_line() {
        assert_eq!(roi_category(-3.0), "Poor (<1)");
        assert_eq!(roi_category(0.0), "Poor (<1)");
        assert_eq!(roi_category(1e12), "Excellent (>4)");
    }

    #[test]
    fn test_affordability_boundaries_fall_upward() {
        assert_eq!(affordability_category(8.0), "Affordable (8-12%)");
        assert_eq!(affordability_category(12.0), "Moderate (12-20%)");
        assert_eq!(affordability_category(20.0), "Expensive (>20%)");
    }

    #[test]
    fn test_affordability_covers_real_line() {
        assert_eq!(affordability_category(-1.0), "Very Affordable (<8%)");
        assert_eq!(affordability_category(1e6), "Expensive (>20%)");
    }
}
