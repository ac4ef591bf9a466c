//! Fairness join against institution-level records.
//!
//! The processed field-of-study table has no stable institution key, so the
//! raw file's INSTNM -> OPEID6 mapping is rebuilt first, then the processed
//! rows are joined to institution tuition and gender-composition columns.
//! School-level aggregates (mean ROI and earnings, women proportion) feed the
//! printed Pearson correlations; plotting stays out of scope.

use std::path::Path;

use anyhow::Result;
use polars::prelude::*;

use super::error::PipelineError;
use super::features::ROI_EARNINGS_TO_DEBT;
use super::schema::{EARN_MDN_5YR, INSTNM};

/// Six-digit OPE ID, the join key between the two raw files.
pub const OPEID6: &str = "OPEID6";
/// Annual in-state tuition and fees.
pub const TUITIONFEE_IN: &str = "TUITIONFEE_IN";
/// Share of undergraduates who are women.
pub const UGDS_WOMEN: &str = "UGDS_WOMEN";

/// School-level aggregate columns.
pub const AVG_ROI: &str = "AVG_ROI";
pub const AVG_EARNINGS: &str = "AVG_EARNINGS";
pub const WOMEN_PROPORTION: &str = "WOMEN_PROPORTION";
pub const PROGRAM_COUNT: &str = "PROGRAM_COUNT";

/// Schools with fewer programs than this are excluded from the summary.
pub const MIN_PROGRAMS_PER_SCHOOL: u32 = 5;

fn require_columns(df: &DataFrame, columns: &[&str], path: &Path) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for column in columns {
        if !present.iter().any(|c| c == column) {
            return Err(PipelineError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            }
            .into());
        }
    }
    Ok(())
}

/// Build the INSTNM -> OPEID6 map from the raw field-of-study file.
///
/// One row per institution name, first occurrence kept, rows with a missing
/// key on either side dropped.
pub fn build_id_map(raw_fos: &DataFrame, source_path: &Path) -> Result<DataFrame> {
    require_columns(raw_fos, &[INSTNM, OPEID6], source_path)?;

    let mut map = raw_fos
        .select([INSTNM, OPEID6])?
        .drop_nulls::<String>(None)?
        .unique_stable(Some(&[INSTNM.to_string()]), UniqueKeepStrategy::First, None)?;

    let opeid = map.column(OPEID6)?.cast(&DataType::Int64)?;
    map.with_column(opeid)?;
    Ok(map)
}

/// Select and clean the institution-level columns.
///
/// Tuition and gender columns coerce non-strictly to Float64; rows without an
/// OPEID6 are dropped and duplicate keys keep their first occurrence.
pub fn clean_institutions(raw_institutions: &DataFrame, source_path: &Path) -> Result<DataFrame> {
    require_columns(
        raw_institutions,
        &[OPEID6, TUITIONFEE_IN, UGDS_WOMEN],
        source_path,
    )?;

    let mut cleaned = raw_institutions.select([OPEID6, TUITIONFEE_IN, UGDS_WOMEN])?;
    for name in [TUITIONFEE_IN, UGDS_WOMEN] {
        let coerced = cleaned.column(name)?.cast(&DataType::Float64)?;
        cleaned.with_column(coerced)?;
    }

    let mut cleaned = cleaned.drop_nulls(Some(&[OPEID6.to_string()]))?;
    let opeid = cleaned.column(OPEID6)?.cast(&DataType::Int64)?;
    cleaned.with_column(opeid)?;

    Ok(cleaned.unique_stable(Some(&[OPEID6.to_string()]), UniqueKeepStrategy::First, None)?)
}

/// Join the processed field-of-study table to institution records.
///
/// Left-joins the OPEID6 map on INSTNM, drops rows that found no key, then
/// left-joins the cleaned institution columns on OPEID6.
pub fn merge_with_institutions(
    processed: &DataFrame,
    id_map: &DataFrame,
    institutions: &DataFrame,
) -> Result<DataFrame> {
    let keyed = processed
        .clone()
        .lazy()
        .join(
            id_map.clone().lazy(),
            [col(INSTNM)],
            [col(INSTNM)],
            JoinArgs::new(JoinType::Left),
        )
        .drop_nulls(Some(vec![col(OPEID6)]))
        .collect()?;

    let merged = keyed
        .lazy()
        .join(
            institutions.clone().lazy(),
            [col(OPEID6)],
            [col(OPEID6)],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    Ok(merged)
}

/// Aggregate the merged table to one row per school.
///
/// Schools missing any aggregate or with fewer than `min_programs` programs
/// are excluded, mirroring the original analysis.
pub fn school_summary(merged: &DataFrame, min_programs: u32) -> Result<DataFrame> {
    let summary = merged
        .clone()
        .lazy()
        .group_by([col(INSTNM)])
        .agg([
            col(ROI_EARNINGS_TO_DEBT).mean().alias(AVG_ROI),
            col(EARN_MDN_5YR).mean().alias(AVG_EARNINGS),
            col(UGDS_WOMEN).first().alias(WOMEN_PROPORTION),
            len().alias(PROGRAM_COUNT),
        ])
        .drop_nulls(None)
        .filter(col(PROGRAM_COUNT).gt_eq(lit(min_programs)))
        .sort([INSTNM], Default::default())
        .collect()?;

    Ok(summary)
}

/// Pearson correlation over the rows where both columns are present.
///
/// Single-pass Welford update for numerical stability. Returns None when
/// fewer than two complete pairs exist or either column is constant.
pub fn pearson_correlation(a: &Float64Chunked, b: &Float64Chunked) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }

    let mut count = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (x, y) in a.iter().zip(b.iter()) {
        if let (Some(x), Some(y)) = (x, y) {
            count += 1.0;
            let dx = x - mean_x;
            let dy = y - mean_y;
            mean_x += dx / count;
            mean_y += dy / count;
            var_x += dx * (x - mean_x);
            var_y += dy * (y - mean_y);
            cov_xy += dx * (y - mean_y);
        }
    }

    if count < 2.0 {
        return None;
    }

    let std_x = (var_x / count).sqrt();
    let std_y = (var_y / count).sqrt();
    if std_x == 0.0 || std_y == 0.0 {
        return None;
    }

    Some(cov_xy / (count * std_x * std_y))
}

/// Headline correlations of the fairness analysis.
#[derive(Debug, Clone)]
pub struct FairnessCorrelations {
    pub tuition_vs_roi: Option<f64>,
    pub tuition_vs_earnings: Option<f64>,
    pub women_vs_avg_roi: Option<f64>,
    pub women_vs_avg_earnings: Option<f64>,
}

/// Compute the four headline correlations from the merged table and the
/// school summary. Zero-tuition rows are excluded from the tuition pairs.
pub fn fairness_correlations(
    merged: &DataFrame,
    summary: &DataFrame,
) -> Result<FairnessCorrelations> {
    let tuition = merged.column(TUITIONFEE_IN)?.f64()?;
    let positive_tuition = tuition.gt(0.0);
    let paying = merged.filter(&positive_tuition)?;

    let tuition = paying.column(TUITIONFEE_IN)?.f64()?;
    let roi = paying.column(ROI_EARNINGS_TO_DEBT)?.f64()?;
    let earnings = paying.column(EARN_MDN_5YR)?.f64()?;

    let women = summary.column(WOMEN_PROPORTION)?.f64()?;
    let avg_roi = summary.column(AVG_ROI)?.f64()?;
    let avg_earnings = summary.column(AVG_EARNINGS)?.f64()?;

    Ok(FairnessCorrelations {
        tuition_vs_roi: pearson_correlation(tuition, roi),
        tuition_vs_earnings: pearson_correlation(tuition, earnings),
        women_vs_avg_roi: pearson_correlation(women, avg_roi),
        women_vs_avg_earnings: pearson_correlation(women, avg_earnings),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_perfect_positive() {
        let a = Float64Chunked::from_vec("a".into(), vec![1.0, 2.0, 3.0, 4.0]);
        let b = Float64Chunked::from_vec("b".into(), vec![2.0, 4.0, 6.0, 8.0]);
        let r = pearson_correlation(&a, &b).unwrap();
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let a = Float64Chunked::from_vec("a".into(), vec![1.0, 2.0, 3.0, 4.0]);
        let b = Float64Chunked::from_vec("b".into(), vec![8.0, 6.0, 4.0, 2.0]);
        let r = pearson_correlation(&a, &b).unwrap();
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_constant_column_is_none() {
        let a = Float64Chunked::from_vec("a".into(), vec![5.0, 5.0, 5.0]);
        let b = Float64Chunked::from_vec("b".into(), vec![1.0, 2.0, 3.0]);
        assert!(pearson_correlation(&a, &b).is_none());
    }

    #[test]
    fn test_pearson_skips_null_pairs() {
        let a: Float64Chunked = vec![Some(1.0), None, Some(3.0), Some(4.0)]
            .into_iter()
            .collect();
        let b: Float64Chunked = vec![Some(2.0), Some(9.0), Some(6.0), Some(8.0)]
            .into_iter()
            .collect();
        let r = pearson_correlation(&a, &b).unwrap();
        assert!((r - 1.0).abs() < 1e-9, "null pair must be excluded, got {}", r);
    }
}
