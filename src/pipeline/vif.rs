//! Iterative multicollinearity reduction via variance-inflation factors.
//!
//! The only multi-pass algorithm in the pipeline. Each iteration regresses
//! every current feature against all the others (plus an intercept), derives
//! `VIF = 1 / (1 - R^2)`, and removes the single worst feature while the
//! maximum VIF exceeds the threshold. Per-feature regressions inside one
//! iteration are independent and run in parallel; iterations themselves are
//! inherently sequential.
//!
//! Cost is O(k^2 * n) per iteration over k features and n complete-case rows,
//! with at most k - 1 iterations.

use anyhow::{anyhow, Result};
use faer::prelude::*;
use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::features::{
    DEBT_TO_INCOME_RATIO, MONTHLY_PAYMENT_PCT, PAYBACK_YEARS, ROI_EARNINGS_TO_DEBT,
};
use super::schema::{DEBT_ANY_MDN, EARN_MDN_5YR, IPEDSCOUNT2};

/// Default VIF threshold.
pub const DEFAULT_VIF_THRESHOLD: f64 = 10.0;

/// Feature set the original analysis screens for multicollinearity.
pub const DEFAULT_VIF_FEATURES: [&str; 7] = [
    EARN_MDN_5YR,
    DEBT_ANY_MDN,
    IPEDSCOUNT2,
    ROI_EARNINGS_TO_DEBT,
    DEBT_TO_INCOME_RATIO,
    MONTHLY_PAYMENT_PCT,
    PAYBACK_YEARS,
];

/// One feature removal during the reduction loop.
#[derive(Debug, Clone, Serialize)]
pub struct VifDrop {
    pub feature: String,
    /// The feature's VIF at the time it was dropped. Serialized as null when
    /// infinite (exactly collinear or constant feature).
    #[serde(serialize_with = "serialize_finite")]
    pub vif: f64,
    /// Number of features remaining after the drop.
    pub remaining: usize,
}

fn serialize_finite<S: serde::Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    if v.is_finite() {
        s.serialize_f64(*v)
    } else {
        s.serialize_none()
    }
}

/// Outcome of a full reduction run.
#[derive(Debug, Clone, Serialize)]
pub struct VifReduction {
    /// Surviving feature names, in their original relative order.
    pub kept: Vec<String>,
    /// VIF of each surviving feature at convergence. Empty when fewer than 2
    /// features survive (VIF is undefined for a single regressor).
    pub final_vifs: Vec<(String, f64)>,
    /// Features removed, in removal order.
    pub dropped: Vec<VifDrop>,
    /// Complete-case rows the reduction was computed over.
    pub complete_rows: usize,
    pub threshold: f64,
}

/// Dense complete-case feature matrix, column-major by feature order.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub names: Vec<String>,
    /// `columns[j]` holds the n values of feature j.
    pub columns: Vec<Vec<f64>>,
    pub rows: usize,
}

impl FeatureMatrix {
    /// Extract the named features from the table, keeping complete cases only
    /// (rows where every selected feature is non-null).
    pub fn from_dataframe(df: &DataFrame, features: &[String]) -> Result<Self> {
        if features.is_empty() {
            return Err(anyhow!("no features selected for VIF analysis"));
        }

        let selected = df.select(features.iter().map(|s| s.as_str()))?;
        let complete = selected.drop_nulls::<String>(None)?;
        let rows = complete.height();

        let mut columns = Vec::with_capacity(features.len());
        for name in features {
            let ca = complete
                .column(name)?
                .cast(&DataType::Float64)?
                .f64()?
                .clone();
            let values: Vec<f64> = ca.into_no_null_iter().collect();
            columns.push(values);
        }

        Ok(Self {
            names: features.to_vec(),
            columns,
            rows,
        })
    }

    fn drop_feature(&mut self, index: usize) {
        self.names.remove(index);
        self.columns.remove(index);
    }
}

/// Compute the VIF of every feature in the matrix.
///
/// Returns one value per feature, in feature order. A feature that is exactly
/// collinear with the others (or constant) gets `f64::INFINITY`.
pub fn compute_vifs(matrix: &FeatureMatrix) -> Vec<f64> {
    let k = matrix.names.len();
    debug_assert!(k >= 2, "VIF is undefined for fewer than 2 regressors");

    (0..k)
        .into_par_iter()
        .map(|j| vif_for_feature(matrix, j))
        .collect()
}

/// VIF of feature j: regress it on the remaining features plus an intercept
/// and invert the unexplained variance share.
fn vif_for_feature(matrix: &FeatureMatrix, j: usize) -> f64 {
    let n = matrix.rows;
    let k = matrix.names.len();

    // With at most as many rows as regressors the fit is exact and the VIF
    // unbounded.
    if n <= k {
        return f64::INFINITY;
    }

    // Design matrix: intercept column followed by every feature except j.
    let mut design = Mat::<f64>::zeros(n, k);
    let mut response = Mat::<f64>::zeros(n, 1);
    for row in 0..n {
        design[(row, 0)] = 1.0;
        response[(row, 0)] = matrix.columns[j][row];
    }
    let mut col = 1;
    for (idx, values) in matrix.columns.iter().enumerate() {
        if idx == j {
            continue;
        }
        for row in 0..n {
            design[(row, col)] = values[row];
        }
        col += 1;
    }

    // QR least squares is stable under the near-collinearity this loop is
    // hunting for; normal equations would not be.
    let beta = design.qr().solve_lstsq(&response);
    let fitted = &design * &beta;

    let mean = (0..n).map(|row| response[(row, 0)]).sum::<f64>() / n as f64;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for row in 0..n {
        let observed = response[(row, 0)];
        let residual = observed - fitted[(row, 0)];
        ss_res += residual * residual;
        let centered = observed - mean;
        ss_tot += centered * centered;
    }

    // A constant response has no variance to inflate; treat it as perfectly
    // collinear so it is removed first.
    if ss_tot == 0.0 {
        return f64::INFINITY;
    }

    let r_squared = 1.0 - ss_res / ss_tot;
    if r_squared >= 1.0 {
        f64::INFINITY
    } else {
        1.0 / (1.0 - r_squared)
    }
}

/// Index and value of the maximum VIF, first occurrence winning ties.
fn argmax_vif(vifs: &[f64]) -> (usize, f64) {
    let mut max_idx = 0;
    let mut max_vif = vifs[0];
    for (idx, &vif) in vifs.iter().enumerate().skip(1) {
        if vif > max_vif {
            max_idx = idx;
            max_vif = vif;
        }
    }
    (max_idx, max_vif)
}

/// Run the reduction loop until the maximum VIF is at or below the threshold
/// or fewer than 2 features remain.
///
/// Feature order is preserved across drops, so the surviving set keeps its
/// original relative order. The loop never removes the last feature.
pub fn reduce_vif(mut matrix: FeatureMatrix, threshold: f64) -> VifReduction {
    let complete_rows = matrix.rows;
    let mut dropped = Vec::new();

    loop {
        // VIF needs at least 2 regressors; stop rather than divide by nothing.
        if matrix.names.len() < 2 {
            break;
        }

        let vifs = compute_vifs(&matrix);
        let (max_idx, max_vif) = argmax_vif(&vifs);

        if max_vif <= threshold {
            let final_vifs = matrix
                .names
                .iter()
                .cloned()
                .zip(vifs.iter().copied())
                .collect();
            return VifReduction {
                kept: matrix.names.clone(),
                final_vifs,
                dropped,
                complete_rows,
                threshold,
            };
        }

        let feature = matrix.names[max_idx].clone();
        matrix.drop_feature(max_idx);
        dropped.push(VifDrop {
            feature,
            vif: max_vif,
            remaining: matrix.names.len(),
        });
    }

    VifReduction {
        kept: matrix.names.clone(),
        final_vifs: Vec::new(),
        dropped,
        complete_rows,
        threshold,
    }
}
