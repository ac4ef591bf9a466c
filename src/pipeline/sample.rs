//! Seeded uniform row sampling.
//!
//! Draws a fixed-size subset of the processed table without replacement for
//! lightweight distribution checks and demos. The seed makes every draw
//! reproducible.

use anyhow::Result;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default sample size.
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;
/// Default RNG seed.
pub const DEFAULT_SAMPLE_SEED: u64 = 42;

/// Draw `size` rows uniformly at random without replacement.
///
/// When `size` is at least the table height the whole table is returned
/// unchanged. The same seed always yields the same subset.
pub fn sample_rows(df: &DataFrame, size: usize, seed: u64) -> Result<DataFrame> {
    let height = df.height();
    if size >= height {
        return Ok(df.clone());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let indices: Vec<IdxSize> = rand::seq::index::sample(&mut rng, height, size)
        .into_iter()
        .map(|i| i as IdxSize)
        .collect();

    let idx = IdxCa::from_vec("sample_idx".into(), indices);
    Ok(df.take(&idx)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_frame() -> DataFrame {
        let values: Vec<i64> = (0..100).collect();
        df! { "id" => values }.unwrap()
    }

    #[test]
    fn test_sample_size() {
        let df = test_frame();
        let sample = sample_rows(&df, 10, 42).unwrap();
        assert_eq!(sample.height(), 10);
    }

    #[test]
    fn test_sample_is_deterministic() {
        let df = test_frame();
        let a = sample_rows(&df, 25, 42).unwrap();
        let b = sample_rows(&df, 25, 42).unwrap();
        assert!(a.equals(&b), "same seed must yield the same subset");
    }

    #[test]
    fn test_different_seeds_differ() {
        let df = test_frame();
        let a = sample_rows(&df, 25, 42).unwrap();
        let b = sample_rows(&df, 25, 7).unwrap();
        assert!(!a.equals(&b), "different seeds should yield different subsets");
    }

    #[test]
    fn test_sample_without_replacement() {
        let df = test_frame();
        let sample = sample_rows(&df, 50, 42).unwrap();
        let ids: Vec<i64> = sample
            .column("id")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ids.len(), "sampled rows must be distinct");
    }

    #[test]
    fn test_oversized_sample_returns_full_table() {
        let df = test_frame();
        let sample = sample_rows(&df, 5000, 42).unwrap();
        assert_eq!(sample.height(), df.height());
    }
}
