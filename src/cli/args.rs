//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Roiscope - College Scorecard ROI analysis pipeline
#[derive(Parser, Debug)]
#[command(name = "roiscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean the raw field-of-study file and derive ROI metrics
    Preprocess {
        /// Raw field-of-study CSV path
        #[arg(short, long)]
        input: PathBuf,

        /// Processed output CSV path.
        /// Defaults to the input directory with a '_processed' suffix.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Remote link for the raw file, fetched only when the input path
        /// does not exist locally
        #[arg(long)]
        download_url: Option<String>,

        /// Minimum cohort size (IPEDS completer count) a program must have
        #[arg(long, default_value = "10")]
        min_cohort: f64,

        /// Inclusive lower bound of the accepted earnings window
        #[arg(long, default_value = "10000")]
        min_earnings: f64,

        /// Exclusive upper bound of the accepted earnings window
        #[arg(long, default_value = "500000")]
        max_earnings: f64,
    },

    /// Reduce multicollinearity in the processed table via iterative VIF
    Reduce {
        /// Processed CSV path (output of the preprocess command)
        #[arg(short, long)]
        input: PathBuf,

        /// Reduced output CSV path.
        /// Defaults to the input directory with a '_reduced' suffix.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// VIF threshold - iterate while the maximum VIF exceeds this value
        #[arg(long, default_value = "10.0")]
        threshold: f64,

        /// Numeric features to screen (comma-separated).
        /// Defaults to the standard ROI feature set.
        #[arg(long, value_delimiter = ',')]
        features: Vec<String>,

        /// JSON report path for the iteration log.
        /// Defaults to the input directory with a '_vif_analysis.json' suffix.
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Draw a seeded uniform random subset of the processed table
    Sample {
        /// Processed CSV path
        #[arg(short, long)]
        input: PathBuf,

        /// Sample output CSV path.
        /// Defaults to the input directory with a '_sample' suffix.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of rows to draw (clamped to the table height)
        #[arg(long, default_value = "1000")]
        size: usize,

        /// RNG seed for reproducible draws
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Join institution-level data and report fairness correlations
    Fairness {
        /// Processed field-of-study CSV path
        #[arg(long)]
        field_of_study: PathBuf,

        /// Raw field-of-study CSV path (source of the INSTNM/OPEID6 map)
        #[arg(long)]
        raw_field_of_study: PathBuf,

        /// Raw institution-level CSV path
        #[arg(long)]
        institution: PathBuf,

        /// Remote link for the institution file, fetched only when the
        /// path does not exist locally
        #[arg(long)]
        institution_url: Option<String>,

        /// Merged output CSV path.
        /// Defaults to the field-of-study directory with a '_fairness' suffix.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum programs a school needs to enter the summary
        #[arg(long, default_value = "5")]
        min_programs: u32,
    },
}

/// Derive an output path next to the input: `data.csv` -> `data_<suffix>.csv`.
pub fn derive_output_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    parent.join(format!("{}_{}.{}", stem, suffix, extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_path() {
        let path = derive_output_path(Path::new("data/raw/fos.csv"), "processed", "csv");
        assert_eq!(path, PathBuf::from("data/raw/fos_processed.csv"));
    }

    #[test]
    fn test_derive_output_path_no_parent() {
        let path = derive_output_path(Path::new("fos.csv"), "sample", "csv");
        assert_eq!(path, PathBuf::from("fos_sample.csv"));
    }

    #[test]
    fn test_derive_report_path() {
        let path = derive_output_path(Path::new("out/fos_processed.csv"), "vif_analysis", "json");
        assert_eq!(path, PathBuf::from("out/fos_processed_vif_analysis.json"));
    }
}
