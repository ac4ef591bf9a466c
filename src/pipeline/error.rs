//! Structural error types for the pipeline.
//!
//! Only structural failures get a typed variant here: a missing required
//! column, an unreadable or malformed source file, or a failed download.
//! Data-quality problems (unparseable cells, zero denominators, unmapped
//! category codes) are absorbed into the data model as nulls and surfaced
//! through the aggregate missing-value report instead.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required column is absent from the input table.
    #[error("required column '{column}' not found in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// The source file does not exist and no download link was given.
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The source file exists but could not be parsed as CSV.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Downloading a remote file failed. No retry is attempted.
    #[error("download failed for {url}: {message}")]
    Network { url: String, message: String },
}
