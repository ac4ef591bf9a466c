//! CSV loading, saving, and raw-file download.
//!
//! All tables are comma-delimited UTF-8 CSV with a header row. The loader
//! reports structural failures (missing file, malformed CSV) as typed errors;
//! the download helper fetches a raw file only when the local cache is absent
//! and never retries.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::error::PipelineError;

/// Rows scanned for schema inference. The Scorecard files mix numeric columns
/// with `PrivacySuppressed` markers, so a generous window avoids mistyping.
pub const INFER_SCHEMA_LENGTH: usize = 10_000;

/// Load a CSV file into memory.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(PipelineError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(INFER_SCHEMA_LENGTH))
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| PipelineError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(df)
}

/// Load a CSV file and report its shape and estimated memory footprint.
pub fn load_csv_with_stats(path: &Path) -> Result<(DataFrame, usize, usize, f64)> {
    let df = load_csv(path)?;
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    Ok((df, rows, cols, memory_mb))
}

/// Column names of a CSV file without materializing the data.
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(PipelineError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let mut lf = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .map_err(|e| PipelineError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let schema = lf.collect_schema().map_err(|e| PipelineError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(schema.iter_names().map(|n| n.to_string()).collect())
}

/// Write a table to a CSV file, creating parent directories as needed.
pub fn save_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    // The polars CSV serializer panics on columns with misaligned chunk
    // layouts; align them before writing.
    df.rechunk_mut();

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    Ok(())
}

/// Download a remote file to the given destination.
///
/// Used only when the local cache is absent; the caller decides that. Any
/// HTTP or I/O failure maps to [`PipelineError::Network`] with no retry.
pub fn download_file(url: &str, destination: &Path) -> Result<()> {
    let network_err = |message: String| PipelineError::Network {
        url: url.to_string(),
        message,
    };

    let response = reqwest::blocking::get(url).map_err(|e| network_err(e.to_string()))?;

    if !response.status().is_success() {
        return Err(network_err(format!("HTTP status {}", response.status())).into());
    }

    let bytes = response.bytes().map_err(|e| network_err(e.to_string()))?;

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    std::fs::write(destination, &bytes)
        .with_context(|| format!("Failed to write download to {}", destination.display()))?;

    Ok(())
}

/// Fetch the raw file when it is not already cached locally.
///
/// Returns true when a download happened, false when the cache was hit.
pub fn ensure_local_file(path: &Path, url: Option<&str>) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    match url {
        Some(url) => {
            download_file(url, path)?;
            Ok(true)
        }
        None => Err(PipelineError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into()),
    }
}
