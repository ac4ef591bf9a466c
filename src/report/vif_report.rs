//! VIF analysis reporting: iteration table and JSON export.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::VifReduction;

/// Metadata about the reduction run.
#[derive(Serialize)]
pub struct VifMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    pub roiscope_version: String,
    pub input_file: String,
    pub threshold: f64,
    pub complete_rows: usize,
}

/// Complete VIF analysis export with metadata.
#[derive(Serialize)]
pub struct VifAnalysisExport {
    pub metadata: VifMetadata,
    #[serde(flatten)]
    pub reduction: VifReduction,
}

/// Export the reduction outcome to a JSON file.
pub fn export_vif_analysis(
    reduction: &VifReduction,
    input_file: &str,
    output_path: &Path,
) -> Result<()> {
    let export = VifAnalysisExport {
        metadata: VifMetadata {
            timestamp: Utc::now().to_rfc3339(),
            roiscope_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.to_string(),
            threshold: reduction.threshold,
            complete_rows: reduction.complete_rows,
        },
        reduction: reduction.clone(),
    };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize VIF analysis to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write VIF analysis to {}", output_path.display()))?;

    Ok(())
}

fn format_vif(vif: f64) -> String {
    if vif.is_finite() {
        format!("{:.2}", vif)
    } else {
        "inf".to_string()
    }
}

/// Print the iteration log and the surviving feature set.
pub fn display_vif_reduction(reduction: &VifReduction) {
    println!();
    println!(
        "    {} {}",
        style("✧").cyan(),
        style("VIF REDUCTION").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!(
        "      Complete-case rows: {}   threshold: {:.1}",
        reduction.complete_rows, reduction.threshold
    );

    if reduction.dropped.is_empty() {
        println!("      No feature exceeded the threshold");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Dropped feature").add_attribute(Attribute::Bold),
            Cell::new("VIF").add_attribute(Attribute::Bold),
            Cell::new("Remaining").add_attribute(Attribute::Bold),
        ]);
        for drop in &reduction.dropped {
            table.add_row(vec![
                Cell::new(&drop.feature).fg(Color::Red),
                Cell::new(format_vif(drop.vif)),
                Cell::new(drop.remaining),
            ]);
        }
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }

    println!();
    println!(
        "      {} {}:",
        style("Surviving features").green(),
        style(format!("({})", reduction.kept.len())).dim()
    );
    for (name, vif) in &reduction.final_vifs {
        println!(
            "        {} {} {}",
            style("•").dim(),
            name,
            style(format!("(VIF {})", format_vif(*vif))).dim()
        );
    }
    if reduction.final_vifs.is_empty() {
        for name in &reduction.kept {
            println!("        {} {}", style("•").dim(), name);
        }
    }
}
