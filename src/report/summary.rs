//! Preprocessing summary report generation.

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::FilterReport;

/// Summary of a preprocessing run: row/column movement and per-step timing.
#[derive(Debug, Default)]
pub struct PipelineSummary {
    pub initial_rows: usize,
    pub initial_columns: usize,
    pub final_rows: usize,
    pub final_columns: usize,
    pub filter_report: FilterReport,
    pub load_time: Duration,
    pub coerce_time: Duration,
    pub features_time: Duration,
    pub filter_time: Duration,
    pub enrich_time: Duration,
    pub save_time: Duration,
}

impl PipelineSummary {
    pub fn new(initial_rows: usize, initial_columns: usize) -> Self {
        Self {
            initial_rows,
            initial_columns,
            final_rows: initial_rows,
            final_columns: initial_columns,
            ..Default::default()
        }
    }

    /// Percentage of the raw rows that survived filtering.
    pub fn retained_pct(&self) -> f64 {
        if self.initial_rows == 0 {
            100.0
        } else {
            self.final_rows as f64 / self.initial_rows as f64 * 100.0
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("✧").cyan(),
            style("PREPROCESSING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("Raw rows"),
            Cell::new(self.initial_rows),
        ]);
        table.add_row(vec![
            Cell::new("Raw columns"),
            Cell::new(self.initial_columns),
        ]);
        table.add_row(vec![
            Cell::new("Rows after filtering"),
            Cell::new(self.final_rows)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("Output columns"),
            Cell::new(self.final_columns),
        ]);

        let retained = self.retained_pct();
        let color = if retained > 50.0 {
            Color::Green
        } else if retained > 20.0 {
            Color::Yellow
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new("Rows retained"),
            Cell::new(format!("{:.2}%", retained))
                .fg(color)
                .add_attribute(Attribute::Bold),
        ]);

        let total = self.load_time
            + self.coerce_time
            + self.features_time
            + self.filter_time
            + self.enrich_time
            + self.save_time;
        table.add_row(vec![
            Cell::new("Total time"),
            Cell::new(format!("{:.2}s", total.as_secs_f64())),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}

/// Print the per-predicate retention of the row filter.
pub fn display_filter_report(report: &FilterReport) {
    println!();
    println!(
        "    {} {}",
        style("✧").cyan(),
        style("FILTER RETENTION").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Predicate").add_attribute(Attribute::Bold),
        Cell::new("Before").add_attribute(Attribute::Bold),
        Cell::new("After").add_attribute(Attribute::Bold),
        Cell::new("Retained").add_attribute(Attribute::Bold),
    ]);

    for stage in &report.stages {
        table.add_row(vec![
            Cell::new(&stage.name),
            Cell::new(stage.rows_before),
            Cell::new(stage.rows_after),
            Cell::new(format!("{:.2}%", stage.retained_pct())),
        ]);
    }

    table.add_row(vec![
        Cell::new("overall").add_attribute(Attribute::Bold),
        Cell::new(report.initial_rows()),
        Cell::new(report.final_rows()),
        Cell::new(format!("{:.2}%", report.overall_retained_pct()))
            .add_attribute(Attribute::Bold),
    ]);

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Print the ROI bucket distribution of the processed table.
pub fn display_roi_distribution(distribution: &[(String, usize, f64)]) {
    println!();
    println!(
        "    {} {}",
        style("✧").cyan(),
        style("ROI CATEGORY DISTRIBUTION").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    for (bucket, count, share) in distribution {
        println!(
            "      {:<22} {:>8}  {}",
            bucket,
            count,
            style(format!("{:5.1}%", share)).dim()
        );
    }
}
