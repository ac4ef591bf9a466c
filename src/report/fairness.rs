//! Fairness analysis reporting.

use console::style;

use crate::pipeline::FairnessCorrelations;

fn format_corr(value: Option<f64>) -> String {
    match value {
        Some(r) => format!("{:+.4}", r),
        None => "n/a".to_string(),
    }
}

/// Print the headline correlations of the fairness analysis.
pub fn display_fairness_correlations(correlations: &FairnessCorrelations, schools: usize) {
    println!();
    println!(
        "    {} {}",
        style("✧").cyan(),
        style("FAIRNESS CORRELATIONS").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!("      Schools in summary: {}", schools);
    println!(
        "      Tuition vs ROI:               {}",
        format_corr(correlations.tuition_vs_roi)
    );
    println!(
        "      Tuition vs earnings:          {}",
        format_corr(correlations.tuition_vs_earnings)
    );
    println!(
        "      Women proportion vs avg ROI:  {}",
        format_corr(correlations.women_vs_avg_roi)
    );
    println!(
        "      Women proportion vs earnings: {}",
        format_corr(correlations.women_vs_avg_earnings)
    );
}
