//! Roiscope: College Scorecard ROI Analysis CLI
//!
//! A command-line pipeline for cleaning College Scorecard field-of-study
//! data, deriving ROI metrics, and reducing multicollinearity via VIF.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use cli::{derive_output_path, Cli, Commands};
use pipeline::{
    add_categories, add_roi_features, build_id_map, clean_institutions, compute_vifs,
    fairness_correlations, filter_rows, get_column_names, load_csv, load_csv_with_stats,
    merge_with_institutions, missing_value_summary, project_and_coerce, reduce_vif,
    roi_category_distribution, sample_rows, school_summary, FeatureMatrix, FilterConfig,
    DEFAULT_VIF_FEATURES,
};
use report::{
    display_fairness_correlations, display_filter_report, display_missing_summary,
    display_roi_distribution, display_vif_reduction, export_vif_analysis, PipelineSummary,
};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config, print_info,
    print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Preprocess {
            input,
            output,
            download_url,
            min_cohort,
            min_earnings,
            max_earnings,
        } => {
            let output = output
                .unwrap_or_else(|| derive_output_path(&input, "processed", "csv"));
            let config = FilterConfig {
                min_cohort,
                min_earnings,
                max_earnings,
            };
            run_preprocess(&input, &output, download_url.as_deref(), &config)
        }
        Commands::Reduce {
            input,
            output,
            threshold,
            features,
            report,
        } => {
            let output = output.unwrap_or_else(|| derive_output_path(&input, "reduced", "csv"));
            let report =
                report.unwrap_or_else(|| derive_output_path(&input, "vif_analysis", "json"));
            run_reduce(&input, &output, &report, threshold, &features)
        }
        Commands::Sample {
            input,
            output,
            size,
            seed,
        } => {
            let output = output.unwrap_or_else(|| derive_output_path(&input, "sample", "csv"));
            run_sample(&input, &output, size, seed)
        }
        Commands::Fairness {
            field_of_study,
            raw_field_of_study,
            institution,
            institution_url,
            output,
            min_programs,
        } => {
            let output = output
                .unwrap_or_else(|| derive_output_path(&field_of_study, "fairness", "csv"));
            run_fairness(
                &field_of_study,
                &raw_field_of_study,
                &institution,
                institution_url.as_deref(),
                &output,
                min_programs,
            )
        }
    }
}

/// Full preprocessing pass: load -> project/coerce -> ROI features -> filter
/// -> enrich -> export.
fn run_preprocess(
    input: &Path,
    output: &Path,
    download_url: Option<&str>,
    config: &FilterConfig,
) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        input,
        output,
        config.min_cohort,
        (config.min_earnings, config.max_earnings),
    );

    // Step 1: Load (downloading first when the cache is absent)
    print_step_header(1, "Load Raw Data");
    let step_start = Instant::now();
    if pipeline::ensure_local_file(input, download_url)? {
        print_success("Downloaded raw file");
    } else {
        print_info("Using local file");
    }

    let spinner = create_spinner("Loading raw CSV...");
    let (df, rows, cols, memory_mb) = load_csv_with_stats(input)?;
    finish_with_success(&spinner, "Raw dataset loaded");
    println!("      Rows: {}  Columns: {}  ~{:.2} MB", rows, cols, memory_mb);

    let mut summary = PipelineSummary::new(rows, cols);
    summary.load_time = step_start.elapsed();
    print_step_time(summary.load_time);

    // Step 2: Project and coerce
    print_step_header(2, "Column Selection & Type Coercion");
    let step_start = Instant::now();
    let df = project_and_coerce(&df, input)?;
    print_success("Projected to the ROI column set");
    display_missing_summary(&missing_value_summary(&df));
    summary.coerce_time = step_start.elapsed();
    print_step_time(summary.coerce_time);

    // Step 3: ROI features
    print_step_header(3, "ROI Feature Engineering");
    let step_start = Instant::now();
    let df = add_roi_features(&df)?;
    print_success("Derived ROI, debt-to-income, payback and payment-share columns");
    summary.features_time = step_start.elapsed();
    print_step_time(summary.features_time);

    // Step 4: Filter
    print_step_header(4, "Row Filtering");
    let step_start = Instant::now();
    let (df, filter_report) = filter_rows(&df, config)?;
    display_filter_report(&filter_report);
    summary.filter_report = filter_report;
    summary.filter_time = step_start.elapsed();
    print_step_time(summary.filter_time);

    // Step 5: Enrich
    print_step_header(5, "Categorical Enrichment");
    let step_start = Instant::now();
    let mut df = add_categories(&df)?;
    print_success("Added credential, major field and bucket columns");
    display_roi_distribution(&roi_category_distribution(&df)?);
    summary.enrich_time = step_start.elapsed();
    print_step_time(summary.enrich_time);

    // Step 6: Save
    print_step_header(6, "Save Results");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing processed CSV...");
    pipeline::save_csv(&mut df, output)?;
    finish_with_success(&spinner, &format!("Saved to {}", output.display()));
    summary.save_time = step_start.elapsed();
    print_step_time(summary.save_time);

    let (final_rows, final_cols) = df.shape();
    summary.final_rows = final_rows;
    summary.final_columns = final_cols;
    summary.display();

    print_completion("Preprocessing complete");
    Ok(())
}

/// Columns carried into the reduced output alongside the surviving features.
const REDUCE_CARRYOVER_COLUMNS: [&str; 6] = [
    pipeline::INSTNM,
    pipeline::CIPDESC,
    pipeline::CONTROL,
    pipeline::CREDENTIAL_LEVEL_NAME,
    pipeline::MAJOR_FIELD,
    pipeline::ROI_CATEGORY,
];

/// VIF reduction pass over the processed table.
fn run_reduce(
    input: &Path,
    output: &Path,
    report_path: &Path,
    threshold: f64,
    features: &[String],
) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));

    print_step_header(1, "Load Processed Data");
    let step_start = Instant::now();

    let features: Vec<String> = if features.is_empty() {
        DEFAULT_VIF_FEATURES.iter().map(|s| s.to_string()).collect()
    } else {
        features.to_vec()
    };

    // Check the requested features against the header before materializing
    // the table.
    let column_names = get_column_names(input)?;
    for feature in &features {
        if !column_names.contains(feature) {
            anyhow::bail!(
                "Feature column '{}' not found in dataset. Available columns: {:?}",
                feature,
                column_names
            );
        }
    }

    let spinner = create_spinner("Loading processed CSV...");
    let (df, rows, cols, _) = load_csv_with_stats(input)?;
    finish_with_success(&spinner, "Processed dataset loaded");
    println!("      Rows: {}  Columns: {}", rows, cols);
    print_step_time(step_start.elapsed());

    print_step_header(2, "VIF Reduction");
    let step_start = Instant::now();
    let matrix = FeatureMatrix::from_dataframe(&df, &features)?;

    if matrix.names.len() >= 2 {
        let mut initial: Vec<(String, f64)> = matrix
            .names
            .iter()
            .cloned()
            .zip(compute_vifs(&matrix))
            .collect();
        initial.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        println!("      Initial VIFs (worst first):");
        for (name, vif) in &initial {
            if vif.is_finite() {
                println!("        {:<24} {:.2}", name, vif);
            } else {
                println!("        {:<24} inf", name);
            }
        }
    }

    let reduction = reduce_vif(matrix, threshold);
    display_vif_reduction(&reduction);
    print_step_time(step_start.elapsed());

    print_step_header(3, "Save Results");
    let step_start = Instant::now();

    // Surviving features plus the descriptive columns the downstream
    // analysis groups and labels by.
    let mut keep: Vec<String> = reduction.kept.clone();
    for name in REDUCE_CARRYOVER_COLUMNS {
        if column_names.iter().any(|c| c == name) && !keep.iter().any(|k| k == name) {
            keep.push(name.to_string());
        }
    }
    let mut reduced = df.select(keep.iter().map(|s| s.as_str()))?;
    let spinner = create_spinner("Writing reduced CSV...");
    pipeline::save_csv(&mut reduced, output)?;
    finish_with_success(&spinner, &format!("Saved to {}", output.display()));

    export_vif_analysis(&reduction, &input.display().to_string(), report_path)?;
    print_success(&format!("Wrote VIF report to {}", report_path.display()));
    print_step_time(step_start.elapsed());

    print_completion("VIF reduction complete");
    Ok(())
}

/// Seeded sampling pass over the processed table.
fn run_sample(input: &Path, output: &Path, size: usize, seed: u64) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));

    print_step_header(1, "Sample Processed Data");
    let step_start = Instant::now();
    let df = load_csv(input)?;
    println!("      Source rows: {}", df.height());

    let mut sample = sample_rows(&df, size, seed)?;
    print_success(&format!(
        "Drew {} of {} rows (seed {})",
        sample.height(),
        df.height(),
        seed
    ));

    pipeline::save_csv(&mut sample, output)?;
    print_success(&format!("Saved to {}", output.display()));
    print_step_time(step_start.elapsed());

    print_completion("Sampling complete");
    Ok(())
}

/// Fairness join and correlation pass.
fn run_fairness(
    field_of_study: &Path,
    raw_field_of_study: &Path,
    institution: &Path,
    institution_url: Option<&str>,
    output: &Path,
    min_programs: u32,
) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));

    print_step_header(1, "Load Inputs");
    let step_start = Instant::now();
    if pipeline::ensure_local_file(institution, institution_url)? {
        print_success("Downloaded institution file");
    }

    let spinner = create_spinner("Loading tables...");
    let processed = load_csv(field_of_study)?;
    let raw_fos = load_csv(raw_field_of_study)?;
    let institutions = load_csv(institution)?;
    finish_with_success(&spinner, "All inputs loaded");
    print_step_time(step_start.elapsed());

    print_step_header(2, "Join & Aggregate");
    let step_start = Instant::now();
    let id_map = build_id_map(&raw_fos, raw_field_of_study)?;
    print_success(&format!("Built OPEID6 map for {} institutions", id_map.height()));

    let institutions = clean_institutions(&institutions, institution)?;
    print_success(&format!("Cleaned {} unique institutions", institutions.height()));

    let mut merged = merge_with_institutions(&processed, &id_map, &institutions)?;
    print_success(&format!("Merged table has {} rows", merged.height()));

    let summary = school_summary(&merged, min_programs)?;
    let correlations = fairness_correlations(&merged, &summary)?;
    display_fairness_correlations(&correlations, summary.height());
    print_step_time(step_start.elapsed());

    print_step_header(3, "Save Results");
    let step_start = Instant::now();
    pipeline::save_csv(&mut merged, output)?;
    print_success(&format!("Saved to {}", output.display()));
    print_step_time(step_start.elapsed());

    print_completion("Fairness analysis complete");
    Ok(())
}
