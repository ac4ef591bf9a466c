//! Terminal styling utilities for the step-by-step pipeline output

use std::path::Path;
use std::time::Duration;

use console::style;

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("roiscope").cyan().bold(),
        style("College Scorecard ROI pipeline").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
}

/// Print the configuration card for a preprocessing run
pub fn print_config(input: &Path, output: &Path, min_cohort: f64, earnings_window: (f64, f64)) {
    println!();
    println!("    {}", style("Configuration").cyan().bold());
    println!("      Input:    {}", truncate_path(input, 44));
    println!("      Output:   {}", truncate_path(output, 44));
    println!(
        "      Cohort floor:    {}",
        style(format!("{}", min_cohort)).yellow()
    );
    println!(
        "      Earnings window: {}",
        style(format!("[{}, {})", earnings_window.0, earnings_window.1)).yellow()
    );
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", style("ℹ").cyan(), message);
}

/// Print the elapsed time of a step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "      {}",
        style(format!("took {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion(message: &str) {
    println!();
    println!("    {} {}", style("»").cyan(), style(message).green().bold());
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    let char_count = path_str.chars().count();
    if char_count <= max_len {
        return path_str;
    }

    // Truncate on character boundaries; a byte slice can split a multi-byte
    // character in non-ASCII paths.
    let keep = max_len.saturating_sub(3);
    let tail: String = path_str.chars().skip(char_count - keep).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_truncate_path_short_is_unchanged() {
        let path = PathBuf::from("data/raw/fos.csv");
        assert_eq!(truncate_path(&path, 44), "data/raw/fos.csv");
    }

    #[test]
    fn test_truncate_path_keeps_tail() {
        let path = PathBuf::from("a/very/long/directory/chain/of/names/data.csv");
        let truncated = truncate_path(&path, 20);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with("data.csv"));
        assert_eq!(truncated.chars().count(), 20);
    }

    #[test]
    fn test_truncate_path_multibyte_characters() {
        // 40 two-byte characters; a byte-offset slice would land inside one.
        let path = PathBuf::from("é".repeat(40));
        let truncated = truncate_path(&path, 24);
        assert!(truncated.starts_with("..."));
        assert_eq!(truncated.chars().count(), 24);
    }
}
