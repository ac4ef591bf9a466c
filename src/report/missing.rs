//! Missing-value summary table.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Print the per-column null counts, worst first. Columns without nulls are
/// omitted; when nothing is missing a single confirmation line is printed
/// instead of an empty table.
pub fn display_missing_summary(summary: &[(String, usize, f64)]) {
    let with_nulls: Vec<_> = summary.iter().filter(|(_, count, _)| *count > 0).collect();

    println!();
    println!(
        "    {} {}",
        style("✧").cyan(),
        style("MISSING VALUE SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    if with_nulls.is_empty() {
        println!("      No missing values in any column");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Missing").add_attribute(Attribute::Bold),
        Cell::new("Missing %").add_attribute(Attribute::Bold),
    ]);

    for (name, count, pct) in with_nulls {
        let color = if *pct > 50.0 {
            Color::Red
        } else if *pct > 20.0 {
            Color::Yellow
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(count).fg(color),
            Cell::new(format!("{:.2}%", pct)).fg(color),
        ]);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
