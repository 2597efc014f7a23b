use std::fmt::Write;

use colored::Colorize;

use crate::records::lookup::DistrictEntry;
use crate::records::{Record, Totals};

const RULE_WIDTH: usize = 118;

/// Format a list of records as a pretty table.
///
/// `total` is the number of matching rows before pagination.
pub fn format_records_pretty(records: &[Record], title: &str, total: u64) -> String {
    if records.is_empty() {
        return format!("{title} (0 of {total} records)\n  No records");
    }

    let mut output = format!("{} ({} of {total} records)\n", title.bold(), records.len());
    writeln!(
        output,
        "{}",
        format!(
            "{:>5}  {:<20} {:<24} {:>4} {:>8} {:>8} {:>8} {:>8} {:>10} {:>10}",
            "ID", "District", "Commune", "Year", "Buffalo", "Cattle", "Pig", "Goat", "Slaughter",
            "Meat (t)"
        )
        .dimmed()
    )
    .ok();
    output.push_str(&"─".repeat(RULE_WIDTH));
    output.push('\n');

    for record in records {
        writeln!(
            output,
            "{}  {:<20} {:<24} {:>4} {:>8} {:>8} {:>8} {:>8} {:>10} {}",
            format!("{:>5}", record.id).dimmed(),
            truncate(&record.district, 20),
            truncate(&record.commune, 24),
            record.year,
            record.buffalo_count,
            record.cattle_count,
            record.pig_count,
            record.goat_count,
            record.slaughter_total,
            format!("{:>10.2}", record.meat_output_tons).yellow(),
        )
        .ok();
    }

    output
}

/// Format a single record as pretty output.
pub fn format_record_pretty(record: &Record) -> String {
    let mut output = format!(
        "{} {}\n",
        format!("#{}", record.id).dimmed(),
        format!("{} / {}", record.district, record.commune).bold()
    );
    writeln!(output, "  {}: {}", "Year".dimmed(), record.year).ok();
    writeln!(output, "  {}: {}", "Buffalo".dimmed(), record.buffalo_count).ok();
    writeln!(output, "  {}: {}", "Cattle".dimmed(), record.cattle_count).ok();
    writeln!(output, "  {}: {}", "Pig".dimmed(), record.pig_count).ok();
    writeln!(output, "  {}: {}", "Goat".dimmed(), record.goat_count).ok();
    writeln!(output, "  {}: {}", "Total herd".dimmed(), record.total_headcount()).ok();
    writeln!(output, "  {}: {}", "Slaughtered".dimmed(), record.slaughter_total).ok();
    writeln!(
        output,
        "  {}: {:.2} t",
        "Meat output".dimmed(),
        record.meat_output_tons
    )
    .ok();
    output
}

/// Format aggregate figures.
pub fn format_totals_pretty(totals: &Totals, scope: &str) -> String {
    let mut output = format!("{} ({scope})\n", "Totals".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');
    writeln!(output, "  {:<14} {:>12}", "Records", totals.records).ok();
    writeln!(output, "  {:<14} {:>12}", "Buffalo", totals.buffalo_count).ok();
    writeln!(output, "  {:<14} {:>12}", "Cattle", totals.cattle_count).ok();
    writeln!(output, "  {:<14} {:>12}", "Pig", totals.pig_count).ok();
    writeln!(output, "  {:<14} {:>12}", "Goat", totals.goat_count).ok();
    writeln!(output, "  {:<14} {:>12}", "Total herd", totals.total_headcount()).ok();
    writeln!(output, "  {:<14} {:>12}", "Slaughtered", totals.slaughter_total).ok();
    writeln!(
        output,
        "  {:<14} {}",
        "Meat output",
        format!("{:>10.2} t", totals.meat_output_tons).yellow()
    )
    .ok();
    output
}

/// Format districts and their communes.
pub fn format_districts_pretty(entries: &[DistrictEntry]) -> String {
    let mut output = String::new();
    for (district, communes) in entries {
        writeln!(output, "{} ({})", district.bold(), communes.len()).ok();
        for commune in *communes {
            writeln!(output, "  {commune}").ok();
        }
    }
    output
}

/// Shorten text to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}
