//! Plain-text report summary for terminals.

use crate::recorder::Category;
use crate::report::{ConsoleEntry, QueryTypeStats, Report};
use crate::utils::config::QUERY_TYPES;

/// Width of the sql column before truncation
const SQL_WIDTH: usize = 60;

/// Render a report as a fixed-width text summary
///
/// **Public** - used by the CLI `--summary` flag
pub fn render_text_summary(report: &Report) -> String {
    let mut lines = Vec::new();
    let rule = "━".repeat(78);

    lines.push("  REQUEST PROFILE".to_string());
    lines.push(format!("  {}", rule));
    lines.push(format!(
        "  Load Time: {:<14} Allowed: {:<14} Memory: {} / {}",
        report.speed_totals.total,
        report.speed_totals.allowed,
        report.memory_totals.used,
        report.memory_totals.total
    ));
    lines.push(format!(
        "  Files: {} ({}, largest {})",
        report.file_totals.count, report.file_totals.size, report.file_totals.largest
    ));

    let counts: Vec<String> = Category::ALL
        .iter()
        .map(|category| format!("{}: {}", category, report.logs.counts.get(*category)))
        .collect();
    lines.push(format!("  {}", counts.join("  ")));

    lines.push(String::new());
    lines.push("  QUERIES".to_string());
    lines.push(format!("  {}", rule));

    let totals = &report.query_totals;
    lines.push(format!(
        "  Total: {}  Statements: {}  Duplicates: {}  Time: {}",
        totals.count, totals.statements, totals.duplicates, totals.time
    ));
    for name in QUERY_TYPES {
        if let Some(stats) = totals.types.get(name) {
            lines.push(format_type_line(name, stats));
        }
    }

    if !report.queries.is_empty() {
        lines.push(String::new());
        for query in &report.queries {
            let marker = if query.duplicate { "dup" } else { "   " };
            lines.push(format!(
                "  {} {:>12}  {}",
                marker,
                query.time,
                truncate(&query.sql, SQL_WIDTH)
            ));
        }
    }

    if !report.logs.entries.is_empty() {
        lines.push(String::new());
        lines.push("  CONSOLE".to_string());
        lines.push(format!("  {}", rule));
        for entry in &report.logs.entries {
            lines.push(format!("  {:<10} {}", entry.category().as_str(), describe_entry(entry)));
        }
    }

    lines.join("\n")
}

fn format_type_line(name: &str, stats: &QueryTypeStats) -> String {
    format!(
        "    {:<7} {:>5} ({:>6.2}%)  {:>12} ({:>6.2}%)",
        name, stats.total, stats.percentage, stats.time, stats.time_percentage
    )
}

fn describe_entry(entry: &ConsoleEntry) -> String {
    match entry {
        ConsoleEntry::Log { data } => match data.as_str() {
            Some(text) => text.to_string(),
            None => data.to_string(),
        },
        ConsoleEntry::Memory {
            data,
            name,
            data_type,
        } => match data_type {
            Some(data_type) => format!("{} {}: {}", data, data_type, name),
            None => format!("{} {}", data, name),
        },
        ConsoleEntry::Error { data, file, line } => format!("Line {} : {} ({})", line, data, file),
        ConsoleEntry::Speed { data, name } | ConsoleEntry::Benchmark { data, name } => {
            format!("{} {}", data, name)
        }
    }
}

/// Shorten text to `width` characters, keeping the start
fn truncate(text: &str, width: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        flat
    } else {
        let head: String = flat.chars().take(width - 3).collect();
        format!("{}...", head)
    }
}
