use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::usage::UsageReport;

use super::bar::{render_bar, BarStyle};
use super::size::SizeDisplay;

/// Format options for report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Bar width in characters
    pub width: usize,
    pub size: SizeDisplay,
    pub bar: BarStyle,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            width: 20,
            size: SizeDisplay::Raw,
            bar: BarStyle::default(),
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_size(mut self, size: SizeDisplay) -> Self {
        self.size = size;
        self
    }

    pub fn with_bar(mut self, bar: BarStyle) -> Self {
        self.bar = bar;
        self
    }
}

/// Format the report as text: a header, one bar line per entry, a total.
///
/// Percentages are shown rounded to the nearest integer, half away from zero.
pub fn format_report(target: &str, report: &UsageReport, options: &ReportOptions) -> Result<String> {
    let mut output = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(output, "Disk usage for: {}", target);

    for (entry, percent) in report.shares() {
        let bar = render_bar(percent, options.width, &options.bar)?;
        let _ = writeln!(
            output,
            "{}% [{}] {} {}",
            percent.round() as u64,
            bar,
            options.size.format(entry.blocks),
            entry.path
        );
    }

    let _ = writeln!(output, "Total: {}", options.size.format(report.total()));
    Ok(output)
}

#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    path: &'a str,
    blocks: u64,
    size: String,
    percent: f64,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    entries: Vec<JsonEntry<'a>>,
    total_blocks: u128,
    total: String,
    permission_denied: bool,
}

/// Format the report as pretty JSON
pub fn format_json(target: &str, report: &UsageReport, options: &ReportOptions) -> Result<String> {
    let entries = report
        .shares()
        .map(|(e, percent)| JsonEntry {
            path: &e.path,
            blocks: e.blocks,
            size: options.size.format(e.blocks),
            percent,
        })
        .collect();

    let total = report.total();
    let json = JsonReport {
        target,
        entries,
        total_blocks: total,
        total: options.size.format(total),
        permission_denied: report.permission_denied,
    };

    Ok(serde_json::to_string_pretty(&json)?)
}
