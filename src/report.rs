//! Output formatting for gloc results.
//!
//! Supports three output modes:
//! - Table: aligned columns of language, file count and code lines
//! - JSON: the normalized report for programmatic consumption
//! - Raw: the analyzer's output, byte for byte

use colored::*;
use serde::Serialize;
use std::io::{self, Write};

use crate::model::{LanguageStats, Report, RowOrder};

/// Minimum gap between table columns.
const COLUMN_GAP: usize = 2;

const SEPARATOR: &str = "---";
const TOTAL_LABEL: &str = "Total";

// =============================================================================
// Table Format
// =============================================================================

/// Render the summary table.
///
/// One header row, one row per language, a separator row and the total row.
/// Blank and comment counts are left out.
pub fn render_table(report: &Report, order: RowOrder) -> String {
    let mut rows: Vec<[String; 3]> = Vec::with_capacity(report.languages.len() + 3);
    rows.push(["Language".into(), "Files".into(), "Code".into()]);

    for (language, stats) in report.rows(order) {
        rows.push(stats_row(language, stats));
    }

    rows.push([SEPARATOR.into(), SEPARATOR.into(), SEPARATOR.into()]);
    rows.push(stats_row(TOTAL_LABEL, &report.total));

    align(&rows)
}

fn stats_row(label: &str, stats: &LanguageStats) -> [String; 3] {
    [
        label.to_string(),
        stats.files.to_string(),
        stats.code.to_string(),
    ]
}

/// Pad every column but the last to its widest cell plus [`COLUMN_GAP`].
fn align(rows: &[[String; 3]]) -> String {
    let mut widths = [0usize; 3];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        let last = row.len() - 1;
        for (i, cell) in row.iter().enumerate() {
            if i == last {
                out.push_str(cell);
            } else {
                out.push_str(&format!("{:<width$}", cell, width = widths[i] + COLUMN_GAP));
            }
        }
        out.push('\n');
    }
    out
}

/// Write the summary table to `out`.
pub fn write_table<W: Write>(out: &mut W, report: &Report, order: RowOrder) -> io::Result<()> {
    out.write_all(render_table(report, order).as_bytes())?;
    out.flush()
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON summary structure.
#[derive(Debug, Serialize)]
pub struct JsonSummary<'a> {
    pub version: &'static str,
    pub cloc_version: &'a str,
    pub elapsed_seconds: f64,
    pub languages: Vec<JsonLanguage<'a>>,
    pub total: LanguageStats,
}

/// One language entry in the JSON summary.
#[derive(Debug, Serialize)]
pub struct JsonLanguage<'a> {
    pub language: &'a str,
    #[serde(flatten)]
    pub stats: LanguageStats,
}

/// Build the JSON summary for `report`.
pub fn json_summary(report: &Report, order: RowOrder) -> JsonSummary<'_> {
    JsonSummary {
        version: env!("CARGO_PKG_VERSION"),
        cloc_version: &report.header.cloc_version,
        elapsed_seconds: report.header.elapsed_seconds,
        languages: report
            .rows(order)
            .into_iter()
            .map(|(language, stats)| JsonLanguage {
                language,
                stats: *stats,
            })
            .collect(),
        total: report.total,
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, report: &Report, order: RowOrder) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &json_summary(report, order))?;
    writeln!(out)?;
    out.flush()
}

// =============================================================================
// Raw Format
// =============================================================================

/// Forward analyzer output untouched.
pub fn write_raw<W: Write>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    out.write_all(bytes)?;
    out.flush()
}

// =============================================================================
// Status lines (stderr)
// =============================================================================

/// Announce the clone step.
pub fn status_cloning(url: &str, dir: &str) {
    eprintln!("{} {} into {}...", "Cloning".cyan().bold(), url, dir.dimmed());
}

/// Announce the analysis step.
pub fn status_analyzing() {
    eprintln!();
    eprintln!("{}", analyzing_line());
}

fn analyzing_line() -> String {
    format!("{} code...", "Analyzing".cyan().bold())
}

/// One dimmed line describing the analyzer run.
pub fn write_footer(report: &Report) {
    let header = &report.header;
    if header.cloc_version.is_empty() {
        return;
    }
    let line = format!(
        "cloc v{}  {} files  {} lines  {:.2}s",
        header.cloc_version, header.n_files, header.n_lines, header.elapsed_seconds
    );
    eprintln!("{}", line.dimmed());
}
