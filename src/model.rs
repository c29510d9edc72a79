//! Typed representation of an analyzer report.
//!
//! A [`Report`] holds one [`LanguageStats`] per language, the analyzer's own
//! total row, and the header metadata describing the run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata from the analyzer's `header` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportHeader {
    pub cloc_url: String,
    pub cloc_version: String,
    pub elapsed_seconds: f64,
    pub n_files: u64,
    pub n_lines: u64,
}

/// Line counts for one language, or for the total row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageStats {
    #[serde(rename = "nFiles", default)]
    pub files: u64,
    #[serde(default)]
    pub blank: u64,
    #[serde(default)]
    pub comment: u64,
    #[serde(default)]
    pub code: u64,
}

/// Order in which language rows are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowOrder {
    /// Language name, ascending
    #[default]
    Name,
    /// Code lines, descending
    Code,
    /// File count, descending
    Files,
}

/// A decoded per-language summary for one repository snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub header: ReportHeader,
    pub languages: HashMap<String, LanguageStats>,
    /// The analyzer's `SUM` row. Not recomputed locally.
    pub total: LanguageStats,
}

impl Report {
    /// Language rows sorted by `order`. Ties fall back to the name so the
    /// result never depends on map iteration order.
    pub fn rows(&self, order: RowOrder) -> Vec<(&str, &LanguageStats)> {
        let mut rows: Vec<(&str, &LanguageStats)> = self
            .languages
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
            .collect();

        match order {
            RowOrder::Name => rows.sort_by(|a, b| a.0.cmp(b.0)),
            RowOrder::Code => rows.sort_by(|a, b| b.1.code.cmp(&a.1.code).then(a.0.cmp(b.0))),
            RowOrder::Files => rows.sort_by(|a, b| b.1.files.cmp(&a.1.files).then(a.0.cmp(b.0))),
        }

        rows
    }

    /// Sum of code lines across all language entries.
    pub fn summed_code(&self) -> u64 {
        self.languages.values().map(|s| s.code).sum()
    }

    /// Whether the total row agrees with the per-language code counts.
    pub fn is_consistent(&self) -> bool {
        self.summed_code() == self.total.code
    }
}
