// SPDX-License-Identifier: PMPL-1.0-or-later

//! Reporting: live match sinks and whole-run crack reports.

pub mod formatter;
pub mod output;
pub mod sinks;

use crate::search::{SearchSummary, SearchTask};
use crate::types::MatchRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use formatter::ReportFormatter;
pub use output::ReportOutputFormat;
pub use sinks::{ConsoleSink, FanOut, TextFileSink};

/// Everything one search run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrackReport {
    pub label: String,
    pub generated_at: String,
    pub ciphertext: String,
    pub crib: String,
    pub dimensions: Vec<String>,
    pub summary: SearchSummary,
    pub matches: Vec<MatchRecord>,
}

impl CrackReport {
    /// Matches are stored ordered by candidate index.
    pub fn new(
        label: &str,
        task: &SearchTask,
        summary: SearchSummary,
        mut matches: Vec<MatchRecord>,
    ) -> Self {
        matches.sort_by_key(|record| record.candidate);
        Self {
            label: label.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            ciphertext: task.ciphertext().to_string(),
            crib: task.crib().to_string(),
            dimensions: task.dimensions().iter().map(ToString::to_string).collect(),
            summary,
            matches,
        }
    }
}

/// Save report to file
pub fn save_report<P: AsRef<Path>>(
    report: &CrackReport,
    path: P,
    format: ReportOutputFormat,
) -> Result<()> {
    ReportFormatter::new().save(report, path, format)
}

pub fn print_summary(summary: &SearchSummary) {
    ReportFormatter::new().print_summary(summary);
}

pub fn load_report(path: &Path) -> Result<CrackReport> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading report {}", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("parsing yaml report {}", path.display())),
        _ => serde_json::from_str(&content)
            .with_context(|| format!("parsing json report {}", path.display())),
    }
}
