// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report formatting and output

use crate::report::output::ReportOutputFormat;
use crate::report::CrackReport;
use crate::search::SearchSummary;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_summary(&self, summary: &SearchSummary) {
        let matches = if summary.matches == 0 {
            summary.matches.to_string().red()
        } else {
            summary.matches.to_string().green()
        };
        println!(
            "  Candidates: {}  Matches: {}  Time: {:.2}s{}",
            summary.candidates_visited,
            matches.bold(),
            summary.elapsed.as_secs_f64(),
            if summary.stopped_early {
                " (stopped early)".yellow().to_string()
            } else {
                String::new()
            }
        );
    }

    pub fn save<P: AsRef<Path>>(
        &self,
        report: &CrackReport,
        path: P,
        format: ReportOutputFormat,
    ) -> Result<()> {
        let content = format.serialize(report)?;
        fs::write(path.as_ref(), content)
            .with_context(|| format!("writing report {}", path.as_ref().display()))?;
        println!("Report saved to: {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
