// SPDX-License-Identifier: PMPL-1.0-or-later

//! The five built-in codebreaking exercises.

use crate::search::{MatchSink, SearchEngine, SearchOptions, SearchSummary};
use crate::settings::Settings;
use anyhow::{anyhow, Context, Result};
use std::ops::RangeInclusive;
use tracing::info;

const SOURCES: [&str; 5] = [
    include_str!("../tasks/codebreak1.yaml"),
    include_str!("../tasks/codebreak2.yaml"),
    include_str!("../tasks/codebreak3.yaml"),
    include_str!("../tasks/codebreak4.yaml"),
    include_str!("../tasks/codebreak5.yaml"),
];

pub fn numbers() -> RangeInclusive<usize> {
    1..=SOURCES.len()
}

/// Settings for task `number`, counted from 1.
pub fn load(number: usize) -> Result<Settings> {
    let source = number
        .checked_sub(1)
        .and_then(|index| SOURCES.get(index))
        .ok_or_else(|| anyhow!("no built-in task {} (expected 1-{})", number, SOURCES.len()))?;
    Settings::from_yaml(source).with_context(|| format!("built-in task {}", number))
}

/// The task's own label, or `Code N`.
pub fn label(number: usize) -> Result<String> {
    Ok(label_of(number, &load(number)?))
}

fn label_of(number: usize, settings: &Settings) -> String {
    settings
        .label
        .clone()
        .unwrap_or_else(|| format!("Code {}", number))
}

#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub number: usize,
    pub label: String,
    pub summary: SearchSummary,
}

/// Run task `number`. `options` overrides the task's own search switches.
pub fn run(
    number: usize,
    options: Option<SearchOptions>,
    sink: &mut dyn MatchSink,
) -> Result<TaskOutcome> {
    let settings = load(number)?;
    let label = label_of(number, &settings);
    let task = settings
        .to_task()
        .with_context(|| format!("preparing {}", label))?;
    let engine = SearchEngine::new(options.unwrap_or_else(|| settings.search_options()));

    info!(task = number, %label, "running built-in task");
    let summary = engine
        .run(&task, sink)
        .with_context(|| format!("searching {}", label))?;
    Ok(TaskOutcome {
        number,
        label,
        summary,
    })
}
