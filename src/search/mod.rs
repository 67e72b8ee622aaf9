// SPDX-License-Identifier: PMPL-1.0-or-later

//! Exhaustive crib search over machine settings.
//!
//! A [`SearchTask`] pairs a ciphertext and crib with a partially known
//! machine and the [`Dimension`]s that fill in the rest. The
//! [`SearchEngine`] visits every candidate exactly once, builds a fresh
//! [`EncryptionEngine`] for it and hands each match to a [`MatchSink`] as
//! soon as it is found.
//!
//! In parallel mode candidates are spread over the rayon pool; matches
//! travel through a channel to the calling thread, which owns the sink.

pub mod candidates;
pub mod crib;
pub mod permutations;
pub mod rewiring;

pub use candidates::{Dimension, Field, PartialConfiguration};
pub use crib::CribCriterion;

use crate::alphabet;
use crate::error::{ConfigurationError, EnigmaError, Result};
use crate::machine::EncryptionEngine;
use crate::types::MatchRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Destination for match records. Called from a single thread.
pub trait MatchSink {
    fn accept(&mut self, record: &MatchRecord) -> io::Result<()>;
}

impl MatchSink for Vec<MatchRecord> {
    fn accept(&mut self, record: &MatchRecord) -> io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Search-wide switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Spread candidates over the rayon pool.
    pub parallel: bool,
    /// Stop handing out new candidates once this many matches were emitted.
    pub max_matches: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            max_matches: None,
        }
    }
}

/// What a finished search reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub candidates_visited: usize,
    pub matches: usize,
    /// True when `max_matches` left a candidate unvisited or a hit unreported.
    /// Hitting the limit exactly on the last hit is a full run.
    pub stopped_early: bool,
    pub elapsed: Duration,
}

impl SearchSummary {
    /// Normal end of enumeration without a single match.
    pub fn is_exhausted(&self) -> bool {
        self.matches == 0 && !self.stopped_early
    }
}

/// A ciphertext, a crib, the known settings and how to enumerate the rest.
#[derive(Debug, Clone)]
pub struct SearchTask {
    ciphertext: String,
    crib: CribCriterion,
    base: PartialConfiguration,
    dimensions: Vec<Dimension>,
}

impl SearchTask {
    /// Validate everything the caller supplied. After this succeeds every
    /// generated candidate is expected to be well formed.
    pub fn new(
        ciphertext: &str,
        crib: CribCriterion,
        base: PartialConfiguration,
        mut dimensions: Vec<Dimension>,
    ) -> Result<Self> {
        let ciphertext = alphabet::normalize(ciphertext)?;
        let crib = crib.normalized()?;
        base.validate_known()?;
        for dimension in &dimensions {
            dimension.validate()?;
        }
        dimensions.sort_by_key(Dimension::rank);

        let unknown = base.unknown_fields();
        let mut covered = Vec::new();
        for dimension in &dimensions {
            for field in dimension.fields() {
                if !unknown.contains(&field) {
                    return Err(unsupported(format!(
                        "{} is known but also searched ({})",
                        field.as_str(),
                        dimension
                    )));
                }
                if covered.contains(&field) {
                    return Err(unsupported(format!(
                        "{} is searched twice",
                        field.as_str()
                    )));
                }
                covered.push(field);
            }
        }
        if let Some(field) = unknown.iter().find(|field| !covered.contains(field)) {
            return Err(unsupported(format!(
                "{} is unknown but nothing searches it",
                field.as_str()
            )));
        }
        if dimensions
            .iter()
            .any(|d| matches!(d, Dimension::Positions { .. }))
            && base.rotor_count().is_none()
        {
            return Err(unsupported(
                "position search needs the number of rotors".to_string(),
            ));
        }

        Ok(Self {
            ciphertext,
            crib,
            base,
            dimensions,
        })
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    pub fn crib(&self) -> &CribCriterion {
        &self.crib
    }

    pub fn base(&self) -> &PartialConfiguration {
        &self.base
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// The lazy candidate stream, outermost dimension first.
    pub fn candidates(&self) -> candidates::Candidates {
        candidates::generate(self.base.clone(), &self.dimensions)
    }

    /// Decode one candidate and test it against the crib.
    pub fn evaluate(
        &self,
        index: usize,
        candidate: Result<PartialConfiguration>,
    ) -> Result<Vec<MatchRecord>> {
        let malformed = |source: EnigmaError| EnigmaError::MalformedCandidate {
            index,
            source: Box::new(source),
        };

        let candidate = candidate.map_err(malformed)?;
        let label = candidate.label.clone();
        let configuration = candidate.resolve().map_err(malformed)?;
        let output = EncryptionEngine::new(&configuration)
            .and_then(|mut engine| engine.encode(&self.ciphertext))
            .map_err(malformed)?;
        trace!(index, %configuration, "candidate evaluated");

        Ok(self
            .crib
            .matches(&output)
            .map(|crib| MatchRecord {
                candidate: index,
                configuration: configuration.clone(),
                output: output.clone(),
                crib: crib.to_string(),
                label: label.clone(),
            })
            .collect())
    }
}

fn unsupported(message: String) -> EnigmaError {
    ConfigurationError::UnsupportedSearch(message).into()
}

/// Runs search tasks.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    options: SearchOptions,
}

impl SearchEngine {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Enumerate every candidate of `task`, streaming matches into `sink`.
    pub fn run(&self, task: &SearchTask, sink: &mut dyn MatchSink) -> Result<SearchSummary> {
        info!(
            dimensions = ?task.dimensions().iter().map(ToString::to_string).collect::<Vec<_>>(),
            crib = %task.crib(),
            parallel = self.options.parallel,
            "search started"
        );
        let start = Instant::now();

        let (candidates_visited, matches, stopped_early) = if self.options.parallel {
            self.run_parallel(task, sink)?
        } else {
            self.run_sequential(task, sink)?
        };

        let summary = SearchSummary {
            candidates_visited,
            matches,
            stopped_early,
            elapsed: start.elapsed(),
        };
        info!(
            candidates = summary.candidates_visited,
            matches = summary.matches,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "search finished"
        );
        Ok(summary)
    }

    /// Run a task and return its matches ordered by candidate index.
    pub fn collect(&self, task: &SearchTask) -> Result<(SearchSummary, Vec<MatchRecord>)> {
        let mut records: Vec<MatchRecord> = Vec::new();
        let summary = self.run(task, &mut records)?;
        records.sort_by_key(|record| record.candidate);
        Ok((summary, records))
    }

    fn limit_reached(&self, emitted: usize) -> bool {
        self.options.max_matches.is_some_and(|max| emitted >= max)
    }

    fn run_sequential(
        &self,
        task: &SearchTask,
        sink: &mut dyn MatchSink,
    ) -> Result<(usize, usize, bool)> {
        let mut visited = 0;
        let mut emitted = 0;
        let mut dropped = false;

        for (index, candidate) in task.candidates().enumerate() {
            if self.limit_reached(emitted) {
                return Ok((visited, emitted, true));
            }
            visited += 1;
            for record in task.evaluate(index, candidate)? {
                if self.limit_reached(emitted) {
                    dropped = true;
                    break;
                }
                debug!(candidate = record.candidate, crib = %record.crib, "match");
                sink.accept(&record)?;
                emitted += 1;
            }
        }

        Ok((visited, emitted, dropped))
    }

    fn run_parallel(
        &self,
        task: &SearchTask,
        sink: &mut dyn MatchSink,
    ) -> Result<(usize, usize, bool)> {
        let visited = AtomicUsize::new(0);
        let stop = AtomicBool::new(false);
        let skipped = AtomicBool::new(false);
        let (sender, receiver) = mpsc::channel::<MatchRecord>();

        thread::scope(|scope| {
            let producer = scope.spawn(|| {
                task.candidates()
                    .enumerate()
                    .take_while(|_| {
                        // A pulled candidate is always evaluated, so the gate sits here.
                        let open = !stop.load(Ordering::Relaxed);
                        if !open {
                            skipped.store(true, Ordering::Relaxed);
                        }
                        open
                    })
                    .par_bridge()
                    .try_for_each_with(sender, |sender, (index, candidate)| {
                        visited.fetch_add(1, Ordering::Relaxed);
                        for record in task.evaluate(index, candidate)? {
                            if sender.send(record).is_err() {
                                // Consumer hung up; nothing left to deliver to.
                                stop.store(true, Ordering::Relaxed);
                                break;
                            }
                        }
                        Ok(())
                    })
            });

            let mut emitted = 0;
            let mut dropped = false;
            let mut sink_error = None;
            for record in receiver {
                if self.limit_reached(emitted) {
                    dropped = true;
                    continue;
                }
                debug!(candidate = record.candidate, crib = %record.crib, "match");
                if let Err(err) = sink.accept(&record) {
                    sink_error = Some(err);
                    stop.store(true, Ordering::Relaxed);
                    break;
                }
                emitted += 1;
                if self.limit_reached(emitted) {
                    stop.store(true, Ordering::Relaxed);
                }
            }

            let produced: Result<()> = match producer.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            };
            if let Some(err) = sink_error {
                return Err(EnigmaError::Sink(err));
            }
            produced?;

            let stopped_early = dropped || skipped.load(Ordering::Relaxed);
            Ok((visited.load(Ordering::Relaxed), emitted, stopped_early))
        })
    }
}
