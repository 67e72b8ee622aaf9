// SPDX-License-Identifier: PMPL-1.0-or-later

//! Match sinks for the terminal and for results files.

use crate::search::MatchSink;
use crate::types::MatchRecord;
use colored::*;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Prints each match as it arrives, numbered from 1.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    count: usize,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl MatchSink for ConsoleSink {
    fn accept(&mut self, record: &MatchRecord) -> io::Result<()> {
        self.count += 1;
        println!(
            "  {} crib {} found in candidate #{}",
            format!("[{}]", self.count).bold().green(),
            record.crib.bold(),
            record.candidate
        );
        println!("      Settings: {}", record.configuration);
        if let Some(label) = &record.label {
            println!("      Note: {}", label.dimmed());
        }
        println!("      Output: {}", record.output.cyan());
        Ok(())
    }
}

/// Appends numbered, human-readable records to a text file.
pub struct TextFileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    count: usize,
}

impl TextFileSink {
    /// Open `path` for appending and write `heading` as a section title.
    pub fn append(path: &Path, heading: &str) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", heading)?;
        writeln!(writer, "{}", "=".repeat(heading.len()))?;
        writer.flush()?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
            count: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Close the section, noting when nothing matched.
    pub fn finish(mut self) -> io::Result<()> {
        if self.count == 0 {
            writeln!(self.writer, "No matches.")?;
        }
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

impl MatchSink for TextFileSink {
    fn accept(&mut self, record: &MatchRecord) -> io::Result<()> {
        self.count += 1;
        let config = &record.configuration;
        writeln!(self.writer, "Match {} (candidate #{})", self.count, record.candidate)?;
        writeln!(self.writer, "  crib: {}", record.crib)?;
        writeln!(self.writer, "  rotors: {}", config.rotors.join(" "))?;
        writeln!(self.writer, "  reflector: {}", config.reflector)?;
        writeln!(
            self.writer,
            "  ring_settings: {}",
            config
                .ring_settings
                .iter()
                .map(|ring| format!("{:02}", ring))
                .collect::<Vec<_>>()
                .join(" ")
        )?;
        writeln!(
            self.writer,
            "  initial_positions: {}",
            config
                .positions
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        )?;
        writeln!(self.writer, "  plugboard_pairs: {}", config.plugboard.join(" "))?;
        if let Some(label) = &record.label {
            writeln!(self.writer, "  note: {}", label)?;
        }
        writeln!(self.writer, "  output: {}", record.output)?;
        // Keep the file useful if the search is interrupted.
        self.writer.flush()
    }
}

/// Hands every record to each inner sink in turn.
pub struct FanOut<'a> {
    sinks: Vec<&'a mut dyn MatchSink>,
}

impl<'a> FanOut<'a> {
    pub fn new(sinks: Vec<&'a mut dyn MatchSink>) -> Self {
        Self { sinks }
    }
}

impl MatchSink for FanOut<'_> {
    fn accept(&mut self, record: &MatchRecord) -> io::Result<()> {
        for sink in self.sinks.iter_mut() {
            sink.accept(record)?;
        }
        Ok(())
    }
}
