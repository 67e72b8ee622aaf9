// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions shared by the engine, the search and the sinks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which reflector to mount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectorChoice {
    /// A catalogue reflector (A, B or C).
    Named(String),
    /// A substitute wiring given as 26 letters.
    Custom(String),
}

impl ReflectorChoice {
    pub fn named(name: &str) -> Self {
        ReflectorChoice::Named(name.to_string())
    }
}

impl fmt::Display for ReflectorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectorChoice::Named(name) => write!(f, "{}", name),
            ReflectorChoice::Custom(wiring) => write!(f, "custom({})", wiring),
        }
    }
}

/// A fully specified machine.
///
/// The three per-rotor lists are written leftmost rotor first, the way an
/// operator reads the windows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineConfiguration {
    pub rotors: Vec<String>,
    pub ring_settings: Vec<u8>,
    pub positions: Vec<char>,
    pub reflector: ReflectorChoice,
    #[serde(default)]
    pub plugboard: Vec<String>,
}

impl MachineConfiguration {
    pub fn new(
        rotors: &[&str],
        reflector: ReflectorChoice,
        ring_settings: &[u8],
        positions: &[char],
    ) -> Self {
        Self {
            rotors: rotors.iter().map(|r| r.to_string()).collect(),
            ring_settings: ring_settings.to_vec(),
            positions: positions.to_vec(),
            reflector,
            plugboard: Vec::new(),
        }
    }

    pub fn with_plugboard(mut self, pairs: &[&str]) -> Self {
        self.plugboard = pairs.iter().map(|p| p.to_string()).collect();
        self
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for MachineConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rotors: {} | reflector: {} | rings: {} | positions: {}",
            join(&self.rotors),
            self.reflector,
            join(&self.ring_settings),
            join(&self.positions),
        )?;
        if !self.plugboard.is_empty() {
            write!(f, " | plugboard: {}", join(&self.plugboard))?;
        }
        Ok(())
    }
}

/// Result of running one message through an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOutput {
    pub text: String,
    /// Window letters after the last key press, leftmost first.
    pub final_positions: Vec<char>,
}

/// A candidate whose output contained a crib term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Visitation index of the candidate within its task. Labelling only.
    pub candidate: usize,
    pub configuration: MachineConfiguration,
    pub output: String,
    pub crib: String,
    /// Generator note, e.g. which reflector wires were exchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
