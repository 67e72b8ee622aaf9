// SPDX-License-Identifier: PMPL-1.0-or-later

//! Settings documents: the operator-facing form of a machine or a search.
//!
//! Per-rotor values are space-delimited strings written leftmost rotor
//! first. The literal `UNKNOWN` leaves a field open for the search, and `?`
//! inside a plug pair marks a missing letter.

use crate::alphabet;
use crate::error::{ConfigurationError, Result};
use crate::machine::rotor;
use crate::search::{CribCriterion, Dimension, PartialConfiguration, SearchOptions, SearchTask};
use crate::types::{MachineConfiguration, ReflectorChoice};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Marks a field the search has to fill in.
pub const UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub crib: Option<CribCriterion>,
    pub rotors: String,
    pub reflector: String,
    pub ring_settings: String,
    pub initial_positions: String,
    #[serde(default)]
    pub plugboard_pairs: String,
    #[serde(default)]
    pub search: SearchHints,
}

/// Pools and switches for the unknown fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHints {
    pub reflectors: Vec<String>,
    pub rotor_pool: Vec<String>,
    pub ring_pool: Vec<u8>,
    pub allow_repeated_positions: bool,
    pub rewire_reflector: bool,
    pub max_matches: Option<usize>,
    pub parallel: bool,
}

impl Default for SearchHints {
    fn default() -> Self {
        Self {
            reflectors: rotor::reflector_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            rotor_pool: rotor::rotor_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            ring_pool: (1..=alphabet::SIZE).collect(),
            allow_repeated_positions: false,
            rewire_reflector: false,
            max_matches: None,
            parallel: true,
        }
    }
}

fn is_unknown(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(UNKNOWN)
}

fn malformed(field: &'static str, value: &str) -> ConfigurationError {
    ConfigurationError::MalformedField {
        field,
        value: value.to_string(),
    }
}

/// `"Beta Gamma V"` -> rotor names, leftmost first.
pub fn parse_rotors(value: &str) -> Result<Option<Vec<String>>> {
    if is_unknown(value) {
        return Ok(None);
    }
    let names: Vec<String> = value.split_whitespace().map(str::to_string).collect();
    if names.is_empty() {
        return Err(malformed("rotors", value).into());
    }
    Ok(Some(names))
}

/// `"04 02 14"` -> ring settings. Zero padding is allowed.
pub fn parse_rings(value: &str) -> Result<Option<Vec<u8>>> {
    if is_unknown(value) {
        return Ok(None);
    }
    let rings = value
        .split_whitespace()
        .map(|token| token.parse::<u8>().map_err(|_| malformed("ring_settings", value)))
        .collect::<std::result::Result<Vec<u8>, _>>()?;
    if rings.is_empty() {
        return Err(malformed("ring_settings", value).into());
    }
    Ok(Some(rings))
}

/// `"M J M"` or `"MJM"` -> window letters.
pub fn parse_positions(value: &str) -> Result<Option<Vec<char>>> {
    if is_unknown(value) {
        return Ok(None);
    }
    let trimmed = value.trim();
    let letters: Vec<char> = if trimmed.contains(char::is_whitespace) {
        trimmed
            .split_whitespace()
            .map(|token| {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(malformed("initial_positions", value)),
                }
            })
            .collect::<std::result::Result<_, _>>()?
    } else {
        trimmed.chars().collect()
    };
    if letters.is_empty() {
        return Err(malformed("initial_positions", value).into());
    }
    letters
        .into_iter()
        .map(|c| {
            alphabet::index_of(c)
                .map(alphabet::letter)
                .map_err(|_| malformed("initial_positions", value).into())
        })
        .collect::<Result<Vec<char>>>()
        .map(Some)
}

/// `"KI XN FL"` -> plug pairs, upper-cased. `?` is kept as a placeholder.
pub fn parse_plugboard(value: &str) -> Vec<String> {
    value
        .split_whitespace()
        .map(str::to_ascii_uppercase)
        .collect()
}

/// A catalogue name, or a full 26-letter substitute wiring.
pub fn parse_reflector(value: &str) -> Result<Option<ReflectorChoice>> {
    let trimmed = value.trim();
    if is_unknown(trimmed) {
        return Ok(None);
    }
    if trimmed.is_empty() {
        return Err(malformed("reflector", value).into());
    }
    if trimmed.len() == alphabet::SIZE as usize {
        let letters = alphabet::normalize(trimmed)?;
        return Ok(Some(ReflectorChoice::Custom(letters)));
    }
    Ok(Some(ReflectorChoice::Named(trimmed.to_string())))
}

impl Settings {
    /// Read a JSON or YAML settings file, chosen by extension.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("parsing json settings {}", path.display())),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("parsing yaml settings {}", path.display())),
            _ => Err(anyhow!(
                "unsupported settings extension for {}",
                path.display()
            )),
        }
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("parsing yaml settings")
    }

    /// Machine fields, with unknowns left open.
    pub fn to_partial(&self) -> Result<PartialConfiguration> {
        Ok(PartialConfiguration {
            rotors: parse_rotors(&self.rotors)?,
            ring_settings: parse_rings(&self.ring_settings)?,
            positions: parse_positions(&self.initial_positions)?,
            reflector: parse_reflector(&self.reflector)?,
            plugboard: parse_plugboard(&self.plugboard_pairs),
            label: None,
        })
    }

    /// A concrete machine. Fails if any field is still unknown.
    pub fn to_configuration(&self) -> Result<MachineConfiguration> {
        let partial = self.to_partial()?;
        partial.validate_known()?;
        partial.resolve()
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            parallel: self.search.parallel,
            max_matches: self.search.max_matches,
        }
    }

    /// The dimensions that cover this document's unknown fields.
    pub fn dimensions(&self, partial: &PartialConfiguration) -> Result<Vec<Dimension>> {
        let hints = &self.search;
        let mut dimensions = Vec::new();

        match (partial.rotors.is_none(), partial.ring_settings.is_none()) {
            (true, true) => dimensions.push(Dimension::Multi {
                rotor_pool: hints.rotor_pool.clone(),
                reflectors: if partial.reflector.is_none() {
                    hints.reflectors.clone()
                } else {
                    Vec::new()
                },
                ring_pool: hints.ring_pool.clone(),
            }),
            (false, false) => {
                if partial.reflector.is_none() {
                    dimensions.push(Dimension::Reflector {
                        candidates: hints.reflectors.clone(),
                    });
                }
            }
            _ => {
                return Err(ConfigurationError::UnsupportedSearch(
                    "rotors and ring settings must be searched together".to_string(),
                )
                .into())
            }
        }
        if partial.positions.is_none() {
            dimensions.push(Dimension::Positions {
                allow_repeats: hints.allow_repeated_positions,
            });
        }
        if partial.placeholder_count() > 0 {
            dimensions.push(Dimension::PlugboardLetters);
        }
        if hints.rewire_reflector {
            dimensions.push(Dimension::ReflectorRewiring);
        }
        Ok(dimensions)
    }

    /// A validated search over every field marked unknown.
    pub fn to_task(&self) -> Result<SearchTask> {
        let code = self
            .code
            .as_deref()
            .ok_or(ConfigurationError::Unresolved("code"))?;
        let crib = self
            .crib
            .clone()
            .ok_or(ConfigurationError::Unresolved("crib"))?;
        let partial = self.to_partial()?;
        let dimensions = self.dimensions(&partial)?;
        SearchTask::new(code, crib, partial, dimensions)
    }
}
