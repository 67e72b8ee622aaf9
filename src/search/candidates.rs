// SPDX-License-Identifier: PMPL-1.0-or-later

//! Candidate generation.
//!
//! A [`PartialConfiguration`] is a machine with some fields unknown. Each
//! [`Dimension`] knows how to fill in one or more of those fields; stacking
//! dimensions nests their generators, so the candidate space is the
//! cross-product of every dimension in the task.

use crate::alphabet::{self, ALPHABET};
use crate::error::{ConfigurationError, EnigmaError, Result};
use crate::machine::rotor;
use crate::machine::{Plugboard, Wiring};
use crate::search::permutations::{permutations_of, product_of};
use crate::search::rewiring;
use crate::types::{MachineConfiguration, ReflectorChoice};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::iter;

/// Placeholder for a missing plugboard letter.
pub const PLACEHOLDER: char = '?';

/// The fields a search can leave open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Rotors,
    RingSettings,
    Positions,
    Reflector,
    PlugboardLetters,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Rotors => "rotors",
            Field::RingSettings => "ring_settings",
            Field::Positions => "initial_positions",
            Field::Reflector => "reflector",
            Field::PlugboardLetters => "plugboard_pairs",
        }
    }
}

/// A machine configuration with unknown fields left as `None`.
///
/// Plug pairs may carry [`PLACEHOLDER`] letters, e.g. `"A?"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfiguration {
    pub rotors: Option<Vec<String>>,
    pub ring_settings: Option<Vec<u8>>,
    pub positions: Option<Vec<char>>,
    pub reflector: Option<ReflectorChoice>,
    pub plugboard: Vec<String>,
    /// Free-form note attached by a generator, carried into match records.
    pub label: Option<String>,
}

impl From<MachineConfiguration> for PartialConfiguration {
    fn from(config: MachineConfiguration) -> Self {
        Self {
            rotors: Some(config.rotors),
            ring_settings: Some(config.ring_settings),
            positions: Some(config.positions),
            reflector: Some(config.reflector),
            plugboard: config.plugboard,
            label: None,
        }
    }
}

impl PartialConfiguration {
    pub fn unknown_fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if self.rotors.is_none() {
            fields.push(Field::Rotors);
        }
        if self.ring_settings.is_none() {
            fields.push(Field::RingSettings);
        }
        if self.positions.is_none() {
            fields.push(Field::Positions);
        }
        if self.reflector.is_none() {
            fields.push(Field::Reflector);
        }
        if self.placeholder_count() > 0 {
            fields.push(Field::PlugboardLetters);
        }
        fields
    }

    /// Number of rotors implied by whichever per-rotor list is known.
    pub fn rotor_count(&self) -> Option<usize> {
        self.rotors
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.ring_settings.as_ref().map(Vec::len))
            .or_else(|| self.positions.as_ref().map(Vec::len))
    }

    pub fn placeholder_count(&self) -> usize {
        self.plugboard
            .iter()
            .flat_map(|pair| pair.chars())
            .filter(|&c| c == PLACEHOLDER)
            .count()
    }

    /// Check every field that is already known, once, before searching.
    pub fn validate_known(&self) -> Result<()> {
        let lengths: Vec<usize> = [
            self.rotors.as_ref().map(Vec::len),
            self.ring_settings.as_ref().map(Vec::len),
            self.positions.as_ref().map(Vec::len),
        ]
        .into_iter()
        .flatten()
        .collect();
        if lengths.windows(2).any(|w| w[0] != w[1]) {
            return Err(ConfigurationError::LengthMismatch {
                rotors: self.rotors.as_ref().map_or(0, Vec::len),
                rings: self.ring_settings.as_ref().map_or(0, Vec::len),
                positions: self.positions.as_ref().map_or(0, Vec::len),
            }
            .into());
        }
        if let Some(count) = self.rotor_count() {
            if !(3..=4).contains(&count) {
                return Err(ConfigurationError::RotorCount(count).into());
            }
        }
        for name in self.rotors.iter().flatten() {
            rotor::rotor_spec(name)?;
        }
        for &ring in self.ring_settings.iter().flatten() {
            if !(1..=alphabet::SIZE).contains(&ring) {
                return Err(ConfigurationError::RingSetting(ring).into());
            }
        }
        for &position in self.positions.iter().flatten() {
            alphabet::index_of(position)?;
        }
        match &self.reflector {
            Some(ReflectorChoice::Named(name)) => {
                rotor::reflector_spec(name)?;
            }
            Some(ReflectorChoice::Custom(letters)) => {
                Wiring::reflector(letters)?;
            }
            None => {}
        }
        validate_plug_template(&self.plugboard)
    }

    /// Turn a fully filled-in candidate into a concrete configuration.
    pub fn resolve(self) -> Result<MachineConfiguration> {
        if self.placeholder_count() > 0 {
            return Err(ConfigurationError::Unresolved(Field::PlugboardLetters.as_str()).into());
        }
        Ok(MachineConfiguration {
            rotors: self
                .rotors
                .ok_or(ConfigurationError::Unresolved(Field::Rotors.as_str()))?,
            ring_settings: self
                .ring_settings
                .ok_or(ConfigurationError::Unresolved(Field::RingSettings.as_str()))?,
            positions: self
                .positions
                .ok_or(ConfigurationError::Unresolved(Field::Positions.as_str()))?,
            reflector: self
                .reflector
                .ok_or(ConfigurationError::Unresolved(Field::Reflector.as_str()))?,
            plugboard: self.plugboard,
        })
    }
}

/// Plug pairs with placeholders must still be two letters, no letter twice.
fn validate_plug_template(pairs: &[String]) -> Result<()> {
    let mut used = HashSet::new();
    let mut board = Plugboard::new();
    for pair in pairs {
        if !pair.contains(PLACEHOLDER) {
            board.add_pair(pair)?;
            continue;
        }
        let letters: Vec<char> = pair.chars().collect();
        if letters.len() != 2 || (letters[0] == letters[1] && letters[0] != PLACEHOLDER) {
            return Err(ConfigurationError::MalformedPlugPair(pair.clone()).into());
        }
        for c in letters.into_iter().filter(|&c| c != PLACEHOLDER) {
            let index = alphabet::index_of(c)
                .map_err(|_| ConfigurationError::MalformedPlugPair(pair.clone()))?;
            if !used.insert(index) || board.is_plugged(index) {
                return Err(ConfigurationError::PlugLetterInUse(alphabet::letter(index)).into());
            }
        }
    }
    if pairs.len() > crate::machine::plugboard::MAX_LEADS {
        return Err(ConfigurationError::TooManyPlugPairs {
            max: crate::machine::plugboard::MAX_LEADS,
        }
        .into());
    }
    // Placeholder letters must not collide with complete pairs added later.
    for index in used {
        if board.is_plugged(index) {
            return Err(ConfigurationError::PlugLetterInUse(alphabet::letter(index)).into());
        }
    }
    Ok(())
}

/// Lazy stream of candidates. `Err` items are generator defects.
pub type Candidates = Box<dyn Iterator<Item = Result<PartialConfiguration>> + Send>;

/// One axis of the search space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Try each named reflector.
    Reflector { candidates: Vec<String> },
    /// Try every initial window setting.
    Positions { allow_repeats: bool },
    /// Rotor order x reflector x ring settings. An empty `reflectors` list
    /// keeps the reflector already set.
    Multi {
        rotor_pool: Vec<String>,
        reflectors: Vec<String>,
        ring_pool: Vec<u8>,
    },
    /// Fill `?` plug slots with letters not used anywhere on the board.
    PlugboardLetters,
    /// Apply two successive wire exchanges to the chosen reflector.
    ReflectorRewiring,
}

impl Dimension {
    /// Fields this dimension fills in.
    pub fn fields(&self) -> Vec<Field> {
        match self {
            Dimension::Reflector { .. } => vec![Field::Reflector],
            Dimension::Positions { .. } => vec![Field::Positions],
            Dimension::Multi { reflectors, .. } if reflectors.is_empty() => {
                vec![Field::Rotors, Field::RingSettings]
            }
            Dimension::Multi { .. } => vec![Field::Rotors, Field::RingSettings, Field::Reflector],
            Dimension::PlugboardLetters => vec![Field::PlugboardLetters],
            Dimension::ReflectorRewiring => vec![],
        }
    }

    /// Nesting order: outer dimensions first. Rewiring needs a reflector.
    pub fn rank(&self) -> u8 {
        match self {
            Dimension::Multi { .. } => 0,
            Dimension::Reflector { .. } => 1,
            Dimension::Positions { .. } => 2,
            Dimension::PlugboardLetters => 3,
            Dimension::ReflectorRewiring => 4,
        }
    }

    /// Check the dimension's own parameters.
    pub fn validate(&self) -> Result<()> {
        let unsupported = |msg: String| -> EnigmaError {
            ConfigurationError::UnsupportedSearch(msg).into()
        };
        match self {
            Dimension::Reflector { candidates } => {
                if candidates.is_empty() {
                    return Err(unsupported("reflector search needs candidates".into()));
                }
                for name in candidates {
                    rotor::reflector_spec(name)?;
                }
            }
            Dimension::Multi {
                rotor_pool,
                reflectors,
                ring_pool,
            } => {
                for name in rotor_pool {
                    rotor::rotor_spec(name)?;
                }
                for name in reflectors {
                    rotor::reflector_spec(name)?;
                }
                for &ring in ring_pool {
                    if !(1..=alphabet::SIZE).contains(&ring) {
                        return Err(ConfigurationError::RingSetting(ring).into());
                    }
                }
            }
            Dimension::Positions { .. }
            | Dimension::PlugboardLetters
            | Dimension::ReflectorRewiring => {}
        }
        Ok(())
    }

    /// Every way this dimension can fill in `base`.
    pub fn expand(&self, base: PartialConfiguration) -> Result<Candidates> {
        match self {
            Dimension::Reflector { candidates } => {
                let names = candidates.clone();
                Ok(Box::new(names.into_iter().map(move |name| {
                    let mut candidate = base.clone();
                    candidate.reflector = Some(ReflectorChoice::Named(name));
                    Ok(candidate)
                })))
            }

            Dimension::Positions { allow_repeats } => {
                let count = base
                    .rotor_count()
                    .ok_or(ConfigurationError::Unresolved(Field::Rotors.as_str()))?;
                let letters: Vec<char> = ALPHABET.iter().map(|&b| b as char).collect();
                let settings: Box<dyn Iterator<Item = Vec<char>> + Send> = if *allow_repeats {
                    Box::new(product_of(letters, count))
                } else {
                    Box::new(permutations_of(letters, count))
                };
                Ok(Box::new(settings.map(move |positions| {
                    let mut candidate = base.clone();
                    candidate.positions = Some(positions);
                    Ok(candidate)
                })))
            }

            Dimension::Multi {
                rotor_pool,
                reflectors,
                ring_pool,
            } => {
                let count = base.rotor_count().unwrap_or(3);
                let reflectors: Vec<Option<String>> = if reflectors.is_empty() {
                    vec![None]
                } else {
                    reflectors.iter().cloned().map(Some).collect()
                };
                let ring_pool = ring_pool.clone();
                let orders = permutations_of(rotor_pool.clone(), count);
                Ok(Box::new(orders.flat_map(move |rotors| {
                    let base = base.clone();
                    let ring_pool = ring_pool.clone();
                    reflectors.clone().into_iter().flat_map(move |reflector| {
                        let base = base.clone();
                        let rotors = rotors.clone();
                        permutations_of(ring_pool.clone(), count).map(move |rings| {
                            let mut candidate = base.clone();
                            candidate.rotors = Some(rotors.clone());
                            candidate.ring_settings = Some(rings);
                            if let Some(name) = &reflector {
                                candidate.reflector = Some(ReflectorChoice::Named(name.clone()));
                            }
                            Ok(candidate)
                        })
                    })
                })))
            }

            Dimension::PlugboardLetters => {
                let used: HashSet<char> = base
                    .plugboard
                    .iter()
                    .flat_map(|pair| pair.chars())
                    .filter(|&c| c != PLACEHOLDER)
                    .map(|c| c.to_ascii_uppercase())
                    .collect();
                let free: Vec<char> = ALPHABET
                    .iter()
                    .map(|&b| b as char)
                    .filter(|c| !used.contains(c))
                    .collect();
                let slots = base.placeholder_count();
                Ok(Box::new(permutations_of(free, slots).map(move |letters| {
                    let mut fill = letters.into_iter();
                    let mut candidate = base.clone();
                    candidate.plugboard = base
                        .plugboard
                        .iter()
                        .map(|pair| {
                            pair.chars()
                                .map(|c| {
                                    if c == PLACEHOLDER {
                                        fill.next().unwrap_or(PLACEHOLDER)
                                    } else {
                                        c
                                    }
                                })
                                .collect()
                        })
                        .collect();
                    Ok(candidate)
                })))
            }

            Dimension::ReflectorRewiring => {
                let (name, wiring) = match &base.reflector {
                    Some(ReflectorChoice::Named(name)) => {
                        (name.clone(), rotor::reflector_spec(name)?.wiring)
                    }
                    Some(ReflectorChoice::Custom(letters)) => {
                        ("custom".to_string(), Wiring::reflector(letters)?)
                    }
                    None => {
                        return Err(
                            ConfigurationError::Unresolved(Field::Reflector.as_str()).into()
                        )
                    }
                };
                Ok(Box::new(rewiring::double_exchanges(&wiring).map(
                    move |(first, second)| {
                        let rewired = rewiring::rewire(&wiring, &first, &second);
                        let mut candidate = base.clone();
                        candidate.reflector = Some(ReflectorChoice::Custom(rewired.to_letters()));
                        candidate.label = Some(format!("{} rewired: {}; {}", name, first, second));
                        Ok(candidate)
                    },
                )))
            }
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Reflector { candidates } => {
                write!(f, "reflector in {}", candidates.join("/"))
            }
            Dimension::Positions { allow_repeats: true } => write!(f, "positions (repeats)"),
            Dimension::Positions { allow_repeats: false } => write!(f, "positions (distinct)"),
            Dimension::Multi {
                rotor_pool,
                reflectors,
                ring_pool,
            } => write!(
                f,
                "rotors from {} x reflectors {} x rings from {:?}",
                rotor_pool.join("/"),
                if reflectors.is_empty() {
                    "fixed".to_string()
                } else {
                    reflectors.join("/")
                },
                ring_pool
            ),
            Dimension::PlugboardLetters => write!(f, "missing plug letters"),
            Dimension::ReflectorRewiring => write!(f, "reflector rewiring"),
        }
    }
}

/// Nest `dimensions` over `base`, outermost first.
pub fn generate(base: PartialConfiguration, dimensions: &[Dimension]) -> Candidates {
    let mut candidates: Candidates = Box::new(iter::once(Ok(base)));
    for dimension in dimensions.iter().cloned() {
        candidates = Box::new(candidates.flat_map(move |item| -> Candidates {
            match item.and_then(|candidate| dimension.expand(candidate)) {
                Ok(expanded) => expanded,
                Err(err) => Box::new(iter::once(Err(err))),
            }
        }));
    }
    candidates
}
