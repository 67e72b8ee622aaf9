// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the machine and the search engine.

use thiserror::Error;

/// A machine setting that cannot be turned into a working engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unknown rotor: {0}")]
    UnknownRotor(String),

    #[error("unknown reflector: {0}")]
    UnknownReflector(String),

    #[error("ring setting {0} is outside 1..=26")]
    RingSetting(u8),

    #[error("malformed plug pair {0:?}: expected two distinct letters")]
    MalformedPlugPair(String),

    #[error("plug letter {0} is already used by another lead")]
    PlugLetterInUse(char),

    #[error("plugboard already holds the maximum of {max} leads")]
    TooManyPlugPairs { max: usize },

    #[error("rotor, ring and position lists differ in length ({rotors}/{rings}/{positions})")]
    LengthMismatch {
        rotors: usize,
        rings: usize,
        positions: usize,
    },

    #[error("a machine takes 3 or 4 rotors, got {0}")]
    RotorCount(usize),

    #[error("reflector wiring {wiring:?} is invalid: {reason}")]
    ReflectorWiring { wiring: String, reason: String },

    #[error("cannot read {field} from {value:?}")]
    MalformedField { field: &'static str, value: String },

    #[error("field {0} is still unknown")]
    Unresolved(&'static str),

    #[error("unsupported search: {0}")]
    UnsupportedSearch(String),
}

/// Errors produced by the engine and the search engine.
#[derive(Debug, Error)]
pub enum EnigmaError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("character {0:?} is outside the A-Z alphabet")]
    Alphabet(char),

    #[error("candidate #{index} is malformed: {source}")]
    MalformedCandidate {
        index: usize,
        #[source]
        source: Box<EnigmaError>,
    },

    #[error("result sink failed: {0}")]
    Sink(#[from] std::io::Error),
}

impl EnigmaError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, EnigmaError::Configuration(_))
    }
}

pub type Result<T, E = EnigmaError> = std::result::Result<T, E>;
