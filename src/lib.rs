// SPDX-License-Identifier: PMPL-1.0-or-later

//! Enigma-Breaker: a bit-exact rotor cipher machine and an exhaustive
//! crib-driven codebreaker.
//!
//! ENGINE PILLARS:
//! 1. **Machine**: plugboard, stepping rotor chain and reflector. One
//!    engine per message, with the double-step anomaly reproduced.
//! 2. **Search**: enumerates every candidate setting for the unknown
//!    fields, decodes the ciphertext with each and reports crib matches.
//! 3. **Report**: live match sinks plus serialized crack reports.

pub mod alphabet;
pub mod demos;
pub mod error;
pub mod machine;
pub mod report;
pub mod search;
pub mod settings;
pub mod tasks;
pub mod types;

pub use error::{ConfigurationError, EnigmaError, Result};
pub use machine::EncryptionEngine;
pub use search::{MatchSink, SearchEngine, SearchOptions, SearchSummary, SearchTask};
pub use settings::Settings;
pub use types::{EngineOutput, MachineConfiguration, MatchRecord, ReflectorChoice};
