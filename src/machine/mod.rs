// SPDX-License-Identifier: PMPL-1.0-or-later

//! The encryption engine: plugboard, entry wheel, rotor chain, reflector.
//!
//! Rotors are held in a plain `Vec` indexed from the rightmost rotor (0,
//! next to the entry wheel) to the leftmost (next to the reflector). The
//! forward pass walks the vector upwards, the return pass walks it back down.

pub mod plugboard;
pub mod rotor;

pub use plugboard::Plugboard;
pub use rotor::{RotorSpec, RotorState, Wiring};

use crate::alphabet;
use crate::error::{ConfigurationError, Result};
use crate::types::{EngineOutput, MachineConfiguration, ReflectorChoice};

/// One machine, good for exactly one message.
#[derive(Debug, Clone)]
pub struct EncryptionEngine {
    plugboard: Plugboard,
    housing: RotorState,
    rotors: Vec<RotorState>,
    reflector: RotorState,
}

impl EncryptionEngine {
    /// Validate `config` and mount every wheel at its initial position.
    pub fn new(config: &MachineConfiguration) -> Result<Self> {
        let count = config.rotors.len();
        if count != config.ring_settings.len() || count != config.positions.len() {
            return Err(ConfigurationError::LengthMismatch {
                rotors: count,
                rings: config.ring_settings.len(),
                positions: config.positions.len(),
            }
            .into());
        }
        if !(3..=4).contains(&count) {
            return Err(ConfigurationError::RotorCount(count).into());
        }

        let mut rotors = Vec::with_capacity(count);
        let mounted = config
            .rotors
            .iter()
            .zip(&config.ring_settings)
            .zip(&config.positions)
            .enumerate()
            .rev();
        for (slot, ((name, &ring), &position)) in mounted {
            let state = RotorState::mount(rotor::rotor_spec(name)?, ring, position)?;
            // The leftmost wheel of a four-rotor machine has no drive pawl.
            if count == 4 && slot == 0 {
                rotors.push(state.pinned());
            } else {
                rotors.push(state);
            }
        }

        let reflector = match &config.reflector {
            ReflectorChoice::Named(name) => RotorState::reflector(rotor::reflector_spec(name)?),
            ReflectorChoice::Custom(letters) => {
                RotorState::custom_reflector(Wiring::reflector(letters)?)
            }
        };

        Ok(Self {
            plugboard: Plugboard::from_pairs(&config.plugboard)?,
            housing: RotorState::housing(),
            rotors,
            reflector,
        })
    }

    /// Build an engine and run `message` through it.
    pub fn encode_message(config: &MachineConfiguration, message: &str) -> Result<EngineOutput> {
        let mut engine = Self::new(config)?;
        let text = engine.encode(message)?;
        Ok(EngineOutput {
            text,
            final_positions: engine.positions(),
        })
    }

    /// Advance the rotor chain for one key press.
    ///
    /// The right rotor always steps. The middle rotor steps when the right
    /// rotor shows its notch, and also when it shows its own notch, in which
    /// case it takes the left rotor with it (the double step).
    pub fn step(&mut self) {
        let [right, middle, left, ..] = &mut self.rotors[..] else {
            return;
        };

        if middle.at_notch() {
            middle.advance();
            left.advance();
        } else if right.at_notch() {
            middle.advance();
        }
        right.advance();
    }

    pub fn encode_index(&mut self, input: u8) -> u8 {
        let mut signal = self.plugboard.encode(input);
        self.step();

        signal = self.housing.forward(signal);
        for rotor in &self.rotors {
            signal = rotor.forward(signal);
        }
        signal = self.reflector.forward(signal);
        for rotor in self.rotors.iter().rev() {
            signal = rotor.backward(signal);
        }
        signal = self.housing.backward(signal);

        self.plugboard.encode(signal)
    }

    pub fn encode_char(&mut self, c: char) -> Result<char> {
        let index = alphabet::index_of(c)?;
        Ok(alphabet::letter(self.encode_index(index)))
    }

    /// Encode a whole message. State carries over from one letter to the next.
    pub fn encode(&mut self, message: &str) -> Result<String> {
        let indices: Vec<u8> = message
            .chars()
            .map(alphabet::index_of)
            .collect::<Result<_>>()?;
        Ok(indices
            .into_iter()
            .map(|i| alphabet::letter(self.encode_index(i)))
            .collect())
    }

    /// Current window letters, leftmost first.
    pub fn positions(&self) -> Vec<char> {
        self.rotors.iter().rev().map(RotorState::position).collect()
    }

    pub fn rotors(&self) -> &[RotorState] {
        &self.rotors
    }

    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }
}
