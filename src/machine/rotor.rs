// SPDX-License-Identifier: PMPL-1.0-or-later

//! Wheel catalogue and per-trial wheel state.
//!
//! The catalogue is a set of `static` tables evaluated at compile time, so
//! every engine reads the same immutable wiring. A [`RotorState`] copies the
//! wiring it needs; nothing a trial does can leak into another trial.

use crate::alphabet::{self, SIZE};
use crate::error::{ConfigurationError, EnigmaError, Result};

/// A 26-entry bijection with its inverse precomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wiring {
    forward: [u8; 26],
    backward: [u8; 26],
}

impl Wiring {
    /// Build from a published table such as `b"EKMFLGDQVZNTOWYHXUSPAIBRCJ"`.
    ///
    /// Only used for the compiled-in catalogue; the unit tests check every
    /// entry is a bijection.
    const fn from_table(table: &[u8; 26]) -> Self {
        let mut forward = [0u8; 26];
        let mut backward = [0u8; 26];
        let mut i = 0;
        while i < 26 {
            let out = table[i] - b'A';
            forward[i] = out;
            backward[out as usize] = i as u8;
            i += 1;
        }
        Self { forward, backward }
    }

    pub const fn identity() -> Self {
        Self::from_table(alphabet::ALPHABET)
    }

    /// Parse and validate a substitute reflector wiring: 26 letters forming
    /// a fixed-point-free involution.
    pub fn reflector(letters: &str) -> Result<Self> {
        let invalid = |reason: &str| -> EnigmaError {
            ConfigurationError::ReflectorWiring {
                wiring: letters.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let indices: Vec<u8> = letters
            .chars()
            .map(alphabet::index_of)
            .collect::<Result<_>>()?;
        if indices.len() != SIZE as usize {
            return Err(invalid("expected 26 letters"));
        }

        let mut forward = [0u8; 26];
        forward.copy_from_slice(&indices);
        for (i, &out) in forward.iter().enumerate() {
            if out as usize == i {
                return Err(invalid("a letter reflects onto itself"));
            }
            if forward[out as usize] as usize != i {
                return Err(invalid("wiring is not an involution"));
            }
        }
        // An involution is its own inverse.
        Ok(Self {
            forward,
            backward: forward,
        })
    }

    pub fn forward(&self, index: u8) -> u8 {
        self.forward[index as usize]
    }

    pub fn backward(&self, index: u8) -> u8 {
        self.backward[index as usize]
    }

    /// Reconnect `a` and `b` to each other. Only meaningful on involutions;
    /// the caller is responsible for keeping the wiring one.
    pub fn connect(&mut self, a: u8, b: u8) {
        self.forward[a as usize] = b;
        self.forward[b as usize] = a;
        self.backward[a as usize] = b;
        self.backward[b as usize] = a;
    }

    /// Wire pairs `(a, b)` with `a < b`, ordered by `a`. Fixed points are skipped.
    pub fn pairs(&self) -> Vec<(u8, u8)> {
        (0..SIZE)
            .filter_map(|a| {
                let b = self.forward(a);
                (a < b).then_some((a, b))
            })
            .collect()
    }

    pub fn is_involution(&self) -> bool {
        (0..SIZE).all(|i| self.forward(self.forward(i)) == i)
    }

    pub fn to_letters(&self) -> String {
        self.forward.iter().map(|&i| alphabet::letter(i)).collect()
    }
}

/// A published wheel definition.
#[derive(Debug)]
pub struct RotorSpec {
    pub name: &'static str,
    pub wiring: Wiring,
    /// Window letter at which this rotor carries the next one.
    pub notch: Option<u8>,
}

const fn rotor(name: &'static str, table: &[u8; 26], notch: Option<u8>) -> RotorSpec {
    RotorSpec {
        name,
        wiring: Wiring::from_table(table),
        notch,
    }
}

const fn notch(letter: u8) -> Option<u8> {
    Some(letter - b'A')
}

pub static ROTORS: [RotorSpec; 7] = [
    rotor("I", b"EKMFLGDQVZNTOWYHXUSPAIBRCJ", notch(b'Q')),
    rotor("II", b"AJDKSIRUXBLHWTMCQGZNPYFVOE", notch(b'E')),
    rotor("III", b"BDFHJLCPRTXVZNYEIWGAKMUSQO", notch(b'V')),
    rotor("IV", b"ESOVPZJAYQUIRHXLNFTGKDCMWB", notch(b'J')),
    rotor("V", b"VZBRGITYUPSDNHLXAWMJQOFECK", notch(b'Z')),
    rotor("Beta", b"LEYJVCNIXWPBQMDRTAKZGFUHOS", None),
    rotor("Gamma", b"FSOKANUERHMBTIYCWLQPZXVGJD", None),
];

pub static REFLECTORS: [RotorSpec; 3] = [
    rotor("A", b"EJMZALYXVBWFCRQUONTSPIKHGD", None),
    rotor("B", b"YRUHQSLDPXNGOKMIEBFZCWVJAT", None),
    rotor("C", b"FVPJIAOYEDRZXWGCTKUQSBNMHL", None),
];

pub fn rotor_spec(name: &str) -> Result<&'static RotorSpec> {
    ROTORS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigurationError::UnknownRotor(name.to_string()).into())
}

pub fn reflector_spec(name: &str) -> Result<&'static RotorSpec> {
    REFLECTORS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigurationError::UnknownReflector(name.to_string()).into())
}

pub fn rotor_names() -> Vec<&'static str> {
    ROTORS.iter().map(|spec| spec.name).collect()
}

pub fn reflector_names() -> Vec<&'static str> {
    REFLECTORS.iter().map(|spec| spec.name).collect()
}

/// One wheel as mounted for a single trial.
///
/// `ring` and `offset` are both zero-based. The signal enters at a contact
/// index, is shifted into the wheel's own frame by `offset - ring`, passes
/// the wiring and is shifted back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorState {
    name: &'static str,
    wiring: Wiring,
    notch: Option<u8>,
    ring: u8,
    offset: u8,
    stepping: bool,
}

impl RotorState {
    /// Mount a rotor with a ring setting in `1..=26` and an initial window letter.
    pub fn mount(spec: &RotorSpec, ring_setting: u8, position: char) -> Result<Self> {
        if !(1..=SIZE).contains(&ring_setting) {
            return Err(ConfigurationError::RingSetting(ring_setting).into());
        }
        Ok(Self {
            name: spec.name,
            wiring: spec.wiring,
            notch: spec.notch,
            ring: ring_setting - 1,
            offset: alphabet::index_of(position)?,
            stepping: true,
        })
    }

    pub fn reflector(spec: &RotorSpec) -> Self {
        Self::fixed_wheel(spec.name, spec.wiring)
    }

    /// A reflector built from a private wiring, e.g. a rewired candidate.
    pub fn custom_reflector(wiring: Wiring) -> Self {
        Self::fixed_wheel("custom", wiring)
    }

    /// The static entry wheel between plugboard and rotors.
    pub fn housing() -> Self {
        Self::fixed_wheel("Housing", Wiring::identity())
    }

    fn fixed_wheel(name: &'static str, wiring: Wiring) -> Self {
        Self {
            name,
            wiring,
            notch: None,
            ring: 0,
            offset: 0,
            stepping: false,
        }
    }

    /// Keep the current alignment but never step again (fourth rotor).
    pub fn pinned(mut self) -> Self {
        self.stepping = false;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_stepping(&self) -> bool {
        self.stepping
    }

    pub fn position(&self) -> char {
        alphabet::letter(self.offset)
    }

    pub fn at_notch(&self) -> bool {
        self.notch == Some(self.offset)
    }

    pub fn advance(&mut self) {
        if self.stepping {
            self.offset = (self.offset + 1) % SIZE;
        }
    }

    fn frame(&self) -> i32 {
        self.offset as i32 - self.ring as i32
    }

    /// Right-to-left pass: contact index in, pin index out.
    pub fn forward(&self, contact: u8) -> u8 {
        let frame = self.frame();
        let out = self.wiring.forward(alphabet::shift(contact, frame));
        alphabet::shift(out, -frame)
    }

    /// Left-to-right pass: pin index in, contact index out.
    pub fn backward(&self, pin: u8) -> u8 {
        let frame = self.frame();
        let out = self.wiring.backward(alphabet::shift(pin, frame));
        alphabet::shift(out, -frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_tables_are_bijections() {
        for spec in ROTORS.iter().chain(REFLECTORS.iter()) {
            for i in 0..SIZE {
                assert_eq!(spec.wiring.backward(spec.wiring.forward(i)), i, "{}", spec.name);
            }
        }
    }

    #[test]
    fn test_reflectors_are_fixed_point_free_involutions() {
        for spec in REFLECTORS.iter() {
            assert!(spec.wiring.is_involution(), "{}", spec.name);
            assert!((0..SIZE).all(|i| spec.wiring.forward(i) != i));
            assert_eq!(spec.wiring.pairs().len(), 13);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(rotor_spec("beta").unwrap().name, "Beta");
        assert_eq!(reflector_spec("b").unwrap().name, "B");
        assert!(rotor_spec("VI").is_err());
        assert!(reflector_spec("D").is_err());
    }

    #[test]
    fn test_ring_setting_bounds() {
        let spec = rotor_spec("I").unwrap();
        assert!(RotorState::mount(spec, 0, 'A').is_err());
        assert!(RotorState::mount(spec, 27, 'A').is_err());
        assert!(RotorState::mount(spec, 26, 'A').is_ok());
    }

    #[test]
    fn test_rotor_i_at_rest_matches_published_table() {
        let state = RotorState::mount(rotor_spec("I").unwrap(), 1, 'A').unwrap();
        assert_eq!(alphabet::letter(state.forward(0)), 'E');
        assert_eq!(alphabet::letter(state.backward(4)), 'A');
    }

    #[test]
    fn test_ring_and_position_cancel_out() {
        // Ring B with window B presents the same wiring as ring A, window A.
        let spec = rotor_spec("III").unwrap();
        let rest = RotorState::mount(spec, 1, 'A').unwrap();
        let shifted = RotorState::mount(spec, 2, 'B').unwrap();
        for i in 0..SIZE {
            assert_eq!(rest.forward(i), shifted.forward(i));
        }
    }

    #[test]
    fn test_pinned_rotor_does_not_advance() {
        let mut state = RotorState::mount(rotor_spec("IV").unwrap(), 1, 'Z')
            .unwrap()
            .pinned();
        state.advance();
        assert_eq!(state.position(), 'Z');
        assert!(!state.is_stepping());
    }

    #[test]
    fn test_notch_wraps_with_position() {
        let mut state = RotorState::mount(rotor_spec("V").unwrap(), 1, 'Y').unwrap();
        assert!(!state.at_notch());
        state.advance();
        assert!(state.at_notch());
        state.advance();
        assert_eq!(state.position(), 'A');
    }

    #[test]
    fn test_custom_reflector_validation() {
        let b = reflector_spec("B").unwrap().wiring.to_letters();
        assert!(Wiring::reflector(&b).is_ok());
        assert!(Wiring::reflector("ABC").is_err());
        // Identity has fixed points.
        assert!(Wiring::reflector("ABCDEFGHIJKLMNOPQRSTUVWXYZ").is_err());
        // Rotor I is a bijection but not an involution.
        assert!(Wiring::reflector("EKMFLGDQVZNTOWYHXUSPAIBRCJ").is_err());
    }

    #[test]
    fn test_connect_keeps_involution() {
        let mut wiring = reflector_spec("B").unwrap().wiring;
        // B pairs A-Y and I-P; exchange into A-P and Y-I.
        wiring.connect(0, 15);
        wiring.connect(24, 8);
        assert!(wiring.is_involution());
        assert_eq!(wiring.forward(0), 15);
        assert_eq!(wiring.backward(8), 24);
    }
}
