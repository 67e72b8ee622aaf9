// SPDX-License-Identifier: PMPL-1.0-or-later

//! Plugboard: up to ten disjoint letter swaps applied on the way in and out.

use crate::alphabet;
use crate::error::{ConfigurationError, Result};

pub const MAX_LEADS: usize = 10;

/// A letter-pair involution. Unplugged letters map to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    mapping: [u8; 26],
    leads: Vec<(u8, u8)>,
}

impl Default for Plugboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugboard {
    pub fn new() -> Self {
        let mut mapping = [0u8; 26];
        for (i, slot) in mapping.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self {
            mapping,
            leads: Vec::with_capacity(MAX_LEADS),
        }
    }

    /// Build a plugboard from pairs such as `["HL", "MO"]`.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
        let mut board = Self::new();
        for pair in pairs {
            board.add_pair(pair.as_ref())?;
        }
        Ok(board)
    }

    /// Plug a lead between two distinct, currently unused letters.
    pub fn add_pair(&mut self, pair: &str) -> Result<()> {
        let malformed = || ConfigurationError::MalformedPlugPair(pair.to_string());

        let letters: Vec<char> = pair.chars().collect();
        let [a, b] = letters[..] else {
            return Err(malformed().into());
        };
        let a = alphabet::index_of(a).map_err(|_| malformed())?;
        let b = alphabet::index_of(b).map_err(|_| malformed())?;
        if a == b {
            return Err(malformed().into());
        }
        if self.leads.len() >= MAX_LEADS {
            return Err(ConfigurationError::TooManyPlugPairs { max: MAX_LEADS }.into());
        }
        for letter in [a, b] {
            if self.is_plugged(letter) {
                return Err(ConfigurationError::PlugLetterInUse(alphabet::letter(letter)).into());
            }
        }

        self.mapping[a as usize] = b;
        self.mapping[b as usize] = a;
        self.leads.push((a, b));
        Ok(())
    }

    pub fn encode(&self, index: u8) -> u8 {
        self.mapping[index as usize]
    }

    pub fn encode_char(&self, c: char) -> Result<char> {
        Ok(alphabet::letter(self.encode(alphabet::index_of(c)?)))
    }

    pub fn is_plugged(&self, index: u8) -> bool {
        self.mapping[index as usize] != index
    }

    pub fn lead_count(&self) -> usize {
        self.leads.len()
    }

    /// Leads as two-letter strings, in insertion order.
    pub fn pairs(&self) -> Vec<String> {
        self.leads
            .iter()
            .map(|&(a, b)| [alphabet::letter(a), alphabet::letter(b)].iter().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnigmaError;

    fn config_err(result: Result<()>) -> ConfigurationError {
        match result {
            Err(EnigmaError::Configuration(err)) => err,
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_board_is_identity() {
        let board = Plugboard::new();
        for i in 0..26 {
            assert_eq!(board.encode(i), i);
        }
    }

    #[test]
    fn test_encode_is_an_involution() {
        let board =
            Plugboard::from_pairs(&["HL", "MO", "AJ", "CX", "BZ", "SR", "NI", "YW", "DG", "PK"])
                .unwrap();
        for i in 0..26 {
            assert_eq!(board.encode(board.encode(i)), i);
        }
        assert_eq!(board.encode_char('H').unwrap(), 'L');
        assert_eq!(board.encode_char('L').unwrap(), 'H');
        assert_eq!(board.encode_char('E').unwrap(), 'E');
    }

    #[test]
    fn test_rejects_reused_letter() {
        let mut board = Plugboard::new();
        board.add_pair("SA").unwrap();
        assert_eq!(
            config_err(board.add_pair("SP")),
            ConfigurationError::PlugLetterInUse('S')
        );
        assert_eq!(board.lead_count(), 1);
    }

    #[test]
    fn test_rejects_single_letter_and_self_plug() {
        let mut board = Plugboard::new();
        assert!(matches!(
            config_err(board.add_pair("S")),
            ConfigurationError::MalformedPlugPair(_)
        ));
        assert!(matches!(
            config_err(board.add_pair("EE")),
            ConfigurationError::MalformedPlugPair(_)
        ));
        assert!(matches!(
            config_err(board.add_pair("ABC")),
            ConfigurationError::MalformedPlugPair(_)
        ));
        assert!(matches!(
            config_err(board.add_pair("A?")),
            ConfigurationError::MalformedPlugPair(_)
        ));
    }

    #[test]
    fn test_rejects_eleventh_lead() {
        let mut board =
            Plugboard::from_pairs(&["AB", "CD", "EF", "GH", "IJ", "KL", "MN", "OP", "QR", "ST"])
                .unwrap();
        assert_eq!(
            config_err(board.add_pair("UV")),
            ConfigurationError::TooManyPlugPairs { max: 10 }
        );
    }

    #[test]
    fn test_pairs_are_reported_upper_case() {
        let board = Plugboard::from_pairs(&["hl", "Mo"]).unwrap();
        assert_eq!(board.pairs(), vec!["HL".to_string(), "MO".to_string()]);
    }
}
