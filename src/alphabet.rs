// SPDX-License-Identifier: PMPL-1.0-or-later

//! The 26-letter working alphabet every index is computed against.

use crate::error::{EnigmaError, Result};

pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const SIZE: u8 = 26;

/// Index of `c` in the alphabet. Lowercase input is accepted.
pub fn index_of(c: char) -> Result<u8> {
    let upper = c.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Ok(upper as u8 - b'A')
    } else {
        Err(EnigmaError::Alphabet(c))
    }
}

pub fn letter(index: u8) -> char {
    ALPHABET[(index % SIZE) as usize] as char
}

/// Rotate an index by a signed amount, wrapping around the alphabet.
pub fn shift(index: u8, by: i32) -> u8 {
    (index as i32 + by).rem_euclid(SIZE as i32) as u8
}

/// Upper-case a message and reject anything outside A-Z, whitespace included.
pub fn normalize(message: &str) -> Result<String> {
    message
        .chars()
        .map(|c| index_of(c).map(letter))
        .collect()
}
