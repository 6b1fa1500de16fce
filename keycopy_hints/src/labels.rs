// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label allocation.
//!
//! Every candidate of an activation gets a label of the same length `L`, the
//! smallest `L >= 1` with `radix^L >= count`. Labels are the first `count`
//! strings of length `L` in lexicographic symbol order, assigned in document
//! order. Equal lengths make the set prefix-free, so typing a full label never
//! leaves another label as an extension of it.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::HintError;
use crate::forest::CandidateForest;

/// The ordered symbol set labels are drawn from.
///
/// Symbol order defines label order: the first symbol plays the role of `0`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// The ten decimal digits in value order.
    pub fn digits() -> Self {
        Self {
            symbols: "0123456789".chars().collect(),
        }
    }

    /// Build an alphabet from distinct, non-whitespace symbols.
    ///
    /// At least two symbols are required so that label length can grow.
    pub fn new(symbols: &str) -> Result<Self, HintError> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.len() < 2 {
            return Err(HintError::InvalidAlphabet("needs at least two symbols"));
        }
        if symbols.iter().any(|c| c.is_whitespace()) {
            return Err(HintError::InvalidAlphabet("whitespace is reserved"));
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(HintError::InvalidAlphabet("symbols must be distinct"));
            }
        }
        Ok(Self { symbols })
    }

    /// The symbols in order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Number of symbols.
    pub fn radix(&self) -> usize {
        self.symbols.len()
    }

    /// Whether `c` is one of the symbols.
    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::digits()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl TryFrom<String> for Alphabet {
    type Error = HintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(value: Alphabet) -> Self {
        value.symbols.into_iter().collect()
    }
}

/// Length of every label when `count` labels are drawn from `radix` symbols.
pub fn label_length(count: usize, radix: usize) -> usize {
    let mut len = 1;
    let mut capacity = radix;
    while capacity < count {
        len += 1;
        capacity = capacity.saturating_mul(radix);
    }
    len
}

/// The first `count` labels of minimal equal length, in lexicographic order.
///
/// ```
/// use keycopy_hints::{allocate, Alphabet};
/// let labels = allocate(12, &Alphabet::digits());
/// assert_eq!(labels.first().map(String::as_str), Some("00"));
/// assert_eq!(labels.last().map(String::as_str), Some("11"));
/// ```
pub fn allocate(count: usize, alphabet: &Alphabet) -> Vec<String> {
    let symbols = alphabet.symbols();
    let radix = symbols.len();
    let len = label_length(count, radix);
    let mut digits = alloc::vec![0_usize; len];
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(digits.iter().map(|&d| symbols[d]).collect());
        // Odometer increment, least significant symbol last.
        for d in digits.iter_mut().rev() {
            *d += 1;
            if *d < radix {
                break;
            }
            *d = 0;
        }
    }
    out
}

/// Label every candidate of `forest` in document order.
pub fn assign_labels<E: Copy>(forest: &mut CandidateForest<E>, alphabet: &Alphabet) {
    let labels = allocate(forest.len(), alphabet);
    for (candidate, label) in forest.candidates_mut().iter_mut().zip(labels) {
        candidate.label = label;
    }
}
