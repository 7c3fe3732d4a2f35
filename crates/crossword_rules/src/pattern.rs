//! Letter placement patterns.
//!
//! A pattern describes what is already known about a crossword answer: one
//! slot per letter, where each slot is either a fixed letter or the wildcard
//! `_`. For example `C_T__` describes a five letter word starting with `C`
//! whose third letter is `T`.

use std::fmt;
use tracing::instrument;

/// Placeholder character accepting any letter.
pub const WILDCARD: char = '_';

/// A single position in a placement pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Any character is accepted here.
    Wildcard,
    /// Only this exact character is accepted here.
    Letter(char),
}

impl Slot {
    /// Reads a slot from its pattern character.
    pub fn from_char(c: char) -> Self {
        if c == WILDCARD {
            Self::Wildcard
        } else {
            Self::Letter(c)
        }
    }

    /// Returns the pattern character for this slot.
    pub fn to_char(self) -> char {
        match self {
            Self::Wildcard => WILDCARD,
            Self::Letter(c) => c,
        }
    }

    /// Checks whether `c` may occupy this slot.
    ///
    /// Comparison is case-sensitive.
    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Letter(expected) => expected == c,
        }
    }
}

/// A parsed `letters_and_placement` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pattern {
    slots: Vec<Slot>,
}

impl Pattern {
    /// Parses a pattern. Every character is meaningful, so parsing cannot fail.
    #[instrument]
    pub fn parse(text: &str) -> Self {
        Self {
            slots: text.chars().map(Slot::from_char).collect(),
        }
    }

    /// Number of slots (characters, not bytes).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the pattern has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slots in order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of fixed letters in the pattern.
    pub fn known_letters(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Letter(_)))
            .count()
    }

    /// Returns the 1-based position of the first slot that rejects the
    /// corresponding character of `word`.
    ///
    /// Only positions present in both the pattern and the word are compared.
    pub fn first_mismatch(&self, word: &str) -> Option<usize> {
        self.slots
            .iter()
            .zip(word.chars())
            .position(|(slot, c)| !slot.accepts(c))
            .map(|index| index + 1)
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            write!(f, "{}", slot.to_char())?;
        }
        Ok(())
    }
}
