//! Clue metadata with its shape checked up front.

use crate::pattern::Pattern;
use crate::validate::{Verdict, validate};
use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

/// A crossword clue: answer length, known letters and the clue text.
///
/// Construction through [`Clue::new`] guarantees that the answer length is
/// positive and that the pattern has exactly that many characters.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Clue {
    /// Number of letters in the answer.
    num_letters: usize,
    /// Known letters and their placement.
    pattern: Pattern,
    /// Free-text clue.
    hint: String,
}

impl Clue {
    /// Builds a clue, rejecting empty answers and mismatched pattern lengths.
    #[track_caller]
    #[instrument(skip(hint))]
    pub fn new(
        num_letters: usize,
        letters_and_placement: &str,
        hint: impl Into<String>,
    ) -> Result<Self, ClueError> {
        if num_letters == 0 {
            warn!("Rejected clue with zero letters");
            return Err(ClueError::new(ClueErrorKind::ZeroLength));
        }

        let pattern = Pattern::parse(letters_and_placement);
        if pattern.len() != num_letters {
            warn!(
                expected = num_letters,
                found = pattern.len(),
                "Rejected clue with mismatched pattern length"
            );
            return Err(ClueError::new(ClueErrorKind::PatternLength {
                expected: num_letters,
                found: pattern.len(),
            }));
        }

        debug!(known_letters = pattern.known_letters(), "Clue accepted");
        Ok(Self {
            num_letters,
            pattern,
            hint: hint.into(),
        })
    }

    /// Checks a candidate answer against this clue.
    pub fn check(&self, word: &str) -> Verdict {
        validate(word, self.num_letters, &self.pattern)
    }
}

/// Reason a clue was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClueErrorKind {
    /// The answer must have at least one letter.
    #[display("Number of letters must be positive.")]
    ZeroLength,
    /// The pattern length differs from the number of letters.
    #[display("Pattern has {found} characters but the answer has {expected} letters.")]
    PatternLength {
        /// Declared number of letters.
        expected: usize,
        /// Characters in the pattern.
        found: usize,
    },
}

/// Clue construction error.
#[derive(Debug, Clone, Display, Error)]
#[display("Clue error: {} at {}:{}", kind, file, line)]
pub struct ClueError {
    /// What was wrong with the clue.
    pub kind: ClueErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClueError {
    /// Creates a new clue error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ClueErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
