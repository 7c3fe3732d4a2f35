//! Candidate word validation against length and placement constraints.

use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Outcome of checking a word against a clue's constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Every constraint holds.
    Valid,
    /// The word does not have the expected number of characters.
    LengthMismatch,
    /// The pattern does not have the expected number of characters.
    PatternLengthMismatch,
    /// A fixed letter differs from the word at this 1-based position.
    Mismatch {
        /// 1-based index of the first offending character.
        position: usize,
    },
}

impl Verdict {
    /// True for [`Verdict::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The 1-based mismatch position, if the failure was a letter mismatch.
    pub fn mismatch_position(&self) -> Option<usize> {
        match self {
            Self::Mismatch { position } => Some(*position),
            _ => None,
        }
    }

    /// Human-readable reason for an invalid verdict.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::LengthMismatch => Some("Word length mismatch.".to_string()),
            Self::PatternLengthMismatch => Some("Pattern length mismatch.".to_string()),
            Self::Mismatch { position } => Some(format!("Mismatch at position {}.", position)),
        }
    }
}

/// Checks `word` against an expected length and a placement pattern.
///
/// The word length is checked first, so a length mismatch is reported no
/// matter what the pattern contains. After that a pattern of the wrong length
/// is rejected instead of being compared partially. Letters are compared
/// case-sensitively and only the first mismatch is reported.
#[instrument(skip(pattern), fields(pattern = %pattern))]
pub fn validate(word: &str, expected_length: usize, pattern: &Pattern) -> Verdict {
    let word_length = word.chars().count();
    if word_length != expected_length {
        debug!(word_length, expected_length, "Word length mismatch");
        return Verdict::LengthMismatch;
    }

    if pattern.len() != expected_length {
        debug!(pattern_length = pattern.len(), expected_length, "Pattern length mismatch");
        return Verdict::PatternLengthMismatch;
    }

    match pattern.first_mismatch(word) {
        Some(position) => {
            debug!(position, "Letter mismatch");
            Verdict::Mismatch { position }
        }
        None => Verdict::Valid,
    }
}

/// Wire form of a validation result.
///
/// Serializes as `{"valid": true}` or `{"valid": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the word satisfies the constraints.
    pub valid: bool,
    /// Reason for rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Verdict> for ValidationResult {
    fn from(verdict: Verdict) -> Self {
        Self {
            valid: verdict.is_valid(),
            error: verdict.error_message(),
        }
    }
}
