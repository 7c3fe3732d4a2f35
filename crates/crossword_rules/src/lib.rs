//! Crossword rules - constraint checking and prompt construction.
//!
//! This crate holds the deterministic half of the crossword helper:
//!
//! - **Pattern**: known letters and wildcards (`C_T__`)
//! - **Clue**: answer length, pattern and clue text, shape-checked on creation
//! - **Validator**: length and per-letter checks reporting the first mismatch
//! - **Prompts**: text sent to the language model
//!
//! # Example
//!
//! ```
//! use crossword_rules::{Clue, Verdict};
//!
//! let clue = Clue::new(5, "C_T__", "feline").unwrap();
//! assert_eq!(clue.check("CATCH"), Verdict::Valid);
//! assert_eq!(clue.check("COUCH"), Verdict::Mismatch { position: 3 });
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clue;
mod pattern;
mod prompt;
mod validate;

pub use clue::{Clue, ClueError, ClueErrorKind};
pub use pattern::{Pattern, Slot, WILDCARD};
pub use prompt::{
    GUESS_SYSTEM_PROMPT, HINT_MAX_CHARS, HINT_SYSTEM_PROMPT, SUBMIT_WORD_DESCRIPTION,
    SUBMIT_WORD_TOOL, SubmittedWord, guess_prompt, hint_prompt, structured_guess_prompt,
    submit_word_schema,
};
pub use validate::{ValidationResult, Verdict, validate};
