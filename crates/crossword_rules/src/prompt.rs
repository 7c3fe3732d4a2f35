//! Prompt templates for the language model.
//!
//! Clue text is embedded verbatim; nothing here escapes or filters it.

use crate::clue::Clue;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// System prompt for answer guessing.
pub const GUESS_SYSTEM_PROMPT: &str = "You are a helpful crossword solver.";

/// System prompt for hint generation.
pub const HINT_SYSTEM_PROMPT: &str = "You are a helpful crossword assistant.";

/// Upper bound on hint length requested from the model.
pub const HINT_MAX_CHARS: usize = 30;

/// Name of the tool the model calls to submit a structured answer.
pub const SUBMIT_WORD_TOOL: &str = "submit_word";

/// Description attached to the [`SUBMIT_WORD_TOOL`] schema.
pub const SUBMIT_WORD_DESCRIPTION: &str =
    "Submit the single word that solves the crossword clue.";

/// Arguments of the [`SUBMIT_WORD_TOOL`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubmittedWord {
    /// The solved word, letters only.
    pub word: String,
}

/// Builds the prompt asking the model to solve a clue with a bare word.
#[instrument(skip(clue), fields(num_letters = clue.num_letters()))]
pub fn guess_prompt(clue: &Clue) -> String {
    format!(
        "Solve the following crossword clue:\n\
         - Number of letters: {}\n\
         - Known letters and placements: {}\n\
         - Clue: {}\n\
         \n\
         Return only the word.",
        clue.num_letters(),
        clue.pattern(),
        clue.hint()
    )
}

/// Builds the prompt asking the model to answer through [`SUBMIT_WORD_TOOL`].
#[instrument(skip(clue), fields(num_letters = clue.num_letters()))]
pub fn structured_guess_prompt(clue: &Clue) -> String {
    format!(
        "Solve the following crossword clue:\n\
         - Number of letters: {}\n\
         - Known letters and placements: {} (underscore means unknown)\n\
         - Clue: {}\n\
         \n\
         Call the {} tool with the word.",
        clue.num_letters(),
        clue.pattern(),
        clue.hint(),
        SUBMIT_WORD_TOOL
    )
}

/// Builds the prompt asking for an extra hint about an already verified word.
#[instrument(skip(verified_word, original_clue))]
pub fn hint_prompt(verified_word: &str, original_clue: &str) -> String {
    format!(
        "The user is solving a crossword puzzle.\n\
         - Verified word: {}\n\
         - Original clue: {}\n\
         \n\
         Provide an additional crossword-style hint for the verified word. \
         Keep it short and max {} characters.",
        verified_word, original_clue, HINT_MAX_CHARS
    )
}

/// JSON schema for the arguments of [`SUBMIT_WORD_TOOL`].
pub fn submit_word_schema() -> serde_json::Value {
    let mut schema = schemars::schema_for!(SubmittedWord).to_value();
    if let Some(object) = schema.as_object_mut() {
        // Function parameters must be a bare object schema. The tool carries its
        // own description.
        object.remove("$schema");
        object.remove("title");
        object.remove("description");
    }
    schema
}
