//! HTTP request handlers.
//!
//! `guess-word` and its structured twin move a session from "no verified
//! word" to "has verified word"; `get-hint` reads that word without changing
//! it; `validate-word` is stateless and never fails.

use crate::completion::ToolSchema;
use crate::error::{HandlerError, HandlerErrorKind};
use crate::session::SessionKey;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use crossword_rules::{
    Clue, GUESS_SYSTEM_PROMPT, HINT_SYSTEM_PROMPT, Pattern, SUBMIT_WORD_DESCRIPTION,
    SUBMIT_WORD_TOOL, SubmittedWord, ValidationResult, Verdict, guess_prompt, hint_prompt,
    structured_guess_prompt, submit_word_schema, validate,
};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Body of `guess-word` and `get-hint`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRequest {
    /// Number of letters in the answer.
    pub num_letters: usize,
    /// Known letters, `_` for unknown.
    pub letters_and_placement: String,
    /// Clue text.
    pub hint: String,
}

impl WordRequest {
    /// Checks the request shape and builds a [`Clue`].
    #[track_caller]
    pub fn to_clue(&self) -> Result<Clue, HandlerError> {
        Ok(Clue::new(
            self.num_letters,
            &self.letters_and_placement,
            self.hint.clone(),
        )?)
    }
}

/// Body of `validate-word`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordValidationRequest {
    /// Candidate word.
    pub word: String,
    /// Expected number of letters. Negative values never match a word.
    #[serde(deserialize_with = "whole_number")]
    pub num_letters: i64,
    /// Known letters, `_` for unknown.
    pub letters_and_placement: String,
}

/// Reads a JSON integer, also accepting whole-valued floats like `3.0`.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    if number.is_u64() {
        return Ok(i64::MAX);
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 => Ok(value as i64),
        _ => Err(de::Error::custom(format!("expected an integer, found {}", number))),
    }
}

/// Successful `guess-word` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    /// The accepted word in upper case.
    pub suggested_word: String,
}

/// Successful `get-hint` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintResponse {
    /// Extra hint text.
    pub hint: String,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
}

/// POST /guess-word
#[instrument(skip(state, session, request), fields(session = %session.id(), num_letters = request.num_letters))]
pub async fn guess_word(
    State(state): State<AppState>,
    session: SessionKey,
    Json(request): Json<WordRequest>,
) -> Result<Json<GuessResponse>, HandlerError> {
    let clue = request.to_clue()?;

    let reply = state
        .complete(GUESS_SYSTEM_PROMPT, guess_prompt(&clue), None)
        .await?
        .into_text()?;
    debug!(reply = %reply, "Provider replied");

    accept_guess(&state, &session, &clue, reply.trim())
}

/// POST /guess-word/structured
///
/// Same contract as [`guess_word`], but the model answers through the
/// `submit_word` tool.
#[instrument(skip(state, session, request), fields(session = %session.id(), num_letters = request.num_letters))]
pub async fn guess_word_structured(
    State(state): State<AppState>,
    session: SessionKey,
    Json(request): Json<WordRequest>,
) -> Result<Json<GuessResponse>, HandlerError> {
    let clue = request.to_clue()?;

    let tool = ToolSchema {
        name: SUBMIT_WORD_TOOL.to_string(),
        description: SUBMIT_WORD_DESCRIPTION.to_string(),
        parameters: submit_word_schema(),
    };
    let submitted: SubmittedWord = state
        .complete(GUESS_SYSTEM_PROMPT, structured_guess_prompt(&clue), Some(tool))
        .await?
        .into_tool_arguments(SUBMIT_WORD_TOOL)?;
    debug!(word = %submitted.word, "Provider submitted word");

    accept_guess(&state, &session, &clue, submitted.word.trim())
}

/// Validates the provider's word locally and stores it on success.
#[instrument(skip(state, session, clue), fields(session = %session.id()))]
fn accept_guess(
    state: &AppState,
    session: &SessionKey,
    clue: &Clue,
    candidate: &str,
) -> Result<Json<GuessResponse>, HandlerError> {
    let verdict = clue.check(candidate);
    if !verdict.is_valid() {
        warn!(?verdict, "Provider word failed validation");
        return Err(HandlerError::new(HandlerErrorKind::WordRejected));
    }

    state.sessions().store_verified_word(session.id(), candidate);
    info!("Accepted verified word");

    Ok(Json(GuessResponse {
        suggested_word: candidate.to_uppercase(),
    }))
}

/// POST /validate-word
///
/// Always answers 200; failures are reported in the body.
#[instrument(skip(request), fields(num_letters = request.num_letters))]
pub async fn validate_word(Json(request): Json<WordValidationRequest>) -> Json<ValidationResult> {
    let pattern = Pattern::parse(&request.letters_and_placement);
    let verdict = match usize::try_from(request.num_letters) {
        Ok(expected_length) => validate(&request.word, expected_length, &pattern),
        Err(_) => Verdict::LengthMismatch,
    };
    debug!(?verdict, "Validated word");
    Json(ValidationResult::from(verdict))
}

/// POST /get-hint
#[instrument(skip(state, session, request), fields(session = %session.id()))]
pub async fn get_hint(
    State(state): State<AppState>,
    session: SessionKey,
    Json(request): Json<WordRequest>,
) -> Result<Json<HintResponse>, HandlerError> {
    let clue = request.to_clue()?;

    let verified_word = state
        .sessions()
        .verified_word(session.id())
        .ok_or_else(|| HandlerError::new(HandlerErrorKind::NoVerifiedWord))?;

    let hint = state
        .complete(HINT_SYSTEM_PROMPT, hint_prompt(&verified_word, clue.hint()), None)
        .await?
        .into_text()?;

    info!("Generated hint");
    Ok(Json(HintResponse {
        hint: hint.trim().to_string(),
    }))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
