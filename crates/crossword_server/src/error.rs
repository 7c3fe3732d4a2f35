//! Handler error types and their HTTP mapping.

use crate::llm_client::LlmError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crossword_rules::ClueError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{error, instrument, warn};

/// Category of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum HandlerErrorKind {
    /// The clue's shape is inconsistent.
    #[display("{_0}")]
    InvalidClue(String),
    /// The provider's word failed validation.
    #[display("Word does not meet requirements.")]
    WordRejected,
    /// A hint was requested before any word was accepted.
    #[display("No verified word found. Guess a word first.")]
    NoVerifiedWord,
    /// The provider call failed.
    #[display("{_0}")]
    Provider(String),
}

impl HandlerErrorKind {
    /// HTTP status for this kind.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidClue(_) | Self::WordRejected | Self::NoVerifiedWord => {
                StatusCode::BAD_REQUEST
            }
            Self::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Handler error with location tracking.
#[derive(Debug, Clone, Display, derive_more::Error)]
#[display("Handler error: {} at {}:{}", kind, file, line)]
pub struct HandlerError {
    /// What went wrong.
    pub kind: HandlerErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl HandlerError {
    /// Creates a new handler error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: HandlerErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<ClueError> for HandlerError {
    #[track_caller]
    fn from(err: ClueError) -> Self {
        Self::new(HandlerErrorKind::InvalidClue(err.kind.to_string()))
    }
}

impl From<LlmError> for HandlerError {
    #[track_caller]
    fn from(err: LlmError) -> Self {
        Self::new(HandlerErrorKind::Provider(err.message))
    }
}

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub detail: String,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Request rejected");
        }
        let body = ErrorBody {
            detail: self.kind.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
