//! Verified word slots for hint generation.
//!
//! Each session owns one slot holding the last word that passed validation.
//! Callers that do not identify a session all share [`DEFAULT_SESSION`], so a
//! plain deployment behaves like a single process-wide slot.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, instrument};

/// Unique identifier for a session slot.
pub type SessionId = String;

/// Slot used when a request carries no session header.
pub const DEFAULT_SESSION: &str = "default";

/// Request header selecting a session slot.
pub const SESSION_HEADER: &str = "x-session-id";

/// Number of sessions kept before the least recently written one is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

#[derive(Debug, Default)]
struct Slots {
    words: HashMap<SessionId, String>,
    // Least recently written first.
    order: VecDeque<SessionId>,
}

/// Stores the last verified word per session.
///
/// Every read or write takes the lock once; the lock is never held across a
/// provider call, so concurrent guesses on one slot resolve as last writer wins.
/// At most `max_sessions` slots are kept. Writing a new session into a full
/// store evicts the session written least recently.
#[derive(Debug, Clone)]
pub struct SessionStore {
    slots: Arc<RwLock<Slots>>,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_max_sessions(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    /// Creates an empty store holding up to [`DEFAULT_MAX_SESSIONS`] sessions.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session store");
        Self::default()
    }

    /// Creates an empty store holding up to `max_sessions` sessions.
    ///
    /// A limit of zero is raised to one.
    pub fn with_max_sessions(max_sessions: usize) -> Self {
        Self {
            slots: Arc::new(RwLock::new(Slots::default())),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Maximum number of sessions kept.
    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Returns the verified word for `session`, if one was accepted.
    #[instrument(skip(self))]
    pub fn verified_word(&self, session: &str) -> Option<String> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let word = slots.words.get(session).cloned();
        if word.is_none() {
            debug!("No verified word in session");
        }
        word
    }

    /// Stores `word` for `session`, returning the word it replaced.
    #[instrument(skip(self, word))]
    pub fn store_verified_word(&self, session: &str, word: impl Into<String>) -> Option<String> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let previous = slots.words.insert(session.to_string(), word.into());

        if previous.is_some() {
            slots.order.retain(|id| id != session);
        }
        slots.order.push_back(session.to_string());

        while slots.words.len() > self.max_sessions {
            let Some(oldest) = slots.order.pop_front() else {
                break;
            };
            slots.words.remove(&oldest);
            debug!(evicted = %oldest, "Evicted session");
        }

        debug!(replaced = previous.is_some(), "Stored verified word");
        previous
    }

    /// Number of sessions holding a word.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .words
            .len()
    }

    /// True when no session holds a word.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Session selected by the [`SESSION_HEADER`] header.
///
/// Missing, empty or non-UTF-8 headers select [`DEFAULT_SESSION`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey(pub SessionId);

impl SessionKey {
    /// The session identifier.
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl Default for SessionKey {
    fn default() -> Self {
        Self(DEFAULT_SESSION.to_string())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SessionKey {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_string()))
            .unwrap_or_default();
        Ok(key)
    }
}
