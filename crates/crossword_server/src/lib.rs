//! Crossword server library - language model backed clue solving.
//!
//! # Architecture
//!
//! - **Completion**: provider-neutral request/reply types and the
//!   [`CompletionProvider`] trait
//! - **LLM client**: OpenAI and Anthropic implementations of that trait
//! - **Sessions**: last verified word per session, with a shared default slot
//! - **Handlers**: `guess-word`, `guess-word/structured`, `validate-word`,
//!   `get-hint` and `health`
//!
//! Validation and prompts come from [`crossword_rules`].
//!
//! # Example
//!
//! ```no_run
//! use crossword_server::{AppState, LlmClient, ServerConfig, router};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::load("crossword.toml")?;
//! let client = LlmClient::new(config.create_llm_config()?);
//! let app = router(AppState::new(Arc::new(client), config.completion_settings()));
//! let listener = tokio::net::TcpListener::bind(("127.0.0.1", 8000)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod completion;
mod config;
mod error;
mod handlers;
mod llm_client;
mod routes;
mod session;
mod state;

// Crate-level exports - Completion contract
pub use completion::{
    ChatMessage, ChatRole, Completion, CompletionProvider, CompletionRequest, ToolSchema,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Errors
pub use error::{ErrorBody, HandlerError, HandlerErrorKind};

// Crate-level exports - Handlers and router
pub use handlers::{GuessResponse, HealthResponse, HintResponse, WordRequest, WordValidationRequest};
pub use routes::router;

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider, openai_chat_request};

// Crate-level exports - Session management
pub use session::{
    DEFAULT_MAX_SESSIONS, DEFAULT_SESSION, SESSION_HEADER, SessionId, SessionKey, SessionStore,
};

// Crate-level exports - Shared state
pub use state::{AppState, CompletionSettings};
