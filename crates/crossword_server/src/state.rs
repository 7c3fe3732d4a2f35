//! Shared application state.

use crate::completion::{ChatMessage, Completion, CompletionProvider, CompletionRequest, ToolSchema};
use crate::llm_client::LlmError;
use crate::session::SessionStore;
use derive_getters::Getters;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Model selection applied to every provider request.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CompletionSettings {
    /// Model identifier.
    model: String,
    /// Upper bound on generated tokens.
    max_tokens: u32,
}

impl CompletionSettings {
    /// Creates completion settings.
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
        }
    }
}

/// State shared by all handlers.
#[derive(Debug, Clone, Getters)]
pub struct AppState {
    /// Language model backend.
    provider: Arc<dyn CompletionProvider>,
    /// Model selection.
    settings: CompletionSettings,
    /// Verified word slots.
    sessions: SessionStore,
}

impl AppState {
    /// Creates state with an empty session store.
    #[instrument(skip(provider))]
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: CompletionSettings) -> Self {
        info!("Creating application state");
        Self::with_sessions(provider, settings, SessionStore::new())
    }

    /// Creates state around an existing session store.
    pub fn with_sessions(
        provider: Arc<dyn CompletionProvider>,
        settings: CompletionSettings,
        sessions: SessionStore,
    ) -> Self {
        Self {
            provider,
            settings,
            sessions,
        }
    }

    /// Sends a system + user conversation, optionally with a tool.
    #[instrument(skip(self, system_prompt, user_prompt, tool), fields(model = %self.settings.model))]
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: String,
        tool: Option<ToolSchema>,
    ) -> Result<Completion, LlmError> {
        let mut request = CompletionRequest::new(
            self.settings.model.clone(),
            self.settings.max_tokens,
            vec![ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)],
        );
        if let Some(tool) = tool {
            request = request.with_tool(tool);
        }
        debug!(has_tool = request.tool().is_some(), "Calling completion provider");
        self.provider.complete(&request).await
    }
}
