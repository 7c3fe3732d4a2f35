//! Provider-neutral chat completion contract.
//!
//! Handlers only see [`CompletionProvider`]; the concrete OpenAI and Anthropic
//! clients live in [`crate::llm_client`]. Replies are tagged as either plain
//! text or a tool call and every field is checked before use.

use crate::llm_client::LlmError;
use async_trait::async_trait;
use derive_getters::Getters;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    /// Instructions framing the conversation.
    System,
    /// The question being asked.
    User,
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who is speaking.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// System message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// User message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A function the model is asked to call instead of answering in prose.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSchema {
    /// Function name.
    pub name: String,
    /// What the function is for.
    pub description: String,
    /// JSON schema of the arguments object.
    pub parameters: serde_json::Value,
}

/// Everything sent to the provider for one completion.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct CompletionRequest {
    /// Model identifier.
    model: String,
    /// Upper bound on generated tokens.
    max_tokens: u32,
    /// Ordered conversation.
    messages: Vec<ChatMessage>,
    /// Optional tool the model must answer through.
    tool: Option<ToolSchema>,
}

impl CompletionRequest {
    /// Creates a request without a tool.
    pub fn new(model: impl Into<String>, max_tokens: u32, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            messages,
            tool: None,
        }
    }

    /// Attaches a tool schema.
    pub fn with_tool(mut self, tool: ToolSchema) -> Self {
        self.tool = Some(tool);
        self
    }

    /// The system prompt, if the conversation has one.
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|message| message.role == ChatRole::System)
            .map(|message| message.content.as_str())
    }
}

/// A successful provider reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Free text answer.
    Text(String),
    /// The model called a tool.
    ToolCall {
        /// Called function name.
        name: String,
        /// Arguments as a JSON string.
        arguments: String,
    },
}

impl Completion {
    /// Returns the text of a prose reply.
    #[track_caller]
    pub fn into_text(self) -> Result<String, LlmError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::ToolCall { name, .. } => Err(LlmError::new(format!(
                "Expected a text reply but the model called tool '{}'",
                name
            ))),
        }
    }

    /// Decodes the arguments of a call to `tool`.
    #[track_caller]
    pub fn into_tool_arguments<T: DeserializeOwned>(self, tool: &str) -> Result<T, LlmError> {
        match self {
            Self::ToolCall { name, arguments } if name == tool => serde_json::from_str(&arguments)
                .map_err(|e| LlmError::new(format!("Invalid arguments for tool '{}': {}", tool, e))),
            Self::ToolCall { name, .. } => Err(LlmError::new(format!(
                "Expected a call to '{}' but the model called '{}'",
                tool, name
            ))),
            Self::Text(_) => Err(LlmError::new(format!(
                "Expected a call to '{}' but the model replied with text",
                tool
            ))),
        }
    }

    /// Reads an OpenAI chat completion message.
    ///
    /// A tool call takes precedence over text content.
    #[instrument(skip(message))]
    pub fn from_openai_message(message: &serde_json::Value) -> Result<Self, LlmError> {
        if let Some(call) = message["tool_calls"].get(0) {
            debug!("OpenAI message contains a tool call");
            let name = call["function"]["name"]
                .as_str()
                .ok_or_else(|| LlmError::new("Tool call without a function name".to_string()))?;
            let arguments = call["function"]["arguments"]
                .as_str()
                .ok_or_else(|| LlmError::new("Tool call without arguments".to_string()))?;
            return Ok(Self::ToolCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            });
        }

        message["content"]
            .as_str()
            .map(|text| Self::Text(text.to_string()))
            .ok_or_else(|| LlmError::new("No content in OpenAI response".to_string()))
    }

    /// Reads an Anthropic Messages API response body.
    ///
    /// The first `tool_use` block wins; otherwise the first `text` block.
    #[instrument(skip(response))]
    pub fn from_anthropic_response(response: &serde_json::Value) -> Result<Self, LlmError> {
        let blocks = response["content"]
            .as_array()
            .ok_or_else(|| LlmError::new("No content in Anthropic response".to_string()))?;

        if let Some(block) = blocks.iter().find(|block| block["type"] == "tool_use") {
            debug!("Anthropic response contains a tool call");
            let name = block["name"]
                .as_str()
                .ok_or_else(|| LlmError::new("Tool use block without a name".to_string()))?;
            let input = block
                .get("input")
                .ok_or_else(|| LlmError::new("Tool use block without input".to_string()))?;
            return Ok(Self::ToolCall {
                name: name.to_string(),
                arguments: input.to_string(),
            });
        }

        blocks
            .iter()
            .find(|block| block["type"] == "text")
            .and_then(|block| block["text"].as_str())
            .map(|text| Self::Text(text.to_string()))
            .ok_or_else(|| LlmError::new("No text content in Anthropic response".to_string()))
    }
}

/// Something that can turn a [`CompletionRequest`] into a [`Completion`].
#[async_trait]
pub trait CompletionProvider: Send + Sync + std::fmt::Debug {
    /// Sends one request. Any transport, API or shape failure is an [`LlmError`].
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError>;
}
