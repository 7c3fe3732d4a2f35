//! LLM API client for OpenAI and Anthropic.

use crate::completion::{
    ChatMessage, ChatRole, Completion, CompletionProvider, CompletionRequest, ToolSchema,
};
use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// LLM provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI (GPT models).
    OpenAI,
    /// Anthropic (Claude models).
    Anthropic,
}

impl LlmProvider {
    /// Environment variable holding this provider's API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Credentials for one provider.
#[derive(Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl LlmConfig {
    /// Creates a new LLM configuration.
    #[instrument(skip(api_key))]
    pub fn new(provider: LlmProvider, api_key: String) -> Self {
        debug!("Creating LLM config");
        Self { provider, api_key }
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }
}

#[derive(Clone)]
enum Backend {
    OpenAI(OpenAIClient<OpenAIConfig>),
    Anthropic { http: reqwest::Client, api_key: String },
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI(_) => f.write_str("OpenAI"),
            Self::Anthropic { .. } => f.write_str("Anthropic"),
        }
    }
}

/// LLM client that abstracts over multiple providers.
///
/// Requests are sent once; there is no retry and no client-side timeout.
#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: LlmProvider,
    backend: Backend,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = %config.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        info!("Creating LLM client");
        let backend = match config.provider {
            LlmProvider::OpenAI => Backend::OpenAI(OpenAIClient::with_config(
                OpenAIConfig::new().with_api_key(config.api_key),
            )),
            LlmProvider::Anthropic => Backend::Anthropic {
                http: reqwest::Client::new(),
                api_key: config.api_key,
            },
        };
        Self {
            provider: config.provider,
            backend,
        }
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Generates a text completion from a system prompt and user message.
    #[instrument(skip(self, system_prompt, user_message))]
    pub async fn generate(
        &self,
        model: &str,
        max_tokens: u32,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let request = CompletionRequest::new(
            model,
            max_tokens,
            vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_message),
            ],
        );
        self.complete(&request).await?.into_text()
    }

    #[instrument(skip(self, client, request), fields(model = %request.model()))]
    async fn complete_openai(
        &self,
        client: &OpenAIClient<OpenAIConfig>,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError> {
        let chat_request = openai_chat_request(request)?;

        debug!("Sending request to OpenAI");
        let response = client.chat().create(chat_request).await.map_err(|e| {
            error!(error = ?e, "OpenAI API error");
            LlmError::new(format!("OpenAI API error: {}", e))
        })?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            error!("No choices in OpenAI response");
            LlmError::new("No choices in OpenAI response".to_string())
        })?;

        let message = serde_json::to_value(&choice.message).map_err(|e| {
            LlmError::new(format!("Failed to read OpenAI message: {}", e))
        })?;

        let completion = Completion::from_openai_message(&message)?;
        info!("Generated completion");
        Ok(completion)
    }

    #[instrument(skip(self, http, api_key, request), fields(model = %request.model()))]
    async fn complete_anthropic(
        &self,
        http: &reqwest::Client,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError> {
        debug!("Building Anthropic API request");
        let messages: Vec<serde_json::Value> = request
            .messages()
            .iter()
            .filter(|message| message.role != ChatRole::System)
            .map(|message| {
                serde_json::json!({
                    "role": <&'static str>::from(message.role),
                    "content": message.content,
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "model": request.model(),
            "max_tokens": request.max_tokens(),
            "messages": messages,
        });
        if let Some(system) = request.system_prompt() {
            body["system"] = serde_json::Value::from(system);
        }
        if let Some(tool) = request.tool() {
            debug!(tool = %tool.name, "Attaching tool");
            body["tools"] = serde_json::json!([{
                "name": tool.name,
                "description": tool.description,
                "input_schema": tool.parameters,
            }]);
            body["tool_choice"] = serde_json::json!({ "type": "tool", "name": tool.name });
        }

        debug!("Sending request to Anthropic");
        let response = http
            .post(ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Anthropic API request failed");
                LlmError::new(format!("Anthropic API request failed: {}", e))
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read Anthropic response");
            LlmError::new(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            error!(status = %status, response = %response_text, "Anthropic API error");
            return Err(LlmError::new(format!(
                "Anthropic API error {}: {}",
                status, response_text
            )));
        }

        let response_json: serde_json::Value =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = ?e, "Failed to parse Anthropic response");
                LlmError::new(format!("Failed to parse response: {}", e))
            })?;

        let completion = Completion::from_anthropic_response(&response_json)?;
        info!("Generated completion");
        Ok(completion)
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    #[instrument(skip(self, request), fields(provider = %self.provider, model = %request.model()))]
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError> {
        match &self.backend {
            Backend::OpenAI(client) => self.complete_openai(client, request).await,
            Backend::Anthropic { http, api_key } => {
                self.complete_anthropic(http, api_key, request).await
            }
        }
    }
}

/// Builds the OpenAI chat request for `request`.
///
/// A tool, when present, is attached as a function tool and the model is
/// required to call it.
#[instrument(skip(request), fields(model = %request.model()))]
pub fn openai_chat_request(
    request: &CompletionRequest,
) -> Result<CreateChatCompletionRequest, LlmError> {
    debug!("Building chat completion request");
    let messages = request
        .messages()
        .iter()
        .map(openai_message)
        .collect::<Result<Vec<_>, _>>()?;

    let mut chat_request = CreateChatCompletionRequestArgs::default()
        .model(request.model())
        .messages(messages)
        .max_tokens(*request.max_tokens())
        .build()
        .map_err(|e| {
            error!(error = ?e, "Failed to build request");
            LlmError::new(format!("Failed to build request: {}", e))
        })?;

    if let Some(tool) = request.tool() {
        attach_openai_tool(&mut chat_request, tool)?;
    }
    Ok(chat_request)
}

fn attach_openai_tool(
    chat_request: &mut CreateChatCompletionRequest,
    tool: &ToolSchema,
) -> Result<(), LlmError> {
    debug!(tool = %tool.name, "Attaching function tool");
    let tools = serde_json::json!([{
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters,
        }
    }]);
    chat_request.tools = Some(
        serde_json::from_value(tools)
            .map_err(|e| LlmError::new(format!("Failed to encode tool schema: {}", e)))?,
    );
    chat_request.tool_choice = Some(
        serde_json::from_value(serde_json::json!("required"))
            .map_err(|e| LlmError::new(format!("Failed to encode tool choice: {}", e)))?,
    );
    Ok(())
}

fn openai_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage, LlmError> {
    let built = match message.role {
        ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content.as_str())
            .build()
            .map(ChatCompletionRequestMessage::System),
        ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content.as_str())
            .build()
            .map(ChatCompletionRequestMessage::User),
    };
    built.map_err(|e| {
        error!(error = ?e, role = %message.role, "Failed to build message");
        LlmError::new(format!("Failed to build {} message: {}", message.role, e))
    })
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
