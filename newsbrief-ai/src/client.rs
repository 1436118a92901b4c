//! OpenAI-backed briefing model

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;

use newsbrief_core::{NewsColumn, NewsItem, NewsSummary, Period};

use crate::column;
use crate::error::AiError;
use crate::model::BriefingModel;
use crate::summarizer;

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Low fixed temperature keeps the structured output reproducible
const TEMPERATURE: f32 = 0.3;
const MAX_COMPLETION_TOKENS: u32 = 2000;

/// Chat-completion client for briefing generation
#[derive(Debug, Clone)]
pub struct OpenAiBriefingClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiBriefingClient {
    /// Create a client; async-openai reads OPENAI_API_KEY from env
    pub fn new() -> Self {
        Self {
            client: Client::with_config(OpenAIConfig::default()),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(OpenAIConfig::new().with_api_key(api_key)),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the model name
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Run one JSON-mode chat completion and return its content
    pub(crate) async fn chat_json(
        &self,
        system_prompt: &str,
        user_prompt: String,
    ) -> Result<String, AiError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|e| AiError::RequestFailed(e.to_string()))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_prompt)
                    .build()
                    .map_err(|e| AiError::RequestFailed(e.to_string()))?
                    .into(),
            ])
            .temperature(TEMPERATURE)
            .max_tokens(MAX_COMPLETION_TOKENS)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AiError::RequestFailed(format!("OpenAI API error: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or(AiError::EmptyResponse)?;

        if content.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }

        Ok(content.clone())
    }
}

impl Default for OpenAiBriefingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BriefingModel for OpenAiBriefingClient {
    async fn summarize(
        &self,
        items: &[NewsItem],
        period: Period,
    ) -> Result<NewsSummary, AiError> {
        summarizer::summarize(self, items, period).await
    }

    async fn generate_column(
        &self,
        items: &[NewsItem],
        period: Period,
    ) -> Result<NewsColumn, AiError> {
        column::generate_column(self, items, period).await
    }
}
