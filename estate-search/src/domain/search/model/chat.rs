//! Language model backed by a hosted chat endpoint via the `llm-client` crate.

use async_trait::async_trait;
use llm_client::{ChatMessage, GeminiClient, OpenAiCompatClient};

use crate::config::{ModelProvider, ModelSettings};
use crate::domain::search::traits::{LanguageModel, Result, SearchError};

/// Hosted model selected by configuration.
///
/// # Example
///
/// ```ignore
/// let model = ChatModel::from_settings(&settings.model)?;
/// let reply = model.generate(&prompt).await?;
/// ```
#[derive(Clone)]
pub enum ChatModel {
    Gemini(GeminiClient),
    OpenAiCompat(OpenAiCompatClient),
}

impl ChatModel {
    /// Build the client for the configured provider.
    ///
    /// The API key comes from the settings, falling back to the provider's
    /// conventional environment variable (`GEMINI_API_KEY`, `OPENAI_API_KEY`).
    pub fn from_settings(settings: &ModelSettings) -> Result<Self> {
        let api_key = match &settings.api_key {
            Some(key) if !key.is_empty() => key.clone(),
            _ => std::env::var(settings.provider.api_key_env()).map_err(|_| {
                SearchError::Config(format!(
                    "no API key configured for {} (set model.api_key or {})",
                    settings.provider,
                    settings.provider.api_key_env()
                ))
            })?,
        };

        let model = match settings.provider {
            ModelProvider::Gemini => {
                let client = GeminiClient::new(api_key, &settings.model);
                ChatModel::Gemini(match &settings.base_url {
                    Some(url) => client.with_base_url(url),
                    None => client,
                })
            }
            ModelProvider::OpenaiCompat => {
                let base_url = settings.base_url.as_deref().ok_or_else(|| {
                    SearchError::Config("model.base_url is required for openai_compat".into())
                })?;
                ChatModel::OpenAiCompat(OpenAiCompatClient::new(
                    base_url,
                    api_key,
                    &settings.model,
                ))
            }
        };

        Ok(model)
    }

    pub fn model_name(&self) -> &str {
        match self {
            ChatModel::Gemini(client) => client.model(),
            ChatModel::OpenAiCompat(client) => client.model(),
        }
    }
}

#[async_trait]
impl LanguageModel for ChatModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let reply = match self {
            ChatModel::Gemini(client) => client.generate(prompt).await?,
            ChatModel::OpenAiCompat(client) => client.chat(&[ChatMessage::user(prompt)]).await?,
        };
        Ok(reply)
    }
}
