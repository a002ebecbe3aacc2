use serde::{Deserialize, Serialize};

use crate::client::{post_json, ChatMessage, LlmError};

/// Client for any endpoint speaking the OpenAI chat-completions protocol
/// (DashScope/Qwen, vLLM, OpenAI itself).
#[derive(Clone)]
pub struct OpenAiCompatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiCompatClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Send the conversation and return the content of the first choice.
    #[tracing::instrument(name = "openai.chat", skip(self, messages), fields(model = %self.model))]
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
        };
        let api_key = self.api_key.clone();

        let response: ChatCompletionResponse =
            post_json(&self.http, &self.endpoint(), &body, |req| {
                req.bearer_auth(api_key)
            })
            .await?;

        response.into_text()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    pub(crate) fn into_text(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_roles_in_lowercase() {
        let messages = vec![ChatMessage::user("casa")];
        let body = ChatCompletionRequest {
            model: "qwen-plus",
            messages: &messages,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "qwen-plus");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "casa");
    }

    #[test]
    fn response_returns_first_choice() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": "{}"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.into_text().unwrap(), "{}");
    }

    #[test]
    fn response_with_null_content_is_empty() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(response.into_text(), Err(LlmError::EmptyResponse)));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = OpenAiCompatClient::new("https://example.com/v1/", "key", "m");
        assert_eq!(client.endpoint(), "https://example.com/v1/chat/completions");
    }
}
