//! Mock language model for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::search::traits::{LanguageModel, Result, SearchError};

/// Mock model that returns a canned reply and records every prompt it sees.
///
/// # Examples
///
/// ```ignore
/// let model = MockModel::replying(r#"{"price": 1000}"#);
/// let failing = MockModel::failing("quota exceeded");
/// ```
#[derive(Clone)]
pub struct MockModel {
    reply: std::result::Result<String, String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockModel {
    /// Create a mock that always returns `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            prompts: Arc::default(),
        }
    }

    /// Create a mock whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            prompts: Arc::default(),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .map_err(SearchError::ModelInvocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_reply_and_records_prompt() {
        let model = MockModel::replying("{}");

        assert_eq!(model.generate("first").await.unwrap(), "{}");
        model.generate("second").await.unwrap();

        assert_eq!(model.prompts(), vec!["first", "second"]);
        assert_eq!(model.call_count(), 2);
    }

    #[tokio::test]
    async fn failing_mock_returns_model_error() {
        let model = MockModel::failing("boom");
        let err = model.generate("prompt").await.unwrap_err();
        assert!(matches!(err, SearchError::ModelInvocation(msg) if msg == "boom"));
    }
}
