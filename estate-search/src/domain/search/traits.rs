//! Trait definitions for search domain abstractions.
//!
//! These traits enable dependency injection and easy testing through mocking.

use async_trait::async_trait;

use super::translator::TranslatedQuery;
use super::types::RecordRow;

/// Error type for search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("Malformed model response: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
        /// The reply after fence stripping, kept for diagnostics
        response: String,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for SearchError {
    fn from(e: sqlx::Error) -> Self {
        SearchError::Store(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for SearchError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        SearchError::Store(e.to_string())
    }
}

impl From<llm_client::LlmError> for SearchError {
    fn from(e: llm_client::LlmError) -> Self {
        SearchError::ModelInvocation(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Trait for the language model that turns a prompt into filters.
///
/// Abstracts the provider (Gemini, OpenAI-compatible endpoints) for easy testing.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a prompt and return the raw text reply.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Trait for the store holding property records.
///
/// Abstracts database operations for testing without a real database.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Run the translated query with its bound parameters and return the
    /// matching rows in store order.
    async fn fetch_matching(&self, query: &TranslatedQuery) -> Result<Vec<RecordRow>>;
}
