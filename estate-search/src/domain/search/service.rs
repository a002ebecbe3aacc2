//! Search service turning a free-text query into matching property records.

use tracing::{info, instrument, warn};

use super::parser::ResponseParser;
use super::prompt::PromptBuilder;
use super::traits::{LanguageModel, RecordStore, Result};
use super::translator::translate;
use super::types::{FilterSet, SearchOutcome};

/// Search service combining filter extraction with a store lookup.
///
/// # Type Parameters
///
/// * `M` - LanguageModel implementation that extracts filters from text
/// * `S` - RecordStore implementation holding the listings
///
/// # Examples
///
/// ```ignore
/// let service = SearchService::new(model, store, PromptBuilder::default());
/// let outcome = service.search("casa en la paz con jardin").await?;
/// ```
pub struct SearchService<M, S>
where
    M: LanguageModel,
    S: RecordStore,
{
    model: M,
    store: S,
    prompt: PromptBuilder,
    parser: ResponseParser,
}

impl<M, S> SearchService<M, S>
where
    M: LanguageModel,
    S: RecordStore,
{
    /// Create a new search service.
    pub fn new(model: M, store: S, prompt: PromptBuilder) -> Self {
        Self {
            model,
            store,
            prompt,
            parser: ResponseParser::default(),
        }
    }

    /// Create a search service with the built-in prompt.
    pub fn with_defaults(model: M, store: S) -> Self {
        Self::new(model, store, PromptBuilder::default())
    }

    /// Replace the response decoding chain.
    pub fn with_parser(mut self, parser: ResponseParser) -> Self {
        self.parser = parser;
        self
    }

    /// Ask the model for filters matching `query`.
    ///
    /// A reply that cannot be decoded is an error, never an empty filter set.
    #[instrument(skip(self))]
    pub async fn extract_filters(&self, query: &str) -> Result<FilterSet> {
        let prompt = self.prompt.build(query);

        let reply = self.model.generate(&prompt).await.inspect_err(|e| {
            warn!(error = %e, "Model invocation failed");
        })?;

        self.parser.parse(&reply).inspect_err(|e| {
            warn!(error = %e, "Could not decode model reply");
        })
    }

    /// Execute a search query.
    ///
    /// Extracts filters with the model, translates them into bound
    /// conditions and runs them against the store.
    ///
    /// # Returns
    ///
    /// The matching rows together with the filters that selected them.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let filters = self.extract_filters(query).await?;
        let translated = translate(&filters);

        info!(
            conditions = translated.conditions.len(),
            unconstrained = filters.is_unconstrained(),
            "Translated filters"
        );

        let results = self.store.fetch_matching(&translated).await?;
        info!(results = results.len(), "Search completed");

        Ok(SearchOutcome::new(results, filters))
    }
}
