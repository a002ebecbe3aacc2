//! Natural-language property search.
//!
//! A free-text query is turned into structured filters by a language model,
//! and those filters into a parameterized query over the `records` table:
//!
//! - [`PromptBuilder`] - wraps the query in the extraction instructions
//! - [`ResponseParser`] - recovers a [`FilterSet`] from a noisy model reply
//! - [`translate`] - maps a [`FilterSet`] to `?` conditions plus bound params
//! - [`SearchService`] - runs the whole cycle against a model and a store
//!
//! # Architecture
//!
//! The external collaborators sit behind traits for testability:
//!
//! - [`LanguageModel`] - prompt in, text out (Gemini, OpenAI-compatible, mocks)
//! - [`RecordStore`] - positional query in, rows out (SQLite, mocks)
//!
//! # Example
//!
//! ```ignore
//! use estate_search::domain::search::{SearchService, model::ChatModel};
//! use estate_search::domain::search::repository::SqliteRecordStore;
//!
//! let model = ChatModel::from_settings(&settings.model)?;
//! let store = SqliteRecordStore::connect(&settings.database).await?;
//! let service = SearchService::with_defaults(model, store);
//!
//! let outcome = service.search("casa en achumani por 280k con jardin").await?;
//! ```

mod parser;
mod prompt;
mod service;
mod traits;
mod translator;
mod types;

pub mod model;
pub mod repository;

pub use parser::{
    clean_response, parse_response, BraceSpanDecoder, FilterDecoder, ResponseParser,
    StrictJsonDecoder,
};
pub use prompt::{PromptBuilder, DEFAULT_INSTRUCTIONS};
pub use service::SearchService;
pub use traits::{LanguageModel, RecordStore, Result, SearchError};
pub use translator::{translate, TranslatedQuery};
pub use types::{FilterSet, PropertyRecord, RecordRow, SearchOutcome, SqlParam, RECORDS_TABLE};
