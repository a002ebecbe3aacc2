//! Mock record store for testing.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::domain::search::traits::{RecordStore, Result, SearchError};
use crate::domain::search::translator::TranslatedQuery;
use crate::domain::search::types::RecordRow;

/// Mock store that returns preset rows and remembers the queries it ran.
#[derive(Clone, Default)]
pub struct MockRecordStore {
    rows: Arc<Vec<RecordRow>>,
    /// When set, every fetch fails with this message
    failure: Option<String>,
    queries: Arc<RwLock<Vec<TranslatedQuery>>>,
}

#[allow(dead_code)]
impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned for every query.
    pub fn with_rows(mut self, rows: Vec<RecordRow>) -> Self {
        self.rows = Arc::new(rows);
        self
    }

    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Queries received so far, oldest first.
    pub fn queries(&self) -> Vec<TranslatedQuery> {
        self.queries.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.read().unwrap().len()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn fetch_matching(&self, query: &TranslatedQuery) -> Result<Vec<RecordRow>> {
        self.queries.write().unwrap().push(query.clone());

        match &self.failure {
            Some(message) => Err(SearchError::Store(message.clone())),
            None => Ok(self.rows.as_ref().clone()),
        }
    }
}
