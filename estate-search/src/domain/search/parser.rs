//! Recovers a [`FilterSet`] from a raw model reply.
//!
//! Models often wrap JSON in code fences or surround it with prose even when
//! told not to. The reply is cleaned once, then handed to an ordered chain of
//! [`FilterDecoder`]s; the first one that decodes wins.

use regex::Regex;
use serde::de::Error as _;
use std::sync::LazyLock;

use super::traits::{Result, SearchError};
use super::types::FilterSet;

// Regex patterns compiled once
static FENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^```json|```$").unwrap());
static BRACE_SPAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// One strategy for turning cleaned reply text into filters.
pub trait FilterDecoder: Send + Sync {
    fn name(&self) -> &'static str;

    fn decode(&self, text: &str) -> serde_json::Result<FilterSet>;
}

/// Decodes the whole text as a single JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJsonDecoder;

impl FilterDecoder for StrictJsonDecoder {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn decode(&self, text: &str) -> serde_json::Result<FilterSet> {
        decode_object(text)
    }
}

/// Decodes the span from the first `{` to the last `}`, discarding any prose
/// around it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceSpanDecoder;

impl FilterDecoder for BraceSpanDecoder {
    fn name(&self) -> &'static str {
        "brace_span"
    }

    fn decode(&self, text: &str) -> serde_json::Result<FilterSet> {
        let span = BRACE_SPAN_PATTERN
            .find(text)
            .ok_or_else(|| serde_json::Error::custom("no JSON object found in response"))?;
        decode_object(span.as_str())
    }
}

/// Structs also deserialize from JSON arrays; only objects are accepted here.
fn decode_object(text: &str) -> serde_json::Result<FilterSet> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(serde_json::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}

/// Remove line-anchored code fences, trim, and drop every newline.
///
/// Newlines inside JSON string values are dropped too.
pub fn clean_response(raw: &str) -> String {
    FENCE_PATTERN
        .replace_all(raw, "")
        .trim()
        .replace('\n', "")
}

/// Ordered fallback chain of decoders.
pub struct ResponseParser {
    decoders: Vec<Box<dyn FilterDecoder>>,
}

impl ResponseParser {
    pub fn new(decoders: Vec<Box<dyn FilterDecoder>>) -> Self {
        Self { decoders }
    }

    /// Parse a model reply.
    ///
    /// Fails with [`SearchError::MalformedResponse`] carrying the last
    /// decoder's error when no decoder succeeds.
    pub fn parse(&self, raw: &str) -> Result<FilterSet> {
        let cleaned = clean_response(raw);
        let mut last_error = None;

        for decoder in &self.decoders {
            match decoder.decode(&cleaned) {
                Ok(filters) => {
                    tracing::debug!(decoder = decoder.name(), "Decoded model response");
                    return Ok(filters);
                }
                Err(e) => {
                    tracing::debug!(decoder = decoder.name(), error = %e, "Decoder rejected model response");
                    last_error = Some(e);
                }
            }
        }

        let source = last_error
            .unwrap_or_else(|| serde_json::Error::custom("no decoders configured"));
        Err(SearchError::MalformedResponse {
            source,
            response: cleaned,
        })
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(vec![Box::new(StrictJsonDecoder), Box::new(BraceSpanDecoder)])
    }
}

/// Parse with the default strict-then-brace-span chain.
pub fn parse_response(raw: &str) -> Result<FilterSet> {
    ResponseParser::default().parse(raw)
}
