//! Data types for retrieved documents and their relevance scores.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata key holding the source identifier (usually a file name).
pub const SOURCE_KEY: &str = "source";

/// Metadata key holding the page number within the source.
pub const PAGE_KEY: &str = "page";

/// Displayed when a document carries no `source` metadata.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Displayed when a document carries no `page` metadata.
pub const UNKNOWN_PAGE: &str = "?";

/// A unit of retrieved text owned by the vector index.
///
/// The engine only reads documents; it never edits content or metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The passage text.
    pub content: String,
    /// Key-value metadata. `source` and `page` are used for citations.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a document with no metadata.
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), metadata: HashMap::new() }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Set the `source` metadata entry.
    pub fn with_source(self, source: impl Into<String>) -> Self {
        self.with_metadata(SOURCE_KEY, source)
    }

    /// Set the `page` metadata entry.
    pub fn with_page(self, page: impl ToString) -> Self {
        self.with_metadata(PAGE_KEY, page.to_string())
    }

    /// The source identifier, or [`UNKNOWN_SOURCE`] when missing.
    pub fn source(&self) -> &str {
        self.metadata.get(SOURCE_KEY).map(String::as_str).unwrap_or(UNKNOWN_SOURCE)
    }

    /// The page number, or [`UNKNOWN_PAGE`] when missing.
    pub fn page(&self) -> &str {
        self.metadata.get(PAGE_KEY).map(String::as_str).unwrap_or(UNKNOWN_PAGE)
    }

    /// Citation string in the form `"<source> (Page <page>)"`.
    pub fn citation(&self) -> String {
        format!("{} (Page {})", self.source(), self.page())
    }
}

/// A retrieved [`Document`] paired with its relevance scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredDocument {
    /// The retrieved document.
    pub document: Document,
    /// The similarity reported by the index. Never modified after retrieval.
    pub retrieval_score: f32,
    /// The current ranking score (higher is more relevant).
    ///
    /// Equal to `retrieval_score` until a reranker adjusts it.
    pub score: f32,
}

impl ScoredDocument {
    /// Pair a document with the score produced by the index.
    pub fn new(document: Document, retrieval_score: f32) -> Self {
        Self { document, retrieval_score, score: retrieval_score }
    }

    /// The passage text.
    pub fn content(&self) -> &str {
        &self.document.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_metadata_falls_back_to_sentinels() {
        let doc = Document::new("Ohm's law");
        assert_eq!(doc.source(), "Unknown");
        assert_eq!(doc.page(), "?");
        assert_eq!(doc.citation(), "Unknown (Page ?)");
    }

    #[test]
    fn citation_uses_source_and_page() {
        let doc = Document::new("text").with_source("Lab1.pdf").with_page(3);
        assert_eq!(doc.citation(), "Lab1.pdf (Page 3)");
    }

    #[test]
    fn new_scored_document_starts_with_retrieval_score() {
        let scored = ScoredDocument::new(Document::new("x"), 0.42);
        assert_eq!(scored.score, 0.42);
        assert_eq!(scored.retrieval_score, 0.42);
    }
}
