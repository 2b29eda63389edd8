//! Retriever trait: the contract consumed from the vector index.

use async_trait::async_trait;

use crate::document::ScoredDocument;
use crate::error::Result;

/// A similarity-search backend over the document corpus.
///
/// The engine does not implement an index; it only requires this contract.
/// Backends wrap their own embedding function and storage.
///
/// # Example
///
/// ```rust,ignore
/// use aura_rag::Retriever;
///
/// let results = index.retrieve("How do I measure current?", 4).await?;
/// for result in &results {
///     println!("{} -> {:.3}", result.document.citation(), result.score);
/// }
/// ```
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return up to `top_k` documents in descending relevance order.
    ///
    /// A sparse corpus may yield fewer than `top_k` results and a query with
    /// no matches yields an empty `Vec`; neither is an error.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredDocument>>;

    /// A short backend name used in logs and errors.
    fn name(&self) -> &str {
        "retriever"
    }
}
