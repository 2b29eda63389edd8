//! Evidence-scored answering orchestrator.
//!
//! [`LightRag`] composes a [`Retriever`], a [`Reranker`] and a [`Generator`]
//! into a single [`generate`](LightRag::generate) call:
//!
//! retrieve → rerank → build evidence prompt → generate → score overlap
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aura_rag::{LightRag, RagConfig};
//!
//! let rag = LightRag::builder()
//!     .config(RagConfig::default())
//!     .retriever(Arc::new(my_index))
//!     .generator(Arc::new(my_model))
//!     .build()?;
//!
//! let result = rag.generate("What is Ohm's law?").await?;
//! println!("{}", result.answer);
//! for ev in result.top_evidence(3) {
//!     println!("[{}] {} (Page {}) overlap {:.3}", ev.id, ev.source, ev.page, ev.overlap_score);
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::RagConfig;
use crate::document::ScoredDocument;
use crate::error::{RagError, Result};
use crate::generator::Generator;
use crate::overlap::{self, Evidence};
use crate::prompt;
use crate::reranker::{LengthBonusReranker, Reranker};
use crate::retriever::Retriever;

/// The outcome of one [`LightRag::generate`] call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationResult {
    /// The generated answer, or the no-evidence message.
    pub answer: String,
    /// One entry per ranked passage, sorted by descending overlap score.
    pub evidence: Vec<Evidence>,
    /// `"<source> (Page <page>)"` citations in rerank order.
    pub sources: Vec<String>,
}

impl GenerationResult {
    /// The `n` passages the answer overlaps most.
    pub fn top_evidence(&self, n: usize) -> &[Evidence] {
        &self.evidence[..n.min(self.evidence.len())]
    }

    /// Whether the answer was produced without any retrieved evidence.
    pub fn is_empty(&self) -> bool {
        self.evidence.is_empty()
    }
}

/// The evidence-scored answering engine.
///
/// Holds no mutable state: concurrent calls are independent as long as the
/// collaborators tolerate concurrent use. Construct one via
/// [`LightRag::builder()`].
pub struct LightRag {
    config: RagConfig,
    retriever: Arc<dyn Retriever>,
    reranker: Arc<dyn Reranker>,
    generator: Arc<dyn Generator>,
}

impl LightRag {
    /// Create a new [`LightRagBuilder`].
    pub fn builder() -> LightRagBuilder {
        LightRagBuilder::default()
    }

    /// Return a reference to the configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Retrieve up to `top_k` documents in the index's relevance order.
    ///
    /// # Errors
    ///
    /// Propagates the retriever's error.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<ScoredDocument>> {
        let top_k = self.config.top_k;
        let mut results = self.retriever.retrieve(query, top_k).await.inspect_err(|e| {
            error!(retriever = self.retriever.name(), error = %e, "retrieval failed");
        })?;
        if results.len() > top_k {
            debug!(returned = results.len(), top_k, "truncating oversized retrieval");
            results.truncate(top_k);
        }
        Ok(results)
    }

    /// Rerank retrieved documents with the configured reranker.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PipelineError`] if the reranker fails or does not
    /// return the documents it was given.
    pub async fn rerank(
        &self,
        query: &str,
        results: Vec<ScoredDocument>,
    ) -> Result<Vec<ScoredDocument>> {
        let expected = results.len();
        let reranked = self.reranker.rerank(query, results).await.map_err(|e| {
            error!(error = %e, "reranking failed");
            RagError::PipelineError(format!("reranking failed: {e}"))
        })?;
        if reranked.len() != expected {
            error!(expected, returned = reranked.len(), "reranker changed the result count");
            return Err(RagError::PipelineError(format!(
                "reranker returned {} documents for {expected} inputs",
                reranked.len()
            )));
        }
        Ok(reranked)
    }

    /// Render the evidence prompt for `query` over `ranked`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PromptError`] if the template fails to render.
    pub fn build_prompt(&self, query: &str, ranked: &[ScoredDocument]) -> Result<String> {
        prompt::build_evidence_prompt(&self.config.evidence_template, query, ranked)
    }

    /// Score each ranked passage against `answer`.
    pub fn compute_overlap(&self, answer: &str, ranked: &[ScoredDocument]) -> Vec<Evidence> {
        overlap::compute_overlap(answer, ranked)
    }

    /// Answer `query` with evidence annotations.
    ///
    /// When retrieval finds nothing the configured no-evidence message is
    /// returned with empty evidence and sources, and the generator is not
    /// called.
    ///
    /// # Errors
    ///
    /// Propagates retrieval and generation failures. No partial result is
    /// returned.
    pub async fn generate(&self, query: &str) -> Result<GenerationResult> {
        debug!(query_len = query.len(), top_k = self.config.top_k, "retrieving documents");
        let retrieved = self.retrieve(query).await?;

        if retrieved.is_empty() {
            info!("no documents retrieved");
            return Ok(GenerationResult {
                answer: self.config.no_evidence_message.clone(),
                evidence: Vec::new(),
                sources: Vec::new(),
            });
        }

        debug!(result_count = retrieved.len(), "reranking documents");
        let ranked = self.rerank(query, retrieved).await?;

        let prompt = self.build_prompt(query, &ranked)?;

        debug!(prompt_len = prompt.len(), generator = self.generator.name(), "generating answer");
        let answer = self
            .generator
            .invoke(&prompt)
            .await
            .inspect_err(|e| {
                error!(generator = self.generator.name(), error = %e, "generation failed");
            })?
            .into_text();

        debug!(answer_len = answer.len(), "computing evidence overlap");
        let evidence = self.compute_overlap(&answer, &ranked);
        let sources = ranked.iter().map(|scored| scored.document.citation()).collect();

        info!(evidence_count = evidence.len(), "generation completed");

        Ok(GenerationResult { answer, evidence, sources })
    }
}

/// Builder for constructing a [`LightRag`].
///
/// `config` defaults to [`RagConfig::default()`] and `reranker` to
/// [`LengthBonusReranker`]; `retriever` and `generator` are required.
#[derive(Default)]
pub struct LightRagBuilder {
    config: Option<RagConfig>,
    retriever: Option<Arc<dyn Retriever>>,
    reranker: Option<Arc<dyn Reranker>>,
    generator: Option<Arc<dyn Generator>>,
}

impl LightRagBuilder {
    /// Set the configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the document retriever.
    pub fn retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Replace the default [`LengthBonusReranker`].
    pub fn reranker(mut self, reranker: Arc<dyn Reranker>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    /// Set the answer generator.
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`LightRag`], validating the configuration and collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a required field is missing or
    /// the configuration is invalid.
    pub fn build(self) -> Result<LightRag> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let retriever = self
            .retriever
            .ok_or_else(|| RagError::ConfigError("retriever is required".to_string()))?;
        let generator = self
            .generator
            .ok_or_else(|| RagError::ConfigError("generator is required".to_string()))?;
        let reranker = self.reranker.unwrap_or_else(|| Arc::new(LengthBonusReranker::default()));

        Ok(LightRag { config, retriever, reranker, generator })
    }
}
