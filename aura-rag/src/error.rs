//! Error types for the `aura-rag` crate.

use thiserror::Error;

/// Errors that can occur while answering a question.
///
/// An empty retrieval, missing document metadata and a degenerate overlap
/// are handled in place and never surface as errors.
#[derive(Debug, Error)]
pub enum RagError {
    /// The vector index failed to answer a similarity search.
    #[error("Retrieval error ({backend}): {message}")]
    RetrievalError {
        /// The retriever backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The language model call failed or returned an unusable response.
    #[error("Generation error ({generator}): {message}")]
    GenerationError {
        /// The generator that produced the error.
        generator: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during result reranking.
    #[error("Reranker error ({reranker}): {message}")]
    RerankerError {
        /// The reranker that produced the error.
        reranker: String,
        /// A description of the failure.
        message: String,
    },

    /// A prompt template failed to render.
    #[error("Prompt error: {0}")]
    PromptError(String),

    /// The session store rejected an operation.
    #[error("Session error: {0}")]
    SessionError(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error in pipeline orchestration.
    #[error("Pipeline error: {0}")]
    PipelineError(String),
}

impl From<minijinja::Error> for RagError {
    fn from(err: minijinja::Error) -> Self {
        RagError::PromptError(err.to_string())
    }
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
