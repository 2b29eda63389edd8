//! # aura-rag
//!
//! Evidence-scored retrieval-augmented answering for a lab-manual assistant.
//!
//! The engine retrieves passages from a vector index, reranks them with a
//! length-aware heuristic, asks a language model to answer from numbered
//! evidence, and then reports how much of each passage's vocabulary the
//! answer shares.
//!
//! ## Components
//!
//! - [`Retriever`]: similarity search over the corpus (supplied by the caller)
//! - [`Reranker`]: [`LengthBonusReranker`] by default
//! - [`Generator`]: the language model (supplied by the caller, or
//!   `ollama::OllamaGenerator` with the `ollama` feature)
//! - [`LightRag`]: the evidence-scored pipeline
//! - [`ConversationalRag`]: plain retrieval chat backed by a [`SessionStore`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aura_rag::{LightRag, RagConfig};
//!
//! let rag = LightRag::builder()
//!     .config(RagConfig::builder().top_k(4).build()?)
//!     .retriever(Arc::new(index))
//!     .generator(Arc::new(model))
//!     .build()?;
//!
//! let result = rag.generate("How do I wire the breadboard?").await?;
//! ```

pub mod chat;
pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod lightrag;
pub mod overlap;
pub mod prompt;
pub mod reranker;
pub mod retriever;
pub mod session;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use chat::{ChatReply, ConversationalRag};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Document, ScoredDocument};
pub use error::{RagError, Result};
pub use generator::{Generator, GeneratorResponse};
pub use lightrag::{GenerationResult, LightRag, LightRagBuilder};
pub use overlap::{Evidence, compute_overlap};
pub use reranker::{LengthBonusReranker, NoOpReranker, Reranker, length_bonus};
pub use retriever::Retriever;
pub use session::{ChatMessage, InMemorySessionStore, Role, SessionStore};

#[cfg(feature = "ollama")]
pub use ollama::OllamaGenerator;
