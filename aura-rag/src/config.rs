//! Configuration for the answering engines.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};
use crate::prompt::{
    ANSWER_TEMPLATE_VARS, DEFAULT_ANSWER_TEMPLATE, DEFAULT_EVIDENCE_TEMPLATE,
    EVIDENCE_TEMPLATE_VARS, validate_template,
};

/// Answer returned when retrieval finds nothing.
pub const DEFAULT_NO_EVIDENCE_MESSAGE: &str = "No relevant information found in the documents.";

/// Configuration parameters shared by [`LightRag`](crate::LightRag) and
/// [`ConversationalRag`](crate::ConversationalRag).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RagConfig {
    /// Number of documents retrieved for evidence-scored answers.
    pub top_k: usize,
    /// Number of documents retrieved for conversational answers.
    pub chat_top_k: usize,
    /// Instruction template referencing `evidence` and `question`.
    pub evidence_template: String,
    /// Instruction template referencing `context` and `question`
    /// (and optionally `history`).
    pub answer_template: String,
    /// Answer returned without calling the generator when retrieval is empty.
    pub no_evidence_message: String,
    /// Most recent chat messages included in a conversational prompt.
    pub max_history_messages: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            chat_top_k: 5,
            evidence_template: DEFAULT_EVIDENCE_TEMPLATE.to_string(),
            answer_template: DEFAULT_ANSWER_TEMPLATE.to_string(),
            no_evidence_message: DEFAULT_NO_EVIDENCE_MESSAGE.to_string(),
            max_history_messages: 20,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }

    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `top_k == 0` or `chat_top_k == 0`
    /// - `evidence_template` does not reference `evidence` and `question`
    /// - `answer_template` does not reference `context` and `question`
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        if self.chat_top_k == 0 {
            return Err(RagError::ConfigError("chat_top_k must be greater than zero".to_string()));
        }
        validate_template("evidence_template", &self.evidence_template, EVIDENCE_TEMPLATE_VARS)?;
        validate_template("answer_template", &self.answer_template, ANSWER_TEMPLATE_VARS)?;
        Ok(())
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the number of documents retrieved for evidence-scored answers.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the number of documents retrieved for conversational answers.
    pub fn chat_top_k(mut self, k: usize) -> Self {
        self.config.chat_top_k = k;
        self
    }

    /// Replace the evidence instruction template.
    pub fn evidence_template(mut self, template: impl Into<String>) -> Self {
        self.config.evidence_template = template.into();
        self
    }

    /// Replace the conversational instruction template.
    pub fn answer_template(mut self, template: impl Into<String>) -> Self {
        self.config.answer_template = template.into();
        self
    }

    /// Replace the answer used when retrieval is empty.
    pub fn no_evidence_message(mut self, message: impl Into<String>) -> Self {
        self.config.no_evidence_message = message.into();
        self
    }

    /// Set how many recent chat messages are included in a prompt.
    pub fn max_history_messages(mut self, n: usize) -> Self {
        self.config.max_history_messages = n;
        self
    }

    /// Build the [`RagConfig`], validating it with [`RagConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if validation fails.
    pub fn build(self) -> Result<RagConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
