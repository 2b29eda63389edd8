//! Generator trait for producing answer text from a prompt.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::ChatMessage;

/// The raw output of a [`Generator`].
///
/// Completion-style backends return bare text while chat-style backends
/// return a message object. Both normalise through [`into_text`](Self::into_text),
/// so the rest of the engine only ever sees a `String`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GeneratorResponse {
    /// Plain completion text.
    Text(String),
    /// A chat message carrying the text in its `content`.
    Message(ChatMessage),
}

impl GeneratorResponse {
    /// The response text.
    pub fn text(&self) -> &str {
        match self {
            GeneratorResponse::Text(text) => text,
            GeneratorResponse::Message(message) => &message.content,
        }
    }

    /// Consume the response and return its text.
    pub fn into_text(self) -> String {
        match self {
            GeneratorResponse::Text(text) => text,
            GeneratorResponse::Message(message) => message.content,
        }
    }
}

impl From<String> for GeneratorResponse {
    fn from(text: String) -> Self {
        GeneratorResponse::Text(text)
    }
}

impl From<&str> for GeneratorResponse {
    fn from(text: &str) -> Self {
        GeneratorResponse::Text(text.to_string())
    }
}

impl From<ChatMessage> for GeneratorResponse {
    fn from(message: ChatMessage) -> Self {
        GeneratorResponse::Message(message)
    }
}

/// A language model that turns a prompt into an answer.
///
/// The call may stream internally, but it resolves only once the full text
/// is available. Failures should be reported as
/// [`RagError::GenerationError`](crate::RagError::GenerationError); callers
/// do not retry.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a response for `prompt`.
    async fn invoke(&self, prompt: &str) -> Result<GeneratorResponse>;

    /// A short generator name used in logs and errors.
    fn name(&self) -> &str {
        "generator"
    }
}
