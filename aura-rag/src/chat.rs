//! Conversational retrieval answering with per-session history.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::RagConfig;
use crate::error::{RagError, Result};
use crate::generator::Generator;
use crate::prompt;
use crate::retriever::Retriever;
use crate::session::{ChatMessage, SessionStore};

/// The outcome of one [`ConversationalRag::ask`] call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    /// The generated answer.
    pub answer: String,
    /// Citations of the documents placed in the context, in retrieval order.
    pub sources: Vec<String>,
}

/// Plain retrieval chat: documents are stitched into a context block, prior
/// turns of the session are added to the prompt, and every exchange is
/// recorded in the [`SessionStore`].
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use aura_rag::{ConversationalRag, InMemorySessionStore, RagConfig};
///
/// let chat = ConversationalRag::new(
///     RagConfig::default(),
///     Arc::new(my_index),
///     Arc::new(my_model),
///     Arc::new(InMemorySessionStore::new()),
/// )?;
/// let reply = chat.ask("main", "Which probe should I use?").await?;
/// ```
pub struct ConversationalRag {
    config: RagConfig,
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn Generator>,
    sessions: Arc<dyn SessionStore>,
}

impl ConversationalRag {
    /// Create a conversational engine.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `config` is invalid.
    pub fn new(
        config: RagConfig,
        retriever: Arc<dyn Retriever>,
        generator: Arc<dyn Generator>,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, retriever, generator, sessions })
    }

    /// Return a reference to the session store.
    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Answer `question` within `session_id`, then record the exchange.
    ///
    /// Unlike [`LightRag::generate`](crate::LightRag::generate) this always
    /// calls the generator; the template tells the model to say so when the
    /// context is insufficient.
    ///
    /// # Errors
    ///
    /// Propagates retrieval, generation and session store failures. Nothing
    /// is recorded when generation fails.
    pub async fn ask(&self, session_id: &str, question: &str) -> Result<ChatReply> {
        let documents =
            self.retriever.retrieve(question, self.config.chat_top_k).await.inspect_err(|e| {
                error!(session_id, error = %e, "retrieval failed");
            })?;
        let documents: Vec<_> = documents.into_iter().take(self.config.chat_top_k).collect();

        let context = prompt::format_context(documents.iter().map(|scored| &scored.document));
        let history = self.render_history(session_id).await?;
        let prompt = prompt::build_answer_prompt(
            &self.config.answer_template,
            question,
            &context,
            &history,
        )?;

        debug!(session_id, document_count = documents.len(), "generating chat answer");
        let answer = self
            .generator
            .invoke(&prompt)
            .await
            .inspect_err(|e| {
                let generator = self.generator.name();
                error!(session_id, generator, error = %e, "generation failed");
            })?
            .into_text();

        let turn = vec![ChatMessage::user(question), ChatMessage::assistant(answer.clone())];
        self.sessions.extend(session_id, turn).await.map_err(|e| {
            error!(session_id, error = %e, "failed to record chat turn");
            RagError::SessionError(format!("failed to record turn in '{session_id}': {e}"))
        })?;

        let sources = documents.iter().map(|scored| scored.document.citation()).collect();
        info!(session_id, answer_len = answer.len(), "chat turn completed");

        Ok(ChatReply { answer, sources })
    }

    async fn render_history(&self, session_id: &str) -> Result<String> {
        let history = self.sessions.history(session_id).await?;
        let skip = history.len().saturating_sub(self.config.max_history_messages);
        Ok(history[skip..]
            .iter()
            .map(|message| format!("{}: {}", message.role, message.content))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
