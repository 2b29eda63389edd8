//! Conversation history storage.
//!
//! [`SessionStore`] replaces a process-wide history cache: the store is
//! created by the caller and handed to [`ConversationalRag`](crate::ConversationalRag)
//! by `Arc`, so separate assistants never share history by accident.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::Result;

/// The author of a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions supplied by the application.
    System,
    /// The person asking questions.
    User,
    /// The language model.
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        f.write_str(name)
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// A message written by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// A message written by the assistant.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Storage for per-session chat history.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// All messages of a session in the order they were appended.
    ///
    /// Unknown sessions have an empty history.
    async fn history(&self, session_id: &str) -> Result<Vec<ChatMessage>>;

    /// Append a message to a session, creating the session if needed.
    async fn append(&self, session_id: &str, message: ChatMessage) -> Result<()>;

    /// Append several messages so they stay adjacent in the session.
    ///
    /// The default implementation appends one at a time; stores that can
    /// write atomically should override it.
    async fn extend(&self, session_id: &str, messages: Vec<ChatMessage>) -> Result<()> {
        for message in messages {
            self.append(session_id, message).await?;
        }
        Ok(())
    }

    /// Drop all messages of a session.
    async fn clear(&self, session_id: &str) -> Result<()>;

    /// Identifiers of every session with at least one message, sorted.
    async fn sessions(&self) -> Result<Vec<String>>;
}

/// A [`SessionStore`] held in memory.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn history(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned().unwrap_or_default())
    }

    async fn append(&self, session_id: &str, message: ChatMessage) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.entry(session_id.to_string()).or_default().push(message);
        Ok(())
    }

    async fn extend(&self, session_id: &str, messages: Vec<ChatMessage>) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.entry(session_id.to_string()).or_default().extend(messages);
        Ok(())
    }

    async fn clear(&self, session_id: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }

    async fn sessions(&self) -> Result<Vec<String>> {
        let sessions = self.sessions.read().await;
        let mut ids: Vec<String> = sessions
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }
}
