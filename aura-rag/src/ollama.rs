//! Ollama generator using the Ollama chat API.
//!
//! This module is only available when the `ollama` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{RagError, Result};
use crate::generator::{Generator, GeneratorResponse};
use crate::session::{ChatMessage, Role};

/// The default Ollama server address.
const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// The default chat model.
const DEFAULT_MODEL: &str = "llama3.2:1b";

/// A [`Generator`] backed by a local Ollama server.
///
/// Uses `reqwest` to call `/api/chat` with streaming disabled, so each call
/// resolves with the complete answer.
///
/// # Configuration
///
/// - `endpoint` – defaults to `http://localhost:11434`, or `OLLAMA_HOST`.
/// - `model` – defaults to `llama3.2:1b`, or `OLLAMA_MODEL`.
///
/// # Example
///
/// ```rust,ignore
/// use aura_rag::ollama::OllamaGenerator;
///
/// let generator = OllamaGenerator::new().with_model("llama3.2:3b");
/// let answer = generator.invoke("Explain Kirchhoff's current law.").await?.into_text();
/// ```
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl Default for OllamaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl OllamaGenerator {
    /// Create a generator talking to the default endpoint and model.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.into(),
            model: DEFAULT_MODEL.into(),
        }
    }

    /// Create a generator from `OLLAMA_HOST` and `OLLAMA_MODEL`, falling back
    /// to the defaults for unset variables.
    pub fn from_env() -> Self {
        let mut generator = Self::new();
        if let Ok(endpoint) = std::env::var("OLLAMA_HOST") {
            generator = generator.with_endpoint(endpoint);
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            generator = generator.with_model(model);
        }
        generator
    }

    /// Set the server address, e.g. `http://192.168.1.20:11434`.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The configured server address.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn generation_error(message: String) -> RagError {
        RagError::GenerationError { generator: "Ollama".into(), message }
    }
}

// ── Ollama API request/response types ──────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

// ── Generator implementation ───────────────────────────────────────

#[async_trait]
impl Generator for OllamaGenerator {
    async fn invoke(&self, prompt: &str) -> Result<GeneratorResponse> {
        debug!(
            generator = "Ollama",
            model = %self.model,
            prompt_len = prompt.len(),
            "chat request"
        );

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![RequestMessage { role: Role::User, content: prompt }],
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.endpoint))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(generator = "Ollama", error = %e, "request failed");
                Self::generation_error(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail =
                serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error).unwrap_or(body);

            error!(generator = "Ollama", %status, "API error");
            return Err(Self::generation_error(format!("API returned {status}: {detail}")));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(generator = "Ollama", error = %e, "failed to parse response");
            Self::generation_error(format!("failed to parse response: {e}"))
        })?;

        Ok(GeneratorResponse::Message(chat_response.message))
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
