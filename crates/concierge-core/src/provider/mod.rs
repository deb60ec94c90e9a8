//! Chat completion provider abstraction and the Groq-backed client.

mod groq;

pub use groq::GroqClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by completion providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure before a response arrived.
    #[error("request failed: {0}")]
    Http(String),
    /// The request exceeded the configured deadline.
    #[error("request timed out after {0}s")]
    Timeout(u64),
    /// The API answered with a non-success status.
    #[error("api error (status={status}): {message}")]
    Api { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// The response carried no assistant content.
    #[error("response carried no content")]
    MissingContent,
}

/// One chat message as sent to the completion API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Wire role name: `system`, `user`, or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

/// A fully assembled completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System prompt plus conversation, oldest first.
    pub messages: Vec<PromptMessage>,
    /// Model identifier.
    pub model: String,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Chat completion backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Request one assistant reply for the assembled conversation.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}
