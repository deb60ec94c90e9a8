//! Core conversation primitives for the concierge backend.
//!
//! This crate owns the conversation orchestrator, session persistence, prompt
//! assembly, and the completion provider boundary used by the server.

pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod store;
pub mod types;

pub use error::ConciergeCoreError;
pub use orchestrator::{FALLBACK_REPLY, Orchestrator, TurnResult};
pub use prompt::PromptBuilder;
/// Completion provider boundary and the Groq-backed client.
pub use provider::{ChatProvider, CompletionRequest, GroqClient, PromptMessage, ProviderError};
pub use store::{SessionStore, StoreError};
pub use types::{Conversation, Message, Role, SessionId, Topic};
