//! Core data types for sessions, messages, and topics.

use crate::error::ConciergeCoreError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Timestamp format stamped on stored messages, e.g. `25-Aug-2026 03:41 PM`.
pub const MESSAGE_TIMESTAMP_FORMAT: &str = "%d-%b-%Y %I:%M %p";
/// Timestamp prefix for generated session identifiers.
pub const SESSION_ID_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
/// Longest accepted client-supplied session identifier.
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Unique identifier for a session.
///
/// Identifiers double as file names under the session store root, so
/// parsing rejects anything outside `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh identifier: a local timestamp plus a short random suffix.
    pub fn generate() -> Self {
        let stamp = Local::now().format(SESSION_ID_TIMESTAMP_FORMAT).to_string();
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{stamp}-{}", &suffix[..6]))
    }

    /// Accept a client-supplied identifier after checking it is file-safe.
    pub fn parse(value: &str) -> Result<Self, ConciergeCoreError> {
        let file_safe = !value.is_empty()
            && value.len() <= MAX_SESSION_ID_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !file_safe {
            return Err(ConciergeCoreError::InvalidSessionId(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message stored in a session transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role that produced the message.
    pub role: Role,
    /// Message content.
    pub content: String,
    /// Local wall-clock time in [`MESSAGE_TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

impl Message {
    /// Build a message stamped with the current local time.
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Local::now().format(MESSAGE_TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Speaker role for a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System-generated message.
    System,
    /// User-authored message.
    User,
    /// Assistant-authored message.
    Assistant,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Full transcript of one session, serialized as a bare JSON array.
///
/// Every turn appends two messages and nothing is ever truncated, so
/// transcripts grow without bound.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Conversation {
    /// Messages in arrival order, oldest first.
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript holds no messages yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message to the transcript.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

/// Support domain that narrows the assistant's scope for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Education, courses, and academic help.
    Education,
    /// Shopping, orders, and delivery.
    Ecommerce,
}

impl Topic {
    /// Match a client-supplied tag against the known topics.
    ///
    /// Matching is exact; unknown or differently-cased tags select no topic.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "education" => Some(Topic::Education),
            "ecommerce" => Some(Topic::Ecommerce),
            _ => None,
        }
    }
}
