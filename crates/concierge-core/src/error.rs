//! Error types for the core conversation crate.

use crate::store::StoreError;
use thiserror::Error;

/// Errors returned by conversation handling.
#[derive(Debug, Error)]
pub enum ConciergeCoreError {
    /// The user message was empty after trimming.
    #[error("message is required")]
    EmptyMessage,
    /// A client-supplied session identifier is not file-safe.
    #[error("invalid session id: {0}")]
    InvalidSessionId(String),
    /// Reading or writing the session store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
