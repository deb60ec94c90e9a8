//! Session persistence as one pretty-printed JSON document per session.

use crate::types::{Conversation, SessionId};
use log::{debug, info};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors returned by the session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// JSON-document store holding one conversation file per session.
pub struct SessionStore {
    /// Root directory for session documents.
    root: PathBuf,
    /// Serialize write access to session files.
    write_lock: Mutex<()>,
}

impl SessionStore {
    /// Create a store under the given root, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        info!("initialized session store (root={})", root.display());
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Build the document path for a session.
    fn document_path(&self, session_id: &SessionId) -> PathBuf {
        self.root.join(format!("chat_{}.json", session_id.as_str()))
    }

    /// Build the temporary file path used during rewrites.
    fn temp_path(&self, session_id: &SessionId) -> PathBuf {
        self.root
            .join(format!("chat_{}.json.tmp", session_id.as_str()))
    }

    /// Load a session's conversation, or an empty one when none is stored.
    pub fn load(&self, session_id: &SessionId) -> Result<Conversation, StoreError> {
        let path = self.document_path(session_id);
        if !path.exists() {
            debug!("no stored conversation (session_id={session_id})");
            return Ok(Conversation::new());
        }
        let contents = fs::read_to_string(&path)?;
        let conversation = serde_json::from_str(&contents)?;
        Ok(conversation)
    }

    /// Rewrite a session's document with the full conversation.
    ///
    /// The document lands in a temp file first and is renamed into place, so
    /// readers never observe a partially written transcript.
    pub fn save(
        &self,
        session_id: &SessionId,
        conversation: &Conversation,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let path = self.document_path(session_id);
        let temp_path = self.temp_path(session_id);
        {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&temp_path)?;
            let document = serde_json::to_string_pretty(conversation)?;
            file.write_all(document.as_bytes())?;
        }
        if path.exists() {
            fs::remove_file(&path)?;
        }
        fs::rename(temp_path, path)?;
        debug!(
            "saved conversation (session_id={}, messages={})",
            session_id,
            conversation.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Message, Role};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::tempdir;

    fn sample_conversation() -> Conversation {
        let mut conversation = Conversation::new();
        conversation.push(Message {
            role: Role::User,
            content: "¿Dónde está mi pedido? 😊".to_string(),
            timestamp: "25-Aug-2026 09:15 AM".to_string(),
        });
        conversation.push(Message {
            role: Role::Assistant,
            content: "Your order ships tomorrow.".to_string(),
            timestamp: "25-Aug-2026 09:16 AM".to_string(),
        });
        conversation
    }

    /// Saved conversations load back with every field intact.
    #[test]
    fn save_then_load_round_trips_verbatim() {
        let temp = tempdir().expect("tempdir");
        let store = SessionStore::new(temp.path()).expect("store");
        let session_id = SessionId::parse("20260825091500-abc123").expect("id");
        let conversation = sample_conversation();

        store.save(&session_id, &conversation).expect("save");
        let loaded = store.load(&session_id).expect("load");
        assert_eq!(loaded, conversation);
    }

    /// Loading an unknown session yields an empty conversation, not an error.
    #[test]
    fn load_unknown_session_is_empty() {
        let temp = tempdir().expect("tempdir");
        let store = SessionStore::new(temp.path()).expect("store");
        let session_id = SessionId::parse("nobody-home").expect("id");

        let loaded = store.load(&session_id).expect("load");
        assert!(loaded.is_empty());
    }

    /// Documents are named `chat_<id>.json` and hold a bare JSON array.
    #[test]
    fn document_layout_matches_store_contract() {
        let temp = tempdir().expect("tempdir");
        let store = SessionStore::new(temp.path()).expect("store");
        let session_id = SessionId::parse("20260825091500-abc123").expect("id");
        store.save(&session_id, &sample_conversation()).expect("save");

        let path = temp.path().join("chat_20260825091500-abc123.json");
        let contents = std::fs::read_to_string(&path).expect("document");
        let value: Value = serde_json::from_str(&contents).expect("json");
        assert!(value.is_array());
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        // to_string_pretty writes two-space indentation
        assert!(contents.contains("\n  "));
        assert!(!temp.path().join("chat_20260825091500-abc123.json.tmp").exists());
    }

    /// A corrupt document surfaces a serialization error instead of data loss.
    #[test]
    fn load_corrupt_document_fails() {
        let temp = tempdir().expect("tempdir");
        let store = SessionStore::new(temp.path()).expect("store");
        let session_id = SessionId::parse("corrupt").expect("id");
        std::fs::write(temp.path().join("chat_corrupt.json"), "{ not json").expect("write");

        let err = store.load(&session_id).unwrap_err();
        assert!(matches!(err, StoreError::Serde(_)));
    }
}
