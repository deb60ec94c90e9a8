//! Conversation orchestration: one user turn in, one stored reply out.

use crate::error::ConciergeCoreError;
use crate::prompt::PromptBuilder;
use crate::provider::{ChatProvider, CompletionRequest, PromptMessage};
use crate::store::SessionStore;
use crate::types::{Message, Role, SessionId, Topic};
use chrono::{DateTime, Utc};
use concierge_config::ConciergeConfig;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

/// Reply substituted when the completion provider fails.
pub const FALLBACK_REPLY: &str = "Sorry — I could not get a response right now.";

/// Result payload for a single conversation turn.
#[derive(Debug, Clone)]
pub struct TurnResult {
    /// Assistant reply content.
    pub reply: String,
    /// When the turn finished.
    pub created_at: DateTime<Utc>,
}

/// Drives one support conversation turn end to end.
pub struct Orchestrator {
    config: Arc<ConciergeConfig>,
    store: SessionStore,
    provider: Arc<dyn ChatProvider>,
    prompts: PromptBuilder,
    turn_locks: Mutex<HashMap<SessionId, Arc<AsyncMutex<()>>>>,
}

impl Orchestrator {
    /// Construct an orchestrator over a session store and completion provider.
    pub fn new(
        config: ConciergeConfig,
        store: SessionStore,
        provider: Arc<dyn ChatProvider>,
    ) -> Self {
        info!("initializing orchestrator");
        debug!(
            "orchestrator config (model={}, max_tokens={}, temperature={})",
            config.provider.model, config.provider.max_tokens, config.provider.temperature
        );
        let prompts = PromptBuilder::new(config.prompt.base_instructions.clone());
        Self {
            config: Arc::new(config),
            store,
            provider,
            prompts,
            turn_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Effective configuration for this orchestrator.
    pub fn config(&self) -> &ConciergeConfig {
        &self.config
    }

    /// Run a single conversation turn.
    ///
    /// Loads the session history, sends it with the new user message to the
    /// provider, and persists both the user message and the reply. A provider
    /// failure downgrades to [`FALLBACK_REPLY`]; the turn is still persisted.
    /// Turns on the same session run one at a time.
    pub async fn handle_turn(
        &self,
        session_id: &SessionId,
        user_text: &str,
        topic: Option<Topic>,
    ) -> Result<TurnResult, ConciergeCoreError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(ConciergeCoreError::EmptyMessage);
        }

        let lock = self.turn_lock(session_id);
        let result = {
            let _turn = lock.lock().await;
            self.run_turn(session_id, text, topic).await
        };
        self.release_turn_lock(session_id, &lock);
        result
    }

    /// Body of one turn, run while the session's lock is held.
    async fn run_turn(
        &self,
        session_id: &SessionId,
        text: &str,
        topic: Option<Topic>,
    ) -> Result<TurnResult, ConciergeCoreError> {
        info!(
            "starting turn (session_id={}, topic={:?}, message_len={})",
            session_id,
            topic,
            text.len()
        );

        let mut conversation = self.store.load(session_id)?;
        let user_message = Message::now(Role::User, text);

        let mut messages = Vec::with_capacity(conversation.len() + 2);
        messages.push(PromptMessage {
            role: Role::System.as_str().to_string(),
            content: self.prompts.system_prompt(topic),
        });
        for message in &conversation.messages {
            messages.push(PromptMessage {
                role: message.role.as_str().to_string(),
                content: message.content.clone(),
            });
        }
        messages.push(PromptMessage {
            role: Role::User.as_str().to_string(),
            content: user_message.content.clone(),
        });

        let request = CompletionRequest {
            messages,
            model: self.config.provider.model.clone(),
            max_tokens: self.config.provider.max_tokens,
            temperature: self.config.provider.temperature,
        };
        let reply = match self.provider.complete(&request).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(
                    "provider call failed, substituting fallback (session_id={}, error={})",
                    session_id, err
                );
                FALLBACK_REPLY.to_string()
            }
        };

        let assistant_message = Message::now(Role::Assistant, reply.clone());
        conversation.push(user_message);
        conversation.push(assistant_message);
        self.store.save(session_id, &conversation)?;
        info!(
            "completed turn (session_id={}, reply_len={}, messages={})",
            session_id,
            reply.len(),
            conversation.len()
        );

        Ok(TurnResult {
            reply,
            created_at: Utc::now(),
        })
    }

    /// Async lock serializing turns on one session.
    fn turn_lock(&self, session_id: &SessionId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.turn_locks.lock();
        locks
            .entry(session_id.clone())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Remove a session's lock entry when no other turn holds a handle to
    /// it, keeping the map bounded by the number of turns in flight.
    fn release_turn_lock(&self, session_id: &SessionId, lock: &Arc<AsyncMutex<()>>) {
        let mut locks = self.turn_locks.lock();
        // Two handles are the map entry and ours; a waiting turn holds a third,
        // and new clones are only taken under the map lock held here.
        if Arc::strong_count(lock) == 2 {
            locks.remove(session_id);
        }
    }
}
