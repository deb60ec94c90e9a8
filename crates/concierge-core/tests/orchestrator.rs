//! Orchestrator integration tests with mock completion providers.

use concierge_config::ConciergeConfig;
use concierge_core::{
    ChatProvider, ConciergeCoreError, FALLBACK_REPLY, Orchestrator, Role, SessionId, SessionStore,
    Topic,
};
use concierge_test_utils::{FailingProvider, FixedProvider, RecordingProvider, SlowProvider};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

/// Build an orchestrator with default config over the given store root.
fn orchestrator_at(root: &Path, provider: Arc<dyn ChatProvider>) -> Orchestrator {
    let store = SessionStore::new(root).expect("store");
    Orchestrator::new(ConciergeConfig::default(), store, provider)
}

/// A turn should persist the user message and the reply, in that order.
#[tokio::test]
async fn turn_appends_user_then_assistant() {
    let temp = tempdir().expect("tempdir");
    let orchestrator = orchestrator_at(
        temp.path(),
        Arc::new(FixedProvider::new("Hello! How can I help?")),
    );
    let session_id = SessionId::parse("customer-1").expect("id");

    let result = orchestrator
        .handle_turn(&session_id, "Hi there", None)
        .await
        .expect("turn");
    assert_eq!(result.reply, "Hello! How can I help?");

    let store = SessionStore::new(temp.path()).expect("store");
    let conversation = store.load(&session_id).expect("load");
    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation.messages[0].role, Role::User);
    assert_eq!(conversation.messages[0].content, "Hi there");
    assert_eq!(conversation.messages[1].role, Role::Assistant);
    assert_eq!(conversation.messages[1].content, "Hello! How can I help?");
    assert!(!conversation.messages[0].timestamp.is_empty());
    assert!(!conversation.messages[1].timestamp.is_empty());
}

/// A blank message should be rejected before anything touches disk or wire.
#[tokio::test]
async fn empty_message_is_rejected_before_any_side_effect() {
    let temp = tempdir().expect("tempdir");
    let provider = RecordingProvider::new("unused");
    let orchestrator = orchestrator_at(temp.path(), Arc::new(provider.clone()));
    let session_id = SessionId::parse("customer-2").expect("id");

    let err = orchestrator
        .handle_turn(&session_id, "   \n\t", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ConciergeCoreError::EmptyMessage));

    let stored = std::fs::read_dir(temp.path()).expect("read_dir").count();
    assert_eq!(stored, 0);
    assert!(provider.last_request().is_none());
}

/// Topic tags should append their restriction clause to the system prompt.
#[tokio::test]
async fn topic_selects_restriction_clause() {
    let temp = tempdir().expect("tempdir");
    let provider = RecordingProvider::new("noted");
    let orchestrator = orchestrator_at(temp.path(), Arc::new(provider.clone()));
    let base = orchestrator.config().prompt.base_instructions.clone();

    let session_id = SessionId::parse("edu").expect("id");
    orchestrator
        .handle_turn(&session_id, "Which courses fit me?", Some(Topic::Education))
        .await
        .expect("turn");
    let system = provider.last_request().expect("request").messages[0].clone();
    assert_eq!(system.role, "system");
    assert!(system.content.starts_with(&base));
    assert!(system.content.ends_with("stay on education topics."));

    let session_id = SessionId::parse("shop").expect("id");
    orchestrator
        .handle_turn(&session_id, "Where is my order?", Some(Topic::Ecommerce))
        .await
        .expect("turn");
    let system = provider.last_request().expect("request").messages[0].clone();
    assert!(system.content.starts_with(&base));
    assert!(system.content.ends_with("stay on shopping/delivery topics."));

    let session_id = SessionId::parse("open").expect("id");
    orchestrator
        .handle_turn(&session_id, "Hello", None)
        .await
        .expect("turn");
    let system = provider.last_request().expect("request").messages[0].clone();
    assert_eq!(system.content, base);
}

/// Provider failures should degrade to the fallback reply and still persist.
#[tokio::test]
async fn provider_failure_substitutes_fallback_reply() {
    let temp = tempdir().expect("tempdir");
    let orchestrator = orchestrator_at(
        temp.path(),
        Arc::new(FailingProvider::new("connection refused")),
    );
    let session_id = SessionId::parse("customer-down").expect("id");

    let result = orchestrator
        .handle_turn(&session_id, "Anyone there?", None)
        .await
        .expect("turn");
    assert_eq!(result.reply, FALLBACK_REPLY);

    let store = SessionStore::new(temp.path()).expect("store");
    let conversation = store.load(&session_id).expect("load");
    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation.messages[0].content, "Anyone there?");
    assert_eq!(conversation.messages[1].content, FALLBACK_REPLY);
}

/// Follow-up turns should replay the stored history to the provider.
#[tokio::test]
async fn history_is_replayed_on_followup_turns() {
    let temp = tempdir().expect("tempdir");
    let provider = RecordingProvider::new("You said hi!");
    let orchestrator = orchestrator_at(temp.path(), Arc::new(provider.clone()));
    let session_id = SessionId::parse("customer-3").expect("id");

    orchestrator
        .handle_turn(&session_id, "Hi", None)
        .await
        .expect("first turn");
    orchestrator
        .handle_turn(&session_id, "What did I just say?", None)
        .await
        .expect("second turn");

    let request = provider.last_request().expect("request");
    let roles: Vec<&str> = request
        .messages
        .iter()
        .map(|message| message.role.as_str())
        .collect();
    assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
    assert_eq!(request.messages[1].content, "Hi");
    assert_eq!(request.messages[2].content, "You said hi!");
    assert_eq!(request.messages[3].content, "What did I just say?");

    let store = SessionStore::new(temp.path()).expect("store");
    assert_eq!(store.load(&session_id).expect("load").len(), 4);
}

/// Concurrent turns on one session should queue instead of losing messages.
#[tokio::test]
async fn turns_on_one_session_serialize() {
    let temp = tempdir().expect("tempdir");
    let orchestrator = Arc::new(orchestrator_at(
        temp.path(),
        Arc::new(SlowProvider::new("done", Duration::from_millis(50))),
    ));
    let session_id = SessionId::parse("busy").expect("id");

    let (first, second) = tokio::join!(
        orchestrator.handle_turn(&session_id, "first question", None),
        orchestrator.handle_turn(&session_id, "second question", None),
    );
    first.expect("first turn");
    second.expect("second turn");

    let store = SessionStore::new(temp.path()).expect("store");
    let conversation = store.load(&session_id).expect("load");
    assert_eq!(conversation.len(), 4);
    let contents: Vec<&str> = conversation
        .messages
        .iter()
        .map(|message| message.content.as_str())
        .collect();
    assert!(contents.contains(&"first question"));
    assert!(contents.contains(&"second question"));
}
