//! Generation Lifecycle Integration Tests
//!
//! Drives `GenerationSession` through a scripted provider:
//! - a plain coding request lands in the current slot and history
//! - fenced structured-data output is canonicalized
//! - unparsable structured-data output fails without touching history
//! - a response for a superseded request is discarded

use std::sync::Arc;

use promptsmith_core::{PromptCategory, PromptRequest, PromptResult};
use promptsmith_desktop::services::validator::STRICT_JSON_FAILURE;
use promptsmith_desktop::services::{CompletionOutcome, FailureKind, GenerationStatus};
use promptsmith_desktop::storage::keys;

use crate::support::{client, memory_store, session_over, ScriptedProvider};

#[tokio::test]
async fn test_coding_request_populates_current_and_history() {
    let store = memory_store();
    let mut session = session_over(store.clone());
    session.set_request(PromptRequest::new(
        "write a fibonacci function",
        PromptCategory::Coding,
        "Professional",
    ));

    let provider = Arc::new(ScriptedProvider::payloads(&["[ROLE] Senior engineer..."]));
    let outcome = session.submit(&client(provider.clone())).await.unwrap();

    let item = match outcome {
        CompletionOutcome::Succeeded(item) => item,
        other => panic!("expected success, got {:?}", other),
    };
    assert_eq!(provider.calls(), 1);
    assert_eq!(session.status(), GenerationStatus::Succeeded);
    assert_eq!(session.current(), Some(&item));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].id(), item.id());
    assert!(!item.id().is_empty());
    assert_eq!(item.tips(), &["a", "b", "c"]);
    assert_eq!(item.suggested_follow_up(), Some("Ask for unit tests"));

    let persisted: Vec<PromptResult> = store.load(keys::HISTORY).unwrap();
    assert_eq!(persisted, vec![item]);
}

#[tokio::test]
async fn test_fenced_structured_data_is_pretty_printed() {
    let mut session = session_over(memory_store());
    session.set_request(PromptRequest::new(
        "schema for a user",
        PromptCategory::StructuredData,
        "Professional",
    ));

    let provider = Arc::new(ScriptedProvider::payloads(&["```json\n{\"a\":1}\n```"]));
    session.submit(&client(provider)).await.unwrap();

    assert_eq!(
        session.current().unwrap().refined_prompt(),
        "{\n  \"a\": 1\n}"
    );
    assert_eq!(session.history()[0].refined_prompt(), "{\n  \"a\": 1\n}");
}

#[tokio::test]
async fn test_invalid_structured_data_fails_without_storing() {
    let store = memory_store();
    let mut session = session_over(store.clone());
    session.set_request(PromptRequest::new(
        "schema for a user",
        PromptCategory::StructuredData,
        "Professional",
    ));

    let provider = Arc::new(ScriptedProvider::payloads(&["not json"]));
    let outcome = session.submit(&client(provider)).await.unwrap();

    match outcome {
        CompletionOutcome::Failed(err) => {
            assert_eq!(err.kind, FailureKind::Validation);
            assert_eq!(err.to_string(), STRICT_JSON_FAILURE);
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(session.status(), GenerationStatus::Failed);
    assert!(session.history().is_empty());
    assert!(session.current().is_none());
    assert!(!store.contains(keys::HISTORY));
}

#[tokio::test]
async fn test_failure_keeps_prior_history_count() {
    let mut session = session_over(memory_store());
    session.set_request(PromptRequest::new("first idea", PromptCategory::General, ""));
    let provider = Arc::new(ScriptedProvider::payloads(&["ok"]));
    session.submit(&client(provider)).await.unwrap();

    session.set_request(PromptRequest::new("bad", PromptCategory::StructuredData, ""));
    let provider = Arc::new(ScriptedProvider::payloads(&["{broken"]));
    let outcome = session.submit(&client(provider)).await.unwrap();

    assert!(matches!(outcome, CompletionOutcome::Failed(_)));
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn test_superseded_response_is_discarded() {
    let mut session = session_over(memory_store());
    session.set_request(PromptRequest::new("old idea", PromptCategory::General, ""));
    let provider = Arc::new(ScriptedProvider::payloads(&["old", "new"]));
    let client = client(provider);

    let old = session.begin().unwrap();
    session.reset();
    session.set_input("new idea");
    let new = session.begin().unwrap();
    assert!(new.token() > old.token());

    let old_done = old.execute(&client).await;
    let new_done = new.execute(&client).await;

    assert_eq!(session.complete(old_done), CompletionOutcome::Discarded);
    assert_eq!(session.status(), GenerationStatus::Submitting);
    assert!(session.history().is_empty());

    match session.complete(new_done) {
        CompletionOutcome::Succeeded(item) => assert_eq!(item.original_input(), "new idea"),
        other => panic!("expected success, got {:?}", other),
    }
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn test_blank_input_never_reaches_provider() {
    let mut session = session_over(memory_store());
    session.set_input("   ");

    let provider = Arc::new(ScriptedProvider::payloads(&["unused"]));
    assert!(session.submit(&client(provider.clone())).await.is_none());
    assert_eq!(provider.calls(), 0);
    assert_eq!(session.status(), GenerationStatus::Idle);
}
