//! Collection Integration Tests
//!
//! Invariants of Recent History and Saved Items through `CollectionStore` and
//! `GenerationSession`:
//! - history never exceeds its cap and keeps the newest entries
//! - ids stay unique with stable immutable fields across all locations
//! - toggling saved twice restores membership
//! - edits reach every location holding the id and nothing else
//! - clearing removes the persisted key and leaves everything else alone

use std::collections::HashMap;
use std::sync::Arc;

use promptsmith_core::{PromptCategory, PromptRequest, PromptResult};
use promptsmith_desktop::services::{CollectionStore, CompletionOutcome, FailureKind};
use promptsmith_desktop::storage::keys;

use crate::support::{client, item, memory_store, session_over, ScriptedProvider};

#[test]
fn test_history_cap_keeps_newest_twenty() {
    let mut store = CollectionStore::load(memory_store(), 20);
    for n in 0..57 {
        store.append(item(n));
        assert!(store.history().len() <= 20);
    }

    let ids: Vec<_> = store.history().iter().map(|i| i.id().to_string()).collect();
    let expected: Vec<_> = (37..57).rev().map(|n| format!("item-{:03}", n)).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_twenty_first_append_evicts_oldest() {
    let mut store = CollectionStore::load(memory_store(), 20);
    for n in 0..20 {
        store.append(item(n));
    }
    let oldest = store.history()[19].id().to_string();
    assert_eq!(oldest, "item-000");

    store.append(item(20));
    assert_eq!(store.history().len(), 20);
    assert_eq!(store.history()[0].id(), "item-020");
    assert!(store.history().iter().all(|i| i.id() != oldest));
}

#[test]
fn test_toggle_saved_adds_then_removes() {
    let mut store = CollectionStore::load(memory_store(), 20);
    store.toggle_saved(&item(1));
    store.toggle_saved(&item(2));
    let before: Vec<_> = store.saved().to_vec();

    let target = item(3);
    assert!(store.toggle_saved(&target));
    assert_eq!(store.saved()[0].id(), target.id());
    assert_eq!(store.saved().len(), before.len() + 1);

    assert!(!store.toggle_saved(&target));
    assert_eq!(store.saved(), before.as_slice());
}

#[tokio::test]
async fn test_ids_are_unique_and_identity_fields_stable() {
    let mut session = session_over(memory_store());
    let names: Vec<String> = (0..6).map(|n| format!("p{}", n)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let client = client(Arc::new(ScriptedProvider::payloads(&refs)));

    for n in 0..6 {
        session.set_request(PromptRequest::new(
            format!("idea {}", n),
            PromptCategory::ALL[n % PromptCategory::ALL.len()],
            "Witty",
        ));
        if let Some(CompletionOutcome::Failed(e)) = session.submit(&client).await {
            // Structured-data category rejects the plain payload
            assert_eq!(e.kind, FailureKind::Validation);
        }
        if n % 2 == 0 {
            session.toggle_saved();
        }
    }
    let first = session.history().last().cloned().unwrap();
    session.select(&first);
    session.update_refined_prompt(first.id(), "edited").unwrap();

    let mut seen: HashMap<String, PromptResult> = HashMap::new();
    let everything = session
        .history()
        .iter()
        .chain(session.saved().iter())
        .chain(session.current());
    for entry in everything {
        match seen.get(entry.id()) {
            Some(prior) => assert!(prior.same_identity(entry)),
            None => {
                seen.insert(entry.id().to_string(), entry.clone());
            }
        }
    }
    assert_eq!(seen.len(), session.history().len());
}

#[test]
fn test_update_reaches_only_locations_with_id() {
    let backend = memory_store();
    let mut store = CollectionStore::load(backend.clone(), 20);
    store.append(item(1));
    store.append(item(2));
    store.toggle_saved(&item(2));
    store.toggle_saved(&item(3));

    let untouched_saved = store.saved()[1].clone();
    let outcome = store.update("item-002", "new text");
    assert!(outcome.history && outcome.saved);

    let edited_history = &store.history()[0];
    assert_eq!(edited_history.refined_prompt(), "new text");
    assert!(edited_history.same_identity(&item(2)));
    assert_eq!(edited_history.explanation(), item(2).explanation());
    assert_eq!(store.history()[1], item(1));
    assert_eq!(store.saved()[1], untouched_saved);

    let reloaded = CollectionStore::load(backend, 20);
    assert_eq!(reloaded.history(), store.history());
    assert_eq!(reloaded.saved(), store.saved());
}

#[tokio::test]
async fn test_edit_of_non_current_id_changes_nothing() {
    let mut session = session_over(memory_store());
    session.set_request(PromptRequest::new("idea", PromptCategory::General, "Casual"));
    let client = client(Arc::new(ScriptedProvider::payloads(&["one", "two"])));
    session.submit(&client).await.unwrap();
    let older = session.current().unwrap().clone();
    session.submit(&client).await.unwrap();

    // `older` is in history but is no longer the current result
    assert!(session.update_refined_prompt(older.id(), "edited").is_none());
    assert_eq!(session.history()[1], older);
}

#[test]
fn test_clear_history_removes_key_and_keeps_saved() {
    let backend = memory_store();
    let mut session = session_over(backend.clone());
    let current = item(7);
    session.select(&current);
    session.toggle_saved();

    let mut store = CollectionStore::load(backend.clone(), 20);
    store.append(item(8));
    drop(store);

    let mut session = session_over(backend.clone());
    session.select(&current);
    assert_eq!(session.history().len(), 1);

    session.clear_history();
    assert!(session.history().is_empty());
    assert!(!backend.contains(keys::HISTORY));
    assert_eq!(session.saved().len(), 1);
    assert_eq!(session.current(), Some(&current));

    let reloaded = CollectionStore::load(backend, 20);
    assert!(reloaded.history().is_empty());
    assert_eq!(reloaded.saved().len(), 1);
}
