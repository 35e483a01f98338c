//! AppState Integration Tests
//!
//! Wires every service over a temporary data directory and drives the
//! generation flow through a scripted provider.

use std::sync::Arc;

use promptsmith_core::{PromptCategory, PromptRequest};
use promptsmith_desktop::models::settings::SettingsUpdate;
use promptsmith_desktop::models::theme::ThemeId;
use promptsmith_desktop::services::{CompletionOutcome, GenerationStatus};
use promptsmith_desktop::state::AppState;

use crate::support::{client, ScriptedProvider};

async fn state_in(dir: &std::path::Path) -> AppState {
    let state = AppState::new();
    state.initialize_in(dir).await.expect("initialize state");
    state
}

#[tokio::test]
async fn test_generate_and_regenerate_through_state() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(dir.path()).await;
    let provider = Arc::new(ScriptedProvider::payloads(&["first", "second"]));
    let client = client(provider.clone());

    let request = PromptRequest::new("a haiku about rust", PromptCategory::CreativeWriting, "Witty");
    let first = match state.generate_with(&client, request).await.unwrap() {
        Some(CompletionOutcome::Succeeded(item)) => item,
        other => panic!("expected success, got {:?}", other),
    };

    let second = match state.regenerate_with(&client, None).await.unwrap() {
        Some(CompletionOutcome::Succeeded(item)) => item,
        other => panic!("expected success, got {:?}", other),
    };

    assert_ne!(first.id(), second.id());
    assert_eq!(second.original_input(), "a haiku about rust");
    assert_eq!(second.category(), PromptCategory::CreativeWriting);
    assert_eq!(second.tone(), "Witty");
    assert_eq!(provider.calls(), 2);

    let (status, history) = state
        .with_session(|s| (s.status(), s.history().len()))
        .await
        .unwrap();
    assert_eq!(status, GenerationStatus::Succeeded);
    assert_eq!(history, 2);
}

#[tokio::test]
async fn test_regenerate_unknown_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(dir.path()).await;
    let provider = Arc::new(ScriptedProvider::payloads(&["unused"]));

    let result = state
        .regenerate_with(&client(provider.clone()), Some("missing"))
        .await;
    assert!(result.is_err());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_collections_theme_and_session_persist_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let saved_id = {
        let state = state_in(dir.path()).await;
        let provider = Arc::new(ScriptedProvider::payloads(&["keep me"]));
        let request = PromptRequest::new("launch email", PromptCategory::Marketing, "Casual");
        state
            .generate_with(&client(provider), request)
            .await
            .unwrap()
            .unwrap();

        let id = state
            .with_session(|s| {
                s.toggle_saved();
                s.current().map(|c| c.id().to_string())
            })
            .await
            .unwrap()
            .unwrap();

        state.theme().await.unwrap().set(ThemeId::Ocean).unwrap();
        state
            .auth()
            .await
            .unwrap()
            .register("Ada", "ada", "ada@example.com", "hunter22")
            .unwrap();
        id
    };

    let state = state_in(dir.path()).await;
    let (history, saved) = state
        .with_session(|s| (s.history().to_vec(), s.saved().to_vec()))
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id(), saved_id);
    assert_eq!(state.theme().await.unwrap().current(), ThemeId::Ocean);

    let user = state.auth().await.unwrap().current_user().unwrap();
    assert_eq!(user.username, "ada");
}

#[tokio::test]
async fn test_login_logout_round() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(dir.path()).await;
    let auth = state.auth().await.unwrap();

    auth.register("Grace", "grace", "grace@example.com", "cobol")
        .unwrap();
    auth.logout().unwrap();
    assert!(auth.current_user().is_none());

    assert!(auth.login("grace", "wrong").is_err());
    let user = auth.login("grace@example.com", "cobol").unwrap();
    assert_eq!(user.name, "Grace");
    assert_eq!(auth.current_user().unwrap().id, user.id);
}

#[tokio::test]
async fn test_settings_update_persists() {
    let dir = tempfile::tempdir().unwrap();
    {
        let state = state_in(dir.path()).await;
        let update = SettingsUpdate {
            temperature: Some(0.2),
            ..Default::default()
        };
        let config = state.update_config(update).await.unwrap();
        assert_eq!(config.temperature, 0.2);
    }

    let state = state_in(dir.path()).await;
    assert_eq!(state.get_config().await.unwrap().temperature, 0.2);
}
