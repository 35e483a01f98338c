//! Shared fixtures for integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use promptsmith_core::{GeneratedPromptData, PromptCategory, PromptRequest, PromptResult};
use promptsmith_desktop::services::{
    CollectionStore, GenerationClient, GenerationSession, ProgressIndicator,
};
use promptsmith_desktop::storage::{Database, DurableStore};
use promptsmith_llm::{
    CompletionRequest, LlmError, LlmProvider, LlmResponse, LlmResult, ProviderConfig,
};

/// Provider that replays scripted responses in order.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<LlmResult<LlmResponse>>>,
    calls: Mutex<usize>,
    config: ProviderConfig,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<LlmResult<LlmResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(0),
            config: ProviderConfig::default(),
        }
    }

    /// Successful responses whose payloads carry the given refined prompts.
    pub fn payloads(refined: &[&str]) -> Self {
        Self::new(
            refined
                .iter()
                .map(|r| Ok(LlmResponse::text(payload(r), "scripted")))
                .collect(),
        )
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted"
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn send_message(&self, _request: CompletionRequest) -> LlmResult<LlmResponse> {
        *self.calls.lock().unwrap() += 1;
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(LlmError::ProviderUnavailable {
                message: "script exhausted".to_string(),
            })
        })
    }

    async fn health_check(&self) -> LlmResult<()> {
        Ok(())
    }
}

/// JSON payload as the model would return it.
pub fn payload(refined: &str) -> String {
    serde_json::json!({
        "refinedPrompt": refined,
        "explanation": "Clarified the role and constraints",
        "tips": ["a", "b", "c"],
        "suggestedFollowUp": "Ask for unit tests"
    })
    .to_string()
}

pub fn client(provider: Arc<ScriptedProvider>) -> GenerationClient {
    GenerationClient::new(provider)
}

pub fn memory_store() -> DurableStore {
    DurableStore::new(Arc::new(
        Database::new_in_memory().expect("in-memory database"),
    ))
}

pub fn session_over(store: DurableStore) -> GenerationSession {
    GenerationSession::new(CollectionStore::load(store, 20), ProgressIndicator::default())
}

/// A stored item built without the remote call.
pub fn item(n: usize) -> PromptResult {
    PromptResult::with_identity(
        format!("item-{:03}", n),
        1_700_000_000_000 + n as i64,
        GeneratedPromptData {
            refined_prompt: format!("refined {}", n),
            explanation: "x".to_string(),
            tips: vec!["a".into(), "b".into(), "c".into()],
            suggested_follow_up: None,
        },
        &PromptRequest::new(format!("idea {}", n), PromptCategory::Business, "Serious"),
    )
}
