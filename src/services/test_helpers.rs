//! Shared test utilities for service unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use promptsmith_llm::{
    CompletionRequest, LlmError, LlmProvider, LlmResponse, LlmResult, ProviderConfig,
};

use crate::services::collections::CollectionStore;
use crate::storage::{Database, DurableStore};

/// Serialized model payload with three tips.
pub(crate) fn payload_json(refined: &str) -> String {
    serde_json::json!({
        "refinedPrompt": refined,
        "explanation": "Added structure",
        "tips": ["a", "b", "c"],
    })
    .to_string()
}

/// Provider that replays scripted responses and records every request.
pub(crate) struct MockLlmProvider {
    responses: Mutex<VecDeque<LlmResult<LlmResponse>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    delay: Option<Duration>,
    healthy: bool,
    config: ProviderConfig,
}

impl MockLlmProvider {
    pub(crate) fn new(responses: Vec<LlmResult<LlmResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            delay: None,
            healthy: true,
            config: ProviderConfig::default(),
        }
    }

    /// One successful response carrying a full payload.
    pub(crate) fn with_payload(refined: &str) -> Self {
        Self::with_text(&payload_json(refined))
    }

    /// One successful response with raw `text`.
    pub(crate) fn with_text(text: &str) -> Self {
        Self::new(vec![Ok(LlmResponse::text(text, "mock-model"))])
    }

    /// Sleep before answering, for progress timing tests.
    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail every health check with an authentication error.
    pub(crate) fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn send_message(&self, request: CompletionRequest) -> LlmResult<LlmResponse> {
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Other {
                    message: "no scripted response left".to_string(),
                })
            })
    }

    async fn health_check(&self) -> LlmResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(LlmError::AuthenticationFailed {
                message: "mock: Invalid API key".to_string(),
            })
        }
    }
}

/// Fresh in-memory durable store.
pub(crate) fn memory_store() -> DurableStore {
    DurableStore::new(Arc::new(Database::new_in_memory().unwrap()))
}

/// Empty collection store over a fresh in-memory backend.
pub(crate) fn empty_collections(limit: usize) -> CollectionStore {
    CollectionStore::load(memory_store(), limit)
}
