//! Prompt Models
//!
//! The generation request, the raw model payload, and the persisted
//! `PromptResult` that flows through history, saved items and the current
//! result slot.

use serde::{Deserialize, Serialize};

use crate::category::{PromptCategory, DEFAULT_TONE};

/// Input for a single generation: what the user typed plus how to steer it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    pub raw_input: String,
    pub category: PromptCategory,
    pub tone: String,
}

impl PromptRequest {
    pub fn new(
        raw_input: impl Into<String>,
        category: PromptCategory,
        tone: impl Into<String>,
    ) -> Self {
        Self {
            raw_input: raw_input.into(),
            category,
            tone: tone.into(),
        }
    }

    /// True when the input is empty after trimming and must not be submitted
    pub fn is_blank(&self) -> bool {
        self.raw_input.trim().is_empty()
    }
}

impl Default for PromptRequest {
    fn default() -> Self {
        Self {
            raw_input: String::new(),
            category: PromptCategory::default(),
            tone: DEFAULT_TONE.to_string(),
        }
    }
}

/// Structured payload returned by the model.
///
/// `refinedPrompt`, `explanation` and `tips` are required; a response missing
/// any of them fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPromptData {
    pub refined_prompt: String,
    pub explanation: String,
    /// Three tips are requested but the count is not enforced
    pub tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_follow_up: Option<String>,
}

/// One generated prompt plus the input that produced it.
///
/// Everything except `refined_prompt` is fixed at creation; fields are private
/// so the only mutation path is [`PromptResult::set_refined_prompt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResult {
    id: String,
    timestamp: i64,
    original_input: String,
    category: PromptCategory,
    tone: String,
    refined_prompt: String,
    explanation: String,
    tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    suggested_follow_up: Option<String>,
}

impl PromptResult {
    /// Mint a new result with a fresh v4 id and the current time.
    pub fn from_generation(data: GeneratedPromptData, request: &PromptRequest) -> Self {
        Self::with_identity(
            uuid::Uuid::new_v4().to_string(),
            chrono::Utc::now().timestamp_millis(),
            data,
            request,
        )
    }

    /// Build a result with an explicit identity (restores, fixtures).
    pub fn with_identity(
        id: impl Into<String>,
        timestamp: i64,
        data: GeneratedPromptData,
        request: &PromptRequest,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            original_input: request.raw_input.clone(),
            category: request.category,
            tone: request.tone.clone(),
            refined_prompt: data.refined_prompt,
            explanation: data.explanation,
            tips: data.tips,
            suggested_follow_up: data.suggested_follow_up,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Creation time in milliseconds since the Unix epoch
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn original_input(&self) -> &str {
        &self.original_input
    }

    pub fn category(&self) -> PromptCategory {
        self.category
    }

    pub fn tone(&self) -> &str {
        &self.tone
    }

    pub fn refined_prompt(&self) -> &str {
        &self.refined_prompt
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn suggested_follow_up(&self) -> Option<&str> {
        self.suggested_follow_up.as_deref()
    }

    /// The request that produced this result, for regeneration.
    pub fn to_request(&self) -> PromptRequest {
        PromptRequest {
            raw_input: self.original_input.clone(),
            category: self.category,
            tone: self.tone.clone(),
        }
    }

    /// Replace the refined prompt text. The only post-creation edit.
    pub fn set_refined_prompt(&mut self, text: impl Into<String>) {
        self.refined_prompt = text.into();
    }

    /// Whether two copies agree on every field that is immutable per id.
    pub fn same_identity(&self, other: &PromptResult) -> bool {
        self.id == other.id
            && self.timestamp == other.timestamp
            && self.original_input == other.original_input
            && self.category == other.category
            && self.tone == other.tone
    }
}
