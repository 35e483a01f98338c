//! Generation Client
//!
//! Builds the refinement request from (raw input, category, tone), invokes the
//! configured provider, and parses the structured payload it returns.

use std::sync::Arc;

use promptsmith_core::{GeneratedPromptData, PromptRequest, NEUTRAL_TONE};
use promptsmith_llm::{CompletionRequest, LlmProvider};
use serde_json::json;

use crate::services::validator::strip_code_fences;
use crate::utils::error::{AppError, AppResult};

/// Message used when the provider returns no text at all
pub const EMPTY_RESPONSE: &str = "No response generated from AI.";

/// Fixed instruction sent with every refinement request
pub const SYSTEM_INSTRUCTION: &str = r#"You are PromptSmith, an expert prompt engineer.
Turn the user's rough, often vague idea into a clear, structured prompt tuned for the requested use case.

CATEGORY GUIDELINES:
- Coding & Development: efficiency, modern practices, error handling, comments.
- JSON Data & Structure: produce a STRICT JSON schema or JSON template. The refinedPrompt must itself be valid JSON with no markdown and no commentary outside the JSON. Pretty-print it with newlines and indentation.
- Image Generation: visual descriptors, medium, lighting, camera angle, style, aspect ratio.
- General Assistant: clarity, context, explicit constraints.
- Business, Marketing: tone, audience, call to action.
- Creative Writing, Academic & Research: voice and structure appropriate to the genre or discipline.

OUTPUT:
Return one JSON object that follows the provided schema.
- refinedPrompt: for JSON Data & Structure, raw parsable JSON only (no section headers, no code fences). For every other category, organise the prompt under headers such as [ROLE], [TASK], [CONTEXT], [CONSTRAINTS], [FORMAT], separated by blank lines, with key variables in **bold**.
- explanation: a short note on the changes made and the techniques used.
- tips: exactly three short tips on using the prompt or which variables to swap.
- suggestedFollowUp: a sensible next request after using this prompt."#;

/// JSON schema for the structured payload
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "refinedPrompt": {
                "type": "string",
                "description": "The optimized prompt. Valid JSON text for the JSON category, structured text otherwise."
            },
            "explanation": {
                "type": "string",
                "description": "Brief explanation of the prompt engineering techniques used."
            },
            "tips": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Three tips for using this prompt."
            },
            "suggestedFollowUp": {
                "type": "string",
                "description": "A logical follow-up question or step."
            }
        },
        "required": ["refinedPrompt", "explanation", "tips"]
    })
}

/// Build the user turn for `request`.
pub fn build_user_message(request: &PromptRequest) -> String {
    let tone = request.tone.trim();
    let tone = if tone.is_empty() { NEUTRAL_TONE } else { tone };
    format!(
        "Category: {}\nTarget Tone: {}\n\nRaw User Idea:\n\"{}\"\n\nPlease refine this into the best possible prompt.",
        request.category.label(),
        tone,
        request.raw_input
    )
}

/// Parse the provider's text into the structured payload.
pub fn parse_generated(text: &str) -> AppResult<GeneratedPromptData> {
    let body = strip_code_fences(text);
    if body.is_empty() {
        return Err(AppError::generation(EMPTY_RESPONSE));
    }
    serde_json::from_str(body).map_err(|e| {
        AppError::generation(format!("The model returned an incomplete response: {}", e))
    })
}

/// Client for the prompt refinement call
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn LlmProvider>,
}

impl GenerationClient {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Refine `request` through the remote model.
    pub async fn generate(&self, request: &PromptRequest) -> AppResult<GeneratedPromptData> {
        let completion = CompletionRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            user: build_user_message(request),
            response_schema: Some(response_schema()),
            temperature: None,
        };

        tracing::debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            category = request.category.slug(),
            "sending refinement request"
        );

        let response = self.provider.send_message(completion).await?;
        let text = response
            .content
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::generation(EMPTY_RESPONSE))?;

        let data = parse_generated(&text)?;
        tracing::debug!(
            model = %response.model,
            output_tokens = response.usage.output_tokens,
            "refinement response parsed"
        );
        Ok(data)
    }

    /// Verify the provider is reachable and the credentials are accepted.
    pub async fn check(&self) -> AppResult<()> {
        self.provider.health_check().await?;
        tracing::debug!(provider = self.provider.name(), "provider health check passed");
        Ok(())
    }
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("provider", &self.provider.name())
            .field("model", &self.provider.model())
            .finish()
    }
}
