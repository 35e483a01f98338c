//! Result Validator
//!
//! Local post-processing of generated prompt text. Structured-data output must
//! parse as JSON and is re-serialized in a canonical 2-space pretty form; every
//! other category passes through untouched.

use promptsmith_core::PromptCategory;

use crate::utils::error::{AppError, AppResult};

/// User-facing message for structured-data output that failed to parse
pub const STRICT_JSON_FAILURE: &str = "Generation Failed: The output did not meet strict JSON schema validation requirements. Please try again.";

/// Validate and canonicalize `raw` for `category`.
pub fn validate_refined_prompt(raw: &str, category: PromptCategory) -> AppResult<String> {
    if !category.is_structured_data() {
        return Ok(raw.to_string());
    }

    let body = strip_code_fences(raw);
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        tracing::debug!(error = %e, "structured-data output failed to parse");
        AppError::validation(STRICT_JSON_FAILURE)
    })?;

    Ok(serde_json::to_string_pretty(&value)?)
}

/// Remove a surrounding Markdown code fence, with or without a language tag.
///
/// Text without fences is returned trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        body = skip_language_tag(rest);
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Skip an info string such as `json` when it is followed by whitespace.
fn skip_language_tag(rest: &str) -> &str {
    let end = match rest.find(char::is_whitespace) {
        Some(end) => end,
        None => return rest,
    };
    let tag = &rest[..end];
    let is_tag = tag.starts_with(|c: char| c.is_ascii_alphabetic())
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'));
    if is_tag {
        &rest[end..]
    } else {
        rest
    }
}
