//! Prompt Categories and Tones
//!
//! The fixed category enumeration that steers generation style, plus the
//! suggested tone list. Categories serialize as their display labels so stored
//! history stays readable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Suggested tones. Tone is free-form; this list is only offered as a default set.
pub const TONE_OPTIONS: [&str; 7] = [
    "Professional",
    "Casual",
    "Enthusiastic",
    "Serious",
    "Witty",
    "Instructional",
    "Empathetic",
];

/// Tone used when the caller does not pick one
pub const DEFAULT_TONE: &str = "Professional";

/// Tone label sent to the model when the tone is blank
pub const NEUTRAL_TONE: &str = "Neutral/Optimized";

/// Category of prompt to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PromptCategory {
    #[default]
    #[serde(rename = "General Assistant")]
    General,
    #[serde(rename = "Coding & Development")]
    Coding,
    #[serde(rename = "JSON Data & Structure")]
    StructuredData,
    #[serde(rename = "Image Generation (Midjourney/DALL-E)")]
    ImageGeneration,
    #[serde(rename = "Creative Writing")]
    CreativeWriting,
    #[serde(rename = "Business & Professional")]
    Business,
    #[serde(rename = "Academic & Research")]
    Academic,
    #[serde(rename = "Marketing & Copywriting")]
    Marketing,
}

impl PromptCategory {
    /// Every category, in display order
    pub const ALL: [PromptCategory; 8] = [
        PromptCategory::General,
        PromptCategory::Coding,
        PromptCategory::StructuredData,
        PromptCategory::ImageGeneration,
        PromptCategory::CreativeWriting,
        PromptCategory::Business,
        PromptCategory::Academic,
        PromptCategory::Marketing,
    ];

    /// Display label, also used as the serialized form and in the model request
    pub fn label(&self) -> &'static str {
        match self {
            PromptCategory::General => "General Assistant",
            PromptCategory::Coding => "Coding & Development",
            PromptCategory::StructuredData => "JSON Data & Structure",
            PromptCategory::ImageGeneration => "Image Generation (Midjourney/DALL-E)",
            PromptCategory::CreativeWriting => "Creative Writing",
            PromptCategory::Business => "Business & Professional",
            PromptCategory::Academic => "Academic & Research",
            PromptCategory::Marketing => "Marketing & Copywriting",
        }
    }

    /// Short machine-friendly name
    pub fn slug(&self) -> &'static str {
        match self {
            PromptCategory::General => "general",
            PromptCategory::Coding => "coding",
            PromptCategory::StructuredData => "json",
            PromptCategory::ImageGeneration => "image",
            PromptCategory::CreativeWriting => "creative",
            PromptCategory::Business => "business",
            PromptCategory::Academic => "academic",
            PromptCategory::Marketing => "marketing",
        }
    }

    /// One-line description of what the category optimizes for
    pub fn description(&self) -> &'static str {
        match self {
            PromptCategory::General => "Standard LLM interaction for Q&A and general tasks.",
            PromptCategory::Coding => {
                "Optimized for generating clean, efficient, and bug-free code."
            }
            PromptCategory::StructuredData => {
                "Specialized in structured data extraction, schema validation, and JSON generation."
            }
            PromptCategory::ImageGeneration => {
                "Descriptive prompts focused on style, lighting, and composition for AI art."
            }
            PromptCategory::CreativeWriting => {
                "Narrative-focused prompts with attention to tone, style, and character."
            }
            PromptCategory::Business => {
                "Professional, concise, and actionable prompts for workplace tasks."
            }
            PromptCategory::Academic => {
                "Objective, rigorous, and citation-focused prompts for research."
            }
            PromptCategory::Marketing => {
                "Persuasive and engaging prompts for creating ad copy or content."
            }
        }
    }

    /// Whether generated output must be strict, re-validated JSON
    pub fn is_structured_data(&self) -> bool {
        matches!(self, PromptCategory::StructuredData)
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PromptCategory {
    type Err = CoreError;

    /// Accepts either the slug (`json`) or the full label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        PromptCategory::ALL
            .iter()
            .copied()
            .find(|c| c.slug().eq_ignore_ascii_case(needle) || c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::unknown_category(needle))
    }
}
