//! LLM-driven requirement extraction
//!
//! Turns a raw prompt plus keyword hints into structured
//! [`PromptRequirements`] via one chat call, with strict parsing, fallback
//! extraction, and field clamping. Attachment-derived facts never come from
//! the LLM output.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::LazyLock;

use cortex_config::Capability;
use regex::Regex;
use serde::Deserialize;

use crate::chat::ChatCompletion;
use crate::error::RoutingError;
use crate::keywords::{fallback_tokens, keyword_hits};

/// An attachment accompanying the prompt
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Display name of the attachment
    pub name: String,
    /// Broad attachment category
    pub kind: AttachmentKind,
}

/// Broad attachment category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Image content
    Image,
    /// Document content (text, PDF, spreadsheet, ...)
    Document,
}

impl Attachment {
    /// Image attachment with the given name
    pub fn image(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttachmentKind::Image,
        }
    }

    /// Document attachment with the given name
    pub fn document(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttachmentKind::Document,
        }
    }
}

/// Structural requirements of a task, derived once per request
#[derive(Debug, Clone)]
pub struct PromptRequirements {
    /// Expected task complexity, clamped to 1–5
    pub expected_complexity: u8,
    /// Capability tags the task benefits from
    pub required_strengths: BTreeSet<Capability>,
    /// Hard requirements: absence in a model disqualifies it outright
    pub critical_strengths: BTreeSet<Capability>,
    /// Estimated input tokens for cost projection
    pub estimated_input_tokens: u32,
    /// Estimated output tokens for cost projection
    pub estimated_output_tokens: u32,
    /// Whether tool/function calling is required
    pub needs_functions: bool,
    /// Whether the request carries image attachments (derived, not from LLM)
    pub has_images: bool,
    /// Whether the request carries document attachments (derived, not from LLM)
    pub has_documents: bool,
    /// Maximum acceptable total cost, if the caller set one
    pub budget_constraint: Option<f64>,
    /// UX-only hint that multiple model opinions would help
    pub multi_model_hint: bool,
    /// UX-only justification for the multi-model hint
    pub multi_model_rationale: Option<String>,
}

/// Wire shape of the extraction response
///
/// `expectedComplexity` and the required-capability list are mandatory and
/// strictly typed; everything else is lenient. Both the
/// `requiredCapabilities` and `requiredStrengths` spellings are accepted.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(rename = "expectedComplexity")]
    expected_complexity: f64,
    #[serde(rename = "requiredCapabilities", alias = "requiredStrengths")]
    required_capabilities: Vec<String>,
    #[serde(rename = "criticalCapabilities", alias = "criticalStrengths", default)]
    critical_capabilities: Vec<String>,
    #[serde(rename = "estimatedInputTokens", default)]
    estimated_input_tokens: Option<f64>,
    #[serde(rename = "estimatedOutputTokens", default)]
    estimated_output_tokens: Option<f64>,
    #[serde(rename = "needsFunctions", default)]
    needs_functions: Option<bool>,
    #[serde(rename = "benefitsFromMultipleModels", default)]
    benefits_from_multiple_models: Option<bool>,
    #[serde(rename = "multiModelReason", default)]
    multi_model_reason: Option<String>,
}

/// Derive structural requirements for a prompt
///
/// Issues exactly one outbound chat call. Attachment booleans and the budget
/// constraint come from the caller, never from the LLM response.
///
/// # Errors
///
/// Returns [`RoutingError::Analysis`] if the chat call fails or the response
/// is unparsable after all fallbacks.
pub async fn analyze(
    prompt: &str,
    attachments: &[Attachment],
    budget: Option<f64>,
    chat: &dyn ChatCompletion,
) -> Result<PromptRequirements, RoutingError> {
    let system_prompt = build_system_prompt(prompt);

    let response = chat.complete_json(&system_prompt, prompt).await?;

    let value = extract_json(&response)?;
    let raw: RawAnalysis =
        serde_json::from_value(value).map_err(|e| RoutingError::Analysis(format!("invalid response shape: {e}")))?;

    Ok(normalize(raw, attachments, budget))
}

/// Build the single extraction instruction for one prompt
///
/// Embeds the categorized keyword hits (or fallback tokens for
/// out-of-vocabulary input), the closed capability vocabulary, and the JSON
/// schema the model must return.
fn build_system_prompt(prompt: &str) -> String {
    let hits = keyword_hits(prompt);

    let hint_lines = if hits.is_empty() {
        let tokens = fallback_tokens(prompt);
        if tokens.is_empty() {
            "none".to_owned()
        } else {
            format!("tokens: {}", tokens.join(", "))
        }
    } else {
        Capability::ALL
            .iter()
            .filter_map(|domain| {
                let matched: Vec<&str> = hits.iter().filter(|h| h.domain == *domain).map(|h| h.keyword).collect();
                if matched.is_empty() {
                    None
                } else {
                    Some(format!("{domain}: {}", matched.join(", ")))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let vocabulary = Capability::ALL.map(|c| c.to_string()).join(", ");

    format!(
        "You classify user prompts for model routing. Respond with a single JSON object and nothing else.\n\
         \n\
         Keyword signals detected in the prompt:\n\
         {hint_lines}\n\
         \n\
         Valid capability tags (use no others): {vocabulary}\n\
         \n\
         Return exactly this JSON shape:\n\
         {{\n\
           \"expectedComplexity\": <integer 1-5>,\n\
           \"requiredCapabilities\": [<capability tags>],\n\
           \"criticalCapabilities\": [<capability tags that are hard requirements, often empty>],\n\
           \"estimatedInputTokens\": <integer>,\n\
           \"estimatedOutputTokens\": <integer>,\n\
           \"needsFunctions\": <boolean>,\n\
           \"benefitsFromMultipleModels\": <boolean>,\n\
           \"multiModelReason\": <short string or null>\n\
         }}"
    )
}

static JSON_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());

/// Parse the response defensively
///
/// Strips Markdown code fences and stray backticks, then parses; on failure
/// extracts the first `{...}` block and parses that.
fn extract_json(response: &str) -> Result<serde_json::Value, RoutingError> {
    let cleaned = strip_code_fences(response);

    if let Ok(value) = serde_json::from_str(&cleaned) {
        return Ok(value);
    }

    let block = JSON_BLOCK_RE
        .find(&cleaned)
        .ok_or_else(|| RoutingError::Analysis("no JSON object in response".to_owned()))?;

    serde_json::from_str(block.as_str())
        .map_err(|e| RoutingError::Analysis(format!("unparsable JSON in response: {e}")))
}

/// Remove Markdown code-fence wrappers and stray backticks
fn strip_code_fences(response: &str) -> String {
    let trimmed = response.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim().trim_matches('`').trim().to_owned()
}

/// Clamp and default the raw extraction into validated requirements
///
/// Clamping guards against hallucinated out-of-range values; unknown tags
/// are dropped rather than failing the whole extraction.
fn normalize(raw: RawAnalysis, attachments: &[Attachment], budget: Option<f64>) -> PromptRequirements {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let expected_complexity = if raw.expected_complexity.is_nan() {
        1
    } else {
        raw.expected_complexity.round().clamp(1.0, 5.0) as u8
    };

    let required_strengths = parse_tags(&raw.required_capabilities);
    let critical_strengths = parse_tags(&raw.critical_capabilities);

    PromptRequirements {
        expected_complexity,
        required_strengths,
        critical_strengths,
        estimated_input_tokens: clamp_tokens(raw.estimated_input_tokens),
        estimated_output_tokens: clamp_tokens(raw.estimated_output_tokens),
        needs_functions: raw.needs_functions.unwrap_or(false),
        has_images: attachments.iter().any(|a| a.kind == AttachmentKind::Image),
        has_documents: attachments.iter().any(|a| a.kind == AttachmentKind::Document),
        budget_constraint: budget,
        multi_model_hint: raw.benefits_from_multiple_models.unwrap_or(false),
        multi_model_rationale: raw.multi_model_reason,
    }
}

/// Keep only tags inside the closed vocabulary, collapsing duplicates
fn parse_tags(tags: &[String]) -> BTreeSet<Capability> {
    tags.iter().filter_map(|t| Capability::from_str(t).ok()).collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_tokens(estimate: Option<f64>) -> u32 {
    estimate.map_or(0, |t| {
        if t.is_nan() {
            0
        } else {
            t.round().clamp(0.0, f64::from(u32::MAX)) as u32
        }
    })
}
