//! Declarative model catalog entries
//!
//! One entry per model the gateway may route to. Optional cost and rating
//! fields stay optional here: the scoring rules assign them distinct
//! "absent" semantics that a config-time default would erase.

use serde::Deserialize;

use crate::vocabulary::Capability;

/// Capability profile for a single catalog model
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelProfileConfig {
    /// Provider name, used for diversity tie-breaks
    pub provider: String,
    /// Model identifier
    pub model: String,
    /// Capability tags this model is strong at
    #[serde(default)]
    pub strengths: Vec<Capability>,
    /// Cost per 1k input tokens (USD); absent scores as 0
    #[serde(default)]
    pub input_cost_per_1k: Option<f64>,
    /// Cost per 1k output tokens (USD); absent scores as 0
    #[serde(default)]
    pub output_cost_per_1k: Option<f64>,
    /// Context-handling rating 1–5; absent contributes 0 to its term
    #[serde(default)]
    pub context_complexity: Option<u8>,
    /// Reliability rating 1–5
    #[serde(default)]
    pub reliability: Option<u8>,
    /// Speed rating 1–5 (lower is faster)
    #[serde(default)]
    pub speed: Option<u8>,
    /// Whether the model accepts image input
    #[serde(default)]
    pub multimodal: bool,
    /// Whether the model supports tool/function calling
    #[serde(default)]
    pub tool_calls: bool,
    /// Whether the model supports fill-in-middle completion
    #[serde(default)]
    pub fim: bool,
    /// Whether the model supports next-edit prediction
    #[serde(default)]
    pub next_edit: bool,
    /// Whether the model supports apply-edit operations
    #[serde(default)]
    pub apply_edit: bool,
}

impl ModelProfileConfig {
    /// Canonical identifier in "provider/model" format
    pub fn id(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }
}
