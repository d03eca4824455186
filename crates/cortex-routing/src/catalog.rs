//! Model catalog access
//!
//! The catalog hands the router entitlement-filtered capability records; the
//! router never applies entitlement logic itself. A config-backed
//! [`StaticCatalog`] covers the common wiring, [`ModelCatalog`] is the seam
//! for gateways with their own registry.

use std::collections::BTreeSet;

use cortex_config::{Capability, ModelProfileConfig};
use indexmap::IndexMap;

/// Capability record for one catalog model, read-only to the router
#[derive(Debug, Clone, Default)]
pub struct ModelCapabilities {
    /// Provider name, used for diversity tie-breaks
    pub provider: String,
    /// Capability tags this model is strong at
    pub strengths: BTreeSet<Capability>,
    /// Cost per 1k input tokens; absent scores as 0 (not "free" semantically)
    pub input_cost_per_1k: Option<f64>,
    /// Cost per 1k output tokens; absent scores as 0
    pub output_cost_per_1k: Option<f64>,
    /// Context-handling rating 1–5; absent contributes 0 to its scoring term
    pub context_complexity: Option<u8>,
    /// Reliability rating 1–5
    pub reliability: Option<u8>,
    /// Speed rating 1–5 (lower is faster)
    pub speed: Option<u8>,
    /// Whether the model accepts image input
    pub multimodal: bool,
    /// Whether the model supports tool/function calling
    pub supports_tool_calls: bool,
    /// Whether the model supports fill-in-middle completion
    pub supports_fim: bool,
    /// Whether the model supports next-edit prediction
    pub supports_next_edit: bool,
    /// Whether the model supports apply-edit operations
    pub supports_apply_edit: bool,
}

impl ModelCapabilities {
    /// Combined input + output cost per 1k tokens, missing fields as 0
    pub fn combined_cost_per_1k(&self) -> f64 {
        self.input_cost_per_1k.unwrap_or(0.0) + self.output_cost_per_1k.unwrap_or(0.0)
    }

    /// Projected cost of a request with the given token counts
    pub fn estimate_cost(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        let input = f64::from(input_tokens) / 1000.0 * self.input_cost_per_1k.unwrap_or(0.0);
        let output = f64::from(output_tokens) / 1000.0 * self.output_cost_per_1k.unwrap_or(0.0);
        input + output
    }
}

impl From<&ModelProfileConfig> for ModelCapabilities {
    fn from(config: &ModelProfileConfig) -> Self {
        Self {
            provider: config.provider.clone(),
            strengths: config.strengths.iter().copied().collect(),
            input_cost_per_1k: config.input_cost_per_1k,
            output_cost_per_1k: config.output_cost_per_1k,
            context_complexity: config.context_complexity,
            reliability: config.reliability,
            speed: config.speed,
            multimodal: config.multimodal,
            supports_tool_calls: config.tool_calls,
            supports_fim: config.fim,
            supports_next_edit: config.next_edit,
            supports_apply_edit: config.apply_edit,
        }
    }
}

/// Trait implemented by the model catalog backend
///
/// Implementations return only the models the given account may use.
pub trait ModelCatalog: Send + Sync {
    /// Candidate models for a routing call, keyed by model id
    fn candidates(&self, user: Option<&str>) -> IndexMap<String, ModelCapabilities>;
}

/// Config-backed catalog with a fixed candidate set
///
/// Ignores the user parameter: a static catalog has no per-account tiers.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    models: IndexMap<String, ModelCapabilities>,
}

impl StaticCatalog {
    /// Build a catalog from declarative config entries
    ///
    /// Later duplicate ids overwrite earlier ones.
    pub fn from_config(configs: &[ModelProfileConfig]) -> Self {
        let models = configs.iter().map(|c| (c.id(), ModelCapabilities::from(c))).collect();
        Self { models }
    }

    /// Number of models in the catalog
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelCatalog for StaticCatalog {
    fn candidates(&self, _user: Option<&str>) -> IndexMap<String, ModelCapabilities> {
        self.models.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(provider: &str, model: &str) -> ModelProfileConfig {
        ModelProfileConfig {
            provider: provider.to_owned(),
            model: model.to_owned(),
            strengths: vec![Capability::Coding],
            input_cost_per_1k: Some(0.003),
            output_cost_per_1k: Some(0.015),
            context_complexity: Some(4),
            reliability: Some(5),
            speed: Some(3),
            multimodal: false,
            tool_calls: true,
            fim: false,
            next_edit: false,
            apply_edit: false,
        }
    }

    #[test]
    fn builds_from_config() {
        let catalog = StaticCatalog::from_config(&[entry("openai", "gpt-4o"), entry("anthropic", "claude-sonnet")]);
        assert_eq!(catalog.len(), 2);
        let candidates = catalog.candidates(None);
        assert!(candidates.contains_key("openai/gpt-4o"));
        assert_eq!(candidates["anthropic/claude-sonnet"].provider, "anthropic");
    }

    #[test]
    fn estimate_cost_uses_per_1k_pricing() {
        let caps = ModelCapabilities::from(&entry("openai", "gpt-4o"));
        let cost = caps.estimate_cost(2000, 1000);
        // 2 * 0.003 + 1 * 0.015
        assert!((cost - 0.021).abs() < 1e-9);
    }

    #[test]
    fn missing_costs_are_zero_in_projection() {
        let caps = ModelCapabilities {
            provider: "local".to_owned(),
            ..ModelCapabilities::default()
        };
        assert!((caps.combined_cost_per_1k() - 0.0).abs() < f64::EPSILON);
        assert!((caps.estimate_cost(10_000, 10_000) - 0.0).abs() < f64::EPSILON);
    }
}
