//! Routing engine configuration
//!
//! Weight constants are tunable without touching the algorithm shape; the
//! defaults here are the canonical values.

use serde::Deserialize;

/// Named weights for the multi-objective scoring function
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ScoringWeights {
    /// Weight of the complexity-match term
    pub complexity: f64,
    /// Weight of the cost-efficiency term
    pub cost_efficiency: f64,
    /// Weight of the reliability term
    pub reliability: f64,
    /// Weight of the (inverted) speed term
    pub speed: f64,
    /// Bonus when the request has images and the model is multimodal
    pub multimodal: f64,
    /// Bonus when the request needs functions and the model supports tool
    /// calls. Set to 0 to disable the rule without removing it.
    pub tool_use: f64,
    /// Weight of the importance-weighted capability-coverage term
    pub capability_match: f64,
    /// Weight of the budget adjustment (reward and penalty side)
    pub budget: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            complexity: 3.0,
            cost_efficiency: 10.0,
            reliability: 2.0,
            speed: 1.0,
            multimodal: 5.0,
            tool_use: 5.0,
            capability_match: 10.0,
            budget: 5.0,
        }
    }
}

/// Bounds for comparison-set construction
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ComparisonConfig {
    /// Maximum number of models in a comparison set
    pub max_models: usize,
    /// Maximum raw-score gap from the top candidate (raw-score units)
    pub closeness_threshold: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            max_models: 2,
            closeness_threshold: 5.0,
        }
    }
}

/// Configuration for the model routing engine
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RoutingConfig {
    /// Fixed fallback model id returned whenever routing fails internally
    pub default_model: String,
    /// Scoring weights
    pub weights: ScoringWeights,
    /// Comparison-set bounds
    pub comparison: ComparisonConfig,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_model: "openai/gpt-4o-mini".to_owned(),
            weights: ScoringWeights::default(),
            comparison: ComparisonConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_toml() {
        let config: RoutingConfig = toml::from_str("").unwrap();
        assert_eq!(config.default_model, "openai/gpt-4o-mini");
        assert_eq!(config.comparison.max_models, 2);
        assert!(config.weights.capability_match > 0.0);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config: RoutingConfig = toml::from_str(
            r#"
            default_model = "anthropic/claude-sonnet"

            [weights]
            tool_use = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.default_model, "anthropic/claude-sonnet");
        assert!((config.weights.tool_use - 0.0).abs() < f64::EPSILON);
        assert!((config.weights.complexity - 3.0).abs() < f64::EPSILON);
    }
}
