//! Ranking, normalization, and selection
//!
//! Scores every candidate independently, min-max normalizes across the set,
//! and picks either the single best model or a small provider-diverse
//! comparison set of near-top candidates.

use cortex_config::{Capability, ComparisonConfig, ScoringWeights};
use indexmap::IndexMap;

use crate::analysis::PromptRequirements;
use crate::catalog::ModelCapabilities;
use crate::scoring::score;

/// Ephemeral per-candidate score, discarded when the routing call returns
#[derive(Debug, Clone)]
pub struct ModelScore {
    /// Candidate model id
    pub model: String,
    /// Candidate provider, carried for diversity checks
    pub provider: String,
    /// Raw additive score
    pub raw: f64,
    /// Min-max normalized score in [0, 1]
    pub normalized: f64,
    /// Diagnostic only, never used for logic
    pub reason: String,
}

/// Capability tags whose presence (with high complexity) suggests the task
/// benefits from multiple model opinions
const COMPARISON_TAGS: [Capability; 3] = [Capability::GeneralKnowledge, Capability::Creative, Capability::Reasoning];

/// Complexity at or above which comparison mode may trigger
const COMPARISON_COMPLEXITY: u8 = 3;

/// Score and rank all candidates, descending by normalized score
///
/// Disqualified candidates (missing a critical strength) are dropped before
/// normalization so the remaining scores always normalize into [0, 1]. A
/// zero score range normalizes every candidate to 1.
pub fn rank(
    candidates: &IndexMap<String, ModelCapabilities>,
    requirements: &PromptRequirements,
    weights: &ScoringWeights,
) -> Vec<ModelScore> {
    let mut scored: Vec<ModelScore> = candidates
        .iter()
        .filter_map(|(id, capabilities)| {
            let raw = score(requirements, capabilities, weights);
            if raw.is_infinite() && raw.is_sign_negative() {
                tracing::debug!(model = %id, "candidate disqualified by critical strength");
                return None;
            }
            Some(ModelScore {
                model: id.clone(),
                provider: capabilities.provider.clone(),
                raw,
                normalized: 0.0,
                reason: describe(requirements, capabilities, raw),
            })
        })
        .collect();

    if scored.is_empty() {
        return scored;
    }

    let min = scored.iter().map(|s| s.raw).fold(f64::INFINITY, f64::min);
    let max = scored.iter().map(|s| s.raw).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    for entry in &mut scored {
        entry.normalized = if range <= 0.0 { 1.0 } else { (entry.raw - min) / range };
    }

    scored.sort_by(|a, b| b.normalized.partial_cmp(&a.normalized).unwrap_or(std::cmp::Ordering::Equal));

    scored
}

/// Top viable candidate, if any
///
/// A raw score of 0 or below means "not a suitable match", not merely
/// "worse", so non-positive entries are filtered out here.
pub fn select_best(ranked: &[ModelScore]) -> Option<&ModelScore> {
    ranked.iter().find(|s| s.raw > 0.0)
}

/// Whether the request is ambiguous enough to benefit from multiple opinions
///
/// Explicit heuristic gate: complexity at least 3 and at least one open-ended
/// capability among the required strengths.
pub fn comparison_mode(requirements: &PromptRequirements) -> bool {
    requirements.expected_complexity >= COMPARISON_COMPLEXITY
        && COMPARISON_TAGS.iter().any(|tag| requirements.required_strengths.contains(tag))
}

/// Build a bounded, provider-diverse comparison set
///
/// Starts with the top viable candidate, then walks the ranked tail adding
/// only candidates from new providers whose raw-score gap from the top is
/// within the closeness threshold. Never just "top N regardless of
/// closeness".
pub fn select_for_comparison(ranked: &[ModelScore], config: &ComparisonConfig) -> Vec<String> {
    let mut viable = ranked.iter().filter(|s| s.raw > 0.0);

    let Some(top) = viable.next() else {
        return Vec::new();
    };

    let mut selected = vec![top];

    for candidate in viable {
        if selected.len() >= config.max_models {
            break;
        }
        if selected.iter().any(|s| s.provider == candidate.provider) {
            continue;
        }
        if top.raw - candidate.raw > config.closeness_threshold {
            continue;
        }
        selected.push(candidate);
    }

    selected.into_iter().map(|s| s.model.clone()).collect()
}

/// Human-readable summary of why a candidate scored the way it did
fn describe(requirements: &PromptRequirements, capabilities: &ModelCapabilities, raw: f64) -> String {
    let matched = requirements
        .required_strengths
        .iter()
        .filter(|tag| capabilities.strengths.contains(tag))
        .count();

    format!(
        "raw {raw:.2}: {matched}/{} required strengths, combined cost {:.4}/1k",
        requirements.required_strengths.len(),
        capabilities.combined_cost_per_1k(),
    )
}
