//! Multi-objective candidate scoring
//!
//! Pure function of (requirements, capabilities, weights). Returns
//! `f64::NEG_INFINITY` to mark hard disqualification; every other rule is
//! additive. Missing catalog fields contribute 0 to their own term only —
//! absence of a rating is not a disqualifier.

use cortex_config::ScoringWeights;

use crate::analysis::PromptRequirements;
use crate::catalog::ModelCapabilities;

/// Score one candidate against the derived requirements
pub fn score(requirements: &PromptRequirements, capabilities: &ModelCapabilities, weights: &ScoringWeights) -> f64 {
    // Hard filter: a missing critical strength must never be outweighed
    if requirements
        .critical_strengths
        .iter()
        .any(|tag| !capabilities.strengths.contains(tag))
    {
        return f64::NEG_INFINITY;
    }

    // Nothing required: stay neutral rather than rewarding irrelevant models
    if requirements.required_strengths.is_empty() {
        return 0.0;
    }

    let mut total = 0.0;

    // Complexity match, absent rating contributes 0 for this term only
    if let Some(context_complexity) = capabilities.context_complexity {
        let gap = (f64::from(requirements.expected_complexity) - f64::from(context_complexity)).abs();
        total += (5.0 - gap).max(0.0) * weights.complexity;
    }

    // Cost efficiency; missing costs score as 0 (maximally efficient)
    let combined_cost = capabilities.combined_cost_per_1k();
    total += 1.0 / combined_cost.mul_add(10.0, 1.0) * weights.cost_efficiency;

    if let Some(reliability) = capabilities.reliability {
        total += f64::from(reliability) * weights.reliability;
    }

    // Lower speed rating means faster, hence the inversion around 6
    if let Some(speed) = capabilities.speed {
        total += (6.0 - f64::from(speed)) * weights.speed;
    }

    if requirements.has_images && capabilities.multimodal {
        total += weights.multimodal;
    }

    if requirements.needs_functions && capabilities.supports_tool_calls {
        total += weights.tool_use;
    }

    total += coverage(requirements, capabilities) * weights.capability_match;

    total += budget_adjustment(requirements, capabilities, weights);

    total
}

/// Importance-weighted capability coverage ratio
fn coverage(requirements: &PromptRequirements, capabilities: &ModelCapabilities) -> f64 {
    let mut matched = 0.0;
    let mut required = 0.0;

    for tag in &requirements.required_strengths {
        let importance = tag.importance();
        required += importance;
        if capabilities.strengths.contains(tag) {
            matched += importance;
        }
    }

    if required <= 0.0 { 1.0 } else { matched / required }
}

/// Budget adjustment: linear reward under budget, logarithmic penalty over
///
/// The asymmetry is deliberate — mild overshoot is penalized gently so a
/// slightly-over-budget high-quality model is not excluded outright.
fn budget_adjustment(requirements: &PromptRequirements, capabilities: &ModelCapabilities, weights: &ScoringWeights) -> f64 {
    let Some(budget) = requirements.budget_constraint else {
        return 0.0;
    };
    if budget <= 0.0 {
        return 0.0;
    }

    let cost = capabilities.estimate_cost(requirements.estimated_input_tokens, requirements.estimated_output_tokens);
    let ratio = cost / budget;

    if ratio <= 1.0 {
        (1.0 - ratio) * weights.budget
    } else {
        -ratio.ln() * weights.budget
    }
}
