//! Requirement-driven model routing for Cortex
//!
//! Given a free-text prompt, optional attachments, and an optional budget,
//! infers structural task requirements with one LLM call, scores every
//! entitled catalog model against them, and picks the single best model — or
//! a small provider-diverse comparison set when the task benefits from
//! multiple opinions. The public entry points never fail: every internal
//! fault converges on the configured default model.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod analysis;
pub mod catalog;
pub mod chat;
pub mod edit;
pub mod error;
pub mod keywords;
pub mod rank;
pub mod scoring;

use cortex_config::RoutingConfig;

pub use analysis::{Attachment, AttachmentKind, PromptRequirements, analyze};
pub use catalog::{ModelCapabilities, ModelCatalog, StaticCatalog};
pub use chat::ChatCompletion;
pub use edit::EditOperation;
pub use error::{ChatError, RoutingError};
pub use rank::ModelScore;

/// One routing request
#[derive(Debug, Clone)]
pub struct RouteRequest<'a> {
    /// Raw user prompt
    pub prompt: &'a str,
    /// Attachments accompanying the prompt
    pub attachments: &'a [Attachment],
    /// Maximum acceptable total cost, if the caller enforces one
    pub budget: Option<f64>,
    /// Account the catalog should be entitlement-filtered for
    pub user: Option<&'a str>,
}

impl<'a> RouteRequest<'a> {
    /// Request with only a prompt
    pub const fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            attachments: &[],
            budget: None,
            user: None,
        }
    }
}

/// Select the single best model for a request
///
/// Total from the caller's perspective: any internal failure (analysis,
/// empty or fully disqualified catalog) falls back to the configured default
/// model instead of propagating.
pub async fn select_model(
    request: &RouteRequest<'_>,
    chat: &dyn ChatCompletion,
    catalog: &dyn ModelCatalog,
    config: &RoutingConfig,
) -> String {
    match route(request, chat, catalog, config, false).await {
        Ok(mut selected) => selected.swap_remove(0),
        Err(err) => {
            tracing::warn!(error = %err, default = %config.default_model, "routing failed, using default model");
            config.default_model.clone()
        }
    }
}

/// Select one model, or a comparison set when the task is ambiguous
///
/// Returns a single id unless the comparison gate triggers, in which case up
/// to `comparison.max_models` ids from distinct providers. Same
/// total-function fallback as [`select_model`].
pub async fn select_models(
    request: &RouteRequest<'_>,
    chat: &dyn ChatCompletion,
    catalog: &dyn ModelCatalog,
    config: &RoutingConfig,
) -> Vec<String> {
    match route(request, chat, catalog, config, true).await {
        Ok(selected) => selected,
        Err(err) => {
            tracing::warn!(error = %err, default = %config.default_model, "routing failed, using default model");
            vec![config.default_model.clone()]
        }
    }
}

/// Select the best fill-in-middle model
///
/// # Errors
///
/// Returns [`RoutingError::NoCandidates`] when no model (from the preferred
/// provider, if given) supports fill-in-middle — there is no safe default
/// for a mechanical edit operation.
pub fn select_fim_model(catalog: &dyn ModelCatalog, preferred_provider: Option<&str>) -> Result<String, RoutingError> {
    edit::select_edit_model(catalog, EditOperation::FillInMiddle, preferred_provider)
}

/// Select the best next-edit model; same contract as [`select_fim_model`]
pub fn select_next_edit_model(
    catalog: &dyn ModelCatalog,
    preferred_provider: Option<&str>,
) -> Result<String, RoutingError> {
    edit::select_edit_model(catalog, EditOperation::NextEdit, preferred_provider)
}

/// Select the best apply-edit model; same contract as [`select_fim_model`]
pub fn select_apply_edit_model(
    catalog: &dyn ModelCatalog,
    preferred_provider: Option<&str>,
) -> Result<String, RoutingError> {
    edit::select_edit_model(catalog, EditOperation::ApplyEdit, preferred_provider)
}

/// The fallible analyze → score → rank → select pipeline
///
/// Always returns at least one model id on success.
async fn route(
    request: &RouteRequest<'_>,
    chat: &dyn ChatCompletion,
    catalog: &dyn ModelCatalog,
    config: &RoutingConfig,
    allow_comparison: bool,
) -> Result<Vec<String>, RoutingError> {
    let requirements = analysis::analyze(request.prompt, request.attachments, request.budget, chat).await?;

    tracing::debug!(
        complexity = requirements.expected_complexity,
        required = ?requirements.required_strengths,
        critical = ?requirements.critical_strengths,
        input_tokens = requirements.estimated_input_tokens,
        output_tokens = requirements.estimated_output_tokens,
        "prompt requirements derived"
    );

    let candidates = catalog.candidates(request.user);
    let ranked = rank::rank(&candidates, &requirements, &config.weights);

    let selected = if allow_comparison && rank::comparison_mode(&requirements) {
        rank::select_for_comparison(&ranked, &config.comparison)
    } else {
        rank::select_best(&ranked).map(|s| vec![s.model.clone()]).unwrap_or_default()
    };

    if selected.is_empty() {
        return Err(RoutingError::NoCandidates {
            need: "a viable scored candidate".to_owned(),
        });
    }

    tracing::info!(
        selected = ?selected,
        candidates = candidates.len(),
        multi_model_hint = requirements.multi_model_hint,
        "routing decision made"
    );

    Ok(selected)
}
