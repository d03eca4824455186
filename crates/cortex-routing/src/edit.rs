//! Specialized selectors for mechanical code-editing operations
//!
//! Fill-in-middle, next-edit, and apply-edit selection filter the catalog by
//! a single boolean capability flag and rank with a simple
//! speed/reliability heuristic — independent of the requirement-driven
//! routing path. These selectors have no safe default: zero matches is an
//! error the caller must handle, never a silent fallback to another
//! provider.

use std::fmt;

use crate::catalog::{ModelCapabilities, ModelCatalog};
use crate::error::RoutingError;

/// Rating substituted for missing fields before the heuristic formula
///
/// Keeps un-rated models mid-pack instead of penalizing them to the bottom.
const NEUTRAL_RATING: f64 = 3.0;

/// The mechanical edit operation a model is being selected for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
    /// Fill-in-middle completion
    FillInMiddle,
    /// Next-edit prediction
    NextEdit,
    /// Apply-edit rewriting
    ApplyEdit,
}

impl EditOperation {
    const fn supported_by(self, capabilities: &ModelCapabilities) -> bool {
        match self {
            Self::FillInMiddle => capabilities.supports_fim,
            Self::NextEdit => capabilities.supports_next_edit,
            Self::ApplyEdit => capabilities.supports_apply_edit,
        }
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FillInMiddle => "fill-in-middle",
            Self::NextEdit => "next-edit",
            Self::ApplyEdit => "apply-edit",
        })
    }
}

/// Select the best model for a mechanical edit operation
///
/// Filters by the operation's capability flag (and by provider when one is
/// preferred — a provider with zero matches is an error, not a cue to try
/// another provider), then ranks by the speed/reliability heuristic.
///
/// # Errors
///
/// Returns [`RoutingError::NoCandidates`] if no catalog model passes the
/// filters.
pub fn select_edit_model(
    catalog: &dyn ModelCatalog,
    operation: EditOperation,
    preferred_provider: Option<&str>,
) -> Result<String, RoutingError> {
    let candidates = catalog.candidates(None);

    let mut viable: Vec<(&String, f64)> = candidates
        .iter()
        .filter(|(_, caps)| operation.supported_by(caps))
        .filter(|(_, caps)| preferred_provider.is_none_or(|p| caps.provider == p))
        .map(|(id, caps)| (id, edit_score(caps)))
        .collect();

    if viable.is_empty() {
        let need = preferred_provider.map_or_else(
            || format!("{operation} support"),
            |p| format!("{operation} support from provider '{p}'"),
        );
        return Err(RoutingError::NoCandidates { need });
    }

    viable.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let (model, heuristic) = &viable[0];
    tracing::debug!(model = %model, operation = %operation, heuristic, "edit model selected");

    Ok((*model).clone())
}

/// Speed-first heuristic for mechanical edits
fn edit_score(capabilities: &ModelCapabilities) -> f64 {
    let speed = capabilities.speed.map_or(NEUTRAL_RATING, f64::from);
    let reliability = capabilities.reliability.map_or(NEUTRAL_RATING, f64::from);
    let complexity = capabilities.context_complexity.map_or(NEUTRAL_RATING, f64::from);

    speed.mul_add(10.0, reliability.mul_add(5.0, (5.0 - complexity) * 2.0))
}
