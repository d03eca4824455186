#![allow(clippy::must_use_candidate)]

pub mod catalog;
mod loader;
pub mod routing;
pub mod vocabulary;

use serde::Deserialize;

pub use catalog::ModelProfileConfig;
pub use routing::{ComparisonConfig, RoutingConfig, ScoringWeights};
pub use vocabulary::Capability;

/// Top-level Cortex routing configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Routing engine configuration
    pub routing: RoutingConfig,
    /// Declarative model catalog entries
    pub catalog: Vec<ModelProfileConfig>,
}
