//! Closed capability vocabulary shared by the catalog and the router
//!
//! Tags outside this vocabulary are dropped wherever they appear — the
//! requirement analyzer never invents capabilities the catalog cannot match.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Importance weight for tags without an explicit entry in the table
pub const DEFAULT_IMPORTANCE: f64 = 1.0;

/// A task-skill tag drawn from the closed vocabulary
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    /// Code generation, debugging, implementation
    Coding,
    /// Mathematical reasoning, calculations, proofs
    Math,
    /// Factual questions and broad world knowledge
    GeneralKnowledge,
    /// Creative writing, storytelling
    Creative,
    /// Multi-step logical reasoning
    Reasoning,
    /// Data analysis, analytics, statistical queries
    Analysis,
    /// Image understanding
    Vision,
}

impl Capability {
    /// Every tag in the vocabulary, in declaration order
    pub const ALL: [Self; 7] = [
        Self::Coding,
        Self::Math,
        Self::GeneralKnowledge,
        Self::Creative,
        Self::Reasoning,
        Self::Analysis,
        Self::Vision,
    ];

    /// Per-tag importance weight used for capability-coverage scoring
    ///
    /// Tags without an explicit entry fall back to [`DEFAULT_IMPORTANCE`].
    pub const fn importance(self) -> f64 {
        match self {
            Self::Coding | Self::Math => 1.5,
            Self::Reasoning => 1.3,
            Self::Vision => 1.2,
            Self::GeneralKnowledge | Self::Creative | Self::Analysis => DEFAULT_IMPORTANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn snake_case_round_trip() {
        assert_eq!(Capability::GeneralKnowledge.to_string(), "general_knowledge");
        assert_eq!(Capability::from_str("general_knowledge").unwrap(), Capability::GeneralKnowledge);
        assert_eq!(Capability::from_str("coding").unwrap(), Capability::Coding);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(Capability::from_str("telepathy").is_err());
    }

    #[test]
    fn unlisted_tags_use_default_importance() {
        assert!((Capability::Creative.importance() - DEFAULT_IMPORTANCE).abs() < f64::EPSILON);
        assert!(Capability::Coding.importance() > DEFAULT_IMPORTANCE);
    }
}
