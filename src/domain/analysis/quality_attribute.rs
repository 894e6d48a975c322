//! Quality attributes and the objective-to-attribute table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::objectives::Objective;

/// Higher-level quality attribute a structural objective speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityAttribute {
    Availability,
    Maintainability,
    Modifiability,
    Reliability,
    Testability,
    Understandability,
}

impl QualityAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityAttribute::Availability => "availability",
            QualityAttribute::Maintainability => "maintainability",
            QualityAttribute::Modifiability => "modifiability",
            QualityAttribute::Reliability => "reliability",
            QualityAttribute::Testability => "testability",
            QualityAttribute::Understandability => "understandability",
        }
    }

    /// Attributes influenced by a single objective.
    pub fn for_objective(objective: Objective) -> &'static [QualityAttribute] {
        use QualityAttribute::*;
        match objective {
            Objective::NormalizedCoupling => &[Modifiability, Maintainability],
            Objective::NormalizedFanOut => &[Modifiability, Testability],
            Objective::NormalizedFanIn => &[Availability, Reliability],
            Objective::NormComplexity => &[Maintainability, Testability],
            Objective::AverageCohesion => &[Modifiability, Understandability],
            Objective::NormalizedAvgRedundancy => &[Availability, Reliability],
        }
    }

    /// Union of the attributes influenced by a set of objectives.
    pub fn for_objectives(objectives: &[Objective]) -> BTreeSet<QualityAttribute> {
        objectives
            .iter()
            .flat_map(|objective| Self::for_objective(*objective).iter().copied())
            .collect()
    }
}

impl fmt::Display for QualityAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
