//! Externally supplied inputs merged into trade-off records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::foundation::ArchitectureId;

/// Scenario-simulation evidence keyed by architecture.
///
/// Payloads are opaque and merged verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEvidence {
    #[serde(default)]
    pub evaluations: BTreeMap<ArchitectureId, Value>,
}

impl ScenarioEvidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the evidence for one architecture.
    pub fn with(mut self, architecture_id: ArchitectureId, evidence: Value) -> Self {
        self.evaluations.insert(architecture_id, evidence);
        self
    }

    /// Evidence for one architecture; an empty object when none was supplied.
    pub fn for_architecture(&self, architecture_id: &ArchitectureId) -> Value {
        self.evaluations
            .get(architecture_id)
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()))
    }
}

/// A "QA vs QA" trade-off statement and its rationale for one pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationaleEntry {
    pub arch_a: ArchitectureId,
    pub arch_b: ArchitectureId,
    pub tradeoff: String,
    pub rationale: String,
}

impl RationaleEntry {
    pub fn new(
        arch_a: ArchitectureId,
        arch_b: ArchitectureId,
        tradeoff: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            arch_a,
            arch_b,
            tradeoff: tradeoff.into(),
            rationale: rationale.into(),
        }
    }
}
