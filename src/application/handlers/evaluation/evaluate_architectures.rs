//! EvaluateArchitecturesHandler - one structural evaluation pass over a batch.
//!
//! Per architecture: conversion, graph, metrics, objectives. Failures there
//! reject only the architecture concerned. Pareto analysis and structural trade-off
//! synthesis then run over the survivors; a failure in either aborts the pass.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use crate::domain::analysis::{
    DominanceInfo, MetricRecord, MetricSuite, ObjectiveVector, ParetoAnalysis, ParetoAnalyzer,
    TradeoffRecord, TradeoffSynthesizer,
};
use crate::domain::architecture::{
    ArchitectureDescription, ArchitectureInput, ComponentGraph, GraphError, UnreadableArchitecture,
};
use crate::domain::foundation::{ArchitectureId, DomainError, ValidationError};

/// Command to evaluate a batch of candidate architectures.
#[derive(Debug, Clone)]
pub struct EvaluateArchitecturesCommand {
    pub architectures: Vec<ArchitectureInput>,
}

impl EvaluateArchitecturesCommand {
    pub fn new(descriptions: impl IntoIterator<Item = ArchitectureDescription>) -> Self {
        Self {
            architectures: descriptions.into_iter().map(ArchitectureInput::from).collect(),
        }
    }
}

/// Metrics and objectives of one accepted architecture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchitectureEvaluation {
    pub architecture_id: ArchitectureId,
    pub metrics: MetricRecord,
    pub objectives: ObjectiveVector,
}

/// An architecture excluded from the pass, with the reason.
#[derive(Debug, Clone)]
pub struct RejectedArchitecture {
    pub architecture_id: ArchitectureId,
    pub error: DomainError,
}

/// Everything one pass produces.
#[derive(Debug, Clone)]
pub struct BatchEvaluation {
    /// Accepted architectures, in input order.
    pub evaluations: Vec<ArchitectureEvaluation>,
    pub rejected: Vec<RejectedArchitecture>,
    pub pareto: ParetoAnalysis,
    /// Structural records, not yet enriched.
    pub tradeoffs: Vec<TradeoffRecord>,
}

/// `multi_objective_comparison` report body.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport<'a> {
    pub objectives: BTreeMap<&'a ArchitectureId, &'a ObjectiveVector>,
    pub pareto_front: &'a [ArchitectureId],
    pub dominance_info: &'a BTreeMap<ArchitectureId, DominanceInfo>,
}

impl BatchEvaluation {
    pub fn evaluation(&self, id: &ArchitectureId) -> Option<&ArchitectureEvaluation> {
        self.evaluations.iter().find(|e| &e.architecture_id == id)
    }

    pub fn objectives(&self) -> BTreeMap<ArchitectureId, ObjectiveVector> {
        self.evaluations
            .iter()
            .map(|e| (e.architecture_id.clone(), e.objectives))
            .collect()
    }

    /// `metric_evaluations` report body: metric record per architecture.
    pub fn metric_report(&self) -> BTreeMap<&ArchitectureId, &MetricRecord> {
        self.evaluations
            .iter()
            .map(|e| (&e.architecture_id, &e.metrics))
            .collect()
    }

    pub fn comparison_report(&self) -> ComparisonReport<'_> {
        ComparisonReport {
            objectives: self
                .evaluations
                .iter()
                .map(|e| (&e.architecture_id, &e.objectives))
                .collect(),
            pareto_front: &self.pareto.pareto_front,
            dominance_info: &self.pareto.dominance_info,
        }
    }
}

/// Handler for structural evaluation passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluateArchitecturesHandler;

impl EvaluateArchitecturesHandler {
    pub fn new() -> Self {
        Self
    }

    /// Runs one pass.
    ///
    /// # Errors
    ///
    /// Only batch-level failures are returned; per-architecture failures
    /// are reported in `BatchEvaluation::rejected`.
    pub fn handle(&self, cmd: EvaluateArchitecturesCommand) -> Result<BatchEvaluation, DomainError> {
        let mut evaluations = Vec::new();
        let mut rejected = Vec::new();
        let mut seen = BTreeSet::new();

        for (index, entry) in cmd.architectures.iter().enumerate() {
            let description = match entry.describe() {
                Ok(description) => description,
                Err(e) => {
                    let err = UnreadableArchitecture {
                        architecture_id: Self::entry_id(index, entry)?,
                        message: e.to_string(),
                    };
                    warn!(architecture_id = %err.architecture_id, error = %err.message, "Rejected unreadable architecture");
                    rejected.push(RejectedArchitecture {
                        architecture_id: err.architecture_id.clone(),
                        error: err.into(),
                    });
                    continue;
                }
            };
            let architecture_id = description.architecture_id.clone();

            if !seen.insert(architecture_id.clone()) {
                let err = GraphError::DuplicateArchitecture {
                    architecture_id: architecture_id.clone(),
                };
                warn!(architecture_id = %architecture_id, "Rejected duplicate architecture");
                rejected.push(RejectedArchitecture {
                    architecture_id,
                    error: err.into(),
                });
                continue;
            }

            match Self::evaluate(&description) {
                Ok(evaluation) => evaluations.push(evaluation),
                Err(err) => {
                    warn!(architecture_id = %architecture_id, error = %err, "Rejected architecture");
                    rejected.push(RejectedArchitecture {
                        architecture_id,
                        error: err.into(),
                    });
                }
            }
        }

        let pareto = ParetoAnalyzer::analyze(
            evaluations
                .iter()
                .map(|e| (&e.architecture_id, &e.objectives)),
        );

        let objectives = evaluations
            .iter()
            .map(|e| (e.architecture_id.clone(), e.objectives))
            .collect();
        let tradeoffs = TradeoffSynthesizer::compare_front(&pareto.pareto_front, &objectives)?;

        info!(
            accepted = evaluations.len(),
            rejected = rejected.len(),
            front = pareto.pareto_front.len(),
            tradeoffs = tradeoffs.len(),
            "Evaluated architecture batch"
        );

        Ok(BatchEvaluation {
            evaluations,
            rejected,
            pareto,
            tradeoffs,
        })
    }

    /// Id a rejected entry is reported under: its own, else its position.
    fn entry_id(index: usize, entry: &ArchitectureInput) -> Result<ArchitectureId, ValidationError> {
        match entry.architecture_id() {
            Some(id) => ArchitectureId::new(id),
            None => ArchitectureId::new(format!("architectures[{}]", index)),
        }
    }

    fn evaluate(description: &ArchitectureDescription) -> Result<ArchitectureEvaluation, GraphError> {
        let graph = ComponentGraph::build(description)?;
        let metrics = MetricSuite::compute(&graph, description.deployment_nodes());
        let objectives = ObjectiveVector::extract(&metrics);

        debug!(
            architecture_id = %description.architecture_id,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Computed metrics"
        );

        Ok(ArchitectureEvaluation {
            architecture_id: description.architecture_id.clone(),
            metrics,
            objectives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::Objective;
    use crate::domain::foundation::ErrorCode;

    /// 4 components in a chain, all on one node.
    fn lean() -> ArchitectureDescription {
        ArchitectureDescription::builder("A")
            .component("c1", &["ui"])
            .component("c2", &["orders"])
            .component("c3", &["billing"])
            .component("c4", &["storage"])
            .connector("c1", "c2")
            .connector("c2", "c3")
            .connector("c3", "c4")
            .deployment_node("n1", &["c1", "c2", "c3", "c4"])
            .build()
            .unwrap()
    }

    /// Same components, six edges, replicated on two nodes.
    fn replicated() -> ArchitectureDescription {
        ArchitectureDescription::builder("B")
            .component("c1", &["ui"])
            .component("c2", &["orders"])
            .component("c3", &["billing"])
            .component("c4", &["storage"])
            .connector("c1", "c2")
            .connector("c1", "c3")
            .connector("c1", "c4")
            .connector("c2", "c3")
            .connector("c2", "c4")
            .connector("c3", "c4")
            .deployment_node("n1", &["c1", "c2", "c3", "c4"])
            .deployment_node("n2", &["c1", "c2", "c3", "c4"])
            .build()
            .unwrap()
    }

    fn broken() -> ArchitectureDescription {
        ArchitectureDescription::builder("X")
            .component("c1", &["ui"])
            .connector("c1", "ghost")
            .build()
            .unwrap()
    }

    fn run(architectures: Vec<ArchitectureDescription>) -> BatchEvaluation {
        EvaluateArchitecturesHandler::new()
            .handle(EvaluateArchitecturesCommand::new(architectures))
            .unwrap()
    }

    #[test]
    fn conflicting_architectures_share_the_front() {
        let batch = run(vec![lean(), replicated()]);

        let a = batch.evaluation(&ArchitectureId::new("A").unwrap()).unwrap();
        let b = batch.evaluation(&ArchitectureId::new("B").unwrap()).unwrap();
        assert_eq!(a.objectives.get(Objective::NormalizedAvgRedundancy), 0.0);
        assert_eq!(b.objectives.get(Objective::NormalizedAvgRedundancy), 1.0);
        assert!(a.objectives.get(Objective::NormalizedCoupling) < b.objectives.get(Objective::NormalizedCoupling));

        assert_eq!(batch.pareto.pareto_front.len(), 2);
        assert_eq!(batch.tradeoffs.len(), 1);
        assert_eq!(batch.tradeoffs[0].pro_b_metrics, vec![Objective::NormalizedAvgRedundancy]);
    }

    #[test]
    fn broken_architecture_is_rejected_and_siblings_continue() {
        let batch = run(vec![broken(), lean()]);

        assert_eq!(batch.evaluations.len(), 1);
        assert_eq!(batch.rejected.len(), 1);
        let rejected = &batch.rejected[0];
        assert_eq!(rejected.architecture_id.as_str(), "X");
        assert_eq!(rejected.error.code, ErrorCode::UnknownComponent);
        assert_eq!(rejected.error.stage(), Some("graph"));
        assert_eq!(batch.pareto.pareto_front, vec![ArchitectureId::new("A").unwrap()]);
        assert!(batch.tradeoffs.is_empty());
    }

    fn document(yaml: &str) -> ArchitectureInput {
        ArchitectureInput::Document(serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn unreadable_architecture_is_rejected_at_input_and_siblings_continue() {
        let batch = EvaluateArchitecturesHandler::new()
            .handle(EvaluateArchitecturesCommand {
                architectures: vec![
                    lean().into(),
                    document(
                        "architecture_id: \"Z\"\nviews:\n  component_view:\n    components:\n      - id: \"\"\n",
                    ),
                    replicated().into(),
                ],
            })
            .unwrap();

        assert_eq!(batch.evaluations.len(), 2);
        assert_eq!(batch.rejected.len(), 1);
        let rejected = &batch.rejected[0];
        assert_eq!(rejected.architecture_id.as_str(), "Z");
        assert_eq!(rejected.error.code, ErrorCode::ValidationFailed);
        assert_eq!(rejected.error.stage(), Some("input"));
        assert_eq!(batch.tradeoffs.len(), 1);
    }

    #[test]
    fn architecture_without_readable_id_is_reported_by_position() {
        let batch = EvaluateArchitecturesHandler::new()
            .handle(EvaluateArchitecturesCommand {
                architectures: vec![lean().into(), document("name: \"anonymous\"\n")],
            })
            .unwrap();

        assert_eq!(batch.evaluations.len(), 1);
        assert_eq!(batch.rejected[0].architecture_id.as_str(), "architectures[1]");
        assert_eq!(batch.rejected[0].error.stage(), Some("input"));
    }

    #[test]
    fn duplicate_architecture_ids_keep_the_first() {
        let batch = run(vec![lean(), lean()]);
        assert_eq!(batch.evaluations.len(), 1);
        assert_eq!(batch.rejected[0].error.code, ErrorCode::DuplicateArchitecture);
    }

    #[test]
    fn empty_batch_is_empty_everywhere() {
        let batch = run(Vec::new());
        assert!(batch.evaluations.is_empty());
        assert!(batch.pareto.pareto_front.is_empty());
        assert!(batch.tradeoffs.is_empty());
    }

    #[test]
    fn reports_serialize() {
        let batch = run(vec![lean(), replicated()]);
        let metrics = serde_yaml::to_string(&batch.metric_report()).unwrap();
        assert!(metrics.contains("normalized_coupling"));
        let comparison = serde_yaml::to_string(&batch.comparison_report()).unwrap();
        assert!(comparison.contains("pareto_front"));
        assert!(comparison.contains("dominance_info"));
    }
}
