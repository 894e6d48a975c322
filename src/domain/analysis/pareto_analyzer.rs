//! Pareto Analyzer - pairwise dominance and the non-dominated front.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::objectives::{ObjectiveComparison, ObjectiveVector};
use crate::domain::foundation::ArchitectureId;

/// Dominance relations of one architecture.
///
/// Every comparison is expressed from the owning architecture's side:
/// `better_on` lists objectives where the owner beats the other one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominanceInfo {
    pub dominates: BTreeMap<ArchitectureId, ObjectiveComparison>,
    pub dominated_by: BTreeMap<ArchitectureId, ObjectiveComparison>,
}

impl DominanceInfo {
    pub fn is_dominated(&self) -> bool {
        !self.dominated_by.is_empty()
    }
}

/// Result of a Pareto analysis over a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParetoAnalysis {
    /// Non-dominated architectures, in input order.
    pub pareto_front: Vec<ArchitectureId>,
    pub dominance_info: BTreeMap<ArchitectureId, DominanceInfo>,
}

impl ParetoAnalysis {
    pub fn is_on_front(&self, id: &ArchitectureId) -> bool {
        self.pareto_front.contains(id)
    }

    /// Architectures dominated by at least one other, in id order.
    pub fn dominated(&self) -> Vec<&ArchitectureId> {
        self.dominance_info
            .iter()
            .filter(|(_, info)| info.is_dominated())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn info(&self, id: &ArchitectureId) -> Option<&DominanceInfo> {
        self.dominance_info.get(id)
    }
}

/// Multi-objective comparison functions.
pub struct ParetoAnalyzer;

impl ParetoAnalyzer {
    /// Returns true if `a` dominates `b`.
    ///
    /// `a` dominates `b` if:
    /// 1. `a` is no worse than `b` on every objective
    /// 2. `a` is strictly better on at least one
    pub fn dominates(a: &ObjectiveVector, b: &ObjectiveVector) -> bool {
        ObjectiveComparison::compare(a, b).a_dominates()
    }

    /// Computes full pairwise dominance and the Pareto front.
    ///
    /// Brute force over every ordered pair; ids are expected to be unique.
    ///
    /// # Edge Cases
    /// - Empty input: empty front
    /// - Single architecture: it is the front
    /// - Identical vectors: neither dominates, both stay on the front
    pub fn analyze<'a, I>(candidates: I) -> ParetoAnalysis
    where
        I: IntoIterator<Item = (&'a ArchitectureId, &'a ObjectiveVector)>,
    {
        let candidates: Vec<_> = candidates.into_iter().collect();
        let mut analysis = ParetoAnalysis::default();

        for (a_id, a_obj) in &candidates {
            let mut info = DominanceInfo::default();

            for (b_id, b_obj) in &candidates {
                if a_id == b_id {
                    continue;
                }

                let comparison = ObjectiveComparison::compare(a_obj, b_obj);
                if comparison.b_dominates() {
                    info.dominated_by.insert((*b_id).clone(), comparison);
                } else if comparison.a_dominates() {
                    info.dominates.insert((*b_id).clone(), comparison);
                }
            }

            if !info.is_dominated() {
                analysis.pareto_front.push((*a_id).clone());
            }
            analysis.dominance_info.insert((*a_id).clone(), info);
        }

        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::Objective;

    fn id(value: &str) -> ArchitectureId {
        ArchitectureId::new(value).unwrap()
    }

    fn analyze(entries: &[(&str, [f64; 6])]) -> ParetoAnalysis {
        let owned: Vec<(ArchitectureId, ObjectiveVector)> = entries
            .iter()
            .map(|(name, values)| (id(name), ObjectiveVector::new(*values)))
            .collect();
        ParetoAnalyzer::analyze(owned.iter().map(|(i, v)| (i, v)))
    }

    #[test]
    fn empty_input_has_empty_front() {
        let analysis = analyze(&[]);
        assert!(analysis.pareto_front.is_empty());
        assert!(analysis.dominance_info.is_empty());
    }

    #[test]
    fn single_architecture_is_the_front() {
        let analysis = analyze(&[("A", [0.5; 6])]);
        assert_eq!(analysis.pareto_front, vec![id("A")]);
        assert!(analysis.dominated().is_empty());
    }

    #[test]
    fn strictly_ordered_chain_keeps_only_the_best() {
        // Lower is better for the first four, higher for the last two.
        let analysis = analyze(&[
            ("C", [0.9, 0.9, 0.9, 0.9, 0.1, 0.1]),
            ("A", [0.1, 0.1, 0.1, 0.1, 0.9, 0.9]),
            ("B", [0.5, 0.5, 0.5, 0.5, 0.5, 0.5]),
        ]);

        assert_eq!(analysis.pareto_front, vec![id("A")]);
        assert_eq!(analysis.dominated(), vec![&id("B"), &id("C")]);

        let a = analysis.info(&id("A")).unwrap();
        assert_eq!(a.dominates.len(), 2);
        assert_eq!(a.dominates[&id("B")].better_on.len(), 6);

        let c = analysis.info(&id("C")).unwrap();
        assert_eq!(c.dominated_by.len(), 2);
        assert_eq!(c.dominated_by[&id("A")].worse_on.len(), 6);
    }

    #[test]
    fn identical_vectors_both_stay_on_front() {
        let analysis = analyze(&[("A", [0.3; 6]), ("B", [0.3; 6])]);
        assert_eq!(analysis.pareto_front, vec![id("A"), id("B")]);
        assert!(analysis.info(&id("A")).unwrap().dominates.is_empty());
        assert!(analysis.info(&id("B")).unwrap().dominated_by.is_empty());
    }

    #[test]
    fn conflicting_objectives_keep_both() {
        let analysis = analyze(&[
            ("lean", [0.2, 0.2, 0.2, 0.3, 1.0, 0.0]),
            ("replicated", [0.4, 0.4, 0.4, 0.6, 1.0, 1.0]),
        ]);
        assert_eq!(analysis.pareto_front.len(), 2);
    }

    #[test]
    fn dominance_requires_one_strict_improvement() {
        let a = ObjectiveVector::new([0.1, 0.2, 0.2, 0.2, 0.5, 0.5]);
        let b = ObjectiveVector::new([0.2, 0.2, 0.2, 0.2, 0.5, 0.5]);
        assert!(ParetoAnalyzer::dominates(&a, &b));
        assert!(!ParetoAnalyzer::dominates(&b, &a));
        assert!(!ParetoAnalyzer::dominates(&a, &a));
    }

    #[test]
    fn breakdown_is_from_owner_perspective() {
        let analysis = analyze(&[
            ("A", [0.1, 0.2, 0.2, 0.2, 0.5, 0.5]),
            ("B", [0.2, 0.2, 0.2, 0.2, 0.5, 0.5]),
        ]);
        let b = analysis.info(&id("B")).unwrap();
        assert_eq!(b.dominated_by[&id("A")].worse_on, vec![Objective::NormalizedCoupling]);
        let a = analysis.info(&id("A")).unwrap();
        assert_eq!(a.dominates[&id("B")].better_on, vec![Objective::NormalizedCoupling]);
    }

    #[test]
    fn every_non_front_member_is_dominated_by_someone() {
        let analysis = analyze(&[
            ("A", [0.1, 0.5, 0.5, 0.5, 0.5, 0.5]),
            ("B", [0.5, 0.1, 0.5, 0.5, 0.5, 0.5]),
            ("C", [0.6, 0.6, 0.6, 0.6, 0.4, 0.4]),
        ]);
        for (arch, info) in &analysis.dominance_info {
            assert_eq!(analysis.is_on_front(arch), !info.is_dominated());
        }
        assert_eq!(analysis.pareto_front, vec![id("A"), id("B")]);
    }
}
