//! Trade-off Synthesizer - structural comparison of Pareto-front pairs.
//!
//! A record is created from the objective breakdown of one front pair,
//! then enriched once with scenario evidence and once with a rationale.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::errors::{Enrichment, SynthesisError};
use super::evidence::{RationaleEntry, ScenarioEvidence};
use super::objectives::{Objective, ObjectiveComparison, ObjectiveVector};
use super::quality_attribute::QualityAttribute;
use crate::domain::foundation::ArchitectureId;

/// A "QA vs QA" statement with its rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeoffStatement {
    pub tradeoff: String,
    pub rationale: String,
}

impl TradeoffStatement {
    /// Splits the statement into its two attribute names.
    ///
    /// Returns `None` for statements that are not of the form `X vs Y`.
    pub fn attributes(&self) -> Option<(&str, &str)> {
        let (left, right) = self.tradeoff.split_once(" vs ")?;
        let (left, right) = (left.trim(), right.trim());
        if left.is_empty() || right.is_empty() {
            return None;
        }
        Some((left, right))
    }

    pub fn is_well_formed(&self) -> bool {
        self.attributes().is_some()
    }
}

/// Structured comparison between two Pareto-front architectures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffRecord {
    /// 1-based position in pair order.
    pub id: u32,
    pub arch_a: ArchitectureId,
    pub arch_b: ArchitectureId,
    pub pro_a_metrics: Vec<Objective>,
    pub pro_b_metrics: Vec<Objective>,
    pub neutral_metrics: Vec<Objective>,
    pub pro_a_attributes: BTreeSet<QualityAttribute>,
    pub pro_b_attributes: BTreeSet<QualityAttribute>,
    pub neutral_attributes: BTreeSet<QualityAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_evidence: Option<BTreeMap<ArchitectureId, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradeoff: Option<TradeoffStatement>,
}

impl TradeoffRecord {
    fn from_comparison(
        id: u32,
        arch_a: ArchitectureId,
        arch_b: ArchitectureId,
        comparison: ObjectiveComparison,
    ) -> Self {
        Self {
            id,
            arch_a,
            arch_b,
            pro_a_attributes: QualityAttribute::for_objectives(&comparison.better_on),
            pro_b_attributes: QualityAttribute::for_objectives(&comparison.worse_on),
            neutral_attributes: QualityAttribute::for_objectives(&comparison.equal_on),
            pro_a_metrics: comparison.better_on,
            pro_b_metrics: comparison.worse_on,
            neutral_metrics: comparison.equal_on,
            scenario_evidence: None,
            tradeoff: None,
        }
    }

    /// Unordered pair key, so `(A, B)` and `(B, A)` match the same record.
    pub fn key(&self) -> (ArchitectureId, ArchitectureId) {
        pair_key(&self.arch_a, &self.arch_b)
    }

    pub fn has_evidence(&self) -> bool {
        self.scenario_evidence.is_some()
    }

    pub fn has_rationale(&self) -> bool {
        self.tradeoff.is_some()
    }
}

fn pair_key(a: &ArchitectureId, b: &ArchitectureId) -> (ArchitectureId, ArchitectureId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Builds and enriches trade-off records.
pub struct TradeoffSynthesizer;

impl TradeoffSynthesizer {
    /// Creates one record per unordered pair of front members.
    ///
    /// Pairs follow front order (`i < j`); ids start at 1.
    ///
    /// # Edge Cases
    /// - Front with fewer than two members: no records
    ///
    /// # Errors
    /// - `MissingObjectives` if a front member has no objective vector
    pub fn compare_front(
        front: &[ArchitectureId],
        objectives: &BTreeMap<ArchitectureId, ObjectiveVector>,
    ) -> Result<Vec<TradeoffRecord>, SynthesisError> {
        let vector = |id: &ArchitectureId| {
            objectives
                .get(id)
                .ok_or_else(|| SynthesisError::MissingObjectives {
                    architecture_id: id.clone(),
                })
        };

        let mut records = Vec::new();
        let mut next_id = 1;
        for (i, arch_a) in front.iter().enumerate() {
            let a = vector(arch_a)?;
            for arch_b in &front[i + 1..] {
                let b = vector(arch_b)?;
                let comparison = ObjectiveComparison::compare(a, b);
                records.push(TradeoffRecord::from_comparison(
                    next_id,
                    arch_a.clone(),
                    arch_b.clone(),
                    comparison,
                ));
                next_id += 1;
            }
        }
        Ok(records)
    }

    /// Attaches scenario evidence for both sides of every record.
    ///
    /// Architectures without evidence get an empty object.
    ///
    /// # Errors
    /// - `AlreadyEnriched` if any record already carries evidence; no
    ///   record is modified in that case
    pub fn attach_evidence(
        records: &mut [TradeoffRecord],
        evidence: &ScenarioEvidence,
    ) -> Result<(), SynthesisError> {
        if let Some(record) = records.iter().find(|r| r.has_evidence()) {
            return Err(SynthesisError::AlreadyEnriched {
                tradeoff_id: record.id,
                enrichment: Enrichment::Evidence,
            });
        }

        for record in records.iter_mut() {
            let mut merged = BTreeMap::new();
            merged.insert(record.arch_a.clone(), evidence.for_architecture(&record.arch_a));
            merged.insert(record.arch_b.clone(), evidence.for_architecture(&record.arch_b));
            record.scenario_evidence = Some(merged);
        }
        Ok(())
    }

    /// Merges rationale entries into records by unordered pair key.
    ///
    /// All entries are validated before any record changes.
    ///
    /// # Errors
    /// - `RationaleCountMismatch` if the entry count differs from the record count
    /// - `UnknownPair` if an entry names a pair that was not compared
    /// - `DuplicateRationale` if two entries name the same pair
    /// - `AlreadyEnriched` if the matched record already has a rationale
    pub fn merge_rationale(
        records: &mut [TradeoffRecord],
        entries: &[RationaleEntry],
    ) -> Result<(), SynthesisError> {
        if records.len() != entries.len() {
            return Err(SynthesisError::RationaleCountMismatch {
                expected: records.len(),
                actual: entries.len(),
            });
        }

        let positions: BTreeMap<_, _> = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.key(), position))
            .collect();

        let mut matched = Vec::with_capacity(entries.len());
        let mut seen = BTreeSet::new();
        for entry in entries {
            let key = pair_key(&entry.arch_a, &entry.arch_b);
            let position = *positions.get(&key).ok_or_else(|| SynthesisError::UnknownPair {
                arch_a: entry.arch_a.clone(),
                arch_b: entry.arch_b.clone(),
            })?;
            if !seen.insert(position) {
                return Err(SynthesisError::DuplicateRationale {
                    arch_a: entry.arch_a.clone(),
                    arch_b: entry.arch_b.clone(),
                });
            }
            if records[position].has_rationale() {
                return Err(SynthesisError::AlreadyEnriched {
                    tradeoff_id: records[position].id,
                    enrichment: Enrichment::Rationale,
                });
            }
            matched.push((position, entry));
        }

        for (position, entry) in matched {
            records[position].tradeoff = Some(TradeoffStatement {
                tradeoff: entry.tradeoff.clone(),
                rationale: entry.rationale.clone(),
            });
        }
        Ok(())
    }

    /// Runs all three steps in order.
    pub fn synthesize(
        front: &[ArchitectureId],
        objectives: &BTreeMap<ArchitectureId, ObjectiveVector>,
        evidence: &ScenarioEvidence,
        rationale: &[RationaleEntry],
    ) -> Result<Vec<TradeoffRecord>, SynthesisError> {
        let mut records = Self::compare_front(front, objectives)?;
        Self::attach_evidence(&mut records, evidence)?;
        Self::merge_rationale(&mut records, rationale)?;
        Ok(records)
    }
}
