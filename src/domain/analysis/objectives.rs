//! Objective Extractor - the fixed optimization objectives.
//!
//! `OBJECTIVES` is the only place that says which way each objective
//! improves. Dominance, Pareto analysis and trade-off classification all
//! go through [`ObjectiveComparison::compare`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::metrics::MetricRecord;

/// One of the six optimization objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    NormalizedCoupling,
    NormalizedFanOut,
    NormalizedFanIn,
    NormComplexity,
    AverageCohesion,
    NormalizedAvgRedundancy,
}

/// Optimization direction of an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "min")]
    Minimize,
    #[serde(rename = "max")]
    Maximize,
}

/// Metric family an objective is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFamily {
    Coupling,
    FanIn,
    FanOut,
    Cohesion,
    Complexity,
    Redundancy,
}

/// How one value compares to another under an objective's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Better,
    Worse,
    Equal,
}

/// Row of the objective table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveDefinition {
    pub objective: Objective,
    pub family: MetricFamily,
    pub field: &'static str,
    pub direction: Direction,
}

/// The objective table, in `Objective` declaration order.
pub const OBJECTIVES: [ObjectiveDefinition; 6] = [
    ObjectiveDefinition {
        objective: Objective::NormalizedCoupling,
        family: MetricFamily::Coupling,
        field: "normalized_coupling",
        direction: Direction::Minimize,
    },
    ObjectiveDefinition {
        objective: Objective::NormalizedFanOut,
        family: MetricFamily::FanOut,
        field: "normalized_fan_out",
        direction: Direction::Minimize,
    },
    ObjectiveDefinition {
        objective: Objective::NormalizedFanIn,
        family: MetricFamily::FanIn,
        field: "normalized_fan_in",
        direction: Direction::Minimize,
    },
    ObjectiveDefinition {
        objective: Objective::NormComplexity,
        family: MetricFamily::Complexity,
        field: "norm_complexity",
        direction: Direction::Minimize,
    },
    ObjectiveDefinition {
        objective: Objective::AverageCohesion,
        family: MetricFamily::Cohesion,
        field: "average_cohesion",
        direction: Direction::Maximize,
    },
    ObjectiveDefinition {
        objective: Objective::NormalizedAvgRedundancy,
        family: MetricFamily::Redundancy,
        field: "normalized_avg_redundancy",
        direction: Direction::Maximize,
    },
];

impl Objective {
    /// All objectives in table order.
    pub fn all() -> impl Iterator<Item = Objective> {
        OBJECTIVES.iter().map(|def| def.objective)
    }

    pub fn definition(self) -> &'static ObjectiveDefinition {
        &OBJECTIVES[self.index()]
    }

    pub fn direction(self) -> Direction {
        self.definition().direction
    }

    /// Aggregate field name, e.g. `normalized_coupling`.
    pub fn name(self) -> &'static str {
        self.definition().field
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Reads this objective's aggregate from a metric record.
    fn read(self, record: &MetricRecord) -> f64 {
        match self {
            Objective::NormalizedCoupling => record.coupling.normalized_coupling,
            Objective::NormalizedFanOut => record.fan_out.normalized_fan_out,
            Objective::NormalizedFanIn => record.fan_in.normalized_fan_in,
            Objective::NormComplexity => record.complexity.norm_complexity,
            Objective::AverageCohesion => record.cohesion.average_cohesion,
            Objective::NormalizedAvgRedundancy => record.redundancy.normalized_avg_redundancy,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Direction {
    /// Compares `a` against `b`: is `a` better, worse or equal?
    pub fn prefer(self, a: f64, b: f64) -> Preference {
        if a == b {
            return Preference::Equal;
        }
        let a_is_better = match self {
            Direction::Minimize => a < b,
            Direction::Maximize => a > b,
        };
        if a_is_better {
            Preference::Better
        } else {
            Preference::Worse
        }
    }
}

/// Exactly six objective values for one architecture.
///
/// Serialized as a flat `{objective_name: value}` mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<Objective, f64>",
    try_from = "BTreeMap<Objective, f64>"
)]
pub struct ObjectiveVector {
    values: [f64; 6],
}

impl ObjectiveVector {
    /// Creates a vector from values given in `OBJECTIVES` order.
    pub fn new(values: [f64; 6]) -> Self {
        Self { values }
    }

    /// Projects a metric record onto the objective table.
    pub fn extract(record: &MetricRecord) -> Self {
        let mut values = [0.0; 6];
        for objective in Objective::all() {
            values[objective.index()] = objective.read(record);
        }
        Self { values }
    }

    pub fn get(&self, objective: Objective) -> f64 {
        self.values[objective.index()]
    }

    /// Iterates `(objective, value)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Objective, f64)> + '_ {
        Objective::all().map(move |objective| (objective, self.get(objective)))
    }
}

impl From<ObjectiveVector> for BTreeMap<Objective, f64> {
    fn from(vector: ObjectiveVector) -> Self {
        vector.iter().collect()
    }
}

impl TryFrom<BTreeMap<Objective, f64>> for ObjectiveVector {
    type Error = String;

    fn try_from(map: BTreeMap<Objective, f64>) -> Result<Self, Self::Error> {
        let mut values = [0.0; 6];
        for objective in Objective::all() {
            values[objective.index()] = *map
                .get(&objective)
                .ok_or_else(|| format!("missing objective '{}'", objective))?;
        }
        Ok(Self { values })
    }
}

/// Per-objective better/worse/equal breakdown of `a` against `b`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveComparison {
    pub better_on: Vec<Objective>,
    pub worse_on: Vec<Objective>,
    pub equal_on: Vec<Objective>,
}

impl ObjectiveComparison {
    /// Compares `a` against `b`, honoring each objective's direction.
    pub fn compare(a: &ObjectiveVector, b: &ObjectiveVector) -> Self {
        let mut comparison = Self::default();
        for def in &OBJECTIVES {
            let objective = def.objective;
            match def.direction.prefer(a.get(objective), b.get(objective)) {
                Preference::Better => comparison.better_on.push(objective),
                Preference::Worse => comparison.worse_on.push(objective),
                Preference::Equal => comparison.equal_on.push(objective),
            }
        }
        comparison
    }

    /// True if `a` is never worse and strictly better at least once.
    pub fn a_dominates(&self) -> bool {
        self.worse_on.is_empty() && !self.better_on.is_empty()
    }

    /// True if `b` is never worse and strictly better at least once.
    pub fn b_dominates(&self) -> bool {
        self.better_on.is_empty() && !self.worse_on.is_empty()
    }

    /// The same comparison seen from `b`'s side.
    pub fn inverse(&self) -> Self {
        Self {
            better_on: self.worse_on.clone(),
            worse_on: self.better_on.clone(),
            equal_on: self.equal_on.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_enum_order() {
        for (index, def) in OBJECTIVES.iter().enumerate() {
            assert_eq!(def.objective as usize, index);
        }
    }

    #[test]
    fn directions_follow_the_table() {
        assert_eq!(Objective::NormalizedCoupling.direction(), Direction::Minimize);
        assert_eq!(Objective::NormComplexity.direction(), Direction::Minimize);
        assert_eq!(Objective::AverageCohesion.direction(), Direction::Maximize);
        assert_eq!(Objective::NormalizedAvgRedundancy.direction(), Direction::Maximize);
    }

    #[test]
    fn names_match_serialized_form() {
        for objective in Objective::all() {
            let json = serde_json::to_string(&objective).unwrap();
            assert_eq!(json, format!("\"{}\"", objective.name()));
        }
    }

    #[test]
    fn prefer_respects_direction() {
        assert_eq!(Direction::Minimize.prefer(0.2, 0.5), Preference::Better);
        assert_eq!(Direction::Minimize.prefer(0.5, 0.2), Preference::Worse);
        assert_eq!(Direction::Maximize.prefer(0.5, 0.2), Preference::Better);
        assert_eq!(Direction::Maximize.prefer(0.3, 0.3), Preference::Equal);
    }

    #[test]
    fn compare_splits_objectives_three_ways() {
        let a = ObjectiveVector::new([0.2, 0.2, 0.5, 0.4, 1.0, 0.0]);
        let b = ObjectiveVector::new([0.4, 0.2, 0.3, 0.4, 0.5, 1.0]);

        let comparison = ObjectiveComparison::compare(&a, &b);
        assert_eq!(
            comparison.better_on,
            vec![Objective::NormalizedCoupling, Objective::AverageCohesion]
        );
        assert_eq!(
            comparison.worse_on,
            vec![Objective::NormalizedFanIn, Objective::NormalizedAvgRedundancy]
        );
        assert_eq!(
            comparison.equal_on,
            vec![Objective::NormalizedFanOut, Objective::NormComplexity]
        );
        assert!(!comparison.a_dominates());
        assert!(!comparison.b_dominates());
    }

    #[test]
    fn identical_vectors_do_not_dominate() {
        let a = ObjectiveVector::new([0.1; 6]);
        let comparison = ObjectiveComparison::compare(&a, &a);
        assert_eq!(comparison.equal_on.len(), 6);
        assert!(!comparison.a_dominates());
        assert!(!comparison.b_dominates());
    }

    #[test]
    fn inverse_swaps_sides() {
        let a = ObjectiveVector::new([0.1, 0.1, 0.1, 0.1, 0.9, 0.9]);
        let b = ObjectiveVector::new([0.2, 0.2, 0.2, 0.2, 0.8, 0.8]);
        let comparison = ObjectiveComparison::compare(&a, &b);
        assert!(comparison.a_dominates());
        assert_eq!(comparison.inverse(), ObjectiveComparison::compare(&b, &a));
    }

    #[test]
    fn vector_serializes_as_flat_mapping() {
        let vector = ObjectiveVector::new([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let value = serde_json::to_value(vector).unwrap();
        assert_eq!(value["normalized_coupling"], 0.1);
        assert_eq!(value["normalized_avg_redundancy"], 0.6);

        let back: ObjectiveVector = serde_json::from_value(value).unwrap();
        assert_eq!(back, vector);
    }

    #[test]
    fn vector_deserialization_requires_all_objectives() {
        let result: Result<ObjectiveVector, _> =
            serde_json::from_str(r#"{"normalized_coupling": 0.1}"#);
        assert!(result.is_err());
    }
}
