//! Metric Suite - structural metrics over a component graph.
//!
//! Six independent metric families, each with a per-component breakdown and
//! a fixed set of aggregates. Aggregates are rounded to two decimals; the
//! normalized ones lie in [0, 1] and fall back to 0 whenever their
//! denominator is not positive.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::architecture::{ComponentGraph, DeploymentNode};
use crate::domain::foundation::ComponentId;

/// Outgoing dependency counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingMetrics {
    pub per_component: BTreeMap<ComponentId, u32>,
    pub average_coupling: f64,
    pub max_coupling: u32,
    pub normalized_coupling: f64,
}

/// Incoming dependency counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanInMetrics {
    pub per_component: BTreeMap<ComponentId, u32>,
    pub max_fan_in: u32,
    pub normalized_fan_in: f64,
    /// Share of all incoming edges that target the most depended-upon component.
    pub fan_in_concentration: f64,
}

/// Outgoing dependency counts, exposed as their own family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanOutMetrics {
    pub per_component: BTreeMap<ComponentId, u32>,
    pub max_fan_out: u32,
    pub normalized_fan_out: f64,
    pub fan_out_concentration: f64,
}

/// Responsibility-count proxy for cohesion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohesionMetrics {
    pub per_component: BTreeMap<ComponentId, f64>,
    pub average_cohesion: f64,
    pub min_cohesion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    pub tot_complexity: usize,
    pub norm_complexity: f64,
}

/// Additional deployment placements per component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedundancyMetrics {
    pub per_component: BTreeMap<ComponentId, u32>,
    pub normalized_avg_redundancy: f64,
    pub normalized_max_redundancy: f64,
}

/// All metric families for one architecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub component_count: usize,
    pub coupling: CouplingMetrics,
    pub fan_in: FanInMetrics,
    pub fan_out: FanOutMetrics,
    pub cohesion: CohesionMetrics,
    pub complexity: ComplexityMetrics,
    pub redundancy: RedundancyMetrics,
}

/// Structural metric computations.
pub struct MetricSuite;

impl MetricSuite {
    /// Computes every metric family for one architecture.
    pub fn compute(graph: &ComponentGraph, deployment_nodes: &[DeploymentNode]) -> MetricRecord {
        MetricRecord {
            component_count: graph.node_count(),
            coupling: Self::coupling(graph),
            fan_in: Self::fan_in(graph),
            fan_out: Self::fan_out(graph),
            cohesion: Self::cohesion(graph),
            complexity: Self::complexity(graph),
            redundancy: Self::redundancy(graph, deployment_nodes),
        }
    }

    /// Coupling: outgoing edges per component.
    ///
    /// # Aggregates
    /// - average over all components
    /// - maximum
    /// - normalized = max / (n - 1), 0 when n <= 1
    pub fn coupling(graph: &ComponentGraph) -> CouplingMetrics {
        let per_component = graph.out_degrees();
        let n = per_component.len();
        let total: u32 = per_component.values().sum();
        let max_coupling = per_component.values().copied().max().unwrap_or(0);

        CouplingMetrics {
            average_coupling: round2(ratio(f64::from(total), n as f64)),
            max_coupling,
            normalized_coupling: normalized(f64::from(max_coupling), n as f64 - 1.0),
            per_component,
        }
    }

    /// Fan-in: incoming edges per component.
    pub fn fan_in(graph: &ComponentGraph) -> FanInMetrics {
        let degrees = DegreeSummary::from_degrees(graph.in_degrees());
        FanInMetrics {
            max_fan_in: degrees.max,
            normalized_fan_in: degrees.normalized,
            fan_in_concentration: degrees.concentration,
            per_component: degrees.per_component,
        }
    }

    /// Fan-out: outgoing edges per component.
    pub fn fan_out(graph: &ComponentGraph) -> FanOutMetrics {
        let degrees = DegreeSummary::from_degrees(graph.out_degrees());
        FanOutMetrics {
            max_fan_out: degrees.max,
            normalized_fan_out: degrees.normalized,
            fan_out_concentration: degrees.concentration,
            per_component: degrees.per_component,
        }
    }

    /// Cohesion: 1.0 for at most one responsibility, else 1 / count.
    ///
    /// Responsibilities are counted, never compared with each other.
    pub fn cohesion(graph: &ComponentGraph) -> CohesionMetrics {
        let per_component: BTreeMap<ComponentId, f64> = graph
            .nodes()
            .map(|node| (node.id.clone(), component_cohesion(node.responsibilities.len())))
            .collect();

        let n = per_component.len();
        let total: f64 = per_component.values().sum();
        let min = per_component.values().copied().fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |current| current.min(v)))
        });

        CohesionMetrics {
            average_cohesion: round2(ratio(total, n as f64)),
            min_cohesion: round2(min.unwrap_or(0.0)),
            per_component,
        }
    }

    /// Complexity: node count + edge count, normalized against n * (n - 1).
    pub fn complexity(graph: &ComponentGraph) -> ComplexityMetrics {
        let n = graph.node_count();
        let tot_complexity = n + graph.edge_count();
        let max_edges = if n > 1 { (n * (n - 1)) as f64 } else { 0.0 };

        ComplexityMetrics {
            tot_complexity,
            norm_complexity: normalized(tot_complexity as f64, max_edges),
        }
    }

    /// Redundancy: deployment nodes hosting a component, minus the baseline one.
    ///
    /// Deployment entries naming components absent from the graph are ignored.
    pub fn redundancy(graph: &ComponentGraph, deployment_nodes: &[DeploymentNode]) -> RedundancyMetrics {
        let per_component: BTreeMap<ComponentId, u32> = graph
            .nodes()
            .map(|node| {
                let placements = deployment_nodes.iter().filter(|d| d.hosts(&node.id)).count() as u32;
                (node.id.clone(), placements.saturating_sub(1))
            })
            .collect();

        let n = per_component.len();
        let total: u32 = per_component.values().sum();
        let max = per_component.values().copied().max().unwrap_or(0);
        let average = ratio(f64::from(total), n as f64);
        let extra_nodes = deployment_nodes.len() as f64 - 1.0;

        RedundancyMetrics {
            normalized_avg_redundancy: normalized(average, extra_nodes),
            normalized_max_redundancy: normalized(f64::from(max), extra_nodes),
            per_component,
        }
    }
}

/// Shared computation behind fan-in and fan-out.
struct DegreeSummary {
    per_component: BTreeMap<ComponentId, u32>,
    max: u32,
    normalized: f64,
    concentration: f64,
}

impl DegreeSummary {
    fn from_degrees(per_component: BTreeMap<ComponentId, u32>) -> Self {
        let n = per_component.len();
        let total: u32 = per_component.values().sum();
        let max = per_component.values().copied().max().unwrap_or(0);

        Self {
            normalized: normalized(f64::from(max), n as f64 - 1.0),
            concentration: normalized(f64::from(max), f64::from(total)),
            max,
            per_component,
        }
    }
}

fn component_cohesion(responsibilities: usize) -> f64 {
    if responsibilities <= 1 {
        1.0
    } else {
        1.0 / responsibilities as f64
    }
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Ratio clamped into [0, 1] and rounded.
///
/// Parallel edges and self-loops can push the raw ratio past 1.
fn normalized(numerator: f64, denominator: f64) -> f64 {
    round2(ratio(numerator, denominator).clamp(0.0, 1.0))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
