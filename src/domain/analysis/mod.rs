//! Analysis Module - Pure domain services for architecture evaluation.
//!
//! # Components
//!
//! - `MetricSuite` - Six structural metrics over a component graph
//! - `ObjectiveVector` - Projection onto the fixed objective table
//! - `ParetoAnalyzer` - Pairwise dominance and the non-dominated front
//! - `TradeoffSynthesizer` - Quality-attribute trade-offs between front pairs
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take domain
//! objects as input and return computed results. No ports or adapters needed
//! since there's no I/O or external dependencies.

mod errors;
mod evidence;
mod metrics;
mod objectives;
mod pareto_analyzer;
mod quality_attribute;
mod tradeoff_synthesizer;

// Re-export all public types
pub use errors::{Enrichment, SynthesisError};
pub use evidence::{RationaleEntry, ScenarioEvidence};
pub use metrics::{
    CohesionMetrics, ComplexityMetrics, CouplingMetrics, FanInMetrics, FanOutMetrics,
    MetricRecord, MetricSuite, RedundancyMetrics,
};
pub use objectives::{
    Direction, MetricFamily, Objective, ObjectiveComparison, ObjectiveDefinition,
    ObjectiveVector, Preference, OBJECTIVES,
};
pub use pareto_analyzer::{DominanceInfo, ParetoAnalysis, ParetoAnalyzer};
pub use quality_attribute::QualityAttribute;
pub use tradeoff_synthesizer::{TradeoffRecord, TradeoffStatement, TradeoffSynthesizer};
