//! Structural evaluation handlers.

mod evaluate_architectures;

pub use evaluate_architectures::{
    ArchitectureEvaluation, BatchEvaluation, ComparisonReport, EvaluateArchitecturesCommand,
    EvaluateArchitecturesHandler, RejectedArchitecture,
};
