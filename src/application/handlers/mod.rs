//! Application handlers.
//!
//! Command handlers that orchestrate domain operations and ports.

pub mod evaluation;
pub mod evolution;

pub use evaluation::{
    ArchitectureEvaluation, BatchEvaluation, ComparisonReport, EvaluateArchitecturesCommand,
    EvaluateArchitecturesHandler, RejectedArchitecture,
};
pub use evolution::{
    EvolutionController, EvolutionOutcome, RunTradeoffLoopCommand, TradeoffLoopHandler,
    TradeoffLoopResult,
};
