//! Evolution loop handlers.

mod controller;
mod run_tradeoff_loop;

pub use controller::{EvolutionController, EvolutionOutcome};
pub use run_tradeoff_loop::{RunTradeoffLoopCommand, TradeoffLoopHandler, TradeoffLoopResult};
