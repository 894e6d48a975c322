//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `architecture` - Architecture descriptions and the component graph
//! - `analysis` - Metrics, objectives, Pareto analysis, trade-off synthesis
//! - `evolution` - Diagnosis, workflow state and failure feedback

pub mod analysis;
pub mod architecture;
pub mod evolution;
pub mod foundation;
