//! Evolution module - the iterative refinement loop's state.
//!
//! # Components
//!
//! - `Diagnosis` - Three-flag adequacy verdict on the dominant trade-off
//! - `WorkflowState` - Iteration counter, status and failure history
//! - `FailureFeedback` - Prior failures rendered for the next iteration
//! - `DriverScenarioSet` - Drivers, scenarios and evidence for one iteration
//!
//! Persistence of failures goes through the `FailureLog` port; nothing in
//! here performs I/O.

mod diagnosis;
mod drivers;
mod errors;
mod feedback;
mod workflow;

pub use diagnosis::{Diagnosis, DiagnosisWarning, ProblemSubject};
pub use drivers::{DriverScenarioSet, QualityAttributeDriver, QualityScenario};
pub use errors::WorkflowError;
pub use feedback::FailureFeedback;
pub use workflow::{
    Decision, FailureRecord, PlannedTransition, TerminationReason, WorkflowState, WorkflowStatus,
};
