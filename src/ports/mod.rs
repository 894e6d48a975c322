//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `FailureLog` - Append-only failure memory of one run
//!
//! ## Collaborator Ports
//!
//! - `DriverProvider` - Drivers, scenarios and scenario evidence
//! - `RationaleProvider` - Trade-off statements per compared pair
//! - `DiagnosisProvider` - Adequacy diagnosis per iteration

mod diagnosis_provider;
mod driver_provider;
mod failure_log;
mod provider_error;
mod rationale_provider;

pub use diagnosis_provider::DiagnosisProvider;
pub use driver_provider::{DriverProvider, DriverRequest};
pub use failure_log::{FailureLog, FailureLogError};
pub use provider_error::ProviderError;
pub use rationale_provider::RationaleProvider;
