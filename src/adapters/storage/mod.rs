//! Failure log adapters.
//!
//! - `InMemoryFailureLog` - For tests and single-process runs
//! - `YamlFailureLog` - Durable `memory.yaml` per run

mod in_memory_failure_log;
mod yaml_failure_log;

pub use in_memory_failure_log::InMemoryFailureLog;
pub use yaml_failure_log::YamlFailureLog;
