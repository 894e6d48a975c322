//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `document` - Analysis input loading and YAML report output
//! - `scripted` - Replaying collaborator providers for tests and dry runs
//! - `storage` - Failure log implementations (in-memory, YAML file)

pub mod document;
pub mod scripted;
pub mod storage;

pub use document::{InputLoadError, ReportError, ReportWriter, YamlInputLoader};
pub use scripted::{ScriptedDiagnosisProvider, ScriptedDriverProvider, ScriptedRationaleProvider};
pub use storage::{InMemoryFailureLog, YamlFailureLog};
