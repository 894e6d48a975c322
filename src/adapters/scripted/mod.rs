//! Scripted collaborator adapters.

mod providers;

pub use providers::{ScriptedDiagnosisProvider, ScriptedDriverProvider, ScriptedRationaleProvider};
