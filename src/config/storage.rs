//! Storage locations

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where failure memory and reports are written
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Root of the per-run failure logs
    #[serde(default = "default_memory_dir")]
    pub memory_dir: PathBuf,

    /// Directory for YAML reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.memory_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.memory_dir"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.output_dir"));
        }
        if self.memory_dir == self.output_dir {
            return Err(ValidationError::SharedDirectories);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            memory_dir: default_memory_dir(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_memory_dir() -> PathBuf {
    PathBuf::from("agent_memory")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("agent_outputs")
}
