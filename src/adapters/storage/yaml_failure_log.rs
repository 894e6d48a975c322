//! YAML Failure Log Adapter
//!
//! Stores each run's failures as `{base_path}/{run_id}/memory.yaml`:
//!
//! ```yaml
//! previous_failures:
//!   - failure_id: 1
//!     driver_set: [performance, availability]
//!     diagnosis: { ... }
//!     recorded_at: 2026-01-01T00:00:00Z
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::evolution::FailureRecord;
use crate::domain::foundation::RunId;
use crate::ports::{FailureLog, FailureLogError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct MemoryDocument {
    #[serde(default)]
    previous_failures: Vec<FailureRecord>,
}

/// File-based failure log, one directory per run
#[derive(Debug)]
pub struct YamlFailureLog {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl YamlFailureLog {
    /// Create a log rooted at `base_path` (the configured memory directory)
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the memory file path for a run
    pub fn memory_file_path(&self, run_id: &RunId) -> PathBuf {
        self.base_path.join(run_id.to_string()).join("memory.yaml")
    }

    async fn read_document(&self, path: &Path) -> Result<MemoryDocument, FailureLogError> {
        if !path.exists() {
            return Ok(MemoryDocument::default());
        }

        let yaml = fs::read_to_string(path)
            .await
            .map_err(|e| FailureLogError::Io(format!("Failed to read file: {}", e)))?;

        // An empty file is a log with no entries yet
        if yaml.trim().is_empty() {
            return Ok(MemoryDocument::default());
        }

        serde_yaml::from_str(&yaml).map_err(|e| FailureLogError::Deserialization {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl FailureLog for YamlFailureLog {
    async fn load(&self, run_id: &RunId) -> Result<Vec<FailureRecord>, FailureLogError> {
        let path = self.memory_file_path(run_id);
        Ok(self.read_document(&path).await?.previous_failures)
    }

    async fn append(&self, run_id: &RunId, record: &FailureRecord) -> Result<(), FailureLogError> {
        let _guard = self.write_lock.lock().await;

        let path = self.memory_file_path(run_id);
        let mut document = self.read_document(&path).await?;
        document.previous_failures.push(record.clone());

        let yaml = serde_yaml::to_string(&document)
            .map_err(|e| FailureLogError::Serialization(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FailureLogError::Io(format!("Failed to create directory: {}", e)))?;
        }

        // Write through a temporary file so readers never see a partial log
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml)
            .await
            .map_err(|e| FailureLogError::Io(format!("Failed to write temporary file: {}", e)))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| FailureLogError::Io(format!("Failed to rename file: {}", e)))?;

        tracing::debug!(
            run_id = %run_id,
            failure_id = record.failure_id,
            total = document.previous_failures.len(),
            "Appended failure record"
        );
        Ok(())
    }
}
