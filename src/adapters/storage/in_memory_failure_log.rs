//! In-Memory Failure Log Adapter
//!
//! Keeps failure records in memory, one list per run.
//! Useful for testing and single-process runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::evolution::FailureRecord;
use crate::domain::foundation::RunId;
use crate::ports::{FailureLog, FailureLogError};

/// In-memory failure log
#[derive(Debug, Clone, Default)]
pub struct InMemoryFailureLog {
    runs: Arc<RwLock<HashMap<RunId, Vec<FailureRecord>>>>,
}

impl InMemoryFailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of failures stored for a run
    pub async fn failure_count(&self, run_id: &RunId) -> usize {
        self.runs.read().await.get(run_id).map_or(0, Vec::len)
    }
}

#[async_trait]
impl FailureLog for InMemoryFailureLog {
    async fn load(&self, run_id: &RunId) -> Result<Vec<FailureRecord>, FailureLogError> {
        Ok(self.runs.read().await.get(run_id).cloned().unwrap_or_default())
    }

    async fn append(&self, run_id: &RunId, record: &FailureRecord) -> Result<(), FailureLogError> {
        self.runs
            .write()
            .await
            .entry(*run_id)
            .or_default()
            .push(record.clone());
        Ok(())
    }
}
