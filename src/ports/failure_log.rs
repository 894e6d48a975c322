//! FailureLog port - append-only persistence of failed iterations.
//!
//! Each run owns its own log; logs are never shared between runs.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::evolution::FailureRecord;
use crate::domain::foundation::{DomainError, ErrorCode, RunId};

/// Errors that can occur while reading or writing a failure log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureLogError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize failure log: {0}")]
    Serialization(String),

    #[error("Failed to read failure log {path}: {message}")]
    Deserialization { path: String, message: String },
}

impl From<FailureLogError> for DomainError {
    fn from(err: FailureLogError) -> Self {
        DomainError::new(ErrorCode::StorageError, err.to_string()).with_detail("stage", "evolution")
    }
}

/// Append-only store of failure records, keyed by run.
#[async_trait]
pub trait FailureLog: Send + Sync {
    /// Loads every failure recorded for a run, oldest first.
    ///
    /// A run with no log yet yields an empty list.
    ///
    /// # Errors
    ///
    /// - `Io` if the backing store cannot be read
    /// - `Deserialization` if stored content is malformed
    async fn load(&self, run_id: &RunId) -> Result<Vec<FailureRecord>, FailureLogError>;

    /// Appends one failure; existing entries are never rewritten.
    ///
    /// # Errors
    ///
    /// - `Io` if the backing store cannot be written
    /// - `Serialization` if the record cannot be encoded
    async fn append(&self, run_id: &RunId, record: &FailureRecord) -> Result<(), FailureLogError>;
}
