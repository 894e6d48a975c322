//! Evolution workflow errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, RunId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Run {run_id} already terminated at iteration {iteration}")]
    AlreadyTerminated { run_id: RunId, iteration: u32 },
}

impl From<WorkflowError> for DomainError {
    fn from(err: WorkflowError) -> Self {
        match &err {
            WorkflowError::AlreadyTerminated { run_id, iteration } => {
                DomainError::new(ErrorCode::WorkflowTerminated, err.to_string())
                    .with_detail("stage", "evolution")
                    .with_detail("run_id", run_id.to_string())
                    .with_detail("iteration", iteration.to_string())
            }
        }
    }
}
