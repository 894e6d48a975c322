//! Graph construction errors.

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{ArchitectureId, ComponentId, DomainError, ErrorCode};

/// Which end of a connector failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

/// Errors raised while building a component graph.
///
/// Any of these is fatal for the architecture concerned; sibling
/// architectures in the same batch are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Architecture {architecture_id}: connector #{connector_index} {endpoint} references unknown component '{component_id}'")]
    UnknownComponent {
        architecture_id: ArchitectureId,
        connector_index: usize,
        endpoint: Endpoint,
        component_id: ComponentId,
    },

    #[error("Architecture {architecture_id}: component '{component_id}' is declared more than once")]
    DuplicateComponent {
        architecture_id: ArchitectureId,
        component_id: ComponentId,
    },

    #[error("Architecture {architecture_id} appears more than once in the batch")]
    DuplicateArchitecture { architecture_id: ArchitectureId },
}

impl GraphError {
    /// Returns the architecture the error is attributed to.
    pub fn architecture_id(&self) -> &ArchitectureId {
        match self {
            GraphError::UnknownComponent { architecture_id, .. }
            | GraphError::DuplicateComponent { architecture_id, .. }
            | GraphError::DuplicateArchitecture { architecture_id } => architecture_id,
        }
    }
}

impl From<GraphError> for DomainError {
    fn from(err: GraphError) -> Self {
        let code = match &err {
            GraphError::UnknownComponent { .. } => ErrorCode::UnknownComponent,
            GraphError::DuplicateComponent { .. } => ErrorCode::DuplicateComponent,
            GraphError::DuplicateArchitecture { .. } => ErrorCode::DuplicateArchitecture,
        };
        let architecture_id = err.architecture_id().to_string();
        DomainError::new(code, err.to_string())
            .with_detail("stage", "graph")
            .with_detail("architecture_id", architecture_id)
    }
}

/// An `architectures` entry that does not read as a description.
///
/// `architecture_id` falls back to the entry's position when the entry has
/// no readable id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Architecture {architecture_id} could not be read: {message}")]
pub struct UnreadableArchitecture {
    pub architecture_id: ArchitectureId,
    pub message: String,
}

impl From<UnreadableArchitecture> for DomainError {
    fn from(err: UnreadableArchitecture) -> Self {
        let architecture_id = err.architecture_id.to_string();
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
            .with_detail("stage", "input")
            .with_detail("architecture_id", architecture_id)
    }
}
