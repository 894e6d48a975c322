//! Errors shared by the external collaborator ports.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A collaborator failed to produce a usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        ProviderError::Unavailable(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        ProviderError::InvalidResponse(message.into())
    }
}

impl From<ProviderError> for DomainError {
    fn from(err: ProviderError) -> Self {
        DomainError::new(ErrorCode::ProviderError, err.to_string())
    }
}
