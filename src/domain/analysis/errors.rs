//! Trade-off synthesis errors.

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{ArchitectureId, DomainError, ErrorCode};

/// Which one-shot enrichment a record received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enrichment {
    Evidence,
    Rationale,
}

impl fmt::Display for Enrichment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Enrichment::Evidence => write!(f, "scenario evidence"),
            Enrichment::Rationale => write!(f, "rationale"),
        }
    }
}

/// Errors raised while synthesizing trade-off records.
///
/// These abort the whole pass: a partially merged set of records
/// cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("Pareto front member {architecture_id} has no objective vector")]
    MissingObjectives { architecture_id: ArchitectureId },

    #[error("Expected rationale for {expected} compared pairs, received {actual}")]
    RationaleCountMismatch { expected: usize, actual: usize },

    #[error("Rationale supplied for {arch_a}/{arch_b}, which is not a compared pair")]
    UnknownPair {
        arch_a: ArchitectureId,
        arch_b: ArchitectureId,
    },

    #[error("Rationale supplied more than once for {arch_a}/{arch_b}")]
    DuplicateRationale {
        arch_a: ArchitectureId,
        arch_b: ArchitectureId,
    },

    #[error("Trade-off {tradeoff_id} already carries {enrichment}")]
    AlreadyEnriched {
        tradeoff_id: u32,
        enrichment: Enrichment,
    },
}

impl SynthesisError {
    /// The pair an error is attributed to, if any.
    pub fn pair(&self) -> Option<String> {
        match self {
            SynthesisError::UnknownPair { arch_a, arch_b }
            | SynthesisError::DuplicateRationale { arch_a, arch_b } => {
                Some(format!("{}/{}", arch_a, arch_b))
            }
            _ => None,
        }
    }
}

impl From<SynthesisError> for DomainError {
    fn from(err: SynthesisError) -> Self {
        let code = match &err {
            SynthesisError::MissingObjectives { .. } => ErrorCode::InternalError,
            SynthesisError::AlreadyEnriched { .. } => ErrorCode::InvalidStateTransition,
            _ => ErrorCode::RationaleMismatch,
        };
        let mut domain = DomainError::new(code, err.to_string()).with_detail("stage", "synthesis");
        if let Some(pair) = err.pair() {
            domain = domain.with_detail("pair", pair);
        }
        match err {
            SynthesisError::MissingObjectives { architecture_id } => {
                domain.with_detail("architecture_id", architecture_id.to_string())
            }
            SynthesisError::AlreadyEnriched { tradeoff_id, .. } => {
                domain.with_detail("tradeoff_id", tradeoff_id.to_string())
            }
            _ => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_mismatch_is_a_rationale_mismatch() {
        let domain: DomainError = SynthesisError::RationaleCountMismatch {
            expected: 3,
            actual: 2,
        }
        .into();
        assert_eq!(domain.code, ErrorCode::RationaleMismatch);
        assert_eq!(domain.stage(), Some("synthesis"));
        assert!(domain.message.contains("3 compared pairs"));
    }

    #[test]
    fn pair_errors_name_the_pair() {
        let domain: DomainError = SynthesisError::UnknownPair {
            arch_a: ArchitectureId::new("A").unwrap(),
            arch_b: ArchitectureId::new("Z").unwrap(),
        }
        .into();
        assert_eq!(domain.details.get("pair"), Some(&"A/Z".to_string()));
    }

    #[test]
    fn double_enrichment_names_the_record() {
        let err = SynthesisError::AlreadyEnriched {
            tradeoff_id: 2,
            enrichment: Enrichment::Rationale,
        };
        assert_eq!(err.to_string(), "Trade-off 2 already carries rationale");
        let domain: DomainError = err.into();
        assert_eq!(domain.details.get("tradeoff_id"), Some(&"2".to_string()));
    }
}
