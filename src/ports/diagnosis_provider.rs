//! DiagnosisProvider port - adequacy verdict on an iteration.

use async_trait::async_trait;

use super::ProviderError;
use crate::domain::analysis::TradeoffRecord;
use crate::domain::evolution::{Diagnosis, DriverScenarioSet};

/// Judges whether the dominant trade-off of an iteration is adequate.
#[async_trait]
pub trait DiagnosisProvider: Send + Sync {
    /// # Errors
    ///
    /// - `Unavailable` if the provider cannot be reached
    /// - `InvalidResponse` if its output cannot be interpreted
    async fn diagnose(
        &self,
        records: &[TradeoffRecord],
        drivers: &DriverScenarioSet,
    ) -> Result<Diagnosis, ProviderError>;
}
