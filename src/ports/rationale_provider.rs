//! RationaleProvider port - "QA vs QA" statements for compared pairs.

use async_trait::async_trait;

use super::ProviderError;
use crate::domain::analysis::{RationaleEntry, TradeoffRecord};
use crate::domain::evolution::DriverScenarioSet;

/// Supplies one trade-off statement and rationale per compared pair.
#[async_trait]
pub trait RationaleProvider: Send + Sync {
    /// Returns entries keyed by `(arch_a, arch_b)`, one per record.
    ///
    /// `feedback` carries prior rationale failures from the second
    /// iteration on.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if the provider cannot be reached
    /// - `InvalidResponse` if its output cannot be interpreted
    async fn rationale(
        &self,
        records: &[TradeoffRecord],
        drivers: &DriverScenarioSet,
        feedback: Option<&str>,
    ) -> Result<Vec<RationaleEntry>, ProviderError>;
}
