//! DriverProvider port - quality-attribute drivers, scenarios and evidence.

use async_trait::async_trait;

use super::ProviderError;
use crate::domain::architecture::AnalysisInput;
use crate::domain::evolution::DriverScenarioSet;
use crate::domain::foundation::RunId;

/// What the driver/scenario provider is asked for in one iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverRequest {
    pub run_id: RunId,
    pub iteration: u32,
    /// Prior driver-selection failures, rendered as text.
    pub driver_feedback: Option<String>,
    /// Prior scenario failures, rendered as text.
    pub scenario_feedback: Option<String>,
}

/// Supplies drivers, scenarios and scenario-simulation evidence.
#[async_trait]
pub trait DriverProvider: Send + Sync {
    /// Produces the driver/scenario set for one iteration.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if the provider cannot be reached
    /// - `InvalidResponse` if its output cannot be interpreted
    async fn drivers(
        &self,
        input: &AnalysisInput,
        request: DriverRequest,
    ) -> Result<DriverScenarioSet, ProviderError>;
}
