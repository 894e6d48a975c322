//! Scripted collaborator providers for testing.
//!
//! Each provider replays pre-configured responses in order and records
//! what it was asked, so tests can drive the trade-off loop without any
//! external service.
//!
//! # Example
//!
//! ```ignore
//! let diagnoses = ScriptedDiagnosisProvider::new()
//!     .with_diagnosis(Diagnosis::adequate().flag(ProblemSubject::Drivers, "missing cost"))
//!     .with_diagnosis(Diagnosis::adequate());
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::analysis::{QualityAttribute, RationaleEntry, TradeoffRecord};
use crate::domain::architecture::AnalysisInput;
use crate::domain::evolution::{Diagnosis, DriverScenarioSet};
use crate::ports::{DiagnosisProvider, DriverProvider, DriverRequest, ProviderError, RationaleProvider};

type Script<T> = Arc<Mutex<VecDeque<Result<T, ProviderError>>>>;

/// Locks a script or log, recovering the data if a holder panicked.
fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn next_response<T: Clone>(script: &Mutex<VecDeque<Result<T, ProviderError>>>, repeat_last: bool) -> Result<T, ProviderError> {
    let mut queue = guard(script);
    if repeat_last && queue.len() == 1 {
        return queue
            .front()
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::unavailable("no scripted response left")));
    }
    queue
        .pop_front()
        .unwrap_or_else(|| Err(ProviderError::unavailable("no scripted response left")))
}

// ─────────────────────────────────────────────────────────────────────────────
// Drivers
// ─────────────────────────────────────────────────────────────────────────────

/// Replays driver/scenario sets; the last one is reused once the queue runs dry.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDriverProvider {
    responses: Script<DriverScenarioSet>,
    requests: Arc<Mutex<Vec<DriverRequest>>>,
}

impl ScriptedDriverProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_set(self, set: DriverScenarioSet) -> Self {
        self.push(Ok(set))
    }

    pub fn with_error(self, error: ProviderError) -> Self {
        self.push(Err(error))
    }

    fn push(self, response: Result<DriverScenarioSet, ProviderError>) -> Self {
        guard(&self.responses).push_back(response);
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<DriverRequest> {
        guard(&self.requests).clone()
    }
}

#[async_trait]
impl DriverProvider for ScriptedDriverProvider {
    async fn drivers(
        &self,
        _input: &AnalysisInput,
        request: DriverRequest,
    ) -> Result<DriverScenarioSet, ProviderError> {
        guard(&self.requests).push(request);
        next_response(&self.responses, true)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rationale
// ─────────────────────────────────────────────────────────────────────────────

/// Replays rationale lists, or derives one entry per record when none is queued.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRationaleProvider {
    responses: Script<Vec<RationaleEntry>>,
    feedback: Arc<Mutex<Vec<Option<String>>>>,
}

impl ScriptedRationaleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(self, entries: Vec<RationaleEntry>) -> Self {
        self.push(Ok(entries))
    }

    pub fn with_error(self, error: ProviderError) -> Self {
        self.push(Err(error))
    }

    fn push(self, response: Result<Vec<RationaleEntry>, ProviderError>) -> Self {
        guard(&self.responses).push_back(response);
        self
    }

    /// Feedback received on each call.
    pub fn feedback_received(&self) -> Vec<Option<String>> {
        guard(&self.feedback).clone()
    }

    /// Names each record after the first attribute favoring either side.
    fn derive(records: &[TradeoffRecord]) -> Vec<RationaleEntry> {
        let first = |attributes: &std::collections::BTreeSet<QualityAttribute>| {
            attributes
                .iter()
                .next()
                .map_or_else(|| "none".to_string(), |a| a.to_string())
        };
        records
            .iter()
            .map(|record| {
                RationaleEntry::new(
                    record.arch_a.clone(),
                    record.arch_b.clone(),
                    format!(
                        "{} vs {}",
                        first(&record.pro_a_attributes),
                        first(&record.pro_b_attributes)
                    ),
                    format!("{} and {} favor different qualities", record.arch_a, record.arch_b),
                )
            })
            .collect()
    }
}

#[async_trait]
impl RationaleProvider for ScriptedRationaleProvider {
    async fn rationale(
        &self,
        records: &[TradeoffRecord],
        _drivers: &DriverScenarioSet,
        feedback: Option<&str>,
    ) -> Result<Vec<RationaleEntry>, ProviderError> {
        guard(&self.feedback).push(feedback.map(str::to_string));
        let queued = guard(&self.responses).pop_front();
        match queued {
            Some(response) => response,
            None => Ok(Self::derive(records)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Diagnosis
// ─────────────────────────────────────────────────────────────────────────────

/// Replays diagnoses in order; fails once the queue is empty.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDiagnosisProvider {
    responses: Script<Diagnosis>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedDiagnosisProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagnosis(self, diagnosis: Diagnosis) -> Self {
        self.push(Ok(diagnosis))
    }

    pub fn with_error(self, error: ProviderError) -> Self {
        self.push(Err(error))
    }

    fn push(self, response: Result<Diagnosis, ProviderError>) -> Self {
        guard(&self.responses).push_back(response);
        self
    }

    pub fn call_count(&self) -> usize {
        *guard(&self.calls)
    }
}

#[async_trait]
impl DiagnosisProvider for ScriptedDiagnosisProvider {
    async fn diagnose(
        &self,
        _records: &[TradeoffRecord],
        _drivers: &DriverScenarioSet,
    ) -> Result<Diagnosis, ProviderError> {
        *guard(&self.calls) += 1;
        next_response(&self.responses, false)
    }
}
