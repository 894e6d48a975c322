//! EvolutionController - owns the workflow state of one run.
//!
//! A failure is appended to the log before the state advances. A resumed
//! controller picks up after the last logged failure.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::evolution::{
    Decision, Diagnosis, DiagnosisWarning, FailureFeedback, FailureRecord, WorkflowState,
};
use crate::domain::foundation::{DomainError, RunId};
use crate::ports::{FailureLog, FailureLogError};

/// What one diagnosis did to the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionOutcome {
    pub decision: Decision,
    /// Iteration the diagnosis was evaluated in.
    pub iteration: u32,
    pub failure: Option<FailureRecord>,
    pub warnings: Vec<DiagnosisWarning>,
}

pub struct EvolutionController {
    state: WorkflowState,
    failure_log: Arc<dyn FailureLog>,
    max_iterations: Option<u32>,
}

impl EvolutionController {
    /// Starts a fresh run. `max_iterations` of `None` means no cap.
    pub fn new(run_id: RunId, failure_log: Arc<dyn FailureLog>, max_iterations: Option<u32>) -> Self {
        Self {
            state: WorkflowState::new(run_id),
            failure_log,
            max_iterations,
        }
    }

    /// Resumes a run from its persisted failure log.
    ///
    /// # Errors
    ///
    /// Propagates failure log read errors.
    pub async fn resume(
        run_id: RunId,
        failure_log: Arc<dyn FailureLog>,
        max_iterations: Option<u32>,
    ) -> Result<Self, FailureLogError> {
        let failures = failure_log.load(&run_id).await?;
        let state = WorkflowState::restore(run_id, failures);
        info!(
            run_id = %run_id,
            iteration = state.iteration(),
            failures = state.failures().len(),
            "Resumed evolution run"
        );
        Ok(Self {
            state,
            failure_log,
            max_iterations,
        })
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Prior-failure feedback for the current iteration.
    pub fn feedback(&self) -> FailureFeedback {
        FailureFeedback::from_state(&self.state)
    }

    /// Applies one iteration's diagnosis.
    ///
    /// Consistency warnings are logged and returned; they never change the
    /// transition.
    ///
    /// # Errors
    ///
    /// - `WorkflowTerminated` if the run has already stopped
    /// - `StorageError` if the failure cannot be persisted; the state is
    ///   left unchanged
    pub async fn consider(
        &mut self,
        driver_set: &[String],
        diagnosis: &Diagnosis,
        known_tradeoffs: &[u32],
    ) -> Result<EvolutionOutcome, DomainError> {
        let run_id = self.state.run_id();
        let iteration = self.state.iteration();

        let warnings = diagnosis.check_consistency(known_tradeoffs);
        for warning in &warnings {
            warn!(run_id = %run_id, iteration, warning = %warning, "Inconsistent diagnosis");
        }

        let transition = self.state.plan(driver_set, diagnosis, self.max_iterations)?;
        let failure = transition.failure().cloned();
        if let Some(record) = &failure {
            self.failure_log.append(&run_id, record).await?;
        }
        let decision = self.state.apply(transition)?;

        match decision {
            Decision::Continue => info!(
                run_id = %run_id,
                iteration,
                flagged = ?diagnosis.flagged_subjects(),
                "Diagnosis flagged problems, requesting another iteration"
            ),
            Decision::Terminate(reason) => {
                info!(run_id = %run_id, iteration, reason = ?reason, "Evolution terminated")
            }
        }

        Ok(EvolutionOutcome {
            decision,
            iteration,
            failure,
            warnings,
        })
    }

    /// Stops the run on the caller's request.
    pub fn abort(&mut self) -> Result<(), DomainError> {
        self.state.abort()?;
        info!(run_id = %self.state.run_id(), iteration = self.state.iteration(), "Evolution aborted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryFailureLog;
    use crate::domain::evolution::{ProblemSubject, TerminationReason, WorkflowStatus};
    use crate::domain::foundation::ErrorCode;
    use async_trait::async_trait;

    fn drivers() -> Vec<String> {
        vec!["performance".to_string()]
    }

    fn drivers_problem() -> Diagnosis {
        Diagnosis::adequate()
            .for_tradeoff("1")
            .flag(ProblemSubject::Drivers, "Latency is not a driver")
    }

    #[tokio::test]
    async fn drivers_problem_persists_one_failure_and_advances() {
        let log = Arc::new(InMemoryFailureLog::new());
        let run_id = RunId::new();
        let mut controller = EvolutionController::new(run_id, log.clone(), None);

        let outcome = controller.consider(&drivers(), &drivers_problem(), &[1]).await.unwrap();

        assert_eq!(outcome.decision, Decision::Continue);
        assert_eq!(outcome.iteration, 1);
        assert_eq!(controller.state().iteration(), 2);
        assert_eq!(controller.state().status(), WorkflowStatus::Running);
        assert_eq!(log.failure_count(&run_id).await, 1);
        let stored = log.load(&run_id).await.unwrap();
        assert_eq!(stored[0].diagnosis, drivers_problem());
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn adequate_diagnosis_terminates_without_logging() {
        let log = Arc::new(InMemoryFailureLog::new());
        let run_id = RunId::new();
        let mut controller = EvolutionController::new(run_id, log.clone(), None);

        let outcome = controller.consider(&drivers(), &Diagnosis::adequate(), &[]).await.unwrap();

        assert_eq!(outcome.decision, Decision::Terminate(TerminationReason::Converged));
        assert!(outcome.failure.is_none());
        assert_eq!(log.failure_count(&run_id).await, 0);
    }

    #[tokio::test]
    async fn warnings_do_not_change_the_transition() {
        let log = Arc::new(InMemoryFailureLog::new());
        let mut controller = EvolutionController::new(RunId::new(), log, None);
        let diagnosis = Diagnosis::adequate()
            .for_tradeoff("9")
            .flag(ProblemSubject::Scenarios, "");

        let outcome = controller.consider(&drivers(), &diagnosis, &[1]).await.unwrap();

        assert_eq!(outcome.decision, Decision::Continue);
        assert_eq!(outcome.warnings.len(), 2);
    }

    #[tokio::test]
    async fn resume_continues_after_logged_failures() {
        let log = Arc::new(InMemoryFailureLog::new());
        let run_id = RunId::new();
        {
            let mut first = EvolutionController::new(run_id, log.clone(), None);
            first.consider(&drivers(), &drivers_problem(), &[1]).await.unwrap();
            first.consider(&drivers(), &drivers_problem(), &[1]).await.unwrap();
        }

        let resumed = EvolutionController::resume(run_id, log, None).await.unwrap();

        assert_eq!(resumed.state().iteration(), 3);
        assert!(resumed
            .feedback()
            .get(ProblemSubject::Drivers)
            .unwrap()
            .contains("Latency is not a driver"));
    }

    #[tokio::test]
    async fn terminated_controller_rejects_diagnoses() {
        let log = Arc::new(InMemoryFailureLog::new());
        let mut controller = EvolutionController::new(RunId::new(), log, None);
        controller.abort().unwrap();

        let err = controller.consider(&drivers(), &drivers_problem(), &[1]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::WorkflowTerminated);
        assert_eq!(err.stage(), Some("evolution"));
    }

    struct BrokenLog;

    #[async_trait]
    impl FailureLog for BrokenLog {
        async fn load(&self, _run_id: &RunId) -> Result<Vec<FailureRecord>, FailureLogError> {
            Ok(Vec::new())
        }

        async fn append(&self, _run_id: &RunId, _record: &FailureRecord) -> Result<(), FailureLogError> {
            Err(FailureLogError::Io("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn storage_failure_leaves_state_unchanged() {
        let mut controller = EvolutionController::new(RunId::new(), Arc::new(BrokenLog), None);

        let err = controller.consider(&drivers(), &drivers_problem(), &[1]).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(controller.state().iteration(), 1);
        assert!(controller.state().failures().is_empty());
    }
}
