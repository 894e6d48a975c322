//! Workflow state of one analysis run.
//!
//! # Transitions
//!
//! ```text
//! Running --(adequate diagnosis)--> Terminated(Converged)
//! Running --(flagged diagnosis)---> Running, iteration + 1, failure appended
//! Running --(flagged, at cap)-----> Terminated(IterationLimitReached), failure appended
//! Running --(abort)---------------> Terminated(Aborted)
//! ```

use serde::{Deserialize, Serialize};

use super::diagnosis::Diagnosis;
use super::errors::WorkflowError;
use crate::domain::foundation::{RunId, StateMachine, Timestamp};

/// Lifecycle status of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Running,
    Terminated,
}

impl StateMachine for WorkflowStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (WorkflowStatus::Running, WorkflowStatus::Terminated))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            WorkflowStatus::Running => vec![WorkflowStatus::Terminated],
            WorkflowStatus::Terminated => vec![],
        }
    }
}

/// Why a workflow stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    Converged,
    IterationLimitReached,
    Aborted,
}

/// One failed iteration, as persisted in the failure log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Iteration number the failure occurred in.
    pub failure_id: u32,
    pub driver_set: Vec<String>,
    #[serde(alias = "rationale")]
    pub diagnosis: Diagnosis,
    /// Absent in memory files written without timestamps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<Timestamp>,
}

/// Continue or stop, as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Continue,
    Terminate(TerminationReason),
}

/// Outcome of evaluating a diagnosis, not yet applied to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedTransition {
    Converge,
    Retry(FailureRecord),
    Exhaust(FailureRecord),
}

impl PlannedTransition {
    /// The failure to persist before applying, if any.
    pub fn failure(&self) -> Option<&FailureRecord> {
        match self {
            PlannedTransition::Converge => None,
            PlannedTransition::Retry(record) | PlannedTransition::Exhaust(record) => Some(record),
        }
    }

    pub fn decision(&self) -> Decision {
        match self {
            PlannedTransition::Converge => Decision::Terminate(TerminationReason::Converged),
            PlannedTransition::Retry(_) => Decision::Continue,
            PlannedTransition::Exhaust(_) => {
                Decision::Terminate(TerminationReason::IterationLimitReached)
            }
        }
    }
}

/// Iteration counter, status and failure history of one run.
///
/// # Invariants
///
/// - `iteration` starts at 1 and never decreases
/// - `failures` only grows
/// - once `Terminated`, no further transition is accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState {
    run_id: RunId,
    iteration: u32,
    status: WorkflowStatus,
    termination: Option<TerminationReason>,
    failures: Vec<FailureRecord>,
}

impl WorkflowState {
    /// A fresh run at iteration 1.
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            iteration: 1,
            status: WorkflowStatus::Running,
            termination: None,
            failures: Vec::new(),
        }
    }

    /// Resumes a run from its persisted failures.
    ///
    /// The iteration continues after the highest recorded failure.
    pub fn restore(run_id: RunId, failures: Vec<FailureRecord>) -> Self {
        let iteration = failures
            .iter()
            .map(|f| f.failure_id)
            .max()
            .map_or(1, |last| last.saturating_add(1));
        Self {
            run_id,
            iteration,
            status: WorkflowStatus::Running,
            termination: None,
            failures,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    /// The loop's continue flag.
    pub fn should_continue(&self) -> bool {
        self.status == WorkflowStatus::Running
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Decides what a diagnosis means for this state without changing it.
    ///
    /// `max_iterations` of `None` means no cap.
    ///
    /// # Errors
    ///
    /// - `AlreadyTerminated` if the workflow has stopped
    pub fn plan(
        &self,
        driver_set: &[String],
        diagnosis: &Diagnosis,
        max_iterations: Option<u32>,
    ) -> Result<PlannedTransition, WorkflowError> {
        self.ensure_running()?;

        if diagnosis.is_adequate() {
            return Ok(PlannedTransition::Converge);
        }

        let record = FailureRecord {
            failure_id: self.iteration,
            driver_set: driver_set.to_vec(),
            diagnosis: diagnosis.clone(),
            recorded_at: Some(Timestamp::now()),
        };

        match max_iterations {
            Some(max) if self.iteration >= max => Ok(PlannedTransition::Exhaust(record)),
            _ => Ok(PlannedTransition::Retry(record)),
        }
    }

    /// Applies a planned transition.
    ///
    /// # Errors
    ///
    /// - `AlreadyTerminated` if the workflow has stopped
    pub fn apply(&mut self, transition: PlannedTransition) -> Result<Decision, WorkflowError> {
        self.ensure_running()?;
        let decision = transition.decision();

        match transition {
            PlannedTransition::Converge => self.terminate(TerminationReason::Converged)?,
            PlannedTransition::Retry(record) => {
                self.failures.push(record);
                self.iteration += 1;
            }
            PlannedTransition::Exhaust(record) => {
                self.failures.push(record);
                self.terminate(TerminationReason::IterationLimitReached)?;
            }
        }

        Ok(decision)
    }

    /// Plans and applies in one step.
    pub fn advance(
        &mut self,
        driver_set: &[String],
        diagnosis: &Diagnosis,
        max_iterations: Option<u32>,
    ) -> Result<Decision, WorkflowError> {
        let transition = self.plan(driver_set, diagnosis, max_iterations)?;
        self.apply(transition)
    }

    /// Stops the workflow on the caller's request.
    pub fn abort(&mut self) -> Result<(), WorkflowError> {
        self.terminate(TerminationReason::Aborted)
    }

    fn terminate(&mut self, reason: TerminationReason) -> Result<(), WorkflowError> {
        let next = self
            .status
            .transition_to(WorkflowStatus::Terminated)
            .map_err(|_| self.already_terminated())?;
        self.status = next;
        self.termination = Some(reason);
        Ok(())
    }

    fn ensure_running(&self) -> Result<(), WorkflowError> {
        if self.status.is_terminal() {
            return Err(self.already_terminated());
        }
        Ok(())
    }

    fn already_terminated(&self) -> WorkflowError {
        WorkflowError::AlreadyTerminated {
            run_id: self.run_id,
            iteration: self.iteration,
        }
    }
}
