//! Feedback text injected into the next iteration.

use super::diagnosis::ProblemSubject;
use super::workflow::{FailureRecord, WorkflowState};

/// Rendered prior-failure feedback, one text per problem subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureFeedback {
    drivers: Option<String>,
    tradeoff_rationale: Option<String>,
    scenarios: Option<String>,
}

impl FailureFeedback {
    /// Feedback for the state's current iteration.
    ///
    /// Empty on the first iteration.
    pub fn from_state(state: &WorkflowState) -> Self {
        if state.iteration() <= 1 {
            return Self::default();
        }
        Self::from_failures(state.failures())
    }

    pub fn from_failures(failures: &[FailureRecord]) -> Self {
        Self {
            drivers: Self::render(failures, ProblemSubject::Drivers),
            tradeoff_rationale: Self::render(failures, ProblemSubject::TradeoffRationale),
            scenarios: Self::render(failures, ProblemSubject::Scenarios),
        }
    }

    /// One paragraph per failure flagged for `subject`, or `None`.
    pub fn render(failures: &[FailureRecord], subject: ProblemSubject) -> Option<String> {
        let paragraphs: Vec<String> = failures
            .iter()
            .filter(|failure| failure.diagnosis.is_flagged(subject))
            .map(|failure| {
                let diagnosis = &failure.diagnosis;
                format!(
                    "Trade-off {} has issues with {}:\n{}\nPlease consider this when evaluating new trade-offs.",
                    diagnosis.tradeoff_id.as_deref().unwrap_or("UNKNOWN"),
                    subject.human_readable(),
                    diagnosis.explanation(subject),
                )
            })
            .collect();

        if paragraphs.is_empty() {
            None
        } else {
            Some(paragraphs.join("\n\n"))
        }
    }

    pub fn get(&self, subject: ProblemSubject) -> Option<&str> {
        match subject {
            ProblemSubject::Drivers => self.drivers.as_deref(),
            ProblemSubject::TradeoffRationale => self.tradeoff_rationale.as_deref(),
            ProblemSubject::Scenarios => self.scenarios.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        ProblemSubject::ALL.iter().all(|s| self.get(*s).is_none())
    }
}
