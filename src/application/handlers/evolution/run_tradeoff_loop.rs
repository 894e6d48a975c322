//! TradeoffLoopHandler - drives the refinement loop to termination.
//!
//! Each iteration: drivers and scenarios → evidence merge → rationale →
//! rationale merge → diagnosis → evolution controller. The structural
//! evaluation is computed once; only the enrichments differ per iteration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::controller::EvolutionController;
use crate::adapters::YamlFailureLog;
use crate::application::handlers::evaluation::{
    BatchEvaluation, EvaluateArchitecturesCommand, EvaluateArchitecturesHandler,
};
use crate::domain::analysis::{TradeoffRecord, TradeoffSynthesizer};
use crate::domain::architecture::AnalysisInput;
use crate::domain::evolution::{
    Decision, DiagnosisWarning, FailureRecord, ProblemSubject, TerminationReason,
};
use crate::config::AppConfig;
use crate::domain::foundation::{DomainError, RunId};
use crate::ports::{DiagnosisProvider, DriverProvider, DriverRequest, FailureLog, RationaleProvider};

/// Command to run the loop for one analysis input.
#[derive(Debug, Clone)]
pub struct RunTradeoffLoopCommand {
    pub run_id: RunId,
    pub input: AnalysisInput,
    /// Continue from the run's persisted failure log.
    pub resume: bool,
}

/// Result of a finished loop.
#[derive(Debug, Clone)]
pub struct TradeoffLoopResult {
    pub run_id: RunId,
    /// Iteration the loop stopped in.
    pub iterations: u32,
    pub termination: TerminationReason,
    pub evaluation: BatchEvaluation,
    /// Records of the last completed iteration, fully enriched.
    pub tradeoffs: Vec<TradeoffRecord>,
    pub failures: Vec<FailureRecord>,
    pub warnings: Vec<DiagnosisWarning>,
}

/// Handler for the trade-off refinement loop.
pub struct TradeoffLoopHandler {
    driver_provider: Arc<dyn DriverProvider>,
    rationale_provider: Arc<dyn RationaleProvider>,
    diagnosis_provider: Arc<dyn DiagnosisProvider>,
    failure_log: Arc<dyn FailureLog>,
    max_iterations: Option<u32>,
    abort: Arc<AtomicBool>,
}

impl TradeoffLoopHandler {
    pub fn new(
        driver_provider: Arc<dyn DriverProvider>,
        rationale_provider: Arc<dyn RationaleProvider>,
        diagnosis_provider: Arc<dyn DiagnosisProvider>,
        failure_log: Arc<dyn FailureLog>,
        max_iterations: Option<u32>,
    ) -> Self {
        Self {
            driver_provider,
            rationale_provider,
            diagnosis_provider,
            failure_log,
            max_iterations,
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Builds a handler persisting failures under `storage.memory_dir` and
    /// capped at `evolution.max_iterations`.
    pub fn from_config(
        config: &AppConfig,
        driver_provider: Arc<dyn DriverProvider>,
        rationale_provider: Arc<dyn RationaleProvider>,
        diagnosis_provider: Arc<dyn DiagnosisProvider>,
    ) -> Self {
        Self::new(
            driver_provider,
            rationale_provider,
            diagnosis_provider,
            Arc::new(YamlFailureLog::new(&config.storage.memory_dir)),
            config.evolution.iteration_cap(),
        )
    }

    /// Flag that, once set, aborts the loop before its next iteration.
    pub fn abort_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    pub async fn handle(&self, cmd: RunTradeoffLoopCommand) -> Result<TradeoffLoopResult, DomainError> {
        let run_id = cmd.run_id;
        let evaluation = EvaluateArchitecturesHandler::new().handle(EvaluateArchitecturesCommand {
            architectures: cmd.input.architectures.clone(),
        })?;

        let mut controller = if cmd.resume {
            EvolutionController::resume(run_id, Arc::clone(&self.failure_log), self.max_iterations)
                .await?
        } else {
            EvolutionController::new(run_id, Arc::clone(&self.failure_log), self.max_iterations)
        };

        let mut tradeoffs = Vec::new();
        let mut warnings = Vec::new();

        let termination = loop {
            if self.abort.load(Ordering::SeqCst) {
                controller.abort()?;
                break TerminationReason::Aborted;
            }

            let iteration = controller.state().iteration();
            info!(run_id = %run_id, iteration, "Starting trade-off iteration");
            let feedback = controller.feedback();

            let drivers = self
                .driver_provider
                .drivers(
                    &cmd.input,
                    DriverRequest {
                        run_id,
                        iteration,
                        driver_feedback: feedback.get(ProblemSubject::Drivers).map(str::to_string),
                        scenario_feedback: feedback
                            .get(ProblemSubject::Scenarios)
                            .map(str::to_string),
                    },
                )
                .await?;

            let mut records = evaluation.tradeoffs.clone();
            TradeoffSynthesizer::attach_evidence(&mut records, &drivers.evidence)?;

            let entries = self
                .rationale_provider
                .rationale(&records, &drivers, feedback.get(ProblemSubject::TradeoffRationale))
                .await?;
            TradeoffSynthesizer::merge_rationale(&mut records, &entries)?;
            debug!(run_id = %run_id, iteration, records = records.len(), "Merged trade-off rationale");
            let malformed = Self::malformed_statements(&records);
            for warning in &malformed {
                warn!(run_id = %run_id, iteration, %warning, "Malformed trade-off statement");
            }

            let diagnosis = self.diagnosis_provider.diagnose(&records, &drivers).await?;
            let known: Vec<u32> = records.iter().map(|r| r.id).collect();
            let outcome = controller
                .consider(&drivers.driver_names(), &diagnosis, &known)
                .await?;

            tradeoffs = records;
            warnings.extend(malformed);
            warnings.extend(outcome.warnings);

            if let Decision::Terminate(reason) = outcome.decision {
                break reason;
            }
        };

        let state = controller.state();
        Ok(TradeoffLoopResult {
            run_id,
            iterations: state.iteration(),
            termination,
            evaluation,
            tradeoffs,
            failures: state.failures().to_vec(),
            warnings,
        })
    }

    /// Statements not of the form `X vs Y`. The records keep them as given.
    fn malformed_statements(records: &[TradeoffRecord]) -> Vec<DiagnosisWarning> {
        records
            .iter()
            .filter_map(|record| {
                let statement = record.tradeoff.as_ref()?;
                (!statement.is_well_formed()).then(|| DiagnosisWarning::MalformedTradeoff {
                    tradeoff_id: record.id,
                    statement: statement.tradeoff.clone(),
                })
            })
            .collect()
    }
}
