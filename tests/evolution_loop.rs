//! Integration tests for the trade-off refinement loop.
//!
//! These tests verify the end-to-end flow:
//! 1. The structural pass produces the records to enrich
//! 2. Scripted providers supply drivers, evidence, rationale and diagnoses
//! 3. The evolution controller logs failures and feeds them back
//! 4. The loop stops on convergence, the iteration cap or an abort
//!
//! Uses scripted providers and in-memory/YAML failure logs, so no external
//! service is involved.

use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tempfile::TempDir;

use arch_tradeoff::adapters::{
    InMemoryFailureLog, ScriptedDiagnosisProvider, ScriptedDriverProvider,
    ScriptedRationaleProvider, YamlFailureLog,
};
use arch_tradeoff::application::{RunTradeoffLoopCommand, TradeoffLoopHandler};
use arch_tradeoff::config::AppConfig;
use arch_tradeoff::domain::analysis::{RationaleEntry, ScenarioEvidence};
use arch_tradeoff::domain::architecture::{AnalysisInput, ArchitectureDescription};
use arch_tradeoff::domain::evolution::{
    Diagnosis, DiagnosisWarning, DriverScenarioSet, ProblemSubject, QualityAttributeDriver,
    TerminationReason,
};
use arch_tradeoff::domain::foundation::{ArchitectureId, ErrorCode, RunId};
use arch_tradeoff::ports::{FailureLog, ProviderError};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn id(name: &str) -> ArchitectureId {
    ArchitectureId::new(name).unwrap()
}

fn lean() -> ArchitectureDescription {
    ArchitectureDescription::builder("A")
        .component("c1", &["ui"])
        .component("c2", &["orders"])
        .component("c3", &["billing"])
        .component("c4", &["storage"])
        .connector("c1", "c2")
        .connector("c2", "c3")
        .connector("c3", "c4")
        .deployment_node("n1", &["c1", "c2", "c3", "c4"])
        .build()
        .unwrap()
}

fn replicated() -> ArchitectureDescription {
    ArchitectureDescription::builder("B")
        .component("c1", &["ui"])
        .component("c2", &["orders"])
        .component("c3", &["billing"])
        .component("c4", &["storage"])
        .connector("c1", "c2")
        .connector("c1", "c3")
        .connector("c1", "c4")
        .connector("c2", "c3")
        .connector("c2", "c4")
        .connector("c3", "c4")
        .deployment_node("n1", &["c1", "c2", "c3", "c4"])
        .deployment_node("n2", &["c1", "c2", "c3", "c4"])
        .build()
        .unwrap()
}

fn command(run_id: RunId, resume: bool) -> RunTradeoffLoopCommand {
    RunTradeoffLoopCommand {
        run_id,
        input: AnalysisInput {
            architectures: vec![lean().into(), replicated().into()],
            ..Default::default()
        },
        resume,
    }
}

fn driver_set() -> DriverScenarioSet {
    DriverScenarioSet {
        drivers: vec![
            QualityAttributeDriver::new("availability"),
            QualityAttributeDriver::new("maintainability"),
        ],
        scenarios: Vec::new(),
        evidence: ScenarioEvidence::new()
            .with(id("A"), json!({ "SC-availability-1": { "risk": "high" } }))
            .with(id("B"), json!({ "SC-availability-1": { "risk": "low" } })),
    }
}

fn drivers_flagged() -> Diagnosis {
    Diagnosis::adequate()
        .for_tradeoff("1")
        .flag(ProblemSubject::Drivers, "Security is not among the drivers.")
}

/// Handles on the scripted providers, kept for inspection after the run.
struct Harness {
    drivers: ScriptedDriverProvider,
    rationale: ScriptedRationaleProvider,
    diagnoses: ScriptedDiagnosisProvider,
}

impl Harness {
    fn new(diagnoses: ScriptedDiagnosisProvider) -> Self {
        Self {
            drivers: ScriptedDriverProvider::new().with_set(driver_set()),
            rationale: ScriptedRationaleProvider::new(),
            diagnoses,
        }
    }

    fn handler(&self, failure_log: Arc<dyn FailureLog>, max_iterations: Option<u32>) -> TradeoffLoopHandler {
        TradeoffLoopHandler::new(
            Arc::new(self.drivers.clone()),
            Arc::new(self.rationale.clone()),
            Arc::new(self.diagnoses.clone()),
            failure_log,
            max_iterations,
        )
    }
}

// =============================================================================
// Convergence
// =============================================================================

#[tokio::test]
async fn converges_after_one_flagged_iteration() {
    let harness = Harness::new(
        ScriptedDiagnosisProvider::new()
            .with_diagnosis(drivers_flagged())
            .with_diagnosis(Diagnosis::adequate()),
    );
    let log = Arc::new(InMemoryFailureLog::new());
    let run_id = RunId::new();

    let result = harness
        .handler(log.clone(), Some(10))
        .handle(command(run_id, false))
        .await
        .unwrap();

    assert_eq!(result.termination, TerminationReason::Converged);
    assert_eq!(result.iterations, 2);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].failure_id, 1);
    assert_eq!(result.failures[0].driver_set, vec!["availability", "maintainability"]);
    assert_eq!(log.failure_count(&run_id).await, 1);
    assert!(result.warnings.is_empty());

    assert_eq!(result.tradeoffs.len(), 1);
    let record = &result.tradeoffs[0];
    assert!(record.has_evidence());
    assert!(record.has_rationale());
    let evidence = record.scenario_evidence.as_ref().unwrap();
    assert_eq!(evidence[&id("A")]["SC-availability-1"]["risk"], "high");
}

#[tokio::test]
async fn driver_feedback_reaches_the_second_iteration() {
    let harness = Harness::new(
        ScriptedDiagnosisProvider::new()
            .with_diagnosis(drivers_flagged())
            .with_diagnosis(Diagnosis::adequate()),
    );

    harness
        .handler(Arc::new(InMemoryFailureLog::new()), None)
        .handle(command(RunId::new(), false))
        .await
        .unwrap();

    let requests = harness.drivers.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].iteration, 1);
    assert!(requests[0].driver_feedback.is_none());
    assert_eq!(
        requests[1].driver_feedback.as_deref(),
        Some(
            "Trade-off 1 has issues with driver selection:\n\
             Security is not among the drivers.\n\
             Please consider this when evaluating new trade-offs."
        )
    );
    assert!(requests[1].scenario_feedback.is_none());
    assert_eq!(harness.rationale.feedback_received(), vec![None, None]);
}

#[tokio::test]
async fn rationale_feedback_goes_to_the_rationale_provider() {
    let harness = Harness::new(
        ScriptedDiagnosisProvider::new()
            .with_diagnosis(
                Diagnosis::adequate()
                    .flag(ProblemSubject::TradeoffRationale, "The rationale restates the metrics."),
            )
            .with_diagnosis(Diagnosis::adequate()),
    );

    harness
        .handler(Arc::new(InMemoryFailureLog::new()), None)
        .handle(command(RunId::new(), false))
        .await
        .unwrap();

    let feedback = harness.rationale.feedback_received();
    assert_eq!(feedback.len(), 2);
    assert!(feedback[0].is_none());
    assert!(feedback[1]
        .as_deref()
        .unwrap()
        .starts_with("Trade-off UNKNOWN has issues with tradeoff rationale:"));
}

// =============================================================================
// Termination
// =============================================================================

#[tokio::test]
async fn iteration_cap_stops_a_loop_that_never_converges() {
    let harness = Harness::new(
        ScriptedDiagnosisProvider::new()
            .with_diagnosis(drivers_flagged())
            .with_diagnosis(drivers_flagged())
            .with_diagnosis(drivers_flagged()),
    );
    let log = Arc::new(InMemoryFailureLog::new());
    let run_id = RunId::new();

    let result = harness
        .handler(log.clone(), Some(2))
        .handle(command(run_id, false))
        .await
        .unwrap();

    assert_eq!(result.termination, TerminationReason::IterationLimitReached);
    assert_eq!(result.iterations, 2);
    assert_eq!(result.failures.len(), 2);
    assert_eq!(log.failure_count(&run_id).await, 2);
    assert_eq!(harness.diagnoses.call_count(), 2);
}

#[tokio::test]
async fn abort_signal_stops_before_the_next_iteration() {
    let harness = Harness::new(ScriptedDiagnosisProvider::new().with_diagnosis(drivers_flagged()));
    let handler = harness.handler(Arc::new(InMemoryFailureLog::new()), None);
    handler.abort_signal().store(true, Ordering::SeqCst);

    let result = handler.handle(command(RunId::new(), false)).await.unwrap();

    assert_eq!(result.termination, TerminationReason::Aborted);
    assert_eq!(result.iterations, 1);
    assert!(result.failures.is_empty());
    assert!(result.tradeoffs.is_empty());
    assert_eq!(harness.diagnoses.call_count(), 0);
}

#[tokio::test]
async fn unknown_tradeoff_is_reported_without_changing_the_outcome() {
    let harness = Harness::new(
        ScriptedDiagnosisProvider::new().with_diagnosis(Diagnosis::adequate().for_tradeoff("7")),
    );

    let result = harness
        .handler(Arc::new(InMemoryFailureLog::new()), None)
        .handle(command(RunId::new(), false))
        .await
        .unwrap();

    assert_eq!(result.termination, TerminationReason::Converged);
    assert_eq!(
        result.warnings,
        vec![DiagnosisWarning::UnknownTradeoff {
            tradeoff_id: "7".to_string()
        }]
    );
}

#[tokio::test]
async fn malformed_statement_is_kept_and_reported() {
    let harness = Harness {
        drivers: ScriptedDriverProvider::new().with_set(driver_set()),
        rationale: ScriptedRationaleProvider::new().with_entries(vec![RationaleEntry::new(
            id("A"),
            id("B"),
            "availability over maintainability",
            "B replicates every component.",
        )]),
        diagnoses: ScriptedDiagnosisProvider::new().with_diagnosis(Diagnosis::adequate()),
    };

    let result = harness
        .handler(Arc::new(InMemoryFailureLog::new()), None)
        .handle(command(RunId::new(), false))
        .await
        .unwrap();

    assert_eq!(result.termination, TerminationReason::Converged);
    let statement = result.tradeoffs[0].tradeoff.as_ref().unwrap();
    assert_eq!(statement.tradeoff, "availability over maintainability");
    assert_eq!(
        result.warnings,
        vec![DiagnosisWarning::MalformedTradeoff {
            tradeoff_id: 1,
            statement: "availability over maintainability".to_string(),
        }]
    );
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn handler_from_config_uses_memory_dir_and_iteration_cap() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.storage.memory_dir = temp_dir.path().join("memory");
    config.evolution.max_iterations = 1;

    let harness = Harness::new(
        ScriptedDiagnosisProvider::new()
            .with_diagnosis(drivers_flagged())
            .with_diagnosis(Diagnosis::adequate()),
    );
    let handler = TradeoffLoopHandler::from_config(
        &config,
        Arc::new(harness.drivers.clone()),
        Arc::new(harness.rationale.clone()),
        Arc::new(harness.diagnoses.clone()),
    );
    let run_id = RunId::new();

    let result = handler.handle(command(run_id, false)).await.unwrap();

    assert_eq!(result.termination, TerminationReason::IterationLimitReached);
    assert_eq!(result.iterations, 1);
    assert_eq!(harness.diagnoses.call_count(), 1);

    let memory = YamlFailureLog::new(&config.storage.memory_dir);
    assert!(memory.memory_file_path(&run_id).exists());
    assert_eq!(memory.load(&run_id).await.unwrap().len(), 1);
}

// =============================================================================
// Resume
// =============================================================================

#[tokio::test]
async fn resumed_run_continues_from_the_yaml_memory() {
    let temp_dir = TempDir::new().unwrap();
    let log = Arc::new(YamlFailureLog::new(temp_dir.path()));
    let run_id = RunId::new();

    let first = Harness::new(ScriptedDiagnosisProvider::new().with_diagnosis(drivers_flagged()));
    let result = first
        .handler(log.clone(), Some(1))
        .handle(command(run_id, false))
        .await
        .unwrap();
    assert_eq!(result.termination, TerminationReason::IterationLimitReached);
    assert!(log.memory_file_path(&run_id).exists());

    let second = Harness::new(ScriptedDiagnosisProvider::new().with_diagnosis(Diagnosis::adequate()));
    let result = second
        .handler(log.clone(), Some(10))
        .handle(command(run_id, true))
        .await
        .unwrap();

    assert_eq!(result.termination, TerminationReason::Converged);
    assert_eq!(result.iterations, 2);
    assert_eq!(result.failures.len(), 1);

    let requests = second.drivers.requests();
    assert_eq!(requests[0].iteration, 2);
    assert!(requests[0]
        .driver_feedback
        .as_deref()
        .unwrap()
        .contains("Security is not among the drivers."));
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn rationale_count_mismatch_aborts_the_pass() {
    let harness = Harness {
        drivers: ScriptedDriverProvider::new().with_set(driver_set()),
        rationale: ScriptedRationaleProvider::new().with_entries(vec![
            RationaleEntry::new(id("A"), id("B"), "availability vs maintainability", "first"),
            RationaleEntry::new(id("B"), id("A"), "availability vs maintainability", "second"),
        ]),
        diagnoses: ScriptedDiagnosisProvider::new().with_diagnosis(Diagnosis::adequate()),
    };

    let err = harness
        .handler(Arc::new(InMemoryFailureLog::new()), None)
        .handle(command(RunId::new(), false))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::RationaleMismatch);
    assert_eq!(err.stage(), Some("synthesis"));
    assert_eq!(harness.diagnoses.call_count(), 0);
}

#[tokio::test]
async fn provider_failure_is_surfaced() {
    let harness = Harness {
        drivers: ScriptedDriverProvider::new().with_error(ProviderError::unavailable("drivers offline")),
        rationale: ScriptedRationaleProvider::new(),
        diagnoses: ScriptedDiagnosisProvider::new(),
    };

    let err = harness
        .handler(Arc::new(InMemoryFailureLog::new()), None)
        .handle(command(RunId::new(), false))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ProviderError);
    assert!(harness.rationale.feedback_received().is_empty());
}
