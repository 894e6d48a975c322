//! arch-tradeoff - structural evaluation of candidate architectures
//!
//! Loads an analysis input document, runs one evaluation pass and writes the
//! metric, comparison and trade-off reports into the output directory.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arch_tradeoff::adapters::{ReportWriter, YamlInputLoader};
use arch_tradeoff::application::{EvaluateArchitecturesCommand, EvaluateArchitecturesHandler};
use arch_tradeoff::config::{AppConfig, LoggingConfig};

/// arch-tradeoff CLI
#[derive(Parser)]
#[command(name = "arch-tradeoff")]
#[command(about = "Structural metrics, Pareto front and trade-offs for candidate architectures", long_about = None)]
#[command(version)]
struct Cli {
    /// Analysis input document (YAML)
    input: PathBuf,

    /// Configuration file path
    #[arg(short, long, env = "ARCH_TRADEOFF_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides `storage.output_dir`
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(cli.config.as_deref())?;
    if let Some(output_dir) = cli.output_dir {
        config.storage.output_dir = output_dir;
    }
    config.validate()?;

    init_tracing(&config.logging);

    let input = YamlInputLoader::load(&cli.input).await?;
    info!(
        input = %cli.input.display(),
        architectures = input.architectures.len(),
        "Loaded analysis input"
    );

    let batch = EvaluateArchitecturesHandler::new().handle(EvaluateArchitecturesCommand {
        architectures: input.architectures,
    })?;

    let writer = ReportWriter::new(&config.storage.output_dir);
    writer
        .write("metric_evaluations.yaml", &batch.metric_report())
        .await?;
    writer
        .write("multi_objective_comparison.yaml", &batch.comparison_report())
        .await?;
    writer
        .write("tradeoff_analysis.yaml", &batch.tradeoffs)
        .await?;

    println!(
        "Evaluated {} architecture(s), {} rejected",
        batch.evaluations.len(),
        batch.rejected.len()
    );
    for rejected in &batch.rejected {
        println!("  rejected {}: {}", rejected.architecture_id, rejected.error);
    }

    let front: Vec<&str> = batch.pareto.pareto_front.iter().map(|id| id.as_str()).collect();
    println!("Pareto front: [{}]", front.join(", "));
    for dominated in batch.pareto.dominated() {
        println!("  dominated: {}", dominated);
    }
    println!("Trade-offs: {}", batch.tradeoffs.len());
    println!("Reports written to {}", writer.output_dir().display());

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = logging.env_filter();

    if logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
