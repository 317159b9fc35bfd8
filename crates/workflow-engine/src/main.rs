//! Command-line runner for the workflow agency simulation.
//!
//! Loads configuration, applies command-line overrides, runs a bounded
//! simulation, and writes the per-step results table and a JSON run
//! summary.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line arguments
//! 2. Load configuration from `workflow-config.yaml` (or `--config`)
//! 3. Apply environment and command-line overrides
//! 4. Initialize structured logging (tracing)
//! 5. Configure the engine (population, traits, clock)
//! 6. Run the requested number of steps
//! 7. Export the results table and the run summary

mod error;
mod progress;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use workflow_core::config::{LogFormat, LoggingConfig, SimulationConfig};
use workflow_core::engine::SimulationEngine;
use workflow_core::runner;
use workflow_core::summary::RunSummary;

use crate::error::AppError;
use crate::progress::ProgressLogger;

/// Default configuration file, looked up in the working directory.
const DEFAULT_CONFIG_PATH: &str = "workflow-config.yaml";

/// Simulate worker agency under algorithmic management.
#[derive(Debug, Parser)]
#[command(name = "workflow-engine", version, about)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, env = "WORKFLOW_CONFIG")]
    config: Option<PathBuf>,

    /// Number of workers.
    #[arg(long)]
    workers: Option<u32>,

    /// Number of engineers.
    #[arg(long)]
    engineers: Option<u32>,

    /// Number of managers.
    #[arg(long)]
    managers: Option<u32>,

    /// Number of data scientists (may be 0).
    #[arg(long)]
    data_scientists: Option<u32>,

    /// Length of one full three-phase cycle.
    #[arg(long)]
    total_steps: Option<u64>,

    /// Number of steps to run (defaults to one full cycle).
    #[arg(long)]
    steps: Option<u64>,

    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the results table and summary.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl Cli {
    /// Overlay every flag that was given onto `config`.
    fn apply(self, config: &mut SimulationConfig) {
        if let Some(workers) = self.workers {
            config.population.workers = workers;
        }
        if let Some(engineers) = self.engineers {
            config.population.engineers = engineers;
        }
        if let Some(managers) = self.managers {
            config.population.managers = managers;
        }
        if let Some(data_scientists) = self.data_scientists {
            config.population.data_scientists = data_scientists;
        }
        if let Some(total_steps) = self.total_steps {
            config.run.total_steps = total_steps;
        }
        if let Some(steps) = self.steps {
            config.run.steps = Some(steps);
        }
        if let Some(seed) = self.seed {
            config.world.seed = seed;
        }
        if let Some(directory) = self.output_dir {
            config.output.directory = directory;
        }
    }
}

/// Application entry point for the workflow engine.
///
/// # Errors
///
/// Returns an error if configuration, the run, or export fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Parse arguments.
    let cli = Cli::parse();

    // 2-3. Load configuration and apply overrides.
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    // 4. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("workflow-engine starting");
    info!(
        world = %config.world.name,
        seed = config.world.seed,
        workers = config.population.workers,
        engineers = config.population.engineers,
        managers = config.population.managers,
        data_scientists = config.population.data_scientists,
        total_steps = config.run.total_steps,
        steps = config.steps_to_run(),
        "Configuration loaded"
    );

    // 5. Configure the engine.
    let mut engine =
        SimulationEngine::configure(config.run_parameters()).map_err(AppError::from)?;

    // 6. Run.
    let mut progress = ProgressLogger::new();
    let result = runner::run_bounded(&mut engine, config.steps_to_run(), &mut progress)
        .map_err(AppError::from)?;
    runner::log_run_end(&result);

    // 7. Export.
    let csv_path = config.output.csv_path();
    engine
        .recorder()
        .export_csv(&csv_path)
        .map_err(AppError::from)?;

    let summary_path = config.output.summary_path();
    RunSummary::capture(&config.world.name, &engine)
        .export_json(&summary_path)
        .map_err(AppError::from)?;

    info!(
        results = %csv_path.display(),
        summary = %summary_path.display(),
        "workflow-engine finished"
    );

    Ok(())
}

/// Load the simulation configuration.
///
/// An explicit path must exist. Without one, `workflow-config.yaml` in the
/// working directory is used if present, and defaults otherwise.
fn load_config(path: Option<&Path>) -> Result<SimulationConfig, AppError> {
    if let Some(path) = path {
        return Ok(SimulationConfig::from_file(path)?);
    }
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(SimulationConfig::from_file(default_path)?)
    } else {
        let mut config = SimulationConfig::default();
        config.apply_env_overrides()?;
        Ok(config)
    }
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = match logging.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| AppError::Logging {
        message: e.to_string(),
    })
}
