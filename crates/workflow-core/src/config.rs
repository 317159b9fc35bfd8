//! Configuration loading and typed config structures for the workflow
//! agency simulation.
//!
//! The configuration lives in `workflow-config.yaml` next to the binary's
//! working directory. Every field has a default, so the file (and any
//! section of it) is optional. Range checks happen later, in
//! [`RunParameters::validate`], so a parsed config can still be rejected
//! before a run starts.
//!
//! [`RunParameters::validate`]: crate::engine::RunParameters::validate

use std::path::{Path, PathBuf};

use serde::Deserialize;
use workflow_agents::PopulationSizes;

use crate::engine::RunParameters;

/// Environment variable overriding `world.seed`.
pub const SEED_ENV: &str = "WORKFLOW_SEED";

/// Environment variable overriding `output.directory`.
pub const OUTPUT_DIR_ENV: &str = "WORKFLOW_OUTPUT_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {variable}")]
    InvalidOverride {
        /// Name of the environment variable.
        variable: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `workflow-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Run name and seed.
    #[serde(default)]
    pub world: WorldConfig,

    /// Population sizes.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Cycle length and number of steps.
    #[serde(default)]
    pub run: RunConfig,

    /// Where results are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `WORKFLOW_SEED` overrides `world.seed`
    /// - `WORKFLOW_OUTPUT_DIR` overrides `output.directory`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] if an override does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `WORKFLOW_SEED` and `WORKFLOW_OUTPUT_DIR` if they are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if `WORKFLOW_SEED` is not
    /// an unsigned integer.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var(SEED_ENV) {
            self.world.seed = val.trim().parse().map_err(|_err| ConfigError::InvalidOverride {
                variable: SEED_ENV,
                value: val,
            })?;
        }
        if let Ok(val) = std::env::var(OUTPUT_DIR_ENV) {
            self.output.directory = PathBuf::from(val);
        }
        Ok(())
    }

    /// Population sizes from the `population` section.
    pub const fn population_sizes(&self) -> PopulationSizes {
        PopulationSizes {
            workers: self.population.workers,
            engineers: self.population.engineers,
            managers: self.population.managers,
            data_scientists: self.population.data_scientists,
        }
    }

    /// Parameters for [`SimulationEngine::configure`].
    ///
    /// [`SimulationEngine::configure`]: crate::engine::SimulationEngine::configure
    pub const fn run_parameters(&self) -> RunParameters {
        RunParameters {
            sizes: self.population_sizes(),
            total_steps: self.run.total_steps,
            seed: self.world.seed,
        }
    }

    /// Number of `step()` calls to make: `run.steps`, or one full cycle.
    pub fn steps_to_run(&self) -> u64 {
        self.run.steps.unwrap_or(self.run.total_steps)
    }
}

/// Run name and seed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable run name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
        }
    }
}

/// Population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Number of workers.
    #[serde(default = "default_workers")]
    pub workers: u32,

    /// Number of engineers.
    #[serde(default = "default_engineers")]
    pub engineers: u32,

    /// Number of managers.
    #[serde(default = "default_managers")]
    pub managers: u32,

    /// Number of data scientists (may be 0).
    #[serde(default = "default_data_scientists")]
    pub data_scientists: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            engineers: default_engineers(),
            managers: default_managers(),
            data_scientists: default_data_scientists(),
        }
    }
}

/// Cycle length and run length.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Length of one full three-phase cycle.
    #[serde(default = "default_total_steps")]
    pub total_steps: u64,

    /// Number of steps to run; defaults to `total_steps`.
    #[serde(default)]
    pub steps: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            total_steps: default_total_steps(),
            steps: None,
        }
    }
}

/// Output locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives every output file.
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// File name of the per-step results table.
    #[serde(default = "default_csv_file")]
    pub csv_file: String,

    /// File name of the JSON run summary.
    #[serde(default = "default_summary_file")]
    pub summary_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            csv_file: default_csv_file(),
            summary_file: default_summary_file(),
        }
    }
}

impl OutputConfig {
    /// Full path of the results table.
    pub fn csv_path(&self) -> PathBuf {
        self.directory.join(&self.csv_file)
    }

    /// Full path of the run summary.
    pub fn summary_path(&self) -> PathBuf {
        self.directory.join(&self.summary_file)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) used when `RUST_LOG`
    /// is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Pretty,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Workflow Study".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_workers() -> u32 {
    20
}

const fn default_engineers() -> u32 {
    2
}

const fn default_managers() -> u32 {
    2
}

const fn default_data_scientists() -> u32 {
    1
}

const fn default_total_steps() -> u64 {
    300
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("data")
}

fn default_csv_file() -> String {
    "simulation_results.csv".to_owned()
}

fn default_summary_file() -> String {
    "simulation_summary.json".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = SimulationConfig::parse("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.population.workers, 20);
        assert_eq!(config.run.total_steps, 300);
        assert_eq!(config.steps_to_run(), 300);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "population:\n  workers: 10\nrun:\n  total_steps: 15\n";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.population.workers, 10);
        assert_eq!(config.population.engineers, 2);
        assert_eq!(config.run.total_steps, 15);
        assert_eq!(config.world.seed, 42);
    }

    #[test]
    fn full_yaml_parses() {
        let yaml = r"
world:
  name: Opaque platform
  seed: 7
population:
  workers: 50
  engineers: 3
  managers: 4
  data_scientists: 0
run:
  total_steps: 90
  steps: 270
output:
  directory: out
  csv_file: run.csv
  summary_file: run.json
logging:
  level: debug
  format: json
";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "Opaque platform");
        assert_eq!(config.steps_to_run(), 270);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.output.csv_path(), PathBuf::from("out").join("run.csv"));

        let params = config.run_parameters();
        assert_eq!(params.seed, 7);
        assert_eq!(params.total_steps, 90);
        assert_eq!(params.sizes.data_scientists, 0);
        assert_eq!(params.sizes.managers, 4);
    }

    #[test]
    fn negative_count_is_a_parse_error() {
        let yaml = "population:\n  workers: -3\n";
        assert!(matches!(
            SimulationConfig::parse(yaml),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn fractional_count_is_a_parse_error() {
        let yaml = "run:\n  total_steps: 12.5\n";
        assert!(SimulationConfig::parse(yaml).is_err());
    }

    #[test]
    fn zero_workers_parses_but_fails_validation() {
        let yaml = "population:\n  workers: 0\n";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert!(config.run_parameters().validate().is_err());
    }
}
