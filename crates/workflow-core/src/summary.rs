//! JSON summary of a finished run.
//!
//! The summary records what is needed to reproduce a run (seed, sizes,
//! cycle length, step count) alongside where it ended up.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use workflow_agents::PopulationSizes;
use workflow_types::{PhaseBand, StepRecord};

use crate::engine::SimulationEngine;
use crate::recorder::ExportError;

/// Serializable description of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Human-readable run name.
    pub name: String,
    /// Seed the run was configured with.
    pub seed: u64,
    /// Population sizes.
    pub population: PopulationSizes,
    /// Transparency sampled for the algorithmic system.
    pub transparency: f64,
    /// Cycle length.
    pub total_steps: u64,
    /// Number of steps taken.
    pub steps_run: u64,
    /// Number of completed cycles.
    pub cycles_completed: u64,
    /// Contiguous phase bands over the recorded steps.
    pub phase_bands: Vec<PhaseBand>,
    /// The last record, if any step ran.
    pub final_record: Option<StepRecord>,
}

impl RunSummary {
    /// Capture the summary of `engine`'s run so far.
    pub fn capture(name: &str, engine: &SimulationEngine) -> Self {
        let params = engine.params();
        Self {
            name: name.to_owned(),
            seed: params.seed,
            population: params.sizes,
            transparency: engine.population().transparency(),
            total_steps: params.total_steps,
            steps_run: engine.time(),
            cycles_completed: engine.cycles_completed(),
            phase_bands: engine.recorder().phase_bands(),
            final_record: engine.recorder().last().copied(),
        }
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write the summary to `path`, creating parent directories.
    pub fn export_json(&self, path: &Path) -> Result<(), ExportError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), "Run summary written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::RunParameters;

    #[test]
    fn summary_reflects_engine_state() {
        let params = RunParameters {
            sizes: PopulationSizes {
                workers: 4,
                engineers: 1,
                managers: 1,
                data_scientists: 0,
            },
            total_steps: 6,
            seed: 3,
        };
        let mut engine = SimulationEngine::configure(params).unwrap();
        for _ in 0..8 {
            engine.step().unwrap();
        }

        let summary = RunSummary::capture("test", &engine);
        assert_eq!(summary.steps_run, 8);
        assert_eq!(summary.cycles_completed, 1);
        assert_eq!(summary.final_record.map(|r| r.time), Some(7));
        // goal, production, use, then goal again in the second cycle.
        assert_eq!(summary.phase_bands.len(), 4);

        let mut buffer = Vec::new();
        summary.write_json(&mut buffer).unwrap();
        let back: RunSummary = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(back.steps_run, summary.steps_run);
        assert_eq!(back.phase_bands, summary.phase_bands);
        assert_eq!(back.population, summary.population);
    }
}
