//! Bounded run loop.
//!
//! The simulation has no terminal state; a run ends when the caller stops
//! calling `step()`. [`run_bounded`] makes that explicit: it steps the
//! engine a fixed number of times and hands every record to a
//! [`StepCallback`] as soon as it is appended.

use tracing::info;
use workflow_types::StepRecord;

use crate::engine::{EngineError, SimulationEngine};

/// Errors that can occur during a bounded run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A step failed.
    #[error("step {time} failed: {source}")]
    Step {
        /// Global time of the step that failed.
        time: u64,
        /// The underlying engine error.
        source: EngineError,
    },
}

/// Result of a bounded run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Number of steps executed by this call.
    pub steps_run: u64,
    /// Total completed cycles at the end of the run.
    pub cycles_completed: u64,
    /// The last record produced, if any step ran.
    pub final_record: Option<StepRecord>,
}

/// Callback invoked after each step completes.
pub trait StepCallback {
    /// Called with the record the step just appended.
    fn on_step(&mut self, record: &StepRecord);
}

/// A no-op step callback for testing.
pub struct NoOpCallback;

impl StepCallback for NoOpCallback {
    fn on_step(&mut self, _record: &StepRecord) {}
}

/// Step `engine` exactly `steps` times.
///
/// # Errors
///
/// Returns [`RunnerError::Step`] on the first failing step; records from
/// earlier steps stay in the engine.
pub fn run_bounded(
    engine: &mut SimulationEngine,
    steps: u64,
    callback: &mut dyn StepCallback,
) -> Result<RunResult, RunnerError> {
    info!(
        steps,
        total_steps = engine.params().total_steps,
        start_time = engine.time(),
        "Simulation starting"
    );

    let mut final_record = None;
    let mut steps_run: u64 = 0;
    while steps_run < steps {
        let time = engine.time();
        let record = engine
            .step()
            .map_err(|source| RunnerError::Step { time, source })?;
        callback.on_step(&record);
        final_record = Some(record);
        steps_run = steps_run.saturating_add(1);
    }

    Ok(RunResult {
        steps_run,
        cycles_completed: engine.cycles_completed(),
        final_record,
    })
}

/// Log the end of a run.
pub fn log_run_end(result: &RunResult) {
    info!(
        steps_run = result.steps_run,
        cycles_completed = result.cycles_completed,
        final_phase = result.final_record.as_ref().map(|r| r.phase.as_str()),
        final_agency = result.final_record.as_ref().map(|r| r.average_agency),
        final_resistance = result.final_record.as_ref().map(|r| r.average_resistance),
        "Simulation ended"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use workflow_agents::PopulationSizes;
    use workflow_types::Phase;

    use super::*;
    use crate::engine::RunParameters;

    /// Collects the phase of every record it sees.
    struct PhaseCollector(Vec<Phase>);

    impl StepCallback for PhaseCollector {
        fn on_step(&mut self, record: &StepRecord) {
            self.0.push(record.phase);
        }
    }

    fn engine() -> SimulationEngine {
        SimulationEngine::configure(RunParameters {
            sizes: PopulationSizes {
                workers: 3,
                engineers: 1,
                managers: 1,
                data_scientists: 1,
            },
            total_steps: 9,
            seed: 11,
        })
        .unwrap()
    }

    #[test]
    fn runs_exactly_the_requested_steps() {
        let mut engine = engine();
        let result = run_bounded(&mut engine, 20, &mut NoOpCallback).unwrap();
        assert_eq!(result.steps_run, 20);
        assert_eq!(result.cycles_completed, 2);
        assert_eq!(engine.records().len(), 20);
        assert_eq!(result.final_record.map(|r| r.time), Some(19));
    }

    #[test]
    fn callback_sees_every_record_in_order() {
        let mut engine = engine();
        let mut collector = PhaseCollector(Vec::new());
        run_bounded(&mut engine, 9, &mut collector).unwrap();
        let expected: Vec<Phase> = [Phase::GoalFormation; 3]
            .into_iter()
            .chain([Phase::DataProduction; 3])
            .chain([Phase::DataUse; 3])
            .collect();
        assert_eq!(collector.0, expected);
    }

    #[test]
    fn zero_steps_is_a_no_op() {
        let mut engine = engine();
        let result = run_bounded(&mut engine, 0, &mut NoOpCallback).unwrap();
        assert_eq!(result.steps_run, 0);
        assert!(result.final_record.is_none());
        assert!(engine.records().is_empty());
    }

    #[test]
    fn runs_continue_from_where_they_stopped() {
        let mut engine = engine();
        run_bounded(&mut engine, 4, &mut NoOpCallback).unwrap();
        let result = run_bounded(&mut engine, 5, &mut NoOpCallback).unwrap();
        assert_eq!(result.cycles_completed, 1);
        assert_eq!(engine.phase_step(), 0);
        assert_eq!(engine.time(), 9);
    }
}
