//! The simulation engine: population, shared state, and `step()`.
//!
//! Each call to [`SimulationEngine::step`] runs these stages in order:
//!
//! 1. **Phase** -- read the phase for the current `phase_step` and work
//!    out the next clock state (fails here, before any mutation, if a
//!    counter would overflow).
//! 2. **Agents** -- step every agent in creation order. Broadcast effects
//!    from the algorithmic system are applied to the workers immediately,
//!    before the next agent steps.
//! 3. **Aggregate** -- average worker resistance, agency and data quality.
//! 4. **Record** -- append a [`StepRecord`].
//! 5. **Advance** -- commit the next clock state; on a cycle wrap reset
//!    the shared accumulators.
//!
//! The run is single-threaded and deterministic given the seed.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use workflow_agents::{AgentPopulation, PopulationSizes, StepContext, TraitConfig};
use workflow_types::{Phase, SharedMetrics, StepRecord};

use crate::metrics::{self, EmptyPopulation};
use crate::phase::{CycleTransition, PhaseClock, PhaseError};
use crate::recorder::MetricRecorder;

/// Errors that can occur while configuring or stepping the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No workers: averages are undefined.
    #[error("{source}")]
    EmptyPopulation {
        /// The underlying aggregation error.
        #[from]
        source: EmptyPopulation,
    },

    /// A run parameter is out of range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A phase clock operation failed.
    #[error("phase error: {source}")]
    Phase {
        /// The underlying clock error.
        #[from]
        source: PhaseError,
    },

    /// Building the population failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: workflow_agents::AgentError,
    },
}

/// Everything needed to configure a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Population sizes.
    pub sizes: PopulationSizes,
    /// Length of one full three-phase cycle.
    pub total_steps: u64,
    /// Seed for every random draw in the run.
    pub seed: u64,
}

impl RunParameters {
    /// Reject parameters that must never reach the step loop.
    ///
    /// Workers, engineers and managers must be at least 1, as must
    /// `total_steps`. Data scientists may be 0.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyPopulation`] for zero workers and
    /// [`EngineError::InvalidParameter`] for the other zero values.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.sizes.workers == 0 {
            return Err(EmptyPopulation.into());
        }
        if self.sizes.engineers == 0 {
            return Err(EngineError::InvalidParameter {
                name: "engineers",
                reason: "at least one engineer is required".to_owned(),
            });
        }
        if self.sizes.managers == 0 {
            return Err(EngineError::InvalidParameter {
                name: "managers",
                reason: "at least one manager is required".to_owned(),
            });
        }
        if self.total_steps == 0 {
            return Err(EngineError::InvalidParameter {
                name: "total_steps",
                reason: "must be a positive number of steps".to_owned(),
            });
        }
        Ok(())
    }
}

/// Owns the population, the shared accumulators, the clock, the random
/// source, and the record sequence for one run.
#[derive(Debug)]
pub struct SimulationEngine {
    params: RunParameters,
    clock: PhaseClock,
    population: AgentPopulation,
    shared: SharedMetrics,
    traits: TraitConfig,
    rng: StdRng,
    recorder: MetricRecorder,
}

impl SimulationEngine {
    /// Configure a run with the default trait ranges.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are rejected by
    /// [`RunParameters::validate`].
    pub fn configure(params: RunParameters) -> Result<Self, EngineError> {
        Self::with_traits(params, TraitConfig::default())
    }

    /// Configure a run with custom trait ranges.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or a trait range is
    /// malformed.
    pub fn with_traits(params: RunParameters, traits: TraitConfig) -> Result<Self, EngineError> {
        params.validate()?;
        let clock = PhaseClock::new(params.total_steps)?;
        let mut rng = StdRng::seed_from_u64(params.seed);
        let population = AgentPopulation::spawn(params.sizes, &traits, &mut rng)?;

        info!(
            workers = params.sizes.workers,
            engineers = params.sizes.engineers,
            managers = params.sizes.managers,
            data_scientists = params.sizes.data_scientists,
            total_steps = params.total_steps,
            seed = params.seed,
            transparency = population.transparency(),
            "Simulation configured"
        );

        Ok(Self {
            params,
            clock,
            population,
            shared: SharedMetrics::default(),
            traits,
            rng,
            recorder: MetricRecorder::new(),
        })
    }

    /// Run one step and return the record it appended.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Phase`] if a counter would overflow and
    /// [`EngineError::EmptyPopulation`] if there are no workers to
    /// average. In both cases no record is appended and the counters are
    /// unchanged.
    pub fn step(&mut self) -> Result<StepRecord, EngineError> {
        let (next_clock, transition) = self.clock.next_state()?;
        let phase = self.clock.phase();
        let time = self.clock.time();

        let ctx = StepContext {
            phase,
            transparency: self.population.transparency(),
            traits: &self.traits,
        };
        for index in 0..self.population.len() {
            let effect = match self.population.get_mut(index) {
                Some(agent) => agent.step(&ctx, &mut self.shared, &mut self.rng),
                None => None,
            };
            if let Some(effect) = effect {
                self.population.apply_broadcast(effect);
            }
        }

        let means = metrics::worker_means(self.population.workers())?;
        let record = StepRecord {
            time,
            phase,
            knowledge_centralization: self.shared.knowledge_centralization,
            system_influence: self.shared.system_influence,
            average_resistance: means.resistance,
            average_agency: means.agency,
            average_data_quality: means.data_quality,
            data_quality_modifier: self.shared.data_quality_modifier,
        };
        self.recorder.push(record);
        debug!(time, %phase, agency = means.agency, resistance = means.resistance, "Step recorded");

        self.clock = next_clock;
        if let CycleTransition::Wrapped { cycle } = transition {
            self.shared.reset();
            info!(time = self.clock.time(), cycle, "Cycle completed, shared accumulators reset");
        }

        Ok(record)
    }

    /// Phase that the next step will run in.
    pub const fn phase(&self) -> Phase {
        self.clock.phase()
    }

    /// Position inside the current cycle.
    pub const fn phase_step(&self) -> u64 {
        self.clock.phase_step()
    }

    /// Number of steps taken so far.
    pub const fn time(&self) -> u64 {
        self.clock.time()
    }

    /// Number of completed cycles.
    pub const fn cycles_completed(&self) -> u64 {
        self.clock.cycles_completed()
    }

    /// The phase clock.
    pub const fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    /// Current shared accumulators.
    pub const fn shared(&self) -> &SharedMetrics {
        &self.shared
    }

    /// The agent population.
    pub const fn population(&self) -> &AgentPopulation {
        &self.population
    }

    /// The parameters the run was configured with.
    pub const fn params(&self) -> &RunParameters {
        &self.params
    }

    /// The record sequence.
    pub const fn recorder(&self) -> &MetricRecorder {
        &self.recorder
    }

    /// All records in ascending time.
    pub fn records(&self) -> &[StepRecord] {
        self.recorder.records()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use workflow_agents::TraitRange;

    use super::*;

    fn params(workers: u32, total_steps: u64) -> RunParameters {
        RunParameters {
            sizes: PopulationSizes {
                workers,
                engineers: 2,
                managers: 2,
                data_scientists: 1,
            },
            total_steps,
            seed: 42,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn configure_starts_at_zero() {
        let engine = SimulationEngine::configure(params(5, 30)).unwrap();
        assert_eq!(engine.time(), 0);
        assert_eq!(engine.phase_step(), 0);
        assert_eq!(engine.phase(), Phase::GoalFormation);
        assert!(engine.shared().is_zero());
        assert!(engine.records().is_empty());
    }

    #[test]
    fn zero_workers_is_empty_population() {
        let result = SimulationEngine::configure(params(0, 30));
        assert!(matches!(result, Err(EngineError::EmptyPopulation { .. })));
    }

    #[test]
    fn zero_total_steps_is_rejected() {
        let result = SimulationEngine::configure(params(5, 0));
        assert!(matches!(
            result,
            Err(EngineError::InvalidParameter {
                name: "total_steps",
                ..
            })
        ));
    }

    #[test]
    fn zero_managers_is_rejected() {
        let mut p = params(5, 30);
        p.sizes.managers = 0;
        assert!(matches!(
            SimulationEngine::configure(p),
            Err(EngineError::InvalidParameter {
                name: "managers",
                ..
            })
        ));
    }

    #[test]
    fn out_of_unit_trait_range_is_rejected() {
        let traits = TraitConfig {
            worker_participation: TraitRange::new(-f64::MAX, f64::MAX),
            ..TraitConfig::default()
        };
        let result = SimulationEngine::with_traits(params(5, 30), traits);
        assert!(matches!(result, Err(EngineError::Agent { .. })));
    }

    #[test]
    fn step_appends_one_record_and_advances() {
        let mut engine = SimulationEngine::configure(params(5, 30)).unwrap();
        let record = engine.step().unwrap();
        assert_eq!(record.time, 0);
        assert_eq!(record.phase, Phase::GoalFormation);
        assert_eq!(engine.records().len(), 1);
        assert_eq!(engine.time(), 1);
        assert_eq!(engine.phase_step(), 1);
    }

    /// Traits pinned so every increment is known in advance.
    fn pinned_traits(transparency: f64) -> TraitConfig {
        TraitConfig {
            worker_participation: TraitRange::fixed(0.9),
            high_data_quality: TraitRange::fixed(0.8),
            low_data_quality: TraitRange::fixed(0.3),
            engineer_knowledge: TraitRange::fixed(0.6),
            engineer_data_sensitivity: TraitRange::fixed(0.4),
            manager_control_preference: TraitRange::fixed(1.0),
            manager_feedback_acceptance: TraitRange::fixed(0.5),
            system_transparency: TraitRange::fixed(transparency),
            data_scientist_rigor: TraitRange::fixed(0.5),
        }
    }

    fn single_core(total_steps: u64) -> RunParameters {
        RunParameters {
            sizes: PopulationSizes {
                workers: 2,
                engineers: 1,
                managers: 1,
                data_scientists: 1,
            },
            total_steps,
            seed: 7,
        }
    }

    #[test]
    fn pinned_run_matches_hand_computed_values() {
        // total_steps 3: one step per phase.
        let mut engine =
            SimulationEngine::with_traits(single_core(3), pinned_traits(0.3)).unwrap();

        // Goal formation: manager adds 1.0 * 0.1; engineer learns; workers +1.
        let gf = engine.step().unwrap();
        assert_eq!(gf.phase, Phase::GoalFormation);
        assert!(close(gf.knowledge_centralization, 0.1));
        assert!(close(gf.average_agency, 1.0));

        // Data production: engineer 0.4 * 0.05, scientist 0.5 * 0.05.
        let dp = engine.step().unwrap();
        assert_eq!(dp.phase, Phase::DataProduction);
        assert!(close(dp.data_quality_modifier, 0.045));
        assert!(close(dp.average_data_quality, 0.8));
        assert!(close(dp.average_agency, 1.5));

        // Data use with an opaque system: manager +0.1, engineer 0.65 * 0.05,
        // scientist 0.5 * 0.02, system (1 - 0.3) * 0.1 and suppression.
        let du = engine.step().unwrap();
        assert_eq!(du.phase, Phase::DataUse);
        assert!(close(du.knowledge_centralization, 0.1 + 0.1 + 0.65 * 0.05));
        assert!(close(du.system_influence, 0.07));
        assert!(close(du.data_quality_modifier, 0.055));
        assert!(close(du.average_agency, 1.3));
        assert!(close(du.average_resistance, 0.5));

        // Cycle wrapped: counters and accumulators are back to zero.
        assert_eq!(engine.phase_step(), 0);
        assert!(engine.shared().is_zero());
        assert_eq!(engine.cycles_completed(), 1);
    }

    #[test]
    fn transparent_system_leaves_agency_alone() {
        let mut engine =
            SimulationEngine::with_traits(single_core(3), pinned_traits(0.7)).unwrap();
        let _ = engine.step().unwrap();
        let _ = engine.step().unwrap();
        let du = engine.step().unwrap();
        // 1.0 + 0.5 + 0.2, no suppression.
        assert!(close(du.average_agency, 1.7));
        assert!(close(du.average_resistance, 0.0));
        assert!(close(du.system_influence, 0.03));
    }

    #[test]
    fn one_pass_accumulates_every_contribution() {
        // A one-step cycle is all data use. The manager steps before the
        // engineer and both write knowledge centralization in the same pass.
        let mut engine =
            SimulationEngine::with_traits(single_core(1), pinned_traits(0.7)).unwrap();
        let record = engine.step().unwrap();
        assert_eq!(record.phase, Phase::DataUse);
        // manager 0.05 * (1 - 0.5) + engineer 0.6 * 0.05
        assert!(close(record.knowledge_centralization, 0.025 + 0.03));
    }
}
