//! Worker behavior rules.
//!
//! Workers carry the three per-agent accumulators the study is about:
//! agency, resistance, and the quality of the data they produce. Their
//! single trait, participation, decides which way each phase pushes them.
//!
//! | Phase | Condition | Effect |
//! |---|---|---|
//! | goal formation | participation > 0.7 | agency + 1 |
//! | data production | participation > 0.5 | quality ~ high range, agency + 0.5 |
//! | data production | otherwise | quality ~ low range, resistance + 1 |
//! | data use | transparency > 0.5 | agency + 0.2 |
//! | data use | otherwise | resistance + 0.5 |

use rand::Rng;
use serde::{Deserialize, Serialize};
use workflow_types::{AgentId, Phase};

use crate::config::TraitConfig;
use crate::context::StepContext;

/// Participation above which a worker shapes goals.
const GOAL_PARTICIPATION_THRESHOLD: f64 = 0.7;

/// Participation above which a worker produces high-quality data.
const DATA_PARTICIPATION_THRESHOLD: f64 = 0.5;

/// Transparency above which data use feels fair to workers.
const TRANSPARENCY_THRESHOLD: f64 = 0.5;

const GOAL_AGENCY_GAIN: f64 = 1.0;
const PRODUCTION_AGENCY_GAIN: f64 = 0.5;
const PRODUCTION_RESISTANCE_GAIN: f64 = 1.0;
const USE_AGENCY_GAIN: f64 = 0.2;
const USE_RESISTANCE_GAIN: f64 = 0.5;

/// A front-line worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    id: AgentId,
    participation: f64,
    agency_score: f64,
    resistance: f64,
    data_quality: f64,
}

impl Worker {
    /// Create a worker with sampled participation and zeroed accumulators.
    pub fn spawn(id: AgentId, traits: &TraitConfig, rng: &mut impl Rng) -> Self {
        Self {
            id,
            participation: traits.worker_participation.sample(rng),
            agency_score: 0.0,
            resistance: 0.0,
            data_quality: 0.0,
        }
    }

    /// Apply this worker's rule for the current phase.
    pub fn step(&mut self, ctx: &StepContext<'_>, rng: &mut impl Rng) {
        match ctx.phase {
            Phase::GoalFormation => {
                if self.participation > GOAL_PARTICIPATION_THRESHOLD {
                    self.agency_score += GOAL_AGENCY_GAIN;
                }
            }
            Phase::DataProduction => {
                if self.participation > DATA_PARTICIPATION_THRESHOLD {
                    self.data_quality = ctx.traits.high_data_quality.sample(rng);
                    self.agency_score += PRODUCTION_AGENCY_GAIN;
                } else {
                    self.data_quality = ctx.traits.low_data_quality.sample(rng);
                    self.resistance += PRODUCTION_RESISTANCE_GAIN;
                }
            }
            Phase::DataUse => {
                if ctx.transparency > TRANSPARENCY_THRESHOLD {
                    self.agency_score += USE_AGENCY_GAIN;
                } else {
                    self.resistance += USE_RESISTANCE_GAIN;
                }
            }
        }
    }

    /// Lower agency by `amount`. Only the engine calls this, when it
    /// applies the algorithmic system's broadcast effect.
    pub const fn suppress_agency(&mut self, amount: f64) {
        self.agency_score -= amount;
    }

    /// Return this worker's id.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Return the participation trait.
    pub const fn participation(&self) -> f64 {
        self.participation
    }

    /// Return the accumulated agency score.
    pub const fn agency_score(&self) -> f64 {
        self.agency_score
    }

    /// Return the accumulated resistance.
    pub const fn resistance(&self) -> f64 {
        self.resistance
    }

    /// Return the quality of the most recently produced data.
    pub const fn data_quality(&self) -> f64 {
        self.data_quality
    }
}
