//! Algorithmic system behavior rules.
//!
//! The system only acts while data is used. Its influence grows with its
//! opacity, and when it is more opaque than transparent it suppresses the
//! agency of every worker. The suppression is returned as a
//! [`BroadcastEffect`] rather than applied here; the engine applies it to
//! the worker population right after this step, before any worker steps.

use rand::Rng;
use serde::{Deserialize, Serialize};
use workflow_types::{AgentId, Phase, SharedMetrics};

use crate::config::TraitConfig;
use crate::context::StepContext;

/// Transparency below which the system suppresses worker agency.
const SUPPRESSION_THRESHOLD: f64 = 0.5;

const INFLUENCE_WEIGHT: f64 = 0.1;

/// Agency removed from each worker per suppressing step.
pub const AGENCY_SUPPRESSION: f64 = 0.2;

/// A cross-agent effect emitted by one agent and applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BroadcastEffect {
    /// Lower every worker's agency score by `amount`.
    SuppressAgency {
        /// Agency removed from each worker.
        amount: f64,
    },
}

/// The algorithmic decision-making system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmicSystem {
    id: AgentId,
    transparency: f64,
}

impl AlgorithmicSystem {
    /// Create the system with a sampled transparency.
    pub fn spawn(id: AgentId, traits: &TraitConfig, rng: &mut impl Rng) -> Self {
        Self {
            id,
            transparency: traits.system_transparency.sample(rng),
        }
    }

    /// Apply the system's rule for the current phase.
    ///
    /// Returns the broadcast effect the engine must apply to every worker,
    /// if any.
    pub fn step(
        &self,
        ctx: &StepContext<'_>,
        shared: &mut SharedMetrics,
    ) -> Option<BroadcastEffect> {
        match ctx.phase {
            Phase::GoalFormation | Phase::DataProduction => None,
            Phase::DataUse => {
                shared.system_influence =
                    (1.0 - self.transparency).mul_add(INFLUENCE_WEIGHT, shared.system_influence);
                (self.transparency < SUPPRESSION_THRESHOLD).then_some(
                    BroadcastEffect::SuppressAgency {
                        amount: AGENCY_SUPPRESSION,
                    },
                )
            }
        }
    }

    /// Return the system's id.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Return the transparency trait.
    pub const fn transparency(&self) -> f64 {
        self.transparency
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::TraitRange;

    fn system_with(transparency: f64) -> (AlgorithmicSystem, TraitConfig) {
        let traits = TraitConfig {
            system_transparency: TraitRange::fixed(transparency),
            ..TraitConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(9);
        (AlgorithmicSystem::spawn(AgentId::FIRST, &traits, &mut rng), traits)
    }

    #[test]
    fn idle_outside_data_use() {
        let (system, traits) = system_with(0.3);
        let mut shared = SharedMetrics::default();
        for phase in [Phase::GoalFormation, Phase::DataProduction] {
            let ctx = StepContext {
                phase,
                transparency: system.transparency(),
                traits: &traits,
            };
            assert!(system.step(&ctx, &mut shared).is_none());
        }
        assert!(shared.is_zero());
    }

    #[test]
    fn opaque_system_suppresses_agency() {
        let (system, traits) = system_with(0.3);
        let ctx = StepContext {
            phase: Phase::DataUse,
            transparency: system.transparency(),
            traits: &traits,
        };
        let mut shared = SharedMetrics::default();
        let effect = system.step(&ctx, &mut shared);
        assert_eq!(
            effect,
            Some(BroadcastEffect::SuppressAgency {
                amount: AGENCY_SUPPRESSION
            })
        );
        // (1 - 0.3) * 0.1 = 0.07
        assert!((shared.system_influence - 0.07).abs() < 1e-9);
    }

    #[test]
    fn transparent_system_only_gains_influence() {
        let (system, traits) = system_with(0.5);
        let ctx = StepContext {
            phase: Phase::DataUse,
            transparency: system.transparency(),
            traits: &traits,
        };
        let mut shared = SharedMetrics::default();
        assert!(system.step(&ctx, &mut shared).is_none());
        assert!((shared.system_influence - 0.05).abs() < 1e-9);
    }
}
