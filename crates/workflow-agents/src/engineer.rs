//! Engineer behavior rules.
//!
//! Engineers learn the system while goals are set, tune data quality while
//! data is produced, and centralize knowledge by interpreting results once
//! the data is used. Knowledge growth has no ceiling.

use rand::Rng;
use serde::{Deserialize, Serialize};
use workflow_types::{AgentId, Phase, SharedMetrics};

use crate::config::TraitConfig;
use crate::context::StepContext;

const KNOWLEDGE_GAIN: f64 = 0.05;
const DATA_QUALITY_WEIGHT: f64 = 0.05;
const CENTRALIZATION_WEIGHT: f64 = 0.05;

/// A technical engineer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engineer {
    id: AgentId,
    knowledge_level: f64,
    data_sensitivity: f64,
}

impl Engineer {
    /// Create an engineer with sampled knowledge and data sensitivity.
    pub fn spawn(id: AgentId, traits: &TraitConfig, rng: &mut impl Rng) -> Self {
        Self {
            id,
            knowledge_level: traits.engineer_knowledge.sample(rng),
            data_sensitivity: traits.engineer_data_sensitivity.sample(rng),
        }
    }

    /// Apply this engineer's rule for the current phase.
    pub fn step(&mut self, ctx: &StepContext<'_>, shared: &mut SharedMetrics) {
        match ctx.phase {
            Phase::GoalFormation => {
                self.knowledge_level += KNOWLEDGE_GAIN;
            }
            Phase::DataProduction => {
                shared.data_quality_modifier = self
                    .data_sensitivity
                    .mul_add(DATA_QUALITY_WEIGHT, shared.data_quality_modifier);
            }
            Phase::DataUse => {
                shared.knowledge_centralization = self
                    .knowledge_level
                    .mul_add(CENTRALIZATION_WEIGHT, shared.knowledge_centralization);
            }
        }
    }

    /// Return this engineer's id.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Return the current knowledge level.
    pub const fn knowledge_level(&self) -> f64 {
        self.knowledge_level
    }

    /// Return the data sensitivity trait.
    pub const fn data_sensitivity(&self) -> f64 {
        self.data_sensitivity
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::TraitRange;

    fn fixed_traits() -> TraitConfig {
        TraitConfig {
            engineer_knowledge: TraitRange::fixed(0.6),
            engineer_data_sensitivity: TraitRange::fixed(0.4),
            ..TraitConfig::default()
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn knowledge_grows_without_ceiling() {
        let traits = fixed_traits();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut engineer = Engineer::spawn(AgentId::FIRST, &traits, &mut rng);
        let ctx = StepContext {
            phase: Phase::GoalFormation,
            transparency: 0.5,
            traits: &traits,
        };
        let mut shared = SharedMetrics::default();
        for _ in 0..100 {
            engineer.step(&ctx, &mut shared);
        }
        // 0.6 + 100 * 0.05 = 5.6, well past 1.0
        assert!(close(engineer.knowledge_level(), 5.6));
        assert!(shared.is_zero());
    }

    #[test]
    fn data_production_raises_modifier() {
        let traits = fixed_traits();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut engineer = Engineer::spawn(AgentId::FIRST, &traits, &mut rng);
        let ctx = StepContext {
            phase: Phase::DataProduction,
            transparency: 0.5,
            traits: &traits,
        };
        let mut shared = SharedMetrics::default();
        engineer.step(&ctx, &mut shared);
        assert!(close(shared.data_quality_modifier, 0.02));
        assert!(close(shared.knowledge_centralization, 0.0));
    }

    #[test]
    fn data_use_centralizes_knowledge() {
        let traits = fixed_traits();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut engineer = Engineer::spawn(AgentId::FIRST, &traits, &mut rng);
        let ctx = StepContext {
            phase: Phase::DataUse,
            transparency: 0.5,
            traits: &traits,
        };
        let mut shared = SharedMetrics::default();
        engineer.step(&ctx, &mut shared);
        assert!(close(shared.knowledge_centralization, 0.03));
        assert!(close(engineer.knowledge_level(), 0.6));
    }
}
