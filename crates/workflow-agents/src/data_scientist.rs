//! Data scientist behavior rules.
//!
//! Data scientists play the engineer's modifier role with a different
//! trait: their analytic rigor improves data quality while data is
//! produced and, to a lesser degree, while models are validated during
//! data use. They have no effect on goal formation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use workflow_types::{AgentId, Phase, SharedMetrics};

use crate::config::TraitConfig;
use crate::context::StepContext;

const PRODUCTION_WEIGHT: f64 = 0.05;
const VALIDATION_WEIGHT: f64 = 0.02;

/// A data scientist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataScientist {
    id: AgentId,
    analytic_rigor: f64,
}

impl DataScientist {
    /// Create a data scientist with a sampled analytic rigor.
    pub fn spawn(id: AgentId, traits: &TraitConfig, rng: &mut impl Rng) -> Self {
        Self {
            id,
            analytic_rigor: traits.data_scientist_rigor.sample(rng),
        }
    }

    /// Apply this data scientist's rule for the current phase.
    pub fn step(&self, ctx: &StepContext<'_>, shared: &mut SharedMetrics) {
        let weight = match ctx.phase {
            Phase::GoalFormation => return,
            Phase::DataProduction => PRODUCTION_WEIGHT,
            Phase::DataUse => VALIDATION_WEIGHT,
        };
        shared.data_quality_modifier = self
            .analytic_rigor
            .mul_add(weight, shared.data_quality_modifier);
    }

    /// Return this data scientist's id.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Return the analytic rigor trait.
    pub const fn analytic_rigor(&self) -> f64 {
        self.analytic_rigor
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::TraitRange;

    #[test]
    fn modifier_contributions_by_phase() {
        let traits = TraitConfig {
            data_scientist_rigor: TraitRange::fixed(0.5),
            ..TraitConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(2);
        let scientist = DataScientist::spawn(AgentId::FIRST, &traits, &mut rng);
        let mut shared = SharedMetrics::default();

        let mut run = |phase| {
            let ctx = StepContext {
                phase,
                transparency: 0.5,
                traits: &traits,
            };
            scientist.step(&ctx, &mut shared);
            shared.data_quality_modifier
        };

        assert!(run(Phase::GoalFormation).abs() < 1e-12);
        assert!((run(Phase::DataProduction) - 0.025).abs() < 1e-9);
        assert!((run(Phase::DataUse) - 0.035).abs() < 1e-9);
    }
}
