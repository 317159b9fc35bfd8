//! Manager behavior rules.
//!
//! Managers have no local accumulators. They push knowledge centralization
//! up while framing goals and, once data is used, by an amount that depends
//! on how opaque the system is and how open they are to worker feedback.

use rand::Rng;
use serde::{Deserialize, Serialize};
use workflow_types::{AgentId, Phase, SharedMetrics};

use crate::config::TraitConfig;
use crate::context::StepContext;

/// Transparency below which managers lean on the system's authority.
const OPACITY_THRESHOLD: f64 = 0.5;

const CONTROL_WEIGHT: f64 = 0.1;
const OPAQUE_CENTRALIZATION: f64 = 0.1;
const FEEDBACK_WEIGHT: f64 = 0.05;

/// A managerial agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    id: AgentId,
    control_preference: f64,
    feedback_acceptance: f64,
}

impl Manager {
    /// Create a manager with sampled control preference and feedback
    /// acceptance.
    pub fn spawn(id: AgentId, traits: &TraitConfig, rng: &mut impl Rng) -> Self {
        Self {
            id,
            control_preference: traits.manager_control_preference.sample(rng),
            feedback_acceptance: traits.manager_feedback_acceptance.sample(rng),
        }
    }

    /// Apply this manager's rule for the current phase.
    pub fn step(&self, ctx: &StepContext<'_>, shared: &mut SharedMetrics) {
        match ctx.phase {
            Phase::GoalFormation => {
                shared.knowledge_centralization = self
                    .control_preference
                    .mul_add(CONTROL_WEIGHT, shared.knowledge_centralization);
            }
            Phase::DataProduction => {}
            Phase::DataUse => {
                if ctx.transparency < OPACITY_THRESHOLD {
                    shared.knowledge_centralization += OPAQUE_CENTRALIZATION;
                } else {
                    shared.knowledge_centralization = FEEDBACK_WEIGHT.mul_add(
                        1.0 - self.feedback_acceptance,
                        shared.knowledge_centralization,
                    );
                }
            }
        }
    }

    /// Return this manager's id.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Return the control preference trait.
    pub const fn control_preference(&self) -> f64 {
        self.control_preference
    }

    /// Return the feedback acceptance trait.
    pub const fn feedback_acceptance(&self) -> f64 {
        self.feedback_acceptance
    }
}
