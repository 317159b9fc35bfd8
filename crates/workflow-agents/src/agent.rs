//! The [`Agent`] tagged union and per-step dispatch.
//!
//! Each step pass matches on the agent variant and forwards to that
//! variant's phase-gated rule, so the compiler checks that every
//! (variant, phase) pair is handled.

use rand::Rng;
use serde::{Deserialize, Serialize};
use workflow_types::{AgentId, AgentKind, SharedMetrics};

use crate::context::StepContext;
use crate::data_scientist::DataScientist;
use crate::engineer::Engineer;
use crate::manager::Manager;
use crate::system::{AlgorithmicSystem, BroadcastEffect};
use crate::worker::Worker;

/// Any agent in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Agent {
    /// A front-line worker.
    Worker(Worker),
    /// A technical engineer.
    Engineer(Engineer),
    /// A manager.
    Manager(Manager),
    /// The algorithmic system.
    System(AlgorithmicSystem),
    /// A data scientist.
    DataScientist(DataScientist),
}

impl Agent {
    /// Return the agent's id.
    pub const fn id(&self) -> AgentId {
        match self {
            Self::Worker(a) => a.id(),
            Self::Engineer(a) => a.id(),
            Self::Manager(a) => a.id(),
            Self::System(a) => a.id(),
            Self::DataScientist(a) => a.id(),
        }
    }

    /// Return the agent's behavioral variant.
    pub const fn kind(&self) -> AgentKind {
        match self {
            Self::Worker(_) => AgentKind::Worker,
            Self::Engineer(_) => AgentKind::Engineer,
            Self::Manager(_) => AgentKind::Manager,
            Self::System(_) => AgentKind::AlgorithmicSystem,
            Self::DataScientist(_) => AgentKind::DataScientist,
        }
    }

    /// Run this agent's rule for the current phase.
    ///
    /// Returns a broadcast effect when the agent emits one; only the
    /// algorithmic system does.
    pub fn step(
        &mut self,
        ctx: &StepContext<'_>,
        shared: &mut SharedMetrics,
        rng: &mut impl Rng,
    ) -> Option<BroadcastEffect> {
        match self {
            Self::Worker(worker) => {
                worker.step(ctx, rng);
                None
            }
            Self::Engineer(engineer) => {
                engineer.step(ctx, shared);
                None
            }
            Self::Manager(manager) => {
                manager.step(ctx, shared);
                None
            }
            Self::System(system) => system.step(ctx, shared),
            Self::DataScientist(scientist) => {
                scientist.step(ctx, shared);
                None
            }
        }
    }

    /// Return the inner worker, if this agent is one.
    pub const fn as_worker(&self) -> Option<&Worker> {
        match self {
            Self::Worker(worker) => Some(worker),
            _ => None,
        }
    }

    /// Return the inner worker mutably, if this agent is one.
    pub const fn as_worker_mut(&mut self) -> Option<&mut Worker> {
        match self {
            Self::Worker(worker) => Some(worker),
            _ => None,
        }
    }
}
