//! Population factory, id assignment, and stepping order.
//!
//! Agents are created in one fixed order and stepped in that same order,
//! so creation order, id order and stepping order always agree:
//!
//! 1. core manager
//! 2. core engineer
//! 3. core data scientist (when at least one is configured)
//! 4. the algorithmic system
//! 5. every worker
//! 6. the remaining managers
//! 7. the remaining engineers
//! 8. the remaining data scientists
//!
//! The order is part of the model: agents later in the pass observe the
//! shared accumulator writes of agents earlier in the same pass.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use workflow_types::{AgentId, AgentKind};

use crate::agent::Agent;
use crate::config::TraitConfig;
use crate::data_scientist::DataScientist;
use crate::engineer::Engineer;
use crate::error::AgentError;
use crate::manager::Manager;
use crate::system::{AlgorithmicSystem, BroadcastEffect};
use crate::worker::Worker;

/// Number of agents of each configurable kind.
///
/// There is always exactly one algorithmic system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSizes {
    /// Number of workers.
    pub workers: u32,
    /// Number of engineers (the first is the core engineer).
    pub engineers: u32,
    /// Number of managers (the first is the core manager).
    pub managers: u32,
    /// Number of data scientists (the first, if any, is the core one).
    pub data_scientists: u32,
}

/// Hands out sequential ids starting at [`AgentId::FIRST`].
#[derive(Debug)]
struct IdAllocator {
    next: Option<AgentId>,
}

impl IdAllocator {
    const fn new() -> Self {
        Self {
            next: Some(AgentId::FIRST),
        }
    }

    fn allocate(&mut self) -> Result<AgentId, AgentError> {
        let id = self.next.ok_or(AgentError::IdOverflow)?;
        self.next = id.next();
        Ok(id)
    }
}

/// The full, fixed agent population of one run, in stepping order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPopulation {
    agents: Vec<Agent>,
    transparency: f64,
}

impl AgentPopulation {
    /// Create every agent, sampling traits from `traits` in creation order.
    pub fn spawn(
        sizes: PopulationSizes,
        traits: &TraitConfig,
        rng: &mut impl Rng,
    ) -> Result<Self, AgentError> {
        traits.validate()?;

        let mut ids = IdAllocator::new();
        let mut agents = Vec::new();

        // Core agents.
        if sizes.managers > 0 {
            agents.push(Agent::Manager(Manager::spawn(ids.allocate()?, traits, rng)));
        }
        if sizes.engineers > 0 {
            agents.push(Agent::Engineer(Engineer::spawn(ids.allocate()?, traits, rng)));
        }
        if sizes.data_scientists > 0 {
            agents.push(Agent::DataScientist(DataScientist::spawn(
                ids.allocate()?,
                traits,
                rng,
            )));
        }
        let system = AlgorithmicSystem::spawn(ids.allocate()?, traits, rng);
        let transparency = system.transparency();
        agents.push(Agent::System(system));

        for _ in 0..sizes.workers {
            agents.push(Agent::Worker(Worker::spawn(ids.allocate()?, traits, rng)));
        }

        // Per-category pools beyond the core agent.
        for _ in 1..sizes.managers {
            agents.push(Agent::Manager(Manager::spawn(ids.allocate()?, traits, rng)));
        }
        for _ in 1..sizes.engineers {
            agents.push(Agent::Engineer(Engineer::spawn(ids.allocate()?, traits, rng)));
        }
        for _ in 1..sizes.data_scientists {
            agents.push(Agent::DataScientist(DataScientist::spawn(
                ids.allocate()?,
                traits,
                rng,
            )));
        }

        debug!(
            agents = agents.len(),
            workers = sizes.workers,
            transparency,
            "Population spawned"
        );

        Ok(Self {
            agents,
            transparency,
        })
    }

    /// Total number of agents, including the system.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the population holds no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// All agents in stepping order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Mutable access to the agent at `index` in stepping order.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Agent> {
        self.agents.get_mut(index)
    }

    /// Transparency of the algorithmic system.
    pub const fn transparency(&self) -> f64 {
        self.transparency
    }

    /// Workers in stepping order.
    pub fn workers(&self) -> impl Iterator<Item = &Worker> {
        self.agents.iter().filter_map(Agent::as_worker)
    }

    /// Number of agents of the given kind.
    pub fn count_of(&self, kind: AgentKind) -> usize {
        self.agents.iter().filter(|a| a.kind() == kind).count()
    }

    /// Apply a broadcast effect to every agent it targets.
    pub fn apply_broadcast(&mut self, effect: BroadcastEffect) {
        match effect {
            BroadcastEffect::SuppressAgency { amount } => {
                for worker in self.agents.iter_mut().filter_map(Agent::as_worker_mut) {
                    worker.suppress_agency(amount);
                }
            }
        }
    }
}
