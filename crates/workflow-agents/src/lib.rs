//! Agent behavior rules for the workflow agency simulation.
//!
//! This crate contains the per-agent logic layer: every variant samples its
//! traits once at creation and then applies phase-gated updates to its own
//! accumulators and to the [`SharedMetrics`] handed in by the engine. It
//! performs no I/O and owns no clock; the engine in `workflow-core` decides
//! the phase and the stepping order.
//!
//! # Modules
//!
//! - [`agent`] -- The [`Agent`] tagged union and per-step dispatch
//! - [`config`] -- Trait sampling ranges ([`TraitConfig`])
//! - [`context`] -- Read-only per-step context ([`StepContext`])
//! - [`data_scientist`] -- `DataScientist` rules
//! - [`engineer`] -- `Engineer` rules
//! - [`error`] -- Error types ([`AgentError`])
//! - [`manager`] -- `Manager` rules
//! - [`population`] -- Population factory, id assignment, stepping order
//! - [`system`] -- `AlgorithmicSystem` rules and [`BroadcastEffect`]
//! - [`worker`] -- `Worker` rules
//!
//! [`SharedMetrics`]: workflow_types::SharedMetrics

pub mod agent;
pub mod config;
pub mod context;
pub mod data_scientist;
pub mod engineer;
pub mod error;
pub mod manager;
pub mod population;
pub mod system;
pub mod worker;

// Re-export primary types at crate root for convenience.
pub use agent::Agent;
pub use config::{TraitConfig, TraitRange};
pub use context::StepContext;
pub use data_scientist::DataScientist;
pub use engineer::Engineer;
pub use error::AgentError;
pub use manager::Manager;
pub use population::{AgentPopulation, PopulationSizes};
pub use system::{AlgorithmicSystem, BroadcastEffect};
pub use worker::Worker;
