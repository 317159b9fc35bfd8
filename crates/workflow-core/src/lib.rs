//! Phase clock, step engine, and run orchestration for the workflow
//! agency simulation.
//!
//! One step moves through the same stages every time: derive the phase,
//! step every agent in creation order, aggregate worker metrics, append a
//! record, and advance the clock (wrapping and resetting the shared
//! accumulators at the end of a full cycle).
//!
//! # Modules
//!
//! - [`phase`] -- Phase clock: counters, the thirds partition, cycle wrap
//! - [`config`] -- Configuration loading from `workflow-config.yaml`
//! - [`engine`] -- [`SimulationEngine`]: population, shared state, `step()`
//! - [`metrics`] -- Worker population averages
//! - [`recorder`] -- Ordered step records, phase bands, CSV export
//! - [`runner`] -- Bounded run loop with a per-step callback
//! - [`summary`] -- JSON run summary
//!
//! [`SimulationEngine`]: engine::SimulationEngine

pub mod config;
pub mod engine;
pub mod metrics;
pub mod phase;
pub mod recorder;
pub mod runner;
pub mod summary;
