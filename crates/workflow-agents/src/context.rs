//! Read-only context handed to every agent during a step pass.

use workflow_types::Phase;

use crate::config::TraitConfig;

/// What an agent may observe about the world besides the shared
/// accumulators: the current phase, the algorithmic system's transparency
/// (a public trait fixed at creation), and the sampling ranges for values
/// drawn during a step.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Phase active for this step.
    pub phase: Phase,
    /// Transparency of the algorithmic system.
    pub transparency: f64,
    /// Sampling ranges for per-step draws.
    pub traits: &'a TraitConfig,
}
