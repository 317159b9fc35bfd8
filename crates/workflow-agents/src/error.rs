//! Error types for the workflow-agents crate.
//!
//! Population construction is the only fallible operation in this crate;
//! the per-step rules themselves cannot fail.

/// Errors that can occur while building or inspecting an agent population.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The sequential id counter would overflow.
    #[error("agent id counter overflow")]
    IdOverflow,

    /// A trait sampling range is malformed.
    #[error("invalid trait range for {name}: [{low}, {high}]")]
    InvalidTraitRange {
        /// Name of the trait whose range is invalid.
        name: &'static str,
        /// Configured lower bound.
        low: f64,
        /// Configured upper bound.
        high: f64,
    },
}
