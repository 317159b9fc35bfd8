//! Shared type definitions for the workflow agency simulation.
//!
//! This crate is the single source of truth for the types that cross crate
//! boundaries: agent identifiers, the organizational phase, the shared
//! accumulators every agent writes into, and the per-step record consumed
//! by charting and persistence. Record types flow to `TypeScript` via
//! `ts-rs` for the results dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Sequential agent identifiers
//! - [`enums`] -- Phase and agent-kind enumerations
//! - [`structs`] -- Shared accumulators, step records, phase bands

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{AgentKind, Phase};
pub use ids::AgentId;
pub use structs::{PhaseBand, SharedMetrics, StepRecord};

#[cfg(test)]
mod tests {
    //! Export smoke test for `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes the bindings into `bindings/` relative to the crate
        // root when `export_all` runs.
        use ts_rs::TS;

        let _ = crate::ids::AgentId::export_all();
        let _ = crate::enums::Phase::export_all();
        let _ = crate::enums::AgentKind::export_all();
        let _ = crate::structs::StepRecord::export_all();
        let _ = crate::structs::PhaseBand::export_all();
    }
}
