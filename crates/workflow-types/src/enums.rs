//! Enumeration types for the workflow agency simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Organizational phase
// ---------------------------------------------------------------------------

/// One of the three sequential stages of the organizational cycle.
///
/// The phase gates which behavior rules are active for every agent. It is
/// always derived from the phase clock and never set by agents. Serialized
/// as its `snake_case` name (`goal_formation`, `data_production`,
/// `data_use`), which is also the value written to the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Phase {
    /// Objectives are framed; participation and managerial control matter.
    GoalFormation,
    /// Workers generate data; engineers and data scientists tune quality.
    DataProduction,
    /// The algorithmic system acts on the data; transparency matters.
    DataUse,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Self; 3] = [Self::GoalFormation, Self::DataProduction, Self::DataUse];

    /// Return the `snake_case` name used in records and exports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoalFormation => "goal_formation",
            Self::DataProduction => "data_production",
            Self::DataUse => "data_use",
        }
    }
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Agent kinds
// ---------------------------------------------------------------------------

/// The behavioral variant of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AgentKind {
    /// Front-line worker producing data and accumulating agency or resistance.
    Worker,
    /// Technical engineer mediating knowledge between people and system.
    Engineer,
    /// Manager shaping how centralized decisions are.
    Manager,
    /// The algorithmic decision-making system.
    AlgorithmicSystem,
    /// Data scientist validating and refining the data pipeline.
    DataScientist,
}

impl AgentKind {
    /// Return the `snake_case` name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Engineer => "engineer",
            Self::Manager => "manager",
            Self::AlgorithmicSystem => "algorithmic_system",
            Self::DataScientist => "data_scientist",
        }
    }
}

impl core::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn phase_serializes_snake_case() {
        let json = serde_json::to_string(&Phase::DataProduction).unwrap();
        assert_eq!(json, "\"data_production\"");
        let back: Phase = serde_json::from_str("\"data_use\"").unwrap();
        assert_eq!(back, Phase::DataUse);
    }

    #[test]
    fn phase_display_matches_serde_name() {
        for phase in Phase::ALL {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{phase}\""));
        }
    }

    #[test]
    fn agent_kind_display() {
        assert_eq!(AgentKind::AlgorithmicSystem.to_string(), "algorithmic_system");
        assert_eq!(AgentKind::DataScientist.to_string(), "data_scientist");
    }
}
