//! Core structs shared between the agent rules and the engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Phase;

/// Shared scalar accumulators written by several agent kinds.
///
/// Agents only ever add to these values during a step pass. The engine
/// resets all three to zero when a full three-phase cycle completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedMetrics {
    /// Concentration of decision authority.
    pub knowledge_centralization: f64,
    /// Cumulative impact of the algorithmic system.
    pub system_influence: f64,
    /// Data-quality contribution from engineers and data scientists.
    pub data_quality_modifier: f64,
}

impl SharedMetrics {
    /// Reset every accumulator to zero.
    pub const fn reset(&mut self) {
        *self = Self {
            knowledge_centralization: 0.0,
            system_influence: 0.0,
            data_quality_modifier: 0.0,
        };
    }

    /// Whether every accumulator is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.knowledge_centralization == 0.0
            && self.system_influence == 0.0
            && self.data_quality_modifier == 0.0
    }
}

/// Snapshot of aggregate state taken at the end of one step.
///
/// Field order is the column order of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StepRecord {
    /// Global step counter (never resets).
    pub time: u64,
    /// Phase that was active during the step.
    pub phase: Phase,
    /// Shared knowledge centralization at the end of the step.
    pub knowledge_centralization: f64,
    /// Shared system influence at the end of the step.
    pub system_influence: f64,
    /// Mean worker resistance.
    pub average_resistance: f64,
    /// Mean worker agency score.
    pub average_agency: f64,
    /// Mean worker data quality.
    pub average_data_quality: f64,
    /// Shared data-quality modifier at the end of the step.
    pub data_quality_modifier: f64,
}

/// A contiguous run of records sharing the same phase.
///
/// Charting front ends draw one background band per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PhaseBand {
    /// Phase of every record in the band.
    pub phase: Phase,
    /// Time of the first record in the band.
    pub start_time: u64,
    /// One past the time of the last record in the band.
    pub end_time: u64,
}
