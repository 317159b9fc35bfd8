//! Step callback that logs phase transitions.
//!
//! One `info!` line per contiguous phase run keeps a long simulation's log
//! readable; every step is still visible at `debug` from the engine.

use tracing::info;
use workflow_core::runner::StepCallback;
use workflow_types::{Phase, StepRecord};

/// Logs the aggregate state whenever the phase changes.
#[derive(Debug, Default)]
pub struct ProgressLogger {
    current: Option<Phase>,
}

impl ProgressLogger {
    /// Create a logger that has not seen any step yet.
    pub const fn new() -> Self {
        Self { current: None }
    }
}

impl StepCallback for ProgressLogger {
    fn on_step(&mut self, record: &StepRecord) {
        if self.current == Some(record.phase) {
            return;
        }
        self.current = Some(record.phase);
        info!(
            time = record.time,
            phase = %record.phase,
            knowledge_centralization = record.knowledge_centralization,
            system_influence = record.system_influence,
            average_agency = record.average_agency,
            average_resistance = record.average_resistance,
            "Phase entered"
        );
    }
}
