//! Sequential agent identifiers.
//!
//! Agents are numbered by the population factory in creation order,
//! starting at 1. Identifiers are never reused within a run, and zero is
//! never a valid identifier.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Unique, positive identifier for an agent in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct AgentId(u64);

impl AgentId {
    /// The first identifier handed out in a run.
    pub const FIRST: Self = Self(1);

    /// Wrap a raw value. Returns `None` for zero.
    pub const fn new(raw: u64) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    /// Return the identifier that follows this one, or `None` on overflow.
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Return the raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
