//! Phase clock for the workflow agency simulation.
//!
//! The clock is the single source of truth for the simulation's temporal
//! state. It holds two counters: `time`, which never resets, and
//! `phase_step`, the position inside the current three-phase cycle.
//!
//! # Design Principles
//!
//! - The phase is computed from `phase_step` and `total_steps`, never
//!   stored. The cycle of length `total_steps` is split at
//!   `one_third = total_steps / 3` and `2 * one_third`; any remainder makes
//!   the data-use interval longer.
//! - Wrapping is an explicit transition returned by [`PhaseClock::advance`]
//!   so the engine can reset its accumulators in the same call.
//! - Counter arithmetic is checked (no silent overflow).

use workflow_types::Phase;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum PhaseError {
    /// A counter would overflow.
    #[error("{counter} counter overflow: cannot advance beyond u64::MAX")]
    CounterOverflow {
        /// Name of the counter that overflowed.
        counter: &'static str,
    },

    /// Invalid cycle configuration (e.g. zero total steps).
    #[error("invalid phase configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// What happened to the cycle when the clock advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleTransition {
    /// Still inside the same cycle.
    Continued,
    /// `phase_step` reached `total_steps` and wrapped to 0.
    Wrapped {
        /// Number of cycles completed so far, including this one.
        cycle: u64,
    },
}

/// Compute the phase for a position inside a cycle of `total_steps`.
pub const fn phase_for(phase_step: u64, total_steps: u64) -> Phase {
    let one_third = total_steps / 3;
    if phase_step < one_third {
        Phase::GoalFormation
    } else if phase_step < one_third.saturating_mul(2) {
        Phase::DataProduction
    } else {
        Phase::DataUse
    }
}

/// Phase clock tracking step counters and cycle length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseClock {
    /// Position inside the current cycle, in `[0, total_steps)`.
    phase_step: u64,

    /// Global step counter.
    time: u64,

    /// Length of one full three-phase cycle.
    total_steps: u64,

    /// Number of completed cycles.
    cycles_completed: u64,
}

impl PhaseClock {
    /// Create a clock at time 0 at the start of the first cycle.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::InvalidConfig`] if `total_steps` is 0.
    pub fn new(total_steps: u64) -> Result<Self, PhaseError> {
        if total_steps == 0 {
            return Err(PhaseError::InvalidConfig {
                reason: "total_steps must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            phase_step: 0,
            time: 0,
            total_steps,
            cycles_completed: 0,
        })
    }

    /// Return the phase for the current position.
    pub const fn phase(&self) -> Phase {
        phase_for(self.phase_step, self.total_steps)
    }

    /// Return the clock as it will be after one more step, without
    /// changing this one.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::CounterOverflow`] if a counter would exceed
    /// `u64::MAX`.
    pub fn next_state(&self) -> Result<(Self, CycleTransition), PhaseError> {
        let time = self
            .time
            .checked_add(1)
            .ok_or(PhaseError::CounterOverflow { counter: "time" })?;
        let phase_step = self
            .phase_step
            .checked_add(1)
            .ok_or(PhaseError::CounterOverflow {
                counter: "phase_step",
            })?;

        if phase_step < self.total_steps {
            return Ok((
                Self {
                    phase_step,
                    time,
                    ..*self
                },
                CycleTransition::Continued,
            ));
        }

        let cycle = self
            .cycles_completed
            .checked_add(1)
            .ok_or(PhaseError::CounterOverflow { counter: "cycle" })?;
        Ok((
            Self {
                phase_step: 0,
                time,
                total_steps: self.total_steps,
                cycles_completed: cycle,
            },
            CycleTransition::Wrapped { cycle },
        ))
    }

    /// Advance the clock by one step.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::CounterOverflow`] if a counter would exceed
    /// `u64::MAX`; the clock is unchanged in that case.
    pub fn advance(&mut self) -> Result<CycleTransition, PhaseError> {
        let (next, transition) = self.next_state()?;
        *self = next;
        Ok(transition)
    }

    /// Return the position inside the current cycle.
    pub const fn phase_step(&self) -> u64 {
        self.phase_step
    }

    /// Return the global step counter.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// Return the configured cycle length.
    pub const fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Return the length of the goal-formation and data-production
    /// intervals.
    pub const fn one_third(&self) -> u64 {
        self.total_steps / 3
    }

    /// Return the number of completed cycles.
    pub const fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    /// Return the number of steps until the current phase ends.
    pub const fn steps_until_phase_change(&self) -> u64 {
        let one_third = self.one_third();
        let boundary = match self.phase() {
            Phase::GoalFormation => one_third,
            Phase::DataProduction => one_third.saturating_mul(2),
            Phase::DataUse => self.total_steps,
        };
        boundary.saturating_sub(self.phase_step)
    }
}
