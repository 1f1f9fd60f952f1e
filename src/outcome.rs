//! Terminal mission outcomes and per-tick results.
//!
//! Collision and boundary violation are not errors; they are defined end
//! states handed back to the caller, who decides how to present them.

use std::fmt;

use crate::boundary::BoundarySignal;

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    Collision,
    OutOfBounds,
    /// Unexpected failure inside a tick (e.g. non-finite state).
    Halted,
}

/// Structured terminal result: `{reason, detail}`.
#[derive(Clone, Debug, PartialEq)]
pub struct MissionOutcome {
    pub reason: FailureReason,
    /// Body name for collisions, diagnostic text for halts.
    pub detail: String,
}

impl MissionOutcome {
    pub fn collision(body: impl Into<String>) -> Self {
        Self {
            reason: FailureReason::Collision,
            detail: body.into(),
        }
    }

    pub fn out_of_bounds(time_outside: f64) -> Self {
        Self {
            reason: FailureReason::OutOfBounds,
            detail: format!("{time_outside:.1}s outside boundary"),
        }
    }

    pub fn halted(detail: impl Into<String>) -> Self {
        Self {
            reason: FailureReason::Halted,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for MissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            FailureReason::Collision => write!(f, "mission failed: collided with {}", self.detail),
            FailureReason::OutOfBounds => write!(f, "mission failed: out of bounds"),
            FailureReason::Halted => write!(f, "simulation halted: {}", self.detail),
        }
    }
}

/// Result of one scheduled tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Clock not running, or paused: nothing happened.
    Skipped,
    /// Physics advanced by `dt` simulated seconds.
    Advanced { dt: f64, boundary: BoundarySignal },
    /// The run ended this tick.
    Terminated(MissionOutcome),
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Terminated(_))
    }
}
