//! Slot lifecycle states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a slot's timer
///
/// The full transition graph:
///
/// ```text
/// Uninitialized --start()--> Initializing --ok--> Armed
///                                |
///                                +--host rejects--> Uninitialized
///
/// Armed --expiry delivered--> Firing --re-arm ok--> Armed
///                                |
///                                +--re-arm fails--> Stalled
///
/// Armed | Firing | Stalled --cancel()--> Cancelled
/// ```
///
/// `Stalled` and `Cancelled` are terminal: no expiry is ever delivered to a
/// slot in either state, and `start` does not resurrect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    /// No timer has been created for this slot yet
    Uninitialized,
    /// A `start` call holds the first-init claim and is talking to the host
    ///
    /// Transient: observable only while a concurrent `start` is mid-flight.
    Initializing,
    /// A timer is armed and waiting for its deadline
    Armed,
    /// The expiry path is running for this slot
    ///
    /// Transient: the slot returns to `Armed` once the re-arm is accepted.
    Firing,
    /// A re-arm was rejected by the host; the tick sequence has stopped
    Stalled,
    /// The timer was explicitly cancelled
    Cancelled,
}

impl SlotState {
    /// Returns true for states no expiry will ever leave
    pub fn is_terminal(&self) -> bool {
        matches!(self, SlotState::Stalled | SlotState::Cancelled)
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotState::Uninitialized => write!(f, "Uninitialized"),
            SlotState::Initializing => write!(f, "Initializing"),
            SlotState::Armed => write!(f, "Armed"),
            SlotState::Firing => write!(f, "Firing"),
            SlotState::Stalled => write!(f, "Stalled"),
            SlotState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Result of a successful `start` request
///
/// A duplicate `start` is not an error: the second caller learns the slot is
/// live and nothing else happens. This makes `start` safe to invoke from
/// multiple triggers without coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartOutcome {
    /// This call created, bound, and armed the slot's timer
    Started,
    /// The slot already left `Uninitialized`; no side effects occurred
    AlreadyInitialized,
}
