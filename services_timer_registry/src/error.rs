//! Registry error types

use host_api::HostError;
use thiserror::Error;
use timer_types::SlotKey;

/// Errors surfaced by the timer registry
///
/// Only caller-visible failures live here. A re-arm rejection inside the
/// expiry path is not an error value anywhere; it becomes a `timer.stalled`
/// log entry and a `Stalled` slot state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimerError {
    /// The key does not address a slot in this store
    #[error("{key} is out of range (capacity {capacity})")]
    SlotNotFound { key: SlotKey, capacity: usize },

    /// The host refused to create the timer or route its expiries
    #[error("callback registration failed: {0}")]
    CallbackRegistrationFailed(HostError),

    /// The host refused to arm the freshly initialized timer
    #[error("arm failed: {0}")]
    ArmFailed(HostError),

    /// Cancellation requested for a slot that never armed a timer
    #[error("{0} has no timer to cancel")]
    NotArmed(SlotKey),
}
