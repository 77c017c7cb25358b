//! The scheduling-host contract

use crate::error::HostError;
use crate::time::{Duration, Instant};
use serde::{Deserialize, Serialize};
use std::fmt;
use timer_types::SlotKey;
use uuid::Uuid;

/// Unique identifier for a host-issued timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleId(Uuid);

impl HandleId {
    /// Creates a new random handle ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a HandleId from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for HandleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer:{}", self.0)
    }
}

/// Clock source a timer is bound to at creation
///
/// The registry always chooses [`ClockSource::Monotonic`]: re-arm intervals
/// must not stretch or shrink when the wall clock is adjusted, which rules
/// out `RealTime`, and ticks are not expected to accumulate across suspend,
/// which rules out `BootTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockSource {
    /// Monotonic clock, immune to wall-clock adjustments
    Monotonic,
    /// Wall-clock time, subject to adjustment
    RealTime,
    /// Monotonic clock that keeps counting across suspend
    BootTime,
}

impl fmt::Display for ClockSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockSource::Monotonic => write!(f, "monotonic"),
            ClockSource::RealTime => write!(f, "realtime"),
            ClockSource::BootTime => write!(f, "boottime"),
        }
    }
}

/// A host-issued timer handle
///
/// Opaque token representing one schedulable timer. The host issues at most
/// one live handle per slot; the slot that created it owns it exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle {
    /// Identity of the handle within the host
    pub id: HandleId,
    /// Slot the handle was created for
    pub key: SlotKey,
    /// Clock source the timer measures delays against
    pub clock: ClockSource,
}

impl TimerHandle {
    /// Creates a handle for a slot; intended for host implementations
    pub fn new(key: SlotKey, clock: ClockSource) -> Self {
        Self {
            id: HandleId::new(),
            key,
            clock,
        }
    }
}

/// An expiry delivered by the host
///
/// The host never calls back into the registry; it hands out events and the
/// surrounding pump routes each one to the registry's expiry path. The
/// enqueue/drain boundary is the only synchronization point between host
/// time and registry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryEvent {
    /// Slot whose timer reached its deadline
    pub key: SlotKey,
    /// The deadline that was reached
    pub deadline: Instant,
    /// Host-assigned delivery order, strictly increasing per host
    pub sequence: u64,
}

/// The scheduling host
///
/// The external runtime responsible for tracking armed timers and reporting
/// expiries. Implementations must be non-blocking: every operation is
/// expected to complete immediately, and none of them retries internally.
///
/// # Contract
///
/// - At most one live handle per slot; a second `init_timer` for the same
///   slot fails with [`HostError::Busy`]
/// - Arming is one-shot: a fired timer stays quiet until armed again
/// - Re-arming an already armed handle replaces its pending deadline
/// - A released handle is gone; operations on it fail with
///   [`HostError::InvalidHandle`]
pub trait HostScheduler {
    /// Creates a timer for a slot, bound to a clock source
    fn init_timer(&mut self, key: SlotKey, clock: ClockSource) -> Result<TimerHandle, HostError>;

    /// Registers expiry delivery for a handle
    ///
    /// Arming an unbound handle is rejected: an expiry nobody can receive
    /// is a lost tick, so binding must happen first.
    fn bind_callback(&mut self, handle: &TimerHandle) -> Result<(), HostError>;

    /// Arms the timer to fire once after `delay`
    fn arm(&mut self, handle: &TimerHandle, delay: Duration) -> Result<(), HostError>;

    /// Removes any pending deadline for the handle
    ///
    /// Returns true if a deadline was actually pending.
    fn disarm(&mut self, handle: &TimerHandle) -> Result<bool, HostError>;

    /// Destroys a handle, dropping any pending deadline with it
    ///
    /// Used to roll back a partially completed initialization so the slot
    /// can be started again from scratch.
    fn release(&mut self, handle: &TimerHandle) -> Result<(), HostError>;

    /// Returns the host's current time
    fn now(&self) -> Instant;
}
