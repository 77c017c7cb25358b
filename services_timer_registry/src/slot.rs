//! Slot records
//!
//! A slot packs its whole lifecycle into three fields: an atomic state word
//! (the state machine), a write-once handle cell, and a relaxed atomic tick
//! counter. `start`, `cancel`, and the expiry path coordinate exclusively
//! through compare-and-swap transitions on the state word; none of them ever
//! blocks on another.

use host_api::TimerHandle;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::OnceLock;
use timer_types::{SlotKey, SlotState};

const STATE_UNINITIALIZED: u8 = 0;
const STATE_INITIALIZING: u8 = 1;
const STATE_ARMED: u8 = 2;
const STATE_FIRING: u8 = 3;
const STATE_STALLED: u8 = 4;
const STATE_CANCELLED: u8 = 5;

fn encode(state: SlotState) -> u8 {
    match state {
        SlotState::Uninitialized => STATE_UNINITIALIZED,
        SlotState::Initializing => STATE_INITIALIZING,
        SlotState::Armed => STATE_ARMED,
        SlotState::Firing => STATE_FIRING,
        SlotState::Stalled => STATE_STALLED,
        SlotState::Cancelled => STATE_CANCELLED,
    }
}

fn decode(word: u8) -> SlotState {
    match word {
        STATE_INITIALIZING => SlotState::Initializing,
        STATE_ARMED => SlotState::Armed,
        STATE_FIRING => SlotState::Firing,
        STATE_STALLED => SlotState::Stalled,
        STATE_CANCELLED => SlotState::Cancelled,
        _ => SlotState::Uninitialized,
    }
}

/// One slot in the store
#[derive(Debug)]
pub(crate) struct Slot {
    /// State machine word; all lifecycle coordination goes through here
    state: AtomicU8,
    /// Ticks delivered to this slot; only ever incremented
    call_count: AtomicU64,
    /// Host-issued handle, published once by the winning initializer
    handle: OnceLock<TimerHandle>,
}

impl Slot {
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicU8::new(STATE_UNINITIALIZED),
            call_count: AtomicU64::new(0),
            handle: OnceLock::new(),
        }
    }

    /// Current state
    pub(crate) fn state(&self) -> SlotState {
        decode(self.state.load(Ordering::Acquire))
    }

    /// Attempts the transition `from -> to`; false if the state moved
    pub(crate) fn try_transition(&self, from: SlotState, to: SlotState) -> bool {
        self.state
            .compare_exchange(encode(from), encode(to), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Ticks delivered so far
    ///
    /// Relaxed: the counter is observability-only; nothing orders against it.
    pub(crate) fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Increments the tick counter, returning the pre-increment value
    pub(crate) fn increment_call_count(&self) -> u64 {
        self.call_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Publishes the host handle
    ///
    /// Caller must hold the `Initializing` claim, which makes this the
    /// slot's single publication.
    pub(crate) fn publish_handle(&self, handle: TimerHandle) {
        let _ = self.handle.set(handle);
    }

    /// The published handle, if initialization ever completed
    pub(crate) fn handle(&self) -> Option<&TimerHandle> {
        self.handle.get()
    }
}

/// Point-in-time view of a slot, for external inspection
///
/// This is the supported way to detect a stalled slot: poll snapshots and
/// watch for a `Stalled` state or a `call_count` that stopped moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    /// Slot the snapshot describes
    pub key: SlotKey,
    /// State at capture time
    pub state: SlotState,
    /// Ticks delivered at capture time
    pub call_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use host_api::ClockSource;

    #[test]
    fn test_new_slot_is_uninitialized() {
        let slot = Slot::new();
        assert_eq!(slot.state(), SlotState::Uninitialized);
        assert_eq!(slot.call_count(), 0);
        assert!(slot.handle().is_none());
    }

    #[test]
    fn test_transition_requires_expected_state() {
        let slot = Slot::new();
        assert!(slot.try_transition(SlotState::Uninitialized, SlotState::Initializing));
        // The claim is gone; a second claim fails.
        assert!(!slot.try_transition(SlotState::Uninitialized, SlotState::Initializing));
        assert_eq!(slot.state(), SlotState::Initializing);
    }

    #[test]
    fn test_state_round_trips_through_word() {
        let slot = Slot::new();
        for (from, to) in [
            (SlotState::Uninitialized, SlotState::Initializing),
            (SlotState::Initializing, SlotState::Armed),
            (SlotState::Armed, SlotState::Firing),
            (SlotState::Firing, SlotState::Stalled),
            (SlotState::Stalled, SlotState::Cancelled),
        ] {
            assert!(slot.try_transition(from, to));
            assert_eq!(slot.state(), to);
        }
    }

    #[test]
    fn test_increment_returns_pre_increment_value() {
        let slot = Slot::new();
        assert_eq!(slot.increment_call_count(), 0);
        assert_eq!(slot.increment_call_count(), 1);
        assert_eq!(slot.call_count(), 2);
    }

    #[test]
    fn test_handle_published_once() {
        let slot = Slot::new();
        let first = TimerHandle::new(SlotKey::new(0), ClockSource::Monotonic);
        let second = TimerHandle::new(SlotKey::new(0), ClockSource::Monotonic);

        slot.publish_handle(first);
        slot.publish_handle(second);

        assert_eq!(slot.handle(), Some(&first));
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = SlotSnapshot {
            key: SlotKey::new(0),
            state: SlotState::Armed,
            call_count: 3,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SlotSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}
