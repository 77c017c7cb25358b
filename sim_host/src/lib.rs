//! # Simulated Host Scheduler
//!
//! Deterministic [`HostScheduler`] implementation for testing and demos.
//!
//! ## Philosophy
//!
//! **Determinism enables thorough testing.**
//!
//! This host provides controllable, deterministic time progression. Unlike
//! a real scheduling host, time only advances when explicitly told to do so,
//! and expiries are handed back as an ordered batch of events instead of
//! being delivered on an uncontrollable context.
//!
//! ## Use Cases
//!
//! - Unit and integration tests that need predictable expiry timing
//! - Fault injection scenarios (rejected init, bind, or arm requests)
//! - Driving the demo daemon without real timers
//!
//! ## Example
//!
//! ```
//! use host_api::{ClockSource, Duration, HostScheduler};
//! use sim_host::SimScheduler;
//! use timer_types::SlotKey;
//!
//! let mut host = SimScheduler::new();
//! let handle = host.init_timer(SlotKey::new(0), ClockSource::Monotonic).unwrap();
//! host.bind_callback(&handle).unwrap();
//! host.arm(&handle, Duration::from_millis(1000)).unwrap();
//!
//! let events = host.advance(Duration::from_millis(1000));
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].key, SlotKey::new(0));
//! ```

pub mod fault_injection;

pub use fault_injection::{FaultPlan, TimerFault};

use host_api::{
    ClockSource, Duration, ExpiryEvent, HandleId, HostError, HostScheduler, Instant, TimerHandle,
};
use std::collections::HashMap;
use timer_types::SlotKey;

/// Host-side record for one issued handle
#[derive(Debug, Clone)]
struct HandleRecord {
    key: SlotKey,
    bound: bool,
}

/// One pending deadline
#[derive(Debug, Clone)]
struct ArmedEntry {
    handle: HandleId,
    key: SlotKey,
    deadline: Instant,
    sequence: u64,
}

/// Simulated host scheduler with controllable time progression
///
/// The virtual clock starts at zero and only moves in [`SimScheduler::advance`].
/// Expiries due by the new time are returned in deadline order, ties broken
/// by arm order, so the same sequence of calls always produces the same
/// event stream.
#[derive(Debug)]
pub struct SimScheduler {
    /// Current virtual time
    now: Instant,
    /// Issued handles, by identity
    handles: HashMap<HandleId, HandleRecord>,
    /// Live handle per slot, to enforce single ownership
    by_key: HashMap<SlotKey, HandleId>,
    /// Pending deadlines
    armed: Vec<ArmedEntry>,
    /// Arm requests accepted so far; doubles as the delivery tie-breaker
    accepted_arms: u64,
    /// Faults to inject
    fault_plan: FaultPlan,
}

impl Default for SimScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SimScheduler {
    /// Creates a simulated host with virtual time at zero and no faults
    pub fn new() -> Self {
        Self {
            now: Instant::from_nanos(0),
            handles: HashMap::new(),
            by_key: HashMap::new(),
            armed: Vec::new(),
            accepted_arms: 0,
            fault_plan: FaultPlan::new(),
        }
    }

    /// Creates a simulated host that injects the given fault plan
    pub fn with_fault_plan(plan: FaultPlan) -> Self {
        Self {
            fault_plan: plan,
            ..Self::new()
        }
    }

    /// Replaces the fault plan mid-scenario
    ///
    /// Lets a test run a healthy warm-up phase and then inject faults at a
    /// chosen point in virtual time.
    pub fn set_fault_plan(&mut self, plan: FaultPlan) {
        self.fault_plan = plan;
    }

    /// Advances virtual time and returns the expiries that came due
    ///
    /// Events are ordered by deadline, then by arm order. A returned entry
    /// is no longer armed: repetition only happens if the receiver re-arms.
    /// Deadlines landing exactly on the new time are considered due.
    pub fn advance(&mut self, delta: Duration) -> Vec<ExpiryEvent> {
        self.now = self.now + delta;
        let now = self.now;

        let mut due: Vec<ArmedEntry> = Vec::new();
        self.armed.retain(|entry| {
            if entry.deadline <= now {
                due.push(entry.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| (entry.deadline, entry.sequence));

        due.into_iter()
            .map(|entry| ExpiryEvent {
                key: entry.key,
                deadline: entry.deadline,
                sequence: entry.sequence,
            })
            .collect()
    }

    /// Returns the number of currently armed timers
    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Returns the number of arm requests accepted so far
    pub fn accepted_arms(&self) -> u64 {
        self.accepted_arms
    }

    /// Returns the number of live handles
    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }
}

impl HostScheduler for SimScheduler {
    fn init_timer(&mut self, key: SlotKey, clock: ClockSource) -> Result<TimerHandle, HostError> {
        if self.fault_plan.take_init_fault() {
            return Err(HostError::Exhausted("injected init fault".to_string()));
        }
        if self.by_key.contains_key(&key) {
            return Err(HostError::Busy);
        }

        let handle = TimerHandle::new(key, clock);
        self.handles.insert(handle.id, HandleRecord { key, bound: false });
        self.by_key.insert(key, handle.id);
        Ok(handle)
    }

    fn bind_callback(&mut self, handle: &TimerHandle) -> Result<(), HostError> {
        if self.fault_plan.take_bind_fault() {
            return Err(HostError::RegistrationRejected(
                "injected bind fault".to_string(),
            ));
        }
        let record = self
            .handles
            .get_mut(&handle.id)
            .ok_or(HostError::InvalidHandle)?;
        record.bound = true;
        Ok(())
    }

    fn arm(&mut self, handle: &TimerHandle, delay: Duration) -> Result<(), HostError> {
        let record = self.handles.get(&handle.id).ok_or(HostError::InvalidHandle)?;
        if !record.bound {
            return Err(HostError::RegistrationRejected(
                "handle has no bound callback".to_string(),
            ));
        }
        if self.fault_plan.take_arm_fault(self.accepted_arms) {
            return Err(HostError::Exhausted("injected arm fault".to_string()));
        }

        // Re-arming replaces any deadline still pending for this handle.
        self.armed.retain(|entry| entry.handle != handle.id);
        self.accepted_arms += 1;
        self.armed.push(ArmedEntry {
            handle: handle.id,
            key: record.key,
            deadline: self.now + delay,
            sequence: self.accepted_arms,
        });
        Ok(())
    }

    fn disarm(&mut self, handle: &TimerHandle) -> Result<bool, HostError> {
        if !self.handles.contains_key(&handle.id) {
            return Err(HostError::InvalidHandle);
        }
        let before = self.armed.len();
        self.armed.retain(|entry| entry.handle != handle.id);
        Ok(self.armed.len() != before)
    }

    fn release(&mut self, handle: &TimerHandle) -> Result<(), HostError> {
        let record = self
            .handles
            .remove(&handle.id)
            .ok_or(HostError::InvalidHandle)?;
        self.by_key.remove(&record.key);
        self.armed.retain(|entry| entry.handle != handle.id);
        Ok(())
    }

    fn now(&self) -> Instant {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed_handle(host: &mut SimScheduler, key: u32, delay_ms: u64) -> TimerHandle {
        let handle = host
            .init_timer(SlotKey::new(key), ClockSource::Monotonic)
            .unwrap();
        host.bind_callback(&handle).unwrap();
        host.arm(&handle, Duration::from_millis(delay_ms)).unwrap();
        handle
    }

    #[test]
    fn test_time_starts_at_zero() {
        let host = SimScheduler::new();
        assert_eq!(host.now(), Instant::from_nanos(0));
    }

    #[test]
    fn test_advance_moves_clock() {
        let mut host = SimScheduler::new();
        host.advance(Duration::from_millis(250));
        assert_eq!(host.now(), Instant::from_nanos(250_000_000));
    }

    #[test]
    fn test_expiry_delivered_at_deadline() {
        let mut host = SimScheduler::new();
        armed_handle(&mut host, 0, 1000);

        assert!(host.advance(Duration::from_millis(999)).is_empty());
        let events = host.advance(Duration::from_millis(1));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key, SlotKey::new(0));
        assert_eq!(events[0].deadline, Instant::from_nanos(1_000_000_000));
    }

    #[test]
    fn test_one_shot_not_redelivered() {
        let mut host = SimScheduler::new();
        armed_handle(&mut host, 0, 1000);

        assert_eq!(host.advance(Duration::from_millis(1000)).len(), 1);
        assert!(host.advance(Duration::from_millis(5000)).is_empty());
        assert_eq!(host.armed_count(), 0);
    }

    #[test]
    fn test_events_ordered_by_deadline_then_arm_order() {
        let mut host = SimScheduler::new();
        armed_handle(&mut host, 0, 2000);
        armed_handle(&mut host, 1, 1000);
        armed_handle(&mut host, 2, 1000);

        let events = host.advance(Duration::from_millis(2000));
        let keys: Vec<SlotKey> = events.iter().map(|e| e.key).collect();
        assert_eq!(
            keys,
            vec![SlotKey::new(1), SlotKey::new(2), SlotKey::new(0)]
        );
    }

    #[test]
    fn test_second_init_for_slot_is_busy() {
        let mut host = SimScheduler::new();
        host.init_timer(SlotKey::new(0), ClockSource::Monotonic)
            .unwrap();
        let err = host
            .init_timer(SlotKey::new(0), ClockSource::Monotonic)
            .unwrap_err();
        assert_eq!(err, HostError::Busy);
    }

    #[test]
    fn test_arm_requires_bound_callback() {
        let mut host = SimScheduler::new();
        let handle = host
            .init_timer(SlotKey::new(0), ClockSource::Monotonic)
            .unwrap();
        let err = host.arm(&handle, Duration::from_millis(100)).unwrap_err();
        assert!(matches!(err, HostError::RegistrationRejected(_)));
    }

    #[test]
    fn test_rearm_replaces_pending_deadline() {
        let mut host = SimScheduler::new();
        let handle = armed_handle(&mut host, 0, 1000);

        host.arm(&handle, Duration::from_millis(3000)).unwrap();
        assert_eq!(host.armed_count(), 1);

        assert!(host.advance(Duration::from_millis(1000)).is_empty());
        assert_eq!(host.advance(Duration::from_millis(2000)).len(), 1);
    }

    #[test]
    fn test_disarm_reports_whether_pending() {
        let mut host = SimScheduler::new();
        let handle = armed_handle(&mut host, 0, 1000);

        assert!(host.disarm(&handle).unwrap());
        assert!(!host.disarm(&handle).unwrap());
        assert!(host.advance(Duration::from_millis(1000)).is_empty());
    }

    #[test]
    fn test_release_frees_the_slot() {
        let mut host = SimScheduler::new();
        let handle = armed_handle(&mut host, 0, 1000);

        host.release(&handle).unwrap();
        assert_eq!(host.handle_count(), 0);
        assert_eq!(host.armed_count(), 0);

        // The slot can be initialized again after a release.
        host.init_timer(SlotKey::new(0), ClockSource::Monotonic)
            .unwrap();
    }

    #[test]
    fn test_operations_on_released_handle_fail() {
        let mut host = SimScheduler::new();
        let handle = armed_handle(&mut host, 0, 1000);
        host.release(&handle).unwrap();

        assert_eq!(host.bind_callback(&handle), Err(HostError::InvalidHandle));
        assert_eq!(
            host.arm(&handle, Duration::from_millis(1)),
            Err(HostError::InvalidHandle)
        );
        assert_eq!(host.disarm(&handle), Err(HostError::InvalidHandle));
        assert_eq!(host.release(&handle), Err(HostError::InvalidHandle));
    }

    #[test]
    fn test_injected_init_fault() {
        let plan = FaultPlan::new().with_fault(TimerFault::RejectInit { count: 1 });
        let mut host = SimScheduler::with_fault_plan(plan);

        assert!(host
            .init_timer(SlotKey::new(0), ClockSource::Monotonic)
            .is_err());
        // The fault is consumed; the next attempt succeeds.
        assert!(host
            .init_timer(SlotKey::new(0), ClockSource::Monotonic)
            .is_ok());
    }

    #[test]
    fn test_injected_arm_fault_after_accepted() {
        let plan = FaultPlan::new().with_fault(TimerFault::RejectArmAfter { accepted: 1 });
        let mut host = SimScheduler::with_fault_plan(plan);

        let handle = host
            .init_timer(SlotKey::new(0), ClockSource::Monotonic)
            .unwrap();
        host.bind_callback(&handle).unwrap();

        assert!(host.arm(&handle, Duration::from_millis(1000)).is_ok());
        assert!(host.arm(&handle, Duration::from_millis(1000)).is_err());
        assert_eq!(host.accepted_arms(), 1);
    }

    #[test]
    fn test_deterministic_event_stream() {
        let run = || {
            let mut host = SimScheduler::new();
            armed_handle(&mut host, 0, 500);
            armed_handle(&mut host, 1, 1500);
            let mut sequences = Vec::new();
            for _ in 0..4 {
                for event in host.advance(Duration::from_millis(500)) {
                    sequences.push((event.key, event.sequence));
                }
            }
            sequences
        };

        assert_eq!(run(), run());
    }
}
