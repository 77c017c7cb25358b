//! The timer controller

use crate::error::TimerError;
use crate::slot::SlotSnapshot;
use crate::store::SlotStore;
use host_api::{ClockSource, Duration, HostScheduler};
use serde::{Deserialize, Serialize};
use services_logger::{LogEntry, LogLevel, LogSink};
use std::sync::Arc;
use timer_types::{SlotKey, SlotState, StartOutcome, DEFAULT_TICK_PERIOD_MS};

/// Registry construction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Number of slots in the store
    pub capacity: usize,
    /// Fixed period every timer is armed and re-armed with
    pub tick_period: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity: 1,
            tick_period: Duration::from_millis(DEFAULT_TICK_PERIOD_MS),
        }
    }
}

/// The timer controller
///
/// Owns the slot store and drives each slot's lifecycle: `start` performs
/// the once-only initialize-and-arm, `on_expiry` counts a tick and re-arms,
/// `cancel` retires a slot. The scheduling host is passed into every
/// operation that talks to it; the controller holds no ambient scheduler.
///
/// All methods take `&self`: the controller can sit behind an `Arc` and be
/// called from multiple threads. Coordination is per-slot and lock-free;
/// see [`crate::slot`].
pub struct TimerController {
    store: SlotStore,
    tick_period: Duration,
    log: Arc<dyn LogSink>,
}

impl TimerController {
    /// Creates a controller over an explicitly constructed store
    pub fn new(store: SlotStore, tick_period: Duration, log: Arc<dyn LogSink>) -> Self {
        Self {
            store,
            tick_period,
            log,
        }
    }

    /// Creates a controller and its store from a config
    pub fn from_config(config: &RegistryConfig, log: Arc<dyn LogSink>) -> Self {
        Self::new(SlotStore::with_capacity(config.capacity), config.tick_period, log)
    }

    /// Returns the store capacity
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns the fixed tick period
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Initializes and arms a slot's timer, exactly once
    ///
    /// Idempotent: the first caller to claim an `Uninitialized` slot does
    /// the host work; everyone else gets
    /// [`StartOutcome::AlreadyInitialized`] without touching the host. If
    /// the host rejects any step, the slot rolls back to `Uninitialized`
    /// and the caller may simply retry.
    pub fn start<H: HostScheduler>(
        &self,
        host: &mut H,
        key: SlotKey,
    ) -> Result<StartOutcome, TimerError> {
        let slot = self.store.get(key)?;

        if !slot.try_transition(SlotState::Uninitialized, SlotState::Initializing) {
            self.log.log(
                LogEntry::new(LogLevel::Info, "timer.duplicate_start")
                    .with_source(key)
                    .with_field("state", slot.state().to_string()),
            );
            return Ok(StartOutcome::AlreadyInitialized);
        }

        let handle = match host.init_timer(key, ClockSource::Monotonic) {
            Ok(handle) => handle,
            Err(err) => {
                slot.try_transition(SlotState::Initializing, SlotState::Uninitialized);
                self.log.log(
                    LogEntry::new(LogLevel::Error, "timer.init_failed")
                        .with_source(key)
                        .with_field("error", err.to_string()),
                );
                return Err(TimerError::CallbackRegistrationFailed(err));
            }
        };

        if let Err(err) = host.bind_callback(&handle) {
            // Drop the host-side record before releasing the claim, so a
            // retry cannot run into a Busy rejection.
            let _ = host.release(&handle);
            slot.try_transition(SlotState::Initializing, SlotState::Uninitialized);
            self.log.log(
                LogEntry::new(LogLevel::Error, "timer.bind_failed")
                    .with_source(key)
                    .with_field("error", err.to_string()),
            );
            return Err(TimerError::CallbackRegistrationFailed(err));
        }

        if let Err(err) = host.arm(&handle, self.tick_period) {
            let _ = host.release(&handle);
            slot.try_transition(SlotState::Initializing, SlotState::Uninitialized);
            self.log.log(
                LogEntry::new(LogLevel::Error, "timer.arm_failed")
                    .with_source(key)
                    .with_field("error", err.to_string()),
            );
            return Err(TimerError::ArmFailed(err));
        }

        slot.publish_handle(handle);
        slot.try_transition(SlotState::Initializing, SlotState::Armed);
        self.log.log(
            LogEntry::new(LogLevel::Info, "timer.started")
                .with_source(key)
                .with_field("period_ms", self.tick_period.as_millis().to_string()),
        );
        Ok(StartOutcome::Started)
    }

    /// Handles one delivered expiry: count the tick, re-arm for the next
    ///
    /// Invoked by the event pump, not by user code. Never panics and never
    /// returns an error: a rejected re-arm is logged and parks the slot in
    /// `Stalled`, silently ending the tick sequence. An expiry for a slot
    /// that is no longer `Armed` (cancelled or stalled in the delivery gap)
    /// is discarded without counting.
    pub fn on_expiry<H: HostScheduler>(&self, host: &mut H, key: SlotKey) {
        let slot = match self.store.get(key) {
            Ok(slot) => slot,
            Err(_) => {
                self.log.log(
                    LogEntry::new(LogLevel::Warn, "timer.unknown_slot")
                        .with_source(key)
                        .with_field("capacity", self.store.capacity().to_string()),
                );
                return;
            }
        };

        if !slot.try_transition(SlotState::Armed, SlotState::Firing) {
            self.log.log(
                LogEntry::new(LogLevel::Warn, "timer.stale_expiry")
                    .with_source(key)
                    .with_field("state", slot.state().to_string()),
            );
            return;
        }

        let previous = slot.increment_call_count();
        self.log.log(
            LogEntry::new(LogLevel::Info, "timer.tick")
                .with_source(key)
                .with_field("count", previous.to_string()),
        );

        let handle = match slot.handle() {
            Some(handle) => handle,
            None => {
                // An Armed slot always has a published handle; if it does
                // not, park it rather than panic in the pump.
                slot.try_transition(SlotState::Firing, SlotState::Stalled);
                self.log.log(
                    LogEntry::new(LogLevel::Error, "timer.missing_handle").with_source(key),
                );
                return;
            }
        };

        match host.arm(handle, self.tick_period) {
            Ok(()) => {
                if !slot.try_transition(SlotState::Firing, SlotState::Armed) {
                    // A cancel landed mid-flight; drop the arm we just made.
                    let _ = host.disarm(handle);
                    self.log.log(
                        LogEntry::new(LogLevel::Info, "timer.cancelled_in_flight")
                            .with_source(key),
                    );
                }
            }
            Err(err) => {
                if slot.try_transition(SlotState::Firing, SlotState::Stalled) {
                    self.log.log(
                        LogEntry::new(LogLevel::Error, "timer.stalled")
                            .with_source(key)
                            .with_field("error", err.to_string()),
                    );
                }
                // Transition refused means a cancel won the slot mid-flight;
                // the cancel path already logged.
            }
        }
    }

    /// Cancels a slot's timer
    ///
    /// Terminal: a cancelled slot never ticks again and cannot be
    /// restarted. Cancelling an already cancelled slot is a no-op;
    /// cancelling a slot that never armed is [`TimerError::NotArmed`].
    pub fn cancel<H: HostScheduler>(&self, host: &mut H, key: SlotKey) -> Result<(), TimerError> {
        let slot = self.store.get(key)?;

        loop {
            let state = slot.state();
            match state {
                SlotState::Uninitialized | SlotState::Initializing => {
                    return Err(TimerError::NotArmed(key));
                }
                SlotState::Cancelled => return Ok(()),
                SlotState::Armed | SlotState::Firing | SlotState::Stalled => {
                    if slot.try_transition(state, SlotState::Cancelled) {
                        if let Some(handle) = slot.handle() {
                            let _ = host.disarm(handle);
                        }
                        self.log.log(
                            LogEntry::new(LogLevel::Info, "timer.cancelled")
                                .with_source(key)
                                .with_field("was", state.to_string()),
                        );
                        return Ok(());
                    }
                    // The state moved under us (an expiry claimed the slot,
                    // say); re-read and try again.
                }
            }
        }
    }

    /// Ticks delivered to a slot so far
    pub fn call_count(&self, key: SlotKey) -> Result<u64, TimerError> {
        Ok(self.store.get(key)?.call_count())
    }

    /// Current lifecycle state of a slot
    pub fn slot_state(&self, key: SlotKey) -> Result<SlotState, TimerError> {
        Ok(self.store.get(key)?.state())
    }

    /// Point-in-time view of a slot
    pub fn snapshot(&self, key: SlotKey) -> Result<SlotSnapshot, TimerError> {
        let slot = self.store.get(key)?;
        Ok(SlotSnapshot {
            key,
            state: slot.state(),
            call_count: slot.call_count(),
        })
    }
}
