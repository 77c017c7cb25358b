//! Timer Test Utilities
//!
//! This crate provides shared utilities for registry integration tests.
//!
//! ## Test Philosophy
//!
//! - **Deterministic time**: every scenario drives the simulated host's
//!   clock explicitly; nothing depends on the machine the tests run on
//! - **Faults are data**: failure scenarios are expressed as a `FaultPlan`,
//!   so a stall on exactly the k-th expiry is reproducible
//! - **Assert on the log**: the structured log stream is part of the
//!   registry's contract; scenarios check it through the memory sink

use host_api::Duration;
use services_logger::{LogSink, MemoryLog};
use services_timer_registry::{SlotStore, TimerController};
use sim_host::{FaultPlan, SimScheduler};
use std::sync::Arc;

/// Bootstrap helper for tests
///
/// Creates a simulated host, a controller over a fresh store, and the
/// memory sink the controller logs into.
pub fn test_bootstrap(
    capacity: usize,
    period: Duration,
) -> (SimScheduler, TimerController, Arc<MemoryLog>) {
    test_bootstrap_with_plan(capacity, period, FaultPlan::new())
}

/// Bootstrap helper with fault injection
pub fn test_bootstrap_with_plan(
    capacity: usize,
    period: Duration,
    plan: FaultPlan,
) -> (SimScheduler, TimerController, Arc<MemoryLog>) {
    let log = Arc::new(MemoryLog::new());
    let controller = TimerController::new(
        SlotStore::with_capacity(capacity),
        period,
        Arc::clone(&log) as Arc<dyn LogSink>,
    );
    (SimScheduler::with_fault_plan(plan), controller, log)
}

/// Advances the host by `delta`, `steps` times, routing every expiry into
/// the controller as it comes due
pub fn pump(
    host: &mut SimScheduler,
    controller: &TimerController,
    steps: usize,
    delta: Duration,
) {
    for _ in 0..steps {
        for event in host.advance(delta) {
            controller.on_expiry(host, event.key);
        }
    }
}
