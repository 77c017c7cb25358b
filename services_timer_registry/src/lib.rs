//! # Timer Registry Service
//!
//! A fixed-capacity registry of repeating timers: each slot owns at most one
//! host-scheduled timer and a monotonically increasing tick counter.
//!
//! ## Philosophy
//!
//! - **Initialize once**: a slot's timer is created exactly once; duplicate
//!   `start` requests are benign, never duplicating registration
//! - **Repetition by re-arm**: the host only ever arms one shot; the expiry
//!   path re-arms itself for the next period
//! - **No hidden state**: the store is an explicit object with injected
//!   capacity, passed to the controller at construction
//! - **Never panic across the pump**: the expiry path resolves every
//!   failure into a log entry and a state transition
//! - **Observable, not chatty**: stalls are silent in the API; detecting
//!   them is what [`TimerController::snapshot`] is for
//!
//! ## Example
//!
//! ```
//! use host_api::Duration;
//! use services_logger::MemoryLog;
//! use services_timer_registry::{SlotStore, TimerController};
//! use sim_host::SimScheduler;
//! use std::sync::Arc;
//! use timer_types::{SlotKey, StartOutcome};
//!
//! let mut host = SimScheduler::new();
//! let controller = TimerController::new(
//!     SlotStore::with_capacity(1),
//!     Duration::from_millis(1000),
//!     Arc::new(MemoryLog::new()),
//! );
//!
//! let outcome = controller.start(&mut host, SlotKey::new(0)).unwrap();
//! assert_eq!(outcome, StartOutcome::Started);
//!
//! for event in host.advance(Duration::from_millis(1000)) {
//!     controller.on_expiry(&mut host, event.key);
//! }
//! assert_eq!(controller.call_count(SlotKey::new(0)).unwrap(), 1);
//! ```

pub mod controller;
pub mod error;
pub mod slot;
pub mod store;

pub use controller::{RegistryConfig, TimerController};
pub use error::TimerError;
pub use slot::SlotSnapshot;
pub use store::SlotStore;
