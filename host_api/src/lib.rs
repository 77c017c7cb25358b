//! # Host API
//!
//! This crate defines the interface between the timer registry and the
//! scheduling host that tracks armed timers and delivers expiries.
//!
//! ## Philosophy
//!
//! The host provides **mechanisms**, not policies:
//! - Timer creation bound to a clock source (not periodic schedules)
//! - One-shot arming (repetition is the registry's business)
//! - Expiry delivery as explicit events (not reentrant callbacks)
//!
//! ## Design Goals
//!
//! 1. **Testability**: The entire surface can be implemented by a
//!    deterministic simulator and exercised under `cargo test`
//! 2. **Explicitness**: The host is passed into every operation that needs
//!    it; there is no ambient scheduler
//! 3. **Type safety**: Handles, keys, and clock sources are distinct types
//! 4. **Simplicity**: Minimal surface area
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A wall-clock time service (no UTC, no timezones)
//! - A periodic-timer API (the host only ever arms one shot at a time)
//! - A specific transport (the trait can be implemented many ways)

pub mod error;
pub mod host;
pub mod time;

pub use error::HostError;
pub use host::{ClockSource, ExpiryEvent, HandleId, HostScheduler, TimerHandle};
pub use time::{Duration, Instant};
