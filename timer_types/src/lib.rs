//! # Timer Types
//!
//! This crate defines the fundamental types used throughout Cadence.
//!
//! ## Philosophy
//!
//! Core types are designed with these principles:
//! - **Explicit over implicit**: Slot addressing and slot states are typed
//!   and cannot be confused with bare integers.
//! - **Type safety first**: The type system prevents misuse at compile time.
//! - **Shared vocabulary**: Every crate in the workspace speaks in these
//!   types, so the registry, the host seam, and the tests cannot drift.
//!
//! ## Key Types
//!
//! - [`SlotKey`]: Index of a slot in the registry's fixed-capacity store
//! - [`SlotState`]: The per-slot lifecycle state machine value
//! - [`StartOutcome`]: The benign result of a `start` request

pub mod slot_key;
pub mod state;

pub use slot_key::SlotKey;
pub use state::{SlotState, StartOutcome};

/// Default tick period in milliseconds.
///
/// A freshly armed timer fires once per second unless the registry is
/// configured otherwise.
pub const DEFAULT_TICK_PERIOD_MS: u64 = 1_000;
