//! # Cadence Host Daemon
//!
//! This crate provides the host runtime for the Cadence timer registry.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: library components never print; the daemon renders
//!   the structured log stream to the console
//! - **Deterministic mode is first-class**: the runtime drives the
//!   simulated host's virtual clock, so a run is reproducible
//! - **Explicit configuration**: slot count, tick period, and run length
//!   come from the command line, not from ambient state
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Constructs the simulated host, the registry, and the console sink
//! - Starts every configured slot
//! - Advances virtual time one period per step, pumping expiries into the
//!   registry
//! - Reports final slot snapshots when the run completes
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Expose a control protocol (run length is fixed up front)
//! - Persist anything (slot state is process-lifetime only)
//! - Recover stalled slots (stalls are reported, not repaired)

pub mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeError};
