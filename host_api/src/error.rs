//! Host-reported failures

use thiserror::Error;

/// Errors the scheduling host can report for timer requests
///
/// These are the host's words, not the registry's: the registry maps them
/// into its own error taxonomy before surfacing anything to a caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// A timer already exists for this slot
    #[error("a timer already exists for this slot")]
    Busy,

    /// The host cannot accept the request right now
    #[error("host scheduler cannot accept the request: {0}")]
    Exhausted(String),

    /// The host refused to route expiries for this handle
    #[error("expiry routing rejected: {0}")]
    RegistrationRejected(String),

    /// The handle is unknown to the host or was released
    #[error("unknown or released timer handle")]
    InvalidHandle,
}
