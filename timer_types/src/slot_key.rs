//! Slot addressing

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a slot in the registry's fixed-capacity store
///
/// Slots are addressed by position, not by identity: a key is valid when it
/// falls in `[0, capacity)` for the store it is presented to. Keys carry no
/// authority by themselves; out-of-range keys are rejected by the store at
/// lookup time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SlotKey(u32);

impl SlotKey {
    /// Creates a slot key from a raw index
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns the key as a store index
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for SlotKey {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot:{}", self.0)
    }
}
