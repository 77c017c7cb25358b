//! The slot store

use crate::error::TimerError;
use crate::slot::Slot;
use timer_types::SlotKey;

/// Fixed-capacity table of slots
///
/// All slots are allocated up front; lookups can fail only on an
/// out-of-range key, never from resource exhaustion. There is no insertion
/// and no removal; a slot's internal state is the only thing that changes
/// over its lifetime.
pub struct SlotStore {
    slots: Box<[Slot]>,
}

impl SlotStore {
    /// Creates a store with `capacity` pre-allocated slots
    pub fn with_capacity(capacity: usize) -> Self {
        let slots: Vec<Slot> = (0..capacity).map(|_| Slot::new()).collect();
        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    /// Looks up a slot; the key must be in `[0, capacity)`
    pub(crate) fn get(&self, key: SlotKey) -> Result<&Slot, TimerError> {
        self.slots.get(key.index()).ok_or(TimerError::SlotNotFound {
            key,
            capacity: self.slots.len(),
        })
    }

    /// Returns the number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
