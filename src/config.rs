//! Construction parameters for slot buffers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotBufferError};

/// Capacity used by `SlotTable::new` and `IndexedSlotBuffer::new`.
pub const DEFAULT_CAPACITY: usize = 10;

/// Multiplier applied to the capacity when an append finds the buffer full.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Sizing parameters for a slot buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotBufferConfig {
    /// Number of slots allocated up front.
    pub initial_capacity: usize,
    /// Capacity multiplier for automatic growth. Must be at least 2.
    pub growth_factor: usize,
}

impl Default for SlotBufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl SlotBufferConfig {
    /// Sets the initial capacity.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the growth factor.
    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Checks that automatic growth can always make room.
    pub fn validate(&self) -> Result<()> {
        if self.growth_factor < 2 {
            return Err(SlotBufferError::InvalidConfig(
                "growth factor must be at least 2",
            ));
        }
        Ok(())
    }

    /// Capacity to grow to when a buffer of `capacity` slots is full.
    ///
    /// A zero-capacity buffer grows to a single slot.
    #[inline]
    pub(crate) fn next_capacity(&self, capacity: usize) -> usize {
        capacity
            .saturating_mul(self.growth_factor)
            .max(capacity.saturating_add(1))
    }
}
