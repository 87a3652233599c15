//! Error values reported by `SlotTable` and `IndexedSlotBuffer`.

use thiserror::Error;

/// Result type alias using `SlotBufferError`.
pub type Result<T> = std::result::Result<T, SlotBufferError>;

/// Errors that can occur in slot buffer operations.
///
/// A failing operation never mutates the buffer: every check runs before the
/// first write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotBufferError {
    /// The logical index is outside the valid range for the operation.
    ///
    /// Removing from an empty buffer reports `index: 0, len: 0`.
    #[error("index out of range: the len is {len} but the index is {index}")]
    OutOfRange {
        /// The offending logical index.
        index: usize,
        /// The element count at the time of the call.
        len: usize,
    },

    /// A signed index below zero.
    #[error("index out of range: the len is {len} but the index is {index}")]
    NegativeIndex {
        /// The offending signed index.
        index: isize,
        /// The element count at the time of the call.
        len: usize,
    },

    /// Explicit growth to a capacity smaller than the current one.
    #[error("invalid argument: cannot grow to {requested}, capacity is already {capacity}")]
    InvalidArgument {
        /// The capacity the caller asked for.
        requested: usize,
        /// The capacity at the time of the call.
        capacity: usize,
    },

    /// A configuration value that fails validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl SlotBufferError {
    /// Returns true for every out-of-range condition, signed or not.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            SlotBufferError::OutOfRange { .. } | SlotBufferError::NegativeIndex { .. }
        )
    }
}
