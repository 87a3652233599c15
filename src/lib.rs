//! An indexed sequence over fixed physical slots.
//!
//! Values are stored once in a payload array and never move. Logical order
//! is kept in a separate order map from position to physical slot, and a
//! free-slot stack hands out unused slots, most recently freed first.
//!
//! Appending and positional lookup are `O(1)` (appends amortized over
//! growth). Inserting at a position shifts order map entries after it.
//! Removal always takes the head and compacts the order map, so it is
//! `O(len)`: this is not a wrap-around ring.
//!
//! Two types are provided:
//!
//! - [`SlotTable`] is the unsynchronized storage. Its references are bound
//!   to the table's borrow, so a reallocation can never leave one dangling.
//! - [`IndexedSlotBuffer`] wraps a `SlotTable` in one exclusive lock and
//!   takes `&self` everywhere, for sharing across threads. Lookups return
//!   clones.
//!
//! # Capacity
//!
//! Both types start with 10 slots unless told otherwise. When an append or
//! insert finds every slot claimed, all backing arrays are reallocated at
//! twice the capacity (see [`SlotBufferConfig`]). `grow` reallocates to an
//! explicit capacity; there is no way to shrink.
//!
//! # Feature Flags
//!
//! - `serde`
//!   - Optional
//!   - Derives `Serialize` and `Deserialize` for `SlotBufferConfig`.
//!
//! # Logging
//!
//! Growth is reported through `tracing` at `DEBUG`, slot claims and releases
//! at `TRACE`. Errors are returned, never logged.
//!
//! # Examples
//! ```
//! use slotbuffer::{SlotBufferError, SlotTable};
//!
//! let mut table = SlotTable::new();
//! table.append(12);
//! table.append(1234);
//! table.append(123);
//! table.insert(2, 321).unwrap();
//!
//! assert_eq!(table.remove(), Ok(12));
//! assert_eq!(table.get(0), Ok(&1234));
//! assert_eq!(table.get(1), Ok(&321));
//! assert_eq!(
//!     table.get(3),
//!     Err(SlotBufferError::OutOfRange { index: 3, len: 3 })
//! );
//! ```
//!
//! # Sharing
//! ```
//! use std::sync::Arc;
//!
//! use slotbuffer::IndexedSlotBuffer;
//!
//! let buffer = Arc::new(IndexedSlotBuffer::with_capacity(2));
//! let writer = {
//!     let buffer = Arc::clone(&buffer);
//!     std::thread::spawn(move || {
//!         for i in 0..5 {
//!             buffer.append(i);
//!         }
//!     })
//! };
//! writer.join().unwrap();
//!
//! assert_eq!(buffer.len(), 5);
//! assert_eq!(buffer.capacity(), 8);
//! assert_eq!(buffer.get(4), Ok(4));
//! ```

#![deny(missing_docs)]

mod buffer;
mod config;
pub mod error;
mod free_slots;
mod table;

pub use buffer::IndexedSlotBuffer;
pub use config::{SlotBufferConfig, DEFAULT_CAPACITY, DEFAULT_GROWTH_FACTOR};
pub use error::{Result, SlotBufferError};
pub use table::{IntoIter, Iter, SlotTable};
