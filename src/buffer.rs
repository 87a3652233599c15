//! The shared, lock-guarded slot buffer.

use std::fmt;

use parking_lot::{Mutex, MutexGuard};

use crate::config::SlotBufferConfig;
use crate::error::Result;
use crate::table::SlotTable;

/// `IndexedSlotBuffer` is a `SlotTable` behind a single exclusive lock.
///
/// Every operation takes `&self`, so the buffer can be shared between
/// threads (for example in an `Arc`). Each call holds the lock for its whole
/// body and releases it on every exit path, error returns included. Calls
/// on one instance are therefore applied in lock acquisition order; there is
/// no reader/writer distinction and no fairness guarantee.
///
/// Lookups hand out clones. Code that needs to borrow elements in place uses
/// `with` or `lock`, where the borrow cannot outlive the guard and so cannot
/// observe a reallocation.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use slotbuffer::IndexedSlotBuffer;
///
/// let buffer = Arc::new(IndexedSlotBuffer::new());
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let buffer = Arc::clone(&buffer);
///         thread::spawn(move || buffer.append(i))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// let mut drained: Vec<_> = (0..4).map(|_| buffer.remove().unwrap()).collect();
/// drained.sort();
/// assert_eq!(drained, vec![0, 1, 2, 3]);
/// assert!(buffer.is_empty());
/// ```
pub struct IndexedSlotBuffer<T> {
    inner: Mutex<SlotTable<T>>,
}

impl<T> IndexedSlotBuffer<T> {
    /// Creates an empty buffer with the default capacity of 10 slots.
    pub fn new() -> IndexedSlotBuffer<T> {
        IndexedSlotBuffer::from(SlotTable::new())
    }

    /// Creates an empty buffer with `capacity` slots allocated.
    pub fn with_capacity(capacity: usize) -> IndexedSlotBuffer<T> {
        IndexedSlotBuffer::from(SlotTable::with_capacity(capacity))
    }

    /// Creates an empty buffer sized by `config`.
    pub fn with_config(config: SlotBufferConfig) -> Result<IndexedSlotBuffer<T>> {
        SlotTable::with_config(config).map(IndexedSlotBuffer::from)
    }

    /// Appends `value` at the tail, growing if the buffer is full.
    pub fn append(&self, value: T) {
        self.inner.lock().append(value)
    }

    /// Inserts `value` at logical position `index`.
    ///
    /// `index == len()` appends; `index > len()` fails with `OutOfRange` and
    /// changes nothing.
    pub fn insert(&self, index: usize, value: T) -> Result<()> {
        self.inner.lock().insert(index, value)
    }

    /// Removes and returns the head element.
    ///
    /// Fails with `OutOfRange` when the buffer is empty.
    pub fn remove(&self) -> Result<T> {
        self.inner.lock().remove()
    }

    /// Returns a clone of the element at logical position `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuffer::{IndexedSlotBuffer, SlotBufferError};
    ///
    /// let buffer = IndexedSlotBuffer::new();
    /// buffer.append(String::from("head"));
    /// assert_eq!(buffer.get(0).unwrap(), "head");
    /// assert_eq!(
    ///     buffer.get(1),
    ///     Err(SlotBufferError::OutOfRange { index: 1, len: 1 })
    /// );
    /// ```
    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.inner.lock().get(index).cloned()
    }

    /// Returns a clone of the element at a signed logical position.
    pub fn get_signed(&self, index: isize) -> Result<T>
    where
        T: Clone,
    {
        self.inner.lock().get_signed(index).cloned()
    }

    /// Runs `f` on the element at logical position `index` while the lock
    /// is held.
    ///
    /// Every other call on this buffer blocks until `f` returns. The lock is
    /// not reentrant: calling another method of this buffer from inside `f`
    /// deadlocks.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuffer::IndexedSlotBuffer;
    ///
    /// let buffer = IndexedSlotBuffer::new();
    /// buffer.append(vec![1, 2, 3]);
    /// assert_eq!(buffer.with(0, |v| v.len()), Ok(3));
    /// ```
    pub fn with<F, R>(&self, index: usize, f: F) -> Result<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock().get(index).map(f)
    }

    /// Returns the number of elements.
    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the buffer contains no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the number of physical slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Reallocates the buffer to hold `new_capacity` slots.
    ///
    /// Fails with `InvalidArgument` when `new_capacity` is below the current
    /// capacity.
    pub fn grow(&self, new_capacity: usize) -> Result<()> {
        self.inner.lock().grow(new_capacity)
    }

    /// Removes every element.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Copies the elements into a `Vec` in logical order, atomically with
    /// respect to other operations.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.lock().to_vec()
    }

    /// Acquires the lock for a batch of operations.
    ///
    /// Every other call on this buffer blocks until the guard is dropped.
    /// The lock is not reentrant: calling another method of this buffer on
    /// the same thread while holding the guard deadlocks.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuffer::IndexedSlotBuffer;
    ///
    /// let buffer = IndexedSlotBuffer::new();
    /// {
    ///     let mut table = buffer.lock();
    ///     table.append(2);
    ///     table.insert(0, 1).unwrap();
    ///     assert_eq!(table[0] + table[1], 3);
    /// }
    /// assert_eq!(buffer.len(), 2);
    /// ```
    pub fn lock(&self) -> MutexGuard<'_, SlotTable<T>> {
        self.inner.lock()
    }

    /// Returns a mutable reference to the table without locking.
    pub fn table_mut(&mut self) -> &mut SlotTable<T> {
        self.inner.get_mut()
    }

    /// Consumes the buffer, returning the table.
    pub fn into_inner(self) -> SlotTable<T> {
        self.inner.into_inner()
    }
}

impl<T> From<SlotTable<T>> for IndexedSlotBuffer<T> {
    fn from(table: SlotTable<T>) -> IndexedSlotBuffer<T> {
        IndexedSlotBuffer {
            inner: Mutex::new(table),
        }
    }
}

impl<T> Default for IndexedSlotBuffer<T> {
    fn default() -> IndexedSlotBuffer<T> {
        IndexedSlotBuffer::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for IndexedSlotBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut d = f.debug_struct("IndexedSlotBuffer");
        match self.inner.try_lock() {
            Some(table) => d.field("data", &*table),
            None => d.field("data", &format_args!("<locked>")),
        };
        d.finish()
    }
}
