use tracing::{debug, trace};

use crate::config::{SlotBufferConfig, DEFAULT_CAPACITY};
use crate::error::{Result, SlotBufferError};
use crate::free_slots::FreeSlots;

mod iterator_impls;
mod trait_impls;

/// Order map entry past the logical end.
const UNUSED: usize = usize::MAX;

/// `SlotTable` is a growable indexed sequence over fixed physical slots.
///
/// Values live in a payload array and never move once stored. A separate
/// order map translates each logical position to the physical slot holding
/// it, and a free-slot stack hands out slots that are not referenced by the
/// order map. Appending and positional lookup are `O(1)`; inserting and
/// removing shift order map entries, never values.
///
/// The head is always logical position `0`. Removal only happens at the head
/// and compacts the order map, so it costs `O(len)`.
///
/// When an append or insert finds every slot claimed, all three arrays are
/// reallocated at `capacity * growth_factor`. References into the table are
/// tied to its borrow, so none can survive that reallocation.
///
/// `SlotTable` performs no locking. See `IndexedSlotBuffer` for the shared,
/// lock-guarded form.
#[derive(Clone)]
pub struct SlotTable<T> {
    slots: Vec<Option<T>>,
    order: Vec<usize>,
    free: FreeSlots,
    len: usize,
    config: SlotBufferConfig,
}

/// Front-to-back iterator over a `SlotTable`.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    slots: &'a [Option<T>],
    order: &'a [usize],
}

/// A by-value `SlotTable` iterator.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IntoIter<T> {
    slots: Vec<Option<T>>,
    order: std::vec::IntoIter<usize>,
}

#[derive(Debug, Clone, Copy)]
enum GrowthTrigger {
    Automatic,
    Explicit,
}

impl<T> SlotTable<T> {
    /// Creates an empty `SlotTable` with the default capacity of 10 slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuffer::SlotTable;
    ///
    /// let table: SlotTable<u32> = SlotTable::new();
    /// assert_eq!(table.capacity(), 10);
    /// assert!(table.is_empty());
    /// ```
    #[inline]
    pub fn new() -> SlotTable<T> {
        SlotTable::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `SlotTable` with `capacity` slots allocated.
    #[inline]
    pub fn with_capacity(capacity: usize) -> SlotTable<T> {
        SlotTable::from_config(SlotBufferConfig::default().with_initial_capacity(capacity))
    }

    /// Creates an empty `SlotTable` sized by `config`.
    ///
    /// Fails with `InvalidConfig` when the config does not validate.
    pub fn with_config(config: SlotBufferConfig) -> Result<SlotTable<T>> {
        config.validate()?;
        Ok(SlotTable::from_config(config))
    }

    fn from_config(config: SlotBufferConfig) -> SlotTable<T> {
        let capacity = config.initial_capacity;
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        SlotTable {
            slots,
            order: vec![UNUSED; capacity],
            free: FreeSlots::with_capacity(capacity),
            len: 0,
            config,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of physical slots currently allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of slots that can be filled before the next growth.
    #[inline]
    pub fn available(&self) -> usize {
        self.free.available()
    }

    /// Returns the sizing parameters this table was built with.
    #[inline]
    pub fn config(&self) -> &SlotBufferConfig {
        &self.config
    }

    /// Appends `value` at the tail.
    ///
    /// Grows the table by the configured factor first if every slot is
    /// claimed.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuffer::SlotTable;
    ///
    /// let mut table = SlotTable::with_capacity(1);
    /// table.append(12);
    /// table.append(1234);
    /// assert_eq!(table.capacity(), 2);
    /// assert_eq!(table.get(1), Ok(&1234));
    /// ```
    pub fn append(&mut self, value: T) {
        let slot = self.claim_slot();
        self.slots[slot] = Some(value);
        self.order[self.len] = slot;
        self.len += 1;
        debug_assert_eq!(self.free.claimed(), self.len);
    }

    /// Inserts `value` at logical position `index`, shifting every element at
    /// or after `index` one position toward the tail.
    ///
    /// `index == len()` appends. Fails with `OutOfRange` when
    /// `index > len()`, leaving the table untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuffer::SlotTable;
    ///
    /// let mut table: SlotTable<_> = vec![12, 1234, 123, 123456].into_iter().collect();
    /// table.insert(2, 321).unwrap();
    /// assert_eq!(table.to_vec(), vec![12, 1234, 321, 123, 123456]);
    /// assert!(table.insert(9, 0).is_err());
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(SlotBufferError::OutOfRange {
                index,
                len: self.len,
            });
        }

        let slot = self.claim_slot();
        self.slots[slot] = Some(value);
        self.order.copy_within(index..self.len, index + 1);
        self.order[index] = slot;
        self.len += 1;
        debug_assert_eq!(self.free.claimed(), self.len);
        Ok(())
    }

    /// Removes and returns the head element.
    ///
    /// The freed slot is the next one claimed. Fails with
    /// `OutOfRange { index: 0, len: 0 }` when the table is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuffer::SlotTable;
    ///
    /// let mut table: SlotTable<_> = vec![12, 1234].into_iter().collect();
    /// assert_eq!(table.remove(), Ok(12));
    /// assert_eq!(table.remove(), Ok(1234));
    /// assert!(table.remove().is_err());
    /// ```
    pub fn remove(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(SlotBufferError::OutOfRange { index: 0, len: 0 });
        }

        let slot = self.order[0];
        let value = match self.slots[slot].take() {
            Some(value) => value,
            None => unreachable!("order map references empty slot {}", slot),
        };
        self.order.copy_within(1..self.len, 0);
        self.len -= 1;
        self.order[self.len] = UNUSED;
        self.release_slot(slot);
        debug_assert_eq!(self.free.claimed(), self.len);
        Ok(value)
    }

    /// Returns a reference to the element at logical position `index`.
    ///
    /// Fails with `OutOfRange` when `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T> {
        let slot = self.physical_slot(index)?;
        match self.slots[slot].as_ref() {
            Some(value) => Ok(value),
            None => unreachable!("order map references empty slot {}", slot),
        }
    }

    /// Returns a mutable reference to the element at logical position
    /// `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let slot = self.physical_slot(index)?;
        match self.slots[slot].as_mut() {
            Some(value) => Ok(value),
            None => unreachable!("order map references empty slot {}", slot),
        }
    }

    /// Returns a reference to the element at a signed logical position.
    ///
    /// Fails with `NegativeIndex` below zero and `OutOfRange` past the end.
    pub fn get_signed(&self, index: isize) -> Result<&T> {
        if index < 0 {
            return Err(SlotBufferError::NegativeIndex {
                index,
                len: self.len,
            });
        }
        self.get(index as usize)
    }

    /// Returns the head element, or `None` if the table is empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0).ok()
    }

    /// Returns the physical slot holding logical position `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuffer::SlotTable;
    ///
    /// let mut table = SlotTable::new();
    /// table.append('a');
    /// table.append('b');
    /// table.insert(0, 'c').unwrap();
    /// assert_eq!(table.physical_slot(0), Ok(2));
    /// assert_eq!(table.physical_slot(1), Ok(0));
    /// ```
    #[inline]
    pub fn physical_slot(&self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(SlotBufferError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(self.order[index])
    }

    /// Reallocates the table to hold `new_capacity` slots.
    ///
    /// Logical contents and physical slot assignments are preserved. Asking
    /// for the current capacity is a no-op. Fails with `InvalidArgument`
    /// when `new_capacity` is below the current capacity.
    pub fn grow(&mut self, new_capacity: usize) -> Result<()> {
        let capacity = self.capacity();
        if new_capacity < capacity {
            return Err(SlotBufferError::InvalidArgument {
                requested: new_capacity,
                capacity,
            });
        }
        if new_capacity > capacity {
            self.reallocate(new_capacity, GrowthTrigger::Explicit);
        }
        Ok(())
    }

    /// Removes every element, returning all slots to the free stack.
    ///
    /// Slots are released tail first, so subsequent appends reuse them in
    /// their former logical order.
    pub fn clear(&mut self) {
        for index in (0..self.len).rev() {
            let slot = self.order[index];
            self.slots[slot] = None;
            self.order[index] = UNUSED;
            self.release_slot(slot);
        }
        self.len = 0;
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuffer::SlotTable;
    ///
    /// let mut table = SlotTable::new();
    /// table.append(5);
    /// table.append(3);
    /// table.insert(0, 4).unwrap();
    /// let c: Vec<&i32> = table.iter().collect();
    /// assert_eq!(c, vec![&4, &5, &3]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            order: &self.order[..self.len],
        }
    }

    /// Returns `true` if the table contains an element equal to `x`.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|e| e == x)
    }

    /// Copies the elements into a `Vec` in logical order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    fn claim_slot(&mut self) -> usize {
        if self.len == self.capacity() {
            let new_capacity = self.config.next_capacity(self.capacity());
            self.reallocate(new_capacity, GrowthTrigger::Automatic);
        }
        match self.free.claim() {
            Some(slot) => {
                trace!(slot, "claimed slot");
                slot
            }
            None => unreachable!("free slot stack exhausted below capacity"),
        }
    }

    #[inline]
    fn release_slot(&mut self, slot: usize) {
        trace!(slot, "released slot");
        self.free.release(slot);
    }

    fn reallocate(&mut self, new_capacity: usize, trigger: GrowthTrigger) {
        let old_capacity = self.capacity();
        debug_assert!(new_capacity > old_capacity);

        let mut slots = Vec::with_capacity(new_capacity);
        slots.extend(self.slots.drain(..));
        slots.resize_with(new_capacity, || None);

        let mut order = Vec::with_capacity(new_capacity);
        order.extend_from_slice(&self.order[..self.len]);
        order.resize(new_capacity, UNUSED);

        self.slots = slots;
        self.order = order;
        self.free.grow(new_capacity);
        debug_assert_eq!(self.free.capacity(), new_capacity);

        debug!(
            old_capacity,
            new_capacity,
            len = self.len,
            ?trigger,
            "slot table grown"
        );
    }

    /// Checks the storage invariants: counters agree, and the claimed slots
    /// and free slots partition `0..capacity`.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let capacity = self.capacity();
        assert!(self.len <= capacity);
        assert_eq!(self.order.len(), capacity);
        assert_eq!(self.free.capacity(), capacity);
        assert_eq!(self.free.claimed(), self.len);

        let mut seen = vec![false; capacity];
        for &slot in &self.order[..self.len] {
            assert!(slot < capacity, "slot {} out of range", slot);
            assert!(!seen[slot], "slot {} claimed twice", slot);
            assert!(self.slots[slot].is_some(), "slot {} claimed but empty", slot);
            seen[slot] = true;
        }
        for &slot in self.free.free() {
            assert!(slot < capacity, "slot {} out of range", slot);
            assert!(!seen[slot], "slot {} both free and claimed", slot);
            assert!(self.slots[slot].is_none(), "slot {} free but occupied", slot);
            seen[slot] = true;
        }
        assert!(seen.into_iter().all(|s| s), "orphaned slot");
        assert!(self.order[self.len..].iter().all(|&s| s == UNUSED));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SlotTable<i32> {
        let mut table = SlotTable::new();
        table.append(12);
        table.append(1234);
        table.append(123);
        table.append(123456);
        table
    }

    #[test]
    fn append_size() {
        let mut table = SlotTable::new();
        table.append(0);
        assert_eq!(table.len(), 1);
        table.append(10);
        assert_eq!(table.len(), 2);
        table.append(2);
        table.append(3);
        assert_eq!(table.len(), 4);
        table.check_invariants();
    }

    #[test]
    fn get() {
        let table = sample();
        assert_eq!(table.get(0), Ok(&12));
        assert_eq!(table.get(1), Ok(&1234));
        assert_eq!(table.get(2), Ok(&123));
        assert_eq!(table.get(3), Ok(&123456));
        assert_eq!(
            table.get(4),
            Err(SlotBufferError::OutOfRange { index: 4, len: 4 })
        );
        assert_eq!(
            table.get_signed(-1),
            Err(SlotBufferError::NegativeIndex { index: -1, len: 4 })
        );
        assert_eq!(table.get_signed(3), Ok(&123456));
    }

    #[test]
    fn insert_beginning_middle_end() {
        let mut table = sample();

        table.insert(2, 321).unwrap();
        assert_eq!(table.get(2), Ok(&321));
        assert_eq!(table, vec![12, 1234, 321, 123, 123456]);

        table.insert(0, 32).unwrap();
        assert_eq!(table.get(0), Ok(&32));

        table.insert(6, 12121).unwrap();
        assert_eq!(table.get(6), Ok(&12121));
        assert_eq!(table, vec![32, 12, 1234, 321, 123, 123456, 12121]);
        table.check_invariants();
    }

    #[test]
    fn insert_past_end_is_rejected() {
        let mut table = sample();
        assert_eq!(
            table.insert(5, 1),
            Err(SlotBufferError::OutOfRange { index: 5, len: 4 })
        );
        assert_eq!(table, vec![12, 1234, 123, 123456]);
        assert_eq!(table.available(), 6);
        table.check_invariants();
    }

    #[test]
    fn remove_then_insert_at_beginning() {
        let mut table = sample();

        assert_eq!(table.remove(), Ok(12));
        assert_eq!(table.remove(), Ok(1234));
        assert_eq!(table.get(0), Ok(&123));
        assert_eq!(table.get(1), Ok(&123456));

        table.insert(0, 111).unwrap();
        assert_eq!(table, vec![111, 123, 123456]);
        // slot 1 was freed last
        assert_eq!(table.physical_slot(0), Ok(1));
        table.check_invariants();
    }

    #[test]
    fn remove_empty() {
        let mut table: SlotTable<i32> = SlotTable::new();
        assert_eq!(
            table.remove(),
            Err(SlotBufferError::OutOfRange { index: 0, len: 0 })
        );
        table.check_invariants();
    }

    #[test]
    fn slot_reuse_after_drain() {
        let mut table = sample();
        for _ in 0..4 {
            table.remove().unwrap();
        }
        assert!(table.is_empty());

        table.append(234);
        table.append(23456);
        table.append(23);
        table.append(2);
        table.check_invariants();

        assert_eq!(table.remove(), Ok(234));
        assert_eq!(table.remove(), Ok(23456));
        assert_eq!(table.remove(), Ok(23));
        assert_eq!(table.len(), 1);
        assert_eq!(table.remove(), Ok(2));
        assert_eq!(table.len(), 0);
        table.check_invariants();
    }

    #[test]
    fn automatic_growth() {
        let mut table = SlotTable::new();
        for i in 0..10 {
            table.append(i);
        }
        assert_eq!(table.capacity(), 10);
        table.append(10);
        assert_eq!(table.capacity(), 20);
        for i in 0..11 {
            assert_eq!(table.get(i), Ok(&i));
        }
        table.check_invariants();
    }

    #[test]
    fn growth_on_insert() {
        let mut table = SlotTable::with_capacity(2);
        table.append(1);
        table.append(3);
        table.insert(1, 2).unwrap();
        assert_eq!(table.capacity(), 4);
        assert_eq!(table, vec![1, 2, 3]);
        table.check_invariants();
    }

    #[test]
    fn growth_factor_from_config() {
        let config = SlotBufferConfig::default()
            .with_initial_capacity(2)
            .with_growth_factor(3);
        let mut table = SlotTable::with_config(config).unwrap();
        table.extend(0..3);
        assert_eq!(table.capacity(), 6);
    }

    #[test]
    fn zero_capacity_grows() {
        let mut table = SlotTable::with_capacity(0);
        table.append("a");
        assert_eq!(table.capacity(), 1);
        table.append("b");
        assert_eq!(table.capacity(), 2);
        assert_eq!(table, vec!["a", "b"]);
        table.check_invariants();
    }

    #[test]
    fn explicit_grow() {
        let mut table = sample();
        table.remove().unwrap();
        table.grow(16).unwrap();
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.available(), 13);
        assert_eq!(table, vec![1234, 123, 123456]);
        table.check_invariants();

        // freed slot 0 is still claimed first
        table.append(7);
        assert_eq!(table.physical_slot(3), Ok(0));

        assert_eq!(table.grow(16), Ok(()));
        assert_eq!(
            table.grow(8),
            Err(SlotBufferError::InvalidArgument {
                requested: 8,
                capacity: 16
            })
        );
        assert_eq!(table.capacity(), 16);
        table.check_invariants();
    }

    #[test]
    fn clear() {
        let mut table = sample();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.front(), None);
        table.check_invariants();

        table.append(1);
        table.append(2);
        assert_eq!(table.physical_slot(0), Ok(0));
        assert_eq!(table.physical_slot(1), Ok(1));
    }

    #[test]
    fn get_mut() {
        let mut table = sample();
        *table.get_mut(1).unwrap() = 7;
        assert_eq!(table, vec![12, 7, 123, 123456]);
        assert!(table.get_mut(4).is_err());
    }

    #[test]
    fn contains() {
        let table = sample();
        assert!(table.contains(&123));
        assert!(!table.contains(&124));
    }

    #[test]
    fn values_are_dropped() {
        use std::rc::Rc;

        let marker = Rc::new(());
        let mut table = SlotTable::with_capacity(2);
        for _ in 0..5 {
            table.append(marker.clone());
        }
        assert_eq!(Rc::strong_count(&marker), 6);
        drop(table.remove());
        assert_eq!(Rc::strong_count(&marker), 5);
        table.clear();
        assert_eq!(Rc::strong_count(&marker), 1);
    }
}
