//! The free-slot stack.
//!
//! Physical slots are handed out from a pre-populated array through a moving
//! cursor. `stack[..top]` holds stale entries for slots that are currently
//! claimed, `stack[top..]` holds the slots that are free. Releasing a slot
//! writes it just below the cursor, so the most recently freed slot is the
//! next one claimed.

#[derive(Clone, Debug)]
pub struct FreeSlots {
    stack: Vec<usize>,
    top: usize,
}

impl FreeSlots {
    /// Creates a stack holding every slot in `0..capacity`, lowest first.
    pub fn with_capacity(capacity: usize) -> FreeSlots {
        FreeSlots {
            stack: (0..capacity).collect(),
            top: 0,
        }
    }

    /// Number of slots tracked, free or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.stack.len()
    }

    /// Number of slots currently claimed.
    #[inline]
    pub fn claimed(&self) -> usize {
        self.top
    }

    /// Number of slots that can be claimed before the pool must grow.
    #[inline]
    pub fn available(&self) -> usize {
        self.stack.len() - self.top
    }

    /// Takes the slot at the cursor, or `None` when every slot is claimed.
    #[inline]
    pub fn claim(&mut self) -> Option<usize> {
        let slot = *self.stack.get(self.top)?;
        self.top += 1;
        Some(slot)
    }

    /// Returns `slot` to the pool; it becomes the next slot claimed.
    #[inline]
    pub fn release(&mut self, slot: usize) {
        debug_assert!(self.top > 0, "release with no claimed slots");
        debug_assert!(slot < self.stack.len(), "slot {} out of range", slot);
        self.top -= 1;
        self.stack[self.top] = slot;
    }

    /// Extends the pool with the slots in `old_capacity..new_capacity`.
    ///
    /// Free entries already on the stack keep their order and stay ahead of
    /// the new ones.
    pub fn grow(&mut self, new_capacity: usize) {
        let old_capacity = self.stack.len();
        debug_assert!(new_capacity >= old_capacity);
        self.stack.extend(old_capacity..new_capacity);
    }

    /// The free slots, next to be claimed first.
    #[cfg(test)]
    pub fn free(&self) -> &[usize] {
        &self.stack[self.top..]
    }
}
