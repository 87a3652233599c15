use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;
use std::ops::{Index, IndexMut};

use super::{IntoIter, Iter, SlotTable};

impl<T> Default for SlotTable<T> {
    #[inline]
    fn default() -> SlotTable<T> {
        SlotTable::new()
    }
}

/// Tables compare equal when their logical contents match, regardless of
/// capacity or physical slot layout.
impl<T: PartialEq> PartialEq for SlotTable<T> {
    fn eq(&self, other: &SlotTable<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SlotTable<T> {}

#[cfg(test)]
impl<T: PartialEq> PartialEq<Vec<T>> for SlotTable<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Hash> Hash for SlotTable<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T> Index<usize> for SlotTable<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        match self.get(index) {
            Ok(value) => value,
            Err(_) => panic!(
                "index out of bounds: the len is {} but the index is {}",
                len, index
            ),
        }
    }
}

impl<T> IndexMut<usize> for SlotTable<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Ok(value) => value,
            Err(_) => panic!(
                "index out of bounds: the len is {} but the index is {}",
                len, index
            ),
        }
    }
}

impl<T> iter::FromIterator<T> for SlotTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = SlotTable::new();
        table.extend(iter);
        table
    }
}

/// Extend the `SlotTable` with an iterator, growing as needed.
impl<T> Extend<T> for SlotTable<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let needed = self.len().saturating_add(lower);
        if needed > self.capacity() {
            let mut target = self.capacity();
            while target < needed {
                target = self.config.next_capacity(target);
            }
            self.reallocate(target, super::GrowthTrigger::Automatic);
        }
        for elt in iter {
            self.append(elt);
        }
    }
}

impl<T> IntoIterator for SlotTable<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let SlotTable {
            slots,
            mut order,
            len,
            ..
        } = self;
        order.truncate(len);
        IntoIter {
            slots,
            order: order.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a SlotTable<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}
