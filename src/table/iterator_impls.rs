use std::iter::FusedIterator;

use super::{IntoIter, Iter};

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots,
            order: self.order,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let (&slot, rest) = self.order.split_first()?;
        self.order = rest;
        let slots = self.slots;
        slots[slot].as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.order.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        let (&slot, rest) = self.order.split_last()?;
        self.order = rest;
        let slots = self.slots;
        slots[slot].as_ref()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        let slot = self.order.next()?;
        self.slots[slot].take()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        let slot = self.order.next_back()?;
        self.slots[slot].take()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::super::SlotTable;

    #[test]
    fn iter() {
        let mut table = SlotTable::with_capacity(3);
        table.append(1);
        table.append(2);
        {
            let mut iter = table.iter();
            assert_eq!(iter.size_hint(), (2, Some(2)));
            assert_eq!(iter.next(), Some(&1));
            assert_eq!(iter.next(), Some(&2));
            assert_eq!(iter.next(), None);
            assert_eq!(iter.size_hint(), (0, Some(0)));
        }
        table.remove().unwrap();
        table.append(3);
        table.insert(0, 4).unwrap();
        {
            let mut iter = (&table).into_iter();
            assert_eq!(iter.next(), Some(&4));

            // test clone
            let mut iter2 = iter.clone();
            assert_eq!(iter.next(), Some(&2));
            assert_eq!(iter.next(), Some(&3));
            assert_eq!(iter.next(), None);
            assert_eq!(iter2.next(), Some(&2));
        }
    }

    #[test]
    fn iter_rev() {
        let table: SlotTable<_> = (0..5).collect();
        let reversed: Vec<_> = table.iter().rev().cloned().collect();
        assert_eq!(reversed, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn into_iter() {
        let mut table = SlotTable::with_capacity(4);
        table.extend(vec![1, 2, 3]);
        table.remove().unwrap();
        table.insert(0, 9).unwrap();

        let mut iter = table.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(9));
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn into_iter_drops_remaining() {
        use std::rc::Rc;

        let marker = Rc::new(());
        let table: SlotTable<_> = (0..4).map(|_| marker.clone()).collect();
        let mut iter = table.into_iter();
        iter.next();
        assert_eq!(Rc::strong_count(&marker), 4);
        drop(iter);
        assert_eq!(Rc::strong_count(&marker), 1);
    }
}
