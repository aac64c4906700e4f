use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Handle, RawRbTree};

/// An iterator over the keys of an `OrderedSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`OrderedSet`]. It walks the tree through
/// successor and predecessor links and needs no extra storage.
///
/// [`iter`]: crate::OrderedSet::iter
/// [`OrderedSet`]: crate::OrderedSet
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K> {
    tree: &'a RawRbTree<K>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(super) fn new(tree: &'a RawRbTree<K>) -> Self {
        Iter {
            tree,
            front: tree.min(),
            back: tree.max(),
            remaining: tree.len(),
        }
    }
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(handle);
        Some(self.tree.key(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(handle);
        Some(self.tree.key(handle))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::OrderedSet;
    use alloc::vec::Vec;

    fn set_of(keys: &[i32]) -> OrderedSet<i32> {
        let mut set = OrderedSet::new();
        for &key in keys {
            set.insert(key).unwrap();
        }
        set
    }

    #[test]
    fn empty_iterator() {
        let set: OrderedSet<i32> = OrderedSet::new();
        let mut iter = set.iter();
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn forward_and_reverse() {
        let set = set_of(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(set.iter().rev().copied().collect::<Vec<_>>(), [7, 6, 5, 4, 3, 2, 1]);
        assert_eq!((&set).into_iter().len(), 7);
    }

    #[test]
    fn ends_meet_in_the_middle() {
        let set = set_of(&[1, 2, 3, 4]);
        let mut iter = set.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn last_jumps_to_the_back() {
        let set = set_of(&[10, 30, 20]);
        assert_eq!(set.iter().last(), Some(&30));
        assert_eq!(set.iter().skip(1).count(), 2);
    }
}
