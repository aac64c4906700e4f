//! An ordered set of unique keys backed by an arena-allocated red-black tree.

use core::fmt;

use crate::compare::{Cleanup, Comparator, NoCleanup, OrdComparator};
use crate::error::Result;
use crate::raw::RawRbTree;

mod capacity;
mod iter;

pub use iter::Iter;

/// An ordered set of unique keys based on a red-black tree.
///
/// Keys are ordered by a [`Comparator`] chosen at construction time ([`OrdComparator`] by
/// default). Search, insertion and removal take O(log n) comparisons. Tree nodes live in a
/// growable arena of slots: removed nodes are recycled, and the arena doubles when it runs out,
/// so a long sequence of insertions performs only O(log n) allocations.
///
/// If a [`Cleanup`] was supplied, it receives every key still in the set, once each and in
/// unspecified order, when the set is dropped.
///
/// The set does no internal locking. Sharing one across threads requires external
/// synchronization.
///
/// # Examples
///
/// ```
/// use rbtree_set::OrderedSet;
///
/// let mut set = OrderedSet::new();
/// for key in [5, 3, 8, 1, 4, 7, 9] {
///     assert!(set.insert(key).unwrap());
/// }
///
/// assert_eq!(set.len(), 7);
/// assert_eq!(set.min(), Some(&1));
/// assert_eq!(set.max(), Some(&9));
///
/// assert!(set.remove(&5));
/// assert!(!set.contains(&5));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
/// ```
pub struct OrderedSet<K, C = OrdComparator, D: Cleanup<K> = NoCleanup> {
    tree: RawRbTree<K>,
    cmp: C,
    cleanup: D,
}

impl<K: Ord> OrderedSet<K> {
    /// Makes a new, empty `OrderedSet` ordered by `K`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::OrderedSet;
    ///
    /// let mut set: OrderedSet<i32> = OrderedSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        OrderedSet {
            tree: RawRbTree::new(),
            cmp: OrdComparator,
            cleanup: NoCleanup,
        }
    }
}

impl<K, C: Comparator<K>> OrderedSet<K, C> {
    /// Makes a new, empty set ordered by `cmp`, with room for `capacity` keys.
    ///
    /// A `capacity` of zero defers all allocation to the first insertion.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds the number of keys a set can address.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::OrderedSet;
    ///
    /// let mut set = OrderedSet::with_comparator(4, |a: &i32, b: &i32| b.cmp(a));
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(set.min(), Some(&3));
    /// ```
    #[must_use]
    pub fn with_comparator(capacity: usize, cmp: C) -> Self {
        Self::with_comparator_and_cleanup(capacity, cmp, NoCleanup)
    }
}

impl<K, C: Comparator<K>, D: Cleanup<K>> OrderedSet<K, C, D> {
    /// Makes a new, empty set ordered by `cmp`, with room for `capacity` keys, that hands every
    /// remaining key to `cleanup` when dropped.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds the number of keys a set can address.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::{OrdComparator, OrderedSet};
    ///
    /// let mut released = Vec::new();
    /// {
    ///     let mut set = OrderedSet::<u32, _, _>::with_comparator_and_cleanup(0, OrdComparator, |key: u32| released.push(key));
    ///     set.insert(2).unwrap();
    ///     set.insert(1).unwrap();
    /// }
    /// released.sort();
    /// assert_eq!(released, [1, 2]);
    /// ```
    #[must_use]
    pub fn with_comparator_and_cleanup(capacity: usize, cmp: C, cleanup: D) -> Self {
        OrderedSet {
            tree: RawRbTree::with_capacity(capacity),
            cmp,
            cleanup,
        }
    }

    /// Adds a key to the set.
    ///
    /// Returns `Ok(true)` if the key was added and `Ok(false)` if an equal key was already
    /// present, in which case the set is unchanged and `key` is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the node storage had to grow and could not. The set is unchanged and
    /// `key` is dropped.
    ///
    /// # Complexity
    ///
    /// O(log n), plus O(n) when the node storage grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// assert_eq!(set.insert(2), Ok(true));
    /// assert_eq!(set.insert(2), Ok(false));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> Result<bool> {
        // A full arena would grow before the duplicate check, so look the key up first.
        if self.tree.len() == self.tree.capacity() && self.tree.search(&key, &self.cmp).is_some() {
            return Ok(false);
        }
        let handle = self.tree.alloc(key)?;
        if self.tree.insert(handle, &self.cmp) {
            Ok(true)
        } else {
            drop(self.tree.free(handle));
            Ok(false)
        }
    }

    /// Removes the key equal to `key`. Returns whether such a key was present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// set.insert(2).unwrap();
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Removes and returns the key equal to `key`, if any.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// set.insert(String::from("a")).unwrap();
    /// assert_eq!(set.take(&String::from("a")), Some(String::from("a")));
    /// assert!(set.is_empty());
    /// ```
    pub fn take(&mut self, key: &K) -> Option<K> {
        let handle = self.tree.search(key, &self.cmp)?;
        self.tree.delete(handle);
        Some(self.tree.free(handle))
    }

    /// Returns `true` if the set holds a key equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// set.insert(1).unwrap();
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&2));
    /// ```
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.tree.search(key, &self.cmp).is_some()
    }

    /// Returns the stored key equal to `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&K> {
        self.tree.search(key, &self.cmp).map(|handle| self.tree.key(handle))
    }

    /// Consumes the set, running the cleanup on every key it still holds.
    ///
    /// Equivalent to dropping the set.
    pub fn destroy(self) {
        drop(self);
    }
}

impl<K, C, D: Cleanup<K>> OrderedSet<K, C, D> {
    /// Returns the smallest key, or `None` if the set is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn min(&self) -> Option<&K> {
        self.tree.min().map(|handle| self.tree.key(handle))
    }

    /// Returns the largest key, or `None` if the set is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn max(&self) -> Option<&K> {
        self.tree.max().map(|handle| self.tree.key(handle))
    }

    /// Returns the number of keys in the set. This is not the storage capacity.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// Gets an iterator visiting the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// for key in [3, 1, 2] {
    ///     set.insert(key).unwrap();
    /// }
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.tree)
    }
}

impl<K, C, D: Cleanup<K>> Drop for OrderedSet<K, C, D> {
    fn drop(&mut self) {
        let cleanup = &mut self.cleanup;
        self.tree.drain_keys(|key| cleanup.cleanup(key));
    }
}

impl<K, C: Comparator<K> + Default, D: Cleanup<K> + Default> Default for OrderedSet<K, C, D> {
    /// Creates an empty `OrderedSet` with default ordering and cleanup.
    fn default() -> Self {
        Self::with_comparator_and_cleanup(0, C::default(), D::default())
    }
}

impl<K: fmt::Debug, C, D: Cleanup<K>> fmt::Debug for OrderedSet<K, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K, C, D: Cleanup<K>> IntoIterator for &'a OrderedSet<K, C, D> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}
