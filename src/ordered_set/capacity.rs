use super::OrderedSet;
use crate::compare::{Cleanup, OrdComparator};
use crate::error::{Error, Result};
use crate::raw::RawRbTree;

impl<K: Ord> OrderedSet<K> {
    /// Creates an empty set with room for `capacity` keys.
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
    /// let set: OrderedSet<i32> = OrderedSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_comparator(capacity, OrdComparator)
    }
}

impl<K, C, D: Cleanup<K>> OrderedSet<K, C, D> {
    /// Returns the number of node slots currently allocated, in use or free.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::OrderedSet;
    ///
    /// let mut set = OrderedSet::with_capacity(1);
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(set.capacity(), 4);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }

    /// Makes room for at least `additional` more keys without further growth.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage could not grow. The set is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::OrderedSet;
    ///
    /// let mut set: OrderedSet<u8> = OrderedSet::new();
    /// set.try_reserve(10).unwrap();
    /// assert!(set.capacity() >= 10);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity)
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let requested = self.len().checked_add(additional).ok_or(Error::CapacityOverflow {
            requested: usize::MAX,
            max: Self::MAX_CAPACITY,
        })?;
        self.tree.reserve(requested)
    }
}

impl<K, C, D: Cleanup<K>> OrderedSet<K, C, D> {
    /// The largest number of keys a set can hold.
    pub const MAX_CAPACITY: usize = RawRbTree::<K>::MAX_NODES;
}
