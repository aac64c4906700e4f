use core::cmp::Ordering;

/// A total order over keys, bound to a collection at construction time.
///
/// Implementations must be consistent: the same pair of keys must always compare the same way,
/// and the ordering must be transitive. A comparator that breaks these rules does not cause
/// undefined behavior, but the collection's contents and query results become unspecified.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator.
///
/// # Examples
///
/// ```
/// use rbtree_set::OrderedSet;
///
/// // Longest string first.
/// let mut set = OrderedSet::with_comparator(0, |a: &&str, b: &&str| b.len().cmp(&a.len()));
/// set.insert("a").unwrap();
/// set.insert("abc").unwrap();
/// set.insert("ab").unwrap();
/// assert_eq!(set.min(), Some(&"abc"));
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Comparator using the key's [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OrdComparator;

impl<K: Ord + ?Sized> Comparator<K> for OrdComparator {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// A capability invoked once per stored key when a collection is torn down.
///
/// Keys are handed over by value in unspecified order. Any `FnMut(K)` closure is a cleanup.
pub trait Cleanup<K> {
    /// Consumes one stored key.
    fn cleanup(&mut self, key: K);
}

impl<K, F> Cleanup<K> for F
where
    F: FnMut(K),
{
    #[inline]
    fn cleanup(&mut self, key: K) {
        self(key);
    }
}

/// Cleanup that simply drops each key.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoCleanup;

impl<K> Cleanup<K> for NoCleanup {
    #[inline]
    fn cleanup(&mut self, key: K) {
        drop(key);
    }
}
