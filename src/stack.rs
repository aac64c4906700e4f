//! A growable LIFO stack with an optional per-element cleanup.
//!
//! [`OrderedSet`](crate::OrderedSet) keeps its free node slots on one of these, but the stack is
//! also usable on its own.

use alloc::vec::Vec;
use core::fmt;

use crate::compare::{Cleanup, NoCleanup};
use crate::error::{Error, Result};

/// An ever-expanding stack.
///
/// Storage doubles whenever a push finds the stack full, so pushes are amortized O(1). If a
/// cleanup capability was supplied, it runs once for every element still on the stack when the
/// stack is dropped.
///
/// # Examples
///
/// ```
/// use rbtree_set::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(1).unwrap();
/// stack.push(2).unwrap();
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.len(), 1);
/// ```
pub struct Stack<T, D: Cleanup<T> = NoCleanup> {
    items: Vec<T>,
    cleanup: D,
}

impl<T> Stack<T> {
    /// Creates an empty stack. No storage is allocated until the first push.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            cleanup: NoCleanup,
        }
    }

    /// Creates an empty stack with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            cleanup: NoCleanup,
        }
    }
}

impl<T, D: Cleanup<T>> Stack<T, D> {
    /// Creates an empty stack with room for `capacity` elements whose remaining elements are
    /// handed to `cleanup` when the stack is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::Stack;
    ///
    /// let mut dropped = 0;
    /// {
    ///     let mut stack = Stack::<u8, _>::with_cleanup(4, |_: u8| dropped += 1);
    ///     stack.push(1).unwrap();
    ///     stack.push(2).unwrap();
    /// }
    /// assert_eq!(dropped, 2);
    /// ```
    #[must_use]
    pub fn with_cleanup(capacity: usize, cleanup: D) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            cleanup,
        }
    }

    /// Returns the number of elements on the stack.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the stack holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of elements the stack can hold without growing.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Pushes `item` on top of the stack, doubling the storage if it is full.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocFailed`] if the storage could not grow. The stack is unchanged and
    /// `item` is dropped.
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.items.len() == self.items.capacity() {
            let current = self.items.capacity();
            let target = current.saturating_mul(2).max(1);
            self.reserve_total(target)?;
        }
        self.items.push(item);
        Ok(())
    }

    /// Pushes `item` only if no growth is needed, handing it back otherwise.
    pub(crate) fn push_within_capacity(&mut self, item: T) -> core::result::Result<(), T> {
        if self.items.len() == self.items.capacity() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes and returns the top element, or `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns the top element without removing it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Makes sure the stack can hold `total` elements without reallocating.
    pub(crate) fn reserve_total(&mut self, total: usize) -> Result<()> {
        let additional = total.saturating_sub(self.items.len());
        self.items.try_reserve_exact(additional).map_err(|_| Error::AllocFailed {
            requested: total,
        })
    }

    /// Removes every element without running the cleanup.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, D: Cleanup<T>> Drop for Stack<T, D> {
    fn drop(&mut self) {
        while let Some(item) = self.items.pop() {
            self.cleanup.cleanup(item);
        }
    }
}

impl<T: fmt::Debug, D: Cleanup<T>> fmt::Debug for Stack<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter().rev()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;
    use proptest::prelude::*;

    #[test]
    fn lazy_allocation_then_doubling() {
        let mut stack: Stack<u32> = Stack::new();
        assert_eq!(stack.capacity(), 0);

        stack.push(1).unwrap();
        assert!(stack.capacity() >= 1);

        for i in 2..=9 {
            stack.push(i).unwrap();
        }
        assert_eq!(stack.len(), 9);
        assert!(stack.capacity() >= 9);
        assert_eq!(stack.peek(), Some(&9));
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut stack: Stack<u32> = Stack::with_capacity(2);
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.peek(), None);
    }

    #[test]
    fn cleanup_runs_for_remaining_elements_only() {
        let mut seen = vec![];
        {
            let mut stack = Stack::<u32, _>::with_cleanup(0, |item: u32| seen.push(item));
            stack.push(1).unwrap();
            stack.push(2).unwrap();
            stack.push(3).unwrap();
            assert_eq!(stack.pop(), Some(3));
        }
        seen.sort_unstable();
        assert_eq!(seen, [1, 2]);
    }

    #[test]
    fn impossible_growth_is_reported() {
        let mut stack: Stack<u64> = Stack::new();
        stack.push(1).unwrap();
        assert_eq!(
            stack.reserve_total(usize::MAX),
            Err(Error::AllocFailed {
                requested: usize::MAX,
            })
        );
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek(), Some(&1));
    }

    #[test]
    fn push_within_capacity_never_grows() {
        let mut stack: Stack<u8> = Stack::with_capacity(1);
        let capacity = stack.capacity();
        for _ in 0..capacity {
            stack.push_within_capacity(0).unwrap();
        }
        assert_eq!(stack.push_within_capacity(9), Err(9));
        assert_eq!(stack.capacity(), capacity);
    }

    #[test]
    fn cleared_stack_skips_cleanup() {
        let mut count = 0;
        {
            let mut stack = Stack::<u32, _>::with_cleanup(4, |_: u32| count += 1);
            stack.push(1).unwrap();
            stack.clear();
        }
        assert_eq!(count, 0);
    }

    proptest! {
        #[test]
        fn stack_behaves_like_vec(operations in prop::collection::vec(prop::option::of(any::<u32>()), 0..256)) {
            let mut model = vec![];
            let mut stack = Stack::new();

            for operation in operations {
                match operation {
                    Some(value) => {
                        stack.push(value).unwrap();
                        model.push(value);
                    }
                    None => {
                        prop_assert_eq!(stack.pop(), model.pop());
                    }
                }
                prop_assert_eq!(stack.len(), model.len());
                prop_assert_eq!(stack.peek(), model.last());
            }
        }
    }
}
