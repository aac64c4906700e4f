use alloc::vec::Vec;

use super::handle::Handle;
use super::node::Node;
use crate::error::{Error, Result};
use crate::stack::Stack;

/// Pool of node slots plus a free list of the slots not currently in a tree.
///
/// Every slot is either free (its handle is on `free` and the slot is `None`) or in use (the slot
/// holds a node). The free list is always sized to hold every slot, so releasing never allocates.
pub(crate) struct NodeArena<K> {
    slots: Vec<Option<Node<K>>>,
    free: Stack<Handle>,
    in_use: usize,
}

impl<K> NodeArena<K> {
    /// Largest number of slots a handle can address.
    pub(crate) const MAX_SLOTS: usize = Handle::MAX + 1;

    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Stack::new(),
            in_use: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity <= Self::MAX_SLOTS,
            "`NodeArena::with_capacity()` - arena is limited to {} slots",
            Self::MAX_SLOTS
        );
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        let mut free = Stack::with_capacity(capacity);
        for index in (0..capacity).rev() {
            let pushed = free.push_within_capacity(Handle::from_index(index));
            debug_assert!(pushed.is_ok());
        }
        Self {
            slots,
            free,
            in_use: 0,
        }
    }

    /// Total number of slots, free or in use.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently holding a node.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.in_use
    }

    #[cfg(test)]
    pub(crate) fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Seats `node` in a free slot. Hands the node back if no slot is free.
    pub(crate) fn acquire(&mut self, node: Node<K>) -> core::result::Result<Handle, Node<K>> {
        let Some(handle) = self.free.pop() else {
            return Err(node);
        };
        debug_assert!(self.slots[handle.to_index()].is_none(), "free slot still holds a node");
        self.slots[handle.to_index()] = Some(node);
        self.in_use += 1;
        Ok(handle)
    }

    /// Empties the slot behind `handle` and puts it back on the free list.
    ///
    /// The returned node still carries its old relations; they must not be followed.
    pub(crate) fn release(&mut self, handle: Handle) -> Node<K> {
        let node = self.slots[handle.to_index()].take().expect("`NodeArena::release()` - `handle` is not in use!");
        let pushed = self.free.push_within_capacity(handle);
        debug_assert!(pushed.is_ok(), "free list must hold every slot");
        self.in_use -= 1;
        node
    }

    /// Grows the pool to at least `requested` slots, doubling the current size when that is larger.
    ///
    /// New slots go on the free list so that the lowest index is handed out first. Existing nodes
    /// keep their handles. On failure nothing observable changes.
    pub(crate) fn grow(&mut self, requested: usize) -> Result<()> {
        let old = self.slots.len();
        if requested <= old {
            return Ok(());
        }
        if requested > Self::MAX_SLOTS {
            return Err(Error::CapacityOverflow {
                requested,
                max: Self::MAX_SLOTS,
            });
        }

        let target = requested.max(old.saturating_mul(2)).min(Self::MAX_SLOTS);
        let reserved = self
            .slots
            .try_reserve_exact(target - old)
            .map_err(|_| Error::AllocFailed {
                requested: target,
            })
            .and_then(|()| self.free.reserve_total(target));
        if let Err(err) = reserved {
            #[cfg(feature = "tracing")]
            tracing::debug!(old, target, error = %err, "node arena growth failed");
            return Err(err);
        }

        self.slots.resize_with(target, || None);
        for index in (old..target).rev() {
            let pushed = self.free.push_within_capacity(Handle::from_index(index));
            debug_assert!(pushed.is_ok());
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(old, new = target, in_use = self.in_use, "node arena grown");
        Ok(())
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &Node<K> {
        self.slots[handle.to_index()].as_ref().expect("`NodeArena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut Node<K> {
        self.slots[handle.to_index()].as_mut().expect("`NodeArena::get_mut()` - `handle` is invalid!")
    }

    /// Hands every in-use key to `f` in slot order and releases all storage.
    pub(crate) fn drain_keys(&mut self, mut f: impl FnMut(K)) {
        for slot in &mut self.slots {
            if let Some(node) = slot.take() {
                f(node.into_key());
            }
        }
        self.slots = Vec::new();
        self.free.clear();
        self.in_use = 0;
    }

    /// Returns `true` if `handle` names a slot currently holding a node.
    #[cfg(test)]
    pub(crate) fn is_in_use(&self, handle: Handle) -> bool {
        self.slots.get(handle.to_index()).is_some_and(Option::is_some)
    }
}
