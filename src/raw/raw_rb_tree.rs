use core::cmp::Ordering;

use super::arena::NodeArena;
use super::handle::Handle;
use super::node::{Color, Node};
use crate::compare::Comparator;
use crate::error::{Error, Result};

/// The red-black tree backing `OrderedSet`.
///
/// Nodes live in a `NodeArena` and refer to each other by `Handle`. Every mutation restores the
/// red-black invariants before returning:
///
/// - in-order traversal is strictly increasing under the comparator,
/// - the root is black,
/// - a red node never has a red parent,
/// - every path from a node down to an absent child crosses the same number of black nodes.
pub(crate) struct RawRbTree<K> {
    /// Storage for every node, in the tree or free.
    nodes: NodeArena<K>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<K> RawRbTree<K> {
    /// Largest number of nodes a tree can hold.
    pub(crate) const MAX_NODES: usize = NodeArena::<K>::MAX_SLOTS;

    /// Creates an empty tree that allocates nothing until the first insertion.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            root: None,
        }
    }

    /// Creates an empty tree with `capacity` preallocated node slots.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of nodes in the tree.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of node slots, free or in use.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[cfg(test)]
    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        &self.nodes.get(handle).key
    }

    /// Makes sure `total` nodes fit without further growth.
    pub(crate) fn reserve(&mut self, total: usize) -> Result<()> {
        self.nodes.grow(total)
    }

    /// Seats `key` in a detached red node, growing the arena when every slot is taken.
    ///
    /// On failure the key is dropped and the tree is untouched.
    pub(crate) fn alloc(&mut self, key: K) -> Result<Handle> {
        let node = match self.nodes.acquire(Node::new(key)) {
            Ok(handle) => return Ok(handle),
            Err(node) => node,
        };
        let requested = self.nodes.capacity().saturating_add(1);
        self.nodes.grow(requested)?;
        self.nodes.acquire(node).map_err(|_| Error::AllocFailed {
            requested,
        })
    }

    /// Returns a detached node's slot to the arena, handing back its key.
    ///
    /// `handle` must not be reachable from the root.
    pub(crate) fn free(&mut self, handle: Handle) -> K {
        self.nodes.release(handle).into_key()
    }

    /// Hands every stored key to `f`, in slot order, and releases all storage.
    pub(crate) fn drain_keys(&mut self, f: impl FnMut(K)) {
        self.root = None;
        self.nodes.drain_keys(f);
    }

    /// Finds the node whose key compares equal to `key`.
    pub(crate) fn search<C>(&self, key: &K, cmp: &C) -> Option<Handle>
    where
        C: Comparator<K> + ?Sized,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match cmp.compare(key, &node.key) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Returns the leftmost node of the whole tree.
    #[inline]
    pub(crate) fn min(&self) -> Option<Handle> {
        self.root.map(|root| self.subtree_min(root))
    }

    /// Returns the rightmost node of the whole tree.
    #[inline]
    pub(crate) fn max(&self) -> Option<Handle> {
        self.root.map(|root| self.subtree_max(root))
    }

    fn subtree_min(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left {
            handle = left;
        }
        handle
    }

    fn subtree_max(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right {
            handle = right;
        }
        handle
    }

    /// Returns the in-order successor of `handle`.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.nodes.get(handle).right {
            return Some(self.subtree_min(right));
        }
        let mut child = handle;
        let mut parent = self.nodes.get(handle).parent;
        while let Some(p) = parent {
            let node = self.nodes.get(p);
            if node.right != Some(child) {
                break;
            }
            child = p;
            parent = node.parent;
        }
        parent
    }

    /// Returns the in-order predecessor of `handle`.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.nodes.get(handle).left {
            return Some(self.subtree_max(left));
        }
        let mut child = handle;
        let mut parent = self.nodes.get(handle).parent;
        while let Some(p) = parent {
            let node = self.nodes.get(p);
            if node.left != Some(child) {
                break;
            }
            child = p;
            parent = node.parent;
        }
        parent
    }

    /// Links the detached node `handle` into the tree.
    ///
    /// Returns `false` without touching the tree if an equal key is already present; the node
    /// then stays detached and belongs to the caller.
    pub(crate) fn insert<C>(&mut self, handle: Handle, cmp: &C) -> bool
    where
        C: Comparator<K> + ?Sized,
    {
        let mut parent = None;
        let mut current = self.root;
        let mut ordering = Ordering::Equal;

        while let Some(candidate) = current {
            let node = self.nodes.get(candidate);
            ordering = cmp.compare(&self.nodes.get(handle).key, &node.key);
            parent = Some(candidate);
            current = match ordering {
                Ordering::Equal => return false,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }

        let node = self.nodes.get_mut(handle);
        node.parent = parent;
        node.left = None;
        node.right = None;
        node.color = Color::Red;

        match parent {
            None => self.root = Some(handle),
            Some(p) if ordering == Ordering::Less => self.nodes.get_mut(p).left = Some(handle),
            Some(p) => self.nodes.get_mut(p).right = Some(handle),
        }

        self.insert_fixup(handle);
        true
    }

    /// Unlinks `handle` from the tree. The node's slot is not released.
    pub(crate) fn delete(&mut self, handle: Handle) {
        let (left, right, color) = {
            let node = self.nodes.get(handle);
            (node.left, node.right, node.color)
        };

        let (removed_color, fixup_node, fixup_parent) = match (left, right) {
            (None, _) => {
                let parent = self.nodes.get(handle).parent;
                self.transplant(handle, right);
                (color, right, parent)
            }
            (Some(_), None) => {
                let parent = self.nodes.get(handle).parent;
                self.transplant(handle, left);
                (color, left, parent)
            }
            (Some(left), Some(right)) => {
                let successor = self.subtree_min(right);
                let successor_color = self.nodes.get(successor).color;
                let fixup_node = self.nodes.get(successor).right;

                let fixup_parent = if self.nodes.get(successor).parent == Some(handle) {
                    Some(successor)
                } else {
                    let parent = self.nodes.get(successor).parent;
                    self.transplant(successor, fixup_node);
                    self.nodes.get_mut(successor).right = Some(right);
                    self.nodes.get_mut(right).parent = Some(successor);
                    parent
                };

                self.transplant(handle, Some(successor));
                self.nodes.get_mut(successor).left = Some(left);
                self.nodes.get_mut(left).parent = Some(successor);
                self.nodes.get_mut(successor).color = color;

                (successor_color, fixup_node, fixup_parent)
            }
        };

        if removed_color == Color::Black {
            self.delete_fixup(fixup_node, fixup_parent);
        }
    }

    /// Replaces the subtree rooted at `old` with the one rooted at `new` in `old`'s parent.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.nodes.get(old).parent;
        match parent {
            None => self.root = new,
            Some(p) => {
                let parent_node = self.nodes.get_mut(p);
                if parent_node.left == Some(old) {
                    parent_node.left = new;
                } else {
                    parent_node.right = new;
                }
            }
        }
        if let Some(new) = new {
            self.nodes.get_mut(new).parent = parent;
        }
    }

    /// Makes `pivot`'s right child its parent. No-op if `pivot` has no right child.
    fn rotate_left(&mut self, pivot: Handle) {
        let Some(child) = self.nodes.get(pivot).right else {
            return;
        };

        let inner = self.nodes.get(child).left;
        self.nodes.get_mut(pivot).right = inner;
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(pivot);
        }

        self.replace_child(pivot, child);

        self.nodes.get_mut(child).left = Some(pivot);
        self.nodes.get_mut(pivot).parent = Some(child);
    }

    /// Makes `pivot`'s left child its parent. No-op if `pivot` has no left child.
    fn rotate_right(&mut self, pivot: Handle) {
        let Some(child) = self.nodes.get(pivot).left else {
            return;
        };

        let inner = self.nodes.get(child).right;
        self.nodes.get_mut(pivot).left = inner;
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(pivot);
        }

        self.replace_child(pivot, child);

        self.nodes.get_mut(child).right = Some(pivot);
        self.nodes.get_mut(pivot).parent = Some(child);
    }

    /// Points `old`'s parent (or the root) at `new` and gives `new` that parent.
    fn replace_child(&mut self, old: Handle, new: Handle) {
        let parent = self.nodes.get(old).parent;
        self.nodes.get_mut(new).parent = parent;
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                let parent_node = self.nodes.get_mut(p);
                if parent_node.left == Some(old) {
                    parent_node.left = Some(new);
                } else {
                    parent_node.right = Some(new);
                }
            }
        }
    }

    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.parent(Some(node)) {
            if !self.is_red(Some(parent)) {
                break;
            }
            // A red parent is never the root.
            let Some(grandparent) = self.parent(Some(parent)) else {
                break;
            };

            if self.left(Some(grandparent)) == Some(parent) {
                let uncle = self.right(Some(grandparent));
                if self.is_red(uncle) {
                    self.set_color(Some(parent), Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(Some(grandparent), Color::Red);
                    node = grandparent;
                    continue;
                }

                let mut parent = parent;
                if self.right(Some(parent)) == Some(node) {
                    self.rotate_left(parent);
                    (node, parent) = (parent, node);
                }
                self.set_color(Some(parent), Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                self.rotate_right(grandparent);
            } else {
                let uncle = self.left(Some(grandparent));
                if self.is_red(uncle) {
                    self.set_color(Some(parent), Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(Some(grandparent), Color::Red);
                    node = grandparent;
                    continue;
                }

                let mut parent = parent;
                if self.left(Some(parent)) == Some(node) {
                    self.rotate_right(parent);
                    (node, parent) = (parent, node);
                }
                self.set_color(Some(parent), Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                self.rotate_left(grandparent);
            }
        }
        self.set_color(self.root, Color::Black);
    }

    /// Restores the black height after a black node left the tree. `node` took its place
    /// (possibly absent) under `parent`.
    fn delete_fixup(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while node != self.root && !self.is_red(node) {
            let Some(p) = parent else {
                break;
            };

            if self.left(Some(p)) == node {
                let mut sibling = self.right(Some(p));
                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(Some(p), Color::Red);
                    self.rotate_left(p);
                    sibling = self.right(Some(p));
                }

                if !self.is_red(self.left(sibling)) && !self.is_red(self.right(sibling)) {
                    self.set_color(sibling, Color::Red);
                    node = Some(p);
                    parent = self.parent(node);
                } else {
                    if !self.is_red(self.right(sibling)) {
                        self.set_color(self.left(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        if let Some(s) = sibling {
                            self.rotate_right(s);
                        }
                        sibling = self.right(Some(p));
                    }
                    self.set_color(sibling, self.color(Some(p)));
                    self.set_color(Some(p), Color::Black);
                    self.set_color(self.right(sibling), Color::Black);
                    self.rotate_left(p);
                    node = self.root;
                    parent = None;
                }
            } else {
                let mut sibling = self.left(Some(p));
                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(Some(p), Color::Red);
                    self.rotate_right(p);
                    sibling = self.left(Some(p));
                }

                if !self.is_red(self.right(sibling)) && !self.is_red(self.left(sibling)) {
                    self.set_color(sibling, Color::Red);
                    node = Some(p);
                    parent = self.parent(node);
                } else {
                    if !self.is_red(self.left(sibling)) {
                        self.set_color(self.right(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        if let Some(s) = sibling {
                            self.rotate_left(s);
                        }
                        sibling = self.left(Some(p));
                    }
                    self.set_color(sibling, self.color(Some(p)));
                    self.set_color(Some(p), Color::Black);
                    self.set_color(self.left(sibling), Color::Black);
                    self.rotate_right(p);
                    node = self.root;
                    parent = None;
                }
            }
        }
        self.set_color(node, Color::Black);
    }

    #[inline]
    fn parent(&self, handle: Option<Handle>) -> Option<Handle> {
        handle.and_then(|h| self.nodes.get(h).parent)
    }

    #[inline]
    fn left(&self, handle: Option<Handle>) -> Option<Handle> {
        handle.and_then(|h| self.nodes.get(h).left)
    }

    #[inline]
    fn right(&self, handle: Option<Handle>) -> Option<Handle> {
        handle.and_then(|h| self.nodes.get(h).right)
    }

    /// Absent children count as black.
    #[inline]
    fn color(&self, handle: Option<Handle>) -> Color {
        handle.map_or(Color::Black, |h| self.nodes.get(h).color)
    }

    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.nodes.get(h).is_red())
    }

    #[inline]
    fn set_color(&mut self, handle: Option<Handle>, color: Color) {
        if let Some(h) = handle {
            self.nodes.get_mut(h).color = color;
        }
    }
}
