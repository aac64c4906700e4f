use super::handle::Handle;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A red-black tree node stored in a `NodeArena` slot.
///
/// Relations are handles into the same arena; `None` marks an absent parent or child.
#[derive(Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) color: Color,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<K> Node<K> {
    /// Creates a detached red node holding `key`.
    pub(crate) const fn new(key: K) -> Self {
        Self {
            key,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Returns the key, consuming the node.
    #[inline]
    pub(crate) fn into_key(self) -> K {
        self.key
    }
}
