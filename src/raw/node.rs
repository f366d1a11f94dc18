use super::handle::Handle;

/// Handle of the shared sentinel node. The sentinel is allocated first, so it
/// always occupies arena slot 0.
pub(crate) const NIL: Handle = Handle::from_index(0);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A tree node. Exactly one node per tree (the sentinel) carries no key; it
/// stands in for every missing child and for the root's parent, so fix-up
/// code can read `color` and `parent` without null checks. The sentinel's
/// `parent` field doubles as scratch state during deletion fix-up.
pub(crate) struct Node<K> {
    key: Option<K>,
    pub(crate) color: Color,
    pub(crate) left: Handle,
    pub(crate) right: Handle,
    pub(crate) parent: Handle,
}

impl<K> Node<K> {
    /// Creates the shared sentinel: keyless, Black, all links self-referential.
    pub(crate) const fn sentinel() -> Self {
        Self {
            key: None,
            color: Color::Black,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }

    /// Creates a fresh Red node with all links pointing at the sentinel.
    /// Insertion fix-up is responsible for recoloring from here.
    pub(crate) const fn new(key: K) -> Self {
        Self {
            key: Some(key),
            color: Color::Red,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }

    /// Returns the key, panicking on the sentinel.
    #[inline]
    pub(crate) fn key(&self) -> &K {
        self.key.as_ref().expect("`Node::key()` - the sentinel has no key!")
    }

    /// Consumes the node and returns its key, panicking on the sentinel.
    pub(crate) fn into_key(self) -> K {
        self.key.expect("`Node::into_key()` - the sentinel has no key!")
    }

    /// Replaces the key in place, returning the previous one. Used when a
    /// deletion splices the in-order successor's slot instead of this one.
    pub(crate) fn replace_key(&mut self, key: K) -> K {
        self.key.replace(key).expect("`Node::replace_key()` - the sentinel has no key!")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_black_and_self_linked() {
        let sentinel: Node<u32> = Node::sentinel();
        assert_eq!(sentinel.color, Color::Black);
        assert_eq!(sentinel.left, NIL);
        assert_eq!(sentinel.right, NIL);
        assert_eq!(sentinel.parent, NIL);
    }

    #[test]
    fn new_nodes_start_red() {
        let node = Node::new(7);
        assert_eq!(node.color, Color::Red);
        assert_eq!(*node.key(), 7);
    }

    #[test]
    #[should_panic(expected = "`Node::key()` - the sentinel has no key!")]
    fn sentinel_key_is_unreachable() {
        let sentinel: Node<u32> = Node::sentinel();
        let _ = sentinel.key();
    }
}
