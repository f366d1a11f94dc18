use core::cmp::Ordering;

use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, NIL, Node};

/// Key ordering used for descent. A plain function pointer so natural-order
/// and caller-supplied comparators share one representation without imposing
/// lifetime bounds on the key type.
pub(crate) type Comparator<K> = fn(&K, &K) -> Ordering;

/// The red-black engine backing `RBTree`.
///
/// All nodes, the sentinel included, live in the arena; links are handles.
/// Only the rotation and fix-up routines touch colors or links, everything
/// else routes through `search` and the successor walk.
pub(crate) struct RawRBTree<K> {
    /// Arena storing all tree nodes. Slot 0 is the sentinel.
    nodes: Arena<Node<K>>,
    /// Handle to the root node; the sentinel when the tree is empty.
    root: Handle,
    /// Number of live (non-sentinel) nodes.
    len: usize,
    /// Total order over keys; ties descend right.
    cmp: Comparator<K>,
}

impl<K> RawRBTree<K> {
    pub(crate) fn new(cmp: Comparator<K>) -> Self {
        let mut nodes = Arena::new();
        let sentinel = nodes.alloc(Node::sentinel());
        debug_assert_eq!(sentinel, NIL);
        Self {
            nodes,
            root: NIL,
            len: 0,
            cmp,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn root(&self) -> Handle {
        self.root
    }

    /// Drops every node and re-seeds the sentinel.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        let sentinel = self.nodes.alloc(Node::sentinel());
        debug_assert_eq!(sentinel, NIL);
        self.root = NIL;
        self.len = 0;
    }

    /// Returns the key of a real node.
    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    // Link and color accessors. Handles and colors are `Copy`, so fix-up code
    // reads them into locals and mutates one field at a time.

    #[inline]
    pub(crate) fn color(&self, h: Handle) -> Color {
        self.nodes.get(h).color
    }

    #[inline]
    pub(crate) fn left(&self, h: Handle) -> Handle {
        self.nodes.get(h).left
    }

    #[inline]
    pub(crate) fn right(&self, h: Handle) -> Handle {
        self.nodes.get(h).right
    }

    #[inline]
    fn parent(&self, h: Handle) -> Handle {
        self.nodes.get(h).parent
    }

    #[inline]
    fn set_color(&mut self, h: Handle, color: Color) {
        self.nodes.get_mut(h).color = color;
    }

    #[inline]
    fn set_left(&mut self, h: Handle, left: Handle) {
        self.nodes.get_mut(h).left = left;
    }

    #[inline]
    fn set_right(&mut self, h: Handle, right: Handle) {
        self.nodes.get_mut(h).right = right;
    }

    #[inline]
    fn set_parent(&mut self, h: Handle, parent: Handle) {
        self.nodes.get_mut(h).parent = parent;
    }

    /// Leftmost node of the subtree rooted at `h`. `h` must be a real node.
    fn minimum(&self, h: Handle) -> Handle {
        let mut n = h;
        while self.left(n) != NIL {
            n = self.left(n);
        }
        n
    }

    /// Rightmost node of the subtree rooted at `h`. `h` must be a real node.
    fn maximum(&self, h: Handle) -> Handle {
        let mut n = h;
        while self.right(n) != NIL {
            n = self.right(n);
        }
        n
    }

    /// First node in key order, or the sentinel when empty.
    pub(crate) fn first(&self) -> Handle {
        if self.root == NIL { NIL } else { self.minimum(self.root) }
    }

    /// Last node in key order, or the sentinel when empty.
    pub(crate) fn last(&self) -> Handle {
        if self.root == NIL { NIL } else { self.maximum(self.root) }
    }

    /// In-order successor of a real node; the sentinel signals the end.
    /// Either the right subtree's minimum, or the nearest ancestor reached
    /// from a left child. Amortized O(1) across a full traversal.
    pub(crate) fn successor(&self, h: Handle) -> Handle {
        if self.right(h) != NIL {
            return self.minimum(self.right(h));
        }
        let mut x = h;
        let mut y = self.parent(x);
        while y != NIL && x == self.right(y) {
            x = y;
            y = self.parent(y);
        }
        y
    }

    /// In-order predecessor of a real node; mirror of [`Self::successor`].
    pub(crate) fn predecessor(&self, h: Handle) -> Handle {
        if self.left(h) != NIL {
            return self.maximum(self.left(h));
        }
        let mut x = h;
        let mut y = self.parent(x);
        while y != NIL && x == self.left(y) {
            x = y;
            y = self.parent(y);
        }
        y
    }

    /// Pushes the keys of the subtree rooted at `h` in ascending order.
    /// O(n) time, O(height) stack.
    fn in_order_into<'a>(&'a self, h: Handle, out: &mut Vec<&'a K>) {
        if h != NIL {
            self.in_order_into(self.left(h), out);
            out.push(self.key(h));
            self.in_order_into(self.right(h), out);
        }
    }

    /// All keys in ascending order, by recursive in-order walk.
    pub(crate) fn in_order(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.len);
        self.in_order_into(self.root, &mut out);
        out
    }

    /// Moves every key out in ascending order and leaves the tree empty.
    /// O(n); walks the successor chain instead of rebalancing per removal.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<K> {
        let mut handles = Vec::with_capacity(self.len);
        let mut h = self.first();
        while h != NIL {
            handles.push(h);
            h = self.successor(h);
        }

        let mut out = Vec::with_capacity(handles.len());
        for h in handles {
            out.push(self.nodes.take(h).into_key());
        }
        self.clear();
        out
    }
}

impl<K> RawRBTree<K> {
    /// Locates a node whose key equals `key`, or returns the sentinel.
    ///
    /// The descent uses the comparator only (ties go right, matching insert),
    /// while the stopping test is key equality; the two must agree for
    /// `search` to find what `insert` placed.
    pub(crate) fn search(&self, key: &K) -> Handle
    where
        K: PartialEq,
    {
        let mut x = self.root;
        while x != NIL && self.key(x) != key {
            x = if (self.cmp)(key, self.key(x)) == Ordering::Less {
                self.left(x)
            } else {
                self.right(x)
            };
        }
        x
    }

    /// Swaps `x` with its right child, preserving in-order key sequence.
    /// The right child must be a real node.
    fn rotate_left(&mut self, x: Handle) {
        let y = self.right(x);
        let y_left = self.left(y);
        self.set_right(x, y_left);
        if y_left != NIL {
            self.set_parent(y_left, x);
        }

        let x_parent = self.parent(x);
        self.set_parent(y, x_parent);
        if x_parent == NIL {
            self.root = y;
        } else if self.left(x_parent) == x {
            self.set_left(x_parent, y);
        } else {
            self.set_right(x_parent, y);
        }

        self.set_left(y, x);
        self.set_parent(x, y);
    }

    /// Swaps `x` with its left child; mirror of [`Self::rotate_left`].
    fn rotate_right(&mut self, x: Handle) {
        let y = self.left(x);
        let y_right = self.right(y);
        self.set_left(x, y_right);
        if y_right != NIL {
            self.set_parent(y_right, x);
        }

        let x_parent = self.parent(x);
        self.set_parent(y, x_parent);
        if x_parent == NIL {
            self.root = y;
        } else if self.right(x_parent) == x {
            self.set_right(x_parent, y);
        } else {
            self.set_left(x_parent, y);
        }

        self.set_right(y, x);
        self.set_parent(x, y);
    }

    /// Inserts a key at its BST position and rebalances. Duplicates are kept;
    /// an equal key descends right, the same tie rule `search` relies on.
    pub(crate) fn insert(&mut self, key: K) {
        let mut y = NIL;
        let mut x = self.root;
        while x != NIL {
            y = x;
            x = if (self.cmp)(&key, self.key(x)) == Ordering::Less {
                self.left(x)
            } else {
                self.right(x)
            };
        }

        let z = self.nodes.alloc(Node::new(key));
        self.set_parent(z, y);
        if y == NIL {
            self.root = z;
        } else if (self.cmp)(self.key(z), self.key(y)) == Ordering::Less {
            self.set_left(y, z);
        } else {
            self.set_right(y, z);
        }

        self.len += 1;
        self.insert_fixup(z);
    }

    /// Restores the red-black invariants after linking the Red node `z`.
    /// Each iteration either pushes the red-red violation two levels up
    /// (Red uncle) or resolves it with at most two rotations (Black uncle).
    fn insert_fixup(&mut self, mut z: Handle) {
        while self.color(self.parent(z)) == Color::Red {
            let parent = self.parent(z);
            // A Red parent cannot be the Black root, so the grandparent is real.
            let grandparent = self.parent(parent);

            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.color(uncle) == Color::Red {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.right(parent) {
                        z = parent;
                        self.rotate_left(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.color(uncle) == Color::Red {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.left(parent) {
                        z = parent;
                        self.rotate_right(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }

        // The loop can leave the root Red when the violation reached it.
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Removes a node with a key equal to `key`, if any. When duplicates are
    /// present, whichever equal node `search` reaches first is the one removed.
    pub(crate) fn remove(&mut self, key: &K) -> bool
    where
        K: PartialEq,
    {
        let z = self.search(key);
        if z == NIL {
            return false;
        }
        self.remove_at(z);
        true
    }

    /// Unlinks the key held at `z` and rebalances.
    ///
    /// Returns the removed key and the handle of the slot that was freed.
    /// When `z` has two real children the in-order successor's slot is the
    /// one spliced out and its key moves into `z`, so the freed handle can
    /// differ from `z`; callers walking the tree use it to re-anchor.
    pub(crate) fn remove_at(&mut self, z: Handle) -> (K, Handle) {
        // Splice target: `z` itself, or its successor (which has no left child).
        let y = if self.left(z) == NIL || self.right(z) == NIL {
            z
        } else {
            self.successor(z)
        };
        let x = if self.left(y) != NIL { self.left(y) } else { self.right(y) };

        // Attach `x` in `y`'s slot. The sentinel's parent is deliberately set
        // too: deletion fix-up climbs through it before terminating.
        let y_parent = self.parent(y);
        self.set_parent(x, y_parent);
        if y_parent == NIL {
            self.root = x;
        } else if y == self.left(y_parent) {
            self.set_left(y_parent, x);
        } else {
            self.set_right(y_parent, x);
        }

        let y_was_black = self.color(y) == Color::Black;
        let removed = if y == z {
            self.nodes.take(y).into_key()
        } else {
            let successor_key = self.nodes.take(y).into_key();
            self.nodes.get_mut(z).replace_key(successor_key)
        };

        // Unlinking a Red node cannot change any black-height.
        if y_was_black {
            self.delete_fixup(x);
        }
        self.len -= 1;
        (removed, y)
    }

    /// Restores the red-black invariants around `x`, which stands in for a
    /// "double-black" deficiency left by unlinking a Black node. Either the
    /// deficiency is pushed up (Black sibling, Black nephews) or absorbed
    /// with at most three rotations total.
    fn delete_fixup(&mut self, mut x: Handle) {
        while x != self.root && self.color(x) == Color::Black {
            let parent = self.parent(x);

            if x == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.right(parent);
                }
                if self.color(self.left(sibling)) == Color::Black
                    && self.color(self.right(sibling)) == Color::Black
                {
                    self.set_color(sibling, Color::Red);
                    x = parent;
                } else {
                    if self.color(self.right(sibling)) == Color::Black {
                        let near = self.left(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.right(parent);
                    }
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let far = self.right(sibling);
                    self.set_color(far, Color::Black);
                    self.rotate_left(parent);
                    x = self.root;
                }
            } else {
                let mut sibling = self.left(parent);
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.left(parent);
                }
                if self.color(self.right(sibling)) == Color::Black
                    && self.color(self.left(sibling)) == Color::Black
                {
                    self.set_color(sibling, Color::Red);
                    x = parent;
                } else {
                    if self.color(self.left(sibling)) == Color::Black {
                        let near = self.right(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.left(parent);
                    }
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let far = self.left(sibling);
                    self.set_color(far, Color::Black);
                    self.rotate_right(parent);
                    x = self.root;
                }
            }
        }
        self.set_color(x, Color::Black);
    }
}
