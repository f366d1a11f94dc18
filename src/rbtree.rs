use core::cmp::Ordering;
use core::fmt;
use core::fmt::Write as _;
use core::iter::FusedIterator;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::raw::{Color, Handle, NIL, RawRBTree};

/// ANSI escape used by [`RBTree`]'s `Display` diagram to mark Red nodes.
const ANSI_RED: &str = "\u{1b}[31m";
const ANSI_RESET: &str = "\u{1b}[0m";

/// An ordered collection based on a red-black tree.
///
/// Keys are ordered either by their natural [`Ord`] order ([`RBTree::new`])
/// or by a comparator supplied at construction
/// ([`RBTree::with_comparator`]). Unlike a set, duplicate keys are accepted:
/// [`insert`](RBTree::insert) always succeeds and equal keys are all kept.
///
/// Search, insert and remove run in O(log n) worst case; a full in-order
/// traversal is O(n).
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key changes while it is in the tree. The
/// behavior resulting from such a logic error is not specified but will not
/// result in undefined behavior, and could include panics or incorrect
/// results.
///
/// # Examples
///
/// ```
/// use garnet_tree::RBTree;
///
/// let mut tree = RBTree::new();
///
/// tree.insert("to");
/// tree.insert("kill");
/// tree.insert("a");
/// tree.insert("mockingbird");
///
/// assert!(tree.contains(&"kill"));
/// assert!(!tree.contains(&"the"));
///
/// tree.remove(&"to");
///
/// for word in &tree {
///     println!("{word}");
/// }
/// ```
pub struct RBTree<T> {
    raw: RawRBTree<T>,
}

/// An iterator over the keys of an [`RBTree`] in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`RBTree`]. It walks
/// the in-order successor (and, from the back, predecessor) chain, so a full
/// pass costs O(n) total.
///
/// # Examples
///
/// ```
/// use garnet_tree::RBTree;
///
/// let tree = RBTree::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RBTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    raw: Option<&'a RawRBTree<T>>,
    front: Handle,
    back: Handle,
    remaining: usize,
}

/// An owning iterator over the keys of an [`RBTree`] in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTree`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: RBTree#method.into_iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

/// An iterator produced by calling [`extract_if`] on [`RBTree`].
///
/// Walks the tree in ascending order, removes every key matching the
/// predicate and yields it. The walk holds the current node and its
/// precomputed successor, so removing the current key never invalidates the
/// traversal, even when the removal physically splices the successor's slot.
///
/// # Examples
///
/// ```
/// use garnet_tree::RBTree;
///
/// let mut tree = RBTree::from([1, 2, 3, 4]);
/// let evens: Vec<_> = tree.extract_if(|k| k % 2 == 0).collect();
/// assert_eq!(evens, [2, 4]);
/// assert_eq!(tree.to_vec(), [1, 3]);
/// ```
///
/// [`extract_if`]: RBTree::extract_if
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ExtractIf<'a, T, F>
where
    F: FnMut(&T) -> bool,
{
    raw: &'a mut RawRBTree<T>,
    cursor: Handle,
    pred: F,
}

impl<T: Ord> RBTree<T> {
    /// Creates an empty `RBTree` ordered by the keys' natural order.
    ///
    /// Allocates only the shared sentinel node.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert(1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }
}

impl<T> RBTree<T> {
    /// Creates an empty `RBTree` ordered by `cmp`.
    ///
    /// The comparator must be a total order; it is a plain function (or
    /// non-capturing closure), so it imposes no lifetime bounds on `T`.
    /// Keys comparing equal are all kept; an equal key always descends to
    /// the right of its twin.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// // Reverse ordering: largest key first.
    /// let mut tree = RBTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// tree.insert(1);
    /// tree.insert(3);
    /// tree.insert(2);
    ///
    /// let keys: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(keys, [3, 2, 1]);
    /// ```
    #[must_use]
    pub fn with_comparator(cmp: fn(&T, &T) -> Ordering) -> Self {
        Self {
            raw: RawRBTree::new(cmp),
        }
    }

    /// Returns the number of keys in the tree, duplicates included.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(7);
    /// tree.insert(7);
    /// assert_eq!(tree.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert!(tree.is_empty());
    /// tree.insert(1);
    /// assert!(!tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns `true` if the tree contains a key equal to `key`.
    ///
    /// The descent follows the tree's comparator; the final match uses key
    /// equality. The two must agree for lookups to be meaningful.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let tree = RBTree::from([1, 2, 3]);
    /// assert!(tree.contains(&2));
    /// assert!(!tree.contains(&4));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains(&self, key: &T) -> bool
    where
        T: PartialEq,
    {
        self.raw.search(key) != NIL
    }

    /// Adds a key to the tree.
    ///
    /// Always returns `true`: duplicates are accepted, so an insert cannot
    /// fail. The new key lands to the right of any key it compares equal to.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert!(tree.insert(2));
    /// assert!(tree.insert(2));
    /// assert_eq!(tree.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n), with amortized O(1) rotations.
    pub fn insert(&mut self, key: T) -> bool {
        self.raw.insert(key);
        true
    }

    /// Removes one key equal to `key` from the tree.
    ///
    /// Returns `true` if a key was present and removed, `false` otherwise
    /// (absence is not an error). When duplicates are present, one of the
    /// equal keys is removed; which one is deterministic but unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let mut tree = RBTree::from([1, 2]);
    /// assert!(tree.remove(&2));
    /// assert!(!tree.remove(&2));
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n), with at most three rotations.
    pub fn remove(&mut self, key: &T) -> bool
    where
        T: PartialEq,
    {
        self.raw.remove(key)
    }

    /// Removes all keys from the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let mut tree = RBTree::from([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the smallest key, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let tree = RBTree::from([3, 1, 2]);
    /// assert_eq!(tree.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        let h = self.raw.first();
        if h == NIL { None } else { Some(self.raw.key(h)) }
    }

    /// Returns the largest key, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let tree = RBTree::from([3, 1, 2]);
    /// assert_eq!(tree.last(), Some(&3));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        let h = self.raw.last();
        if h == NIL { None } else { Some(self.raw.key(h)) }
    }

    /// Gets an iterator over the keys of the tree in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let tree = RBTree::from([3, 1, 2]);
    /// let keys: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create, O(n) total for a full pass.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            raw: Some(&self.raw),
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Removes and yields, in ascending order, every key for which the
    /// predicate returns `true`.
    ///
    /// Keys failing the predicate are kept. If the iterator is dropped
    /// early, the keys not yet visited also stay in the tree. This is the
    /// tree's form of removal during iteration.
    ///
    /// # Examples
    ///
    /// Splitting a tree into evens and odds, reusing the original:
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let mut tree = RBTree::from([1, 2, 3, 4, 5, 6]);
    /// let evens: Vec<_> = tree.extract_if(|k| k % 2 == 0).collect();
    /// assert_eq!(evens, [2, 4, 6]);
    /// assert_eq!(tree.to_vec(), [1, 3, 5]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) for the walk plus O(log n) per extracted key.
    pub fn extract_if<F>(&mut self, pred: F) -> ExtractIf<'_, T, F>
    where
        F: FnMut(&T) -> bool,
    {
        let cursor = self.raw.first();
        ExtractIf {
            raw: &mut self.raw,
            cursor,
            pred,
        }
    }

    /// Copies the keys into a `Vec` in ascending order.
    ///
    /// The result's length always equals [`len`](RBTree::len). The export is
    /// a recursive in-order walk: O(n) time, O(height) stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let tree = RBTree::from([2, 1, 2]);
    /// assert_eq!(tree.to_vec(), [1, 2, 2]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.raw.in_order().into_iter().cloned().collect()
    }
}

// ─── Diagram rendering ───────────────────────────────────────────────────────

impl<T: fmt::Display> RBTree<T> {
    /// Widest rendered key in the subtree, used to align branch connectors.
    fn max_key_width(&self, h: Handle) -> usize {
        if h == NIL {
            return 0;
        }
        let own = self.raw.key(h).to_string().len();
        own.max(self.max_key_width(self.raw.left(h)))
            .max(self.max_key_width(self.raw.right(h)))
    }

    /// Renders the subtree at `h` sideways: right subtree above, left below,
    /// `path` recording the turns taken from the root (`true` = right).
    fn render(&self, h: Handle, out: &mut String, path: &mut Vec<bool>, width: usize) {
        if h == NIL {
            return;
        }

        path.push(true);
        self.render(self.raw.right(h), out, path, width);
        path.pop();

        for i in 0..path.len() {
            for _ in 0..width + 6 {
                out.push(' ');
            }
            let connector = if i == path.len() - 1 {
                '+'
            } else if path[i] != path[i + 1] {
                '|'
            } else {
                ' '
            };
            out.push(connector);
        }

        let key = self.raw.key(h).to_string();
        if self.raw.color(h) == Color::Red {
            let _ = write!(out, "-- {ANSI_RED}R|{key}{ANSI_RESET}");
        } else {
            let _ = write!(out, "-- B|{key}");
        }
        out.push_str(" --");
        for _ in key.len()..width {
            out.push('-');
        }
        out.push('|');
        out.push('\n');

        path.push(false);
        self.render(self.raw.left(h), out, path, width);
        path.pop();
    }
}

/// Renders the tree as a multi-line sideways diagram with branch connectors
/// and a color marker per node (`R|` in ANSI red, `B|` for Black). Purely
/// diagnostic; the format is not stable.
impl<T: fmt::Display> fmt::Display for RBTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_key_width(self.raw.root());
        let mut out = String::new();
        self.render(self.raw.root(), &mut out, &mut Vec::new(), width);
        f.write_str(&out)
    }
}

// ─── Trait implementations ───────────────────────────────────────────────────

impl<T: fmt::Debug> fmt::Debug for RBTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> Default for RBTree<T> {
    fn default() -> Self {
        RBTree::new()
    }
}

impl<T: PartialEq> PartialEq for RBTree<T> {
    fn eq(&self, other: &RBTree<T>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for RBTree<T> {}

impl<T: Ord> FromIterator<T> for RBTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RBTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for RBTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for RBTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &key in iter {
            self.insert(key);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RBTree<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for RBTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving the tree's keys out in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::RBTree;
    ///
    /// let tree = RBTree::from([4, 2, 3, 1]);
    /// let keys: Vec<_> = tree.into_iter().collect();
    /// assert_eq!(keys, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        let mut raw = self.raw;
        IntoIter {
            inner: raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RBTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.raw?;
        let h = self.front;
        self.front = raw.successor(h);
        self.remaining -= 1;
        Some(raw.key(h))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.raw?;
        let h = self.back;
        self.back = raw.predecessor(h);
        self.remaining -= 1;
        Some(raw.key(h))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Default for Iter<'_, T> {
    /// Creates an empty `rbtree::Iter`.
    ///
    /// ```
    /// # use garnet_tree::rbtree;
    /// let iter: rbtree::Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            raw: None,
            front: NIL,
            back: NIL,
            remaining: 0,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T, F> Iterator for ExtractIf<'_, T, F>
where
    F: FnMut(&T) -> bool,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while self.cursor != NIL {
            let current = self.cursor;
            let next = self.raw.successor(current);
            if (self.pred)(self.raw.key(current)) {
                let (key, freed) = self.raw.remove_at(current);
                // When the spliced slot is the precomputed successor, its key
                // has moved into `current`; resume the walk there.
                self.cursor = if freed == next { current } else { next };
                return Some(key);
            }
            self.cursor = next;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.raw.len()))
    }
}

impl<T, F> FusedIterator for ExtractIf<'_, T, F> where F: FnMut(&T) -> bool {}
