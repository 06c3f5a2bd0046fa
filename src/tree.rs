//! An unbalanced, mutable Binary Search Tree of values. Nodes keep a pointer to their parent so
//! that cursors can step to the next value in order without any auxiliary stack.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&10).is_end());
//!
//! tree.insert(10);
//! tree.insert(5);
//! tree.insert(15);
//! assert_eq!(tree.find(&10).get(), Some(&10));
//!
//! // Inserting a value that's already present does nothing.
//! assert!(!tree.insert(5));
//! assert_eq!(tree.len(), 3);
//!
//! // The successor of a value doesn't require the value to be present.
//! assert_eq!(tree.min_greater_than(&11).get(), Some(&15));
//! assert!(tree.min_greater_than(&15).is_end());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use tracing::{debug, trace};

use crate::cursor::{Cursor, CursorMut, IntoIter, Iter, IterMut};
use crate::errors::InvariantError;

/// A Binary Search Tree holding unique values in ascending order. There is no rebalancing: values
/// inserted in sorted order produce a tree shaped like a linked list.
///
/// The tree is not synchronized. It is `Send` and `Sync` whenever `T` is, like the standard
/// collections, but sharing one between threads for mutation needs a lock around it.
pub struct OrderedTree<T> {
    // This is a `Link` instead of an `Option<Box<Node>>` so that children can point back at the
    // root without the `Box` being moved out from under them.
    root: Link<T>,
    len: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

// SAFETY: The tree owns its nodes exclusively. The raw pointers are never shared outside of
// borrows of the tree itself, so sending or sharing the tree is exactly as safe as sending or
// sharing the values in it.
unsafe impl<T: Send> Send for OrderedTree<T> {}
unsafe impl<T: Sync> Sync for OrderedTree<T> {}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Clone for OrderedTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Self::new();
        tree.clone_nodes_from(self);
        trace!(len = tree.len, "cloned tree");
        tree
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.clone_nodes_from(source);
        trace!(len = self.len, "cloned tree into existing tree");
    }
}

impl<T> fmt::Debug for OrderedTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders the tree as nested `(left value right)` groups. A missing child renders as `()` and
/// an empty tree as `( )`.
///
/// ```
/// use ordered_tree::OrderedTree;
///
/// let tree: OrderedTree<i32> = [10, 5, 15].into_iter().collect();
/// assert_eq!(tree.to_string(), "((() 5 ()) 10 (() 15 ()))");
/// assert_eq!(OrderedTree::<i32>::new().to_string(), "( )");
/// ```
impl<T> fmt::Display for OrderedTree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => root.render(f),
            None => f.write_str("( )"),
        }
    }
}

impl<T> PartialEq for OrderedTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> Eq for OrderedTree<T> where T: Eq {}

impl<T> FromIterator<T> for OrderedTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for OrderedTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut OrderedTree<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for OrderedTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let root = self.root.take();
        let len = std::mem::take(&mut self.len);
        // SAFETY: We just took the root out of `self`, so the nodes are owned by nothing else and
        // the `IntoIter` becomes responsible for freeing them.
        unsafe { IntoIter::new(root.0, len) }
    }
}

impl<T> OrderedTree<T> {
    /// Generate a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self {
            root: Link(None),
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Number of values in the tree. This is tracked on insertion so it's `O(1)`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no values at all.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Number of nodes on the longest path from the root to a leaf. An empty tree has a height of
    /// 0 and a lone root has a height of 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// // Sorted insertion degenerates into a chain.
    /// let tree: OrderedTree<i32> = (0..10).collect();
    /// assert_eq!(tree.height(), 10);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<T>, usize)> =
            self.root().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }
        height
    }

    /// Drops every value, leaving an empty tree.
    pub fn clear(&mut self) {
        let mut stack: Vec<NonNull<Node<T>>> = self.root.take().0.into_iter().collect();
        while let Some(node) = stack.pop() {
            // SAFETY: Each node is reachable from exactly one owning link and we took the root
            // link above, so every node lands on the stack exactly once. They were allocated with
            // `Box::new` in `Node::new_boxed`.
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            stack.extend(node.left.0);
            stack.extend(node.right.0);
        }
        self.len = 0;
    }

    /// A cursor at the smallest value, or the end cursor if the tree is empty.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.leftmost())
    }

    /// The cursor one past the largest value. It never points at a value.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(None)
    }

    /// Mutable counterpart of [`begin`][Self::begin].
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.leftmost())
    }

    /// Iterates over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.leftmost(), self.len)
    }

    /// Iterates over mutable references to the values in ascending order. Writing through these
    /// references can break the ordering of the tree; see [`CursorMut::get_mut`].
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.leftmost(), self.len)
    }

    /// A cursor at the smallest value, or the end cursor if the tree is empty.
    pub fn min_element(&self) -> Cursor<'_, T> {
        self.begin()
    }

    /// Mutable counterpart of [`min_element`][Self::min_element].
    pub fn min_element_mut(&mut self) -> CursorMut<'_, T> {
        self.begin_mut()
    }

    /// A cursor at the largest value, or the end cursor if the tree is empty.
    pub fn max_element(&self) -> Cursor<'_, T> {
        Cursor::new(self.rightmost())
    }

    /// Mutable counterpart of [`max_element`][Self::max_element].
    pub fn max_element_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.rightmost())
    }

    /// Writes every value followed by a single space, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32> = [10, 5, 15].into_iter().collect();
    /// let mut out = String::new();
    /// tree.traverse_inorder(&mut out).unwrap();
    /// assert_eq!(out, "5 10 15 ");
    /// ```
    pub fn traverse_inorder<W>(&self, out: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
        T: fmt::Display,
    {
        self.root().map_or(Ok(()), |root| root.traverse_inorder(out))
    }

    /// Writes every value followed by a single space, each node before its left and then its
    /// right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32> = [10, 5, 15].into_iter().collect();
    /// let mut out = String::new();
    /// tree.traverse_preorder(&mut out).unwrap();
    /// assert_eq!(out, "10 5 15 ");
    /// ```
    pub fn traverse_preorder<W>(&self, out: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
        T: fmt::Display,
    {
        self.root().map_or(Ok(()), |root| root.traverse_preorder(out))
    }

    fn root(&self) -> Option<&Node<T>> {
        self.root.node()
    }

    /// Allocates a node for `value` and hangs it off `parent` on the side given by the ordering,
    /// or makes it the root. `len` is left to the caller.
    fn attach(
        &mut self,
        value: T,
        parent: Option<(NonNull<Node<T>>, Ordering)>,
    ) -> NonNull<Node<T>> {
        let new_node = NonNull::from(Box::leak(Node::new_boxed(
            value,
            Link(parent.map(|(ptr, _)| ptr)),
        )));
        match parent {
            None => self.root = Link(Some(new_node)),
            // SAFETY: `ptr` is a live node of this tree and the new node isn't referenced
            // anywhere yet.
            Some((ptr, Ordering::Less)) => unsafe { (*ptr.as_ptr()).left = Link(Some(new_node)) },
            Some((ptr, _)) => unsafe { (*ptr.as_ptr()).right = Link(Some(new_node)) },
        }
        new_node
    }

    /// Copies every node of `source` into this empty tree, parents before children. Each copy is
    /// linked to its copied parent as soon as it exists, so if `T::clone` panics the copies made
    /// so far form a valid tree owned by `self`.
    fn clone_nodes_from(&mut self, source: &Self)
    where
        T: Clone,
    {
        let mut stack: Vec<(&Node<T>, Option<(NonNull<Node<T>>, Ordering)>)> =
            source.root().map(|root| (root, None)).into_iter().collect();
        while let Some((node, parent)) = stack.pop() {
            let copy = self.attach(node.value.clone(), parent);
            self.len += 1;
            stack.extend(node.right().map(|right| (right, Some((copy, Ordering::Greater)))));
            stack.extend(node.left().map(|left| (left, Some((copy, Ordering::Less)))));
        }
    }

    fn leftmost(&self) -> Option<NonNull<Node<T>>> {
        // SAFETY: The root is a live node owned by `self`.
        self.root.0.map(|root| unsafe { Node::leftmost(root) })
    }

    fn rightmost(&self) -> Option<NonNull<Node<T>>> {
        // SAFETY: The root is a live node owned by `self`.
        self.root.0.map(|root| unsafe { Node::rightmost(root) })
    }

    /// Checks that the recorded length and every parent pointer agree with the shape of the tree.
    fn check_structure(&self) -> Result<(), InvariantError> {
        if self.root().map_or(false, |root| root.parent.0.is_some()) {
            return Err(InvariantError::RootHasParent);
        }
        let mut counted = 0;
        let mut stack: Vec<(NonNull<Node<T>>, usize)> =
            self.root.0.map(|root| (root, 1)).into_iter().collect();
        while let Some((ptr, depth)) = stack.pop() {
            // SAFETY: Every node reachable from the root is live while `self` is borrowed.
            let node = unsafe { ptr.as_ref() };
            counted += 1;
            for child in [node.left.0, node.right.0].into_iter().flatten() {
                // SAFETY: Children of a live node are live.
                if unsafe { child.as_ref() }.parent.0 != Some(ptr) {
                    return Err(InvariantError::BrokenParentLink { depth: depth + 1 });
                }
                stack.push((child, depth + 1));
            }
        }
        if counted != self.len {
            return Err(InvariantError::SizeMismatch {
                recorded: self.len,
                counted,
            });
        }
        Ok(())
    }
}

impl<T> OrderedTree<T>
where
    T: Ord,
{
    /// Inserts the value into the tree. Returns `false` and leaves the tree untouched if an equal
    /// value is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let mut parent: Option<(NonNull<Node<T>>, Ordering)> = None;
        let mut current = self.root.0;
        while let Some(ptr) = current {
            // SAFETY: Every node reachable from the root is live and we hold `&mut self`, so no
            // cursor can be writing to it.
            let node = unsafe { ptr.as_ref() };
            let ordering = value.cmp(&node.value);
            current = match ordering {
                Ordering::Less => node.left.0,
                Ordering::Equal => {
                    trace!(len = self.len, inserted = false, "insert");
                    return false;
                }
                Ordering::Greater => node.right.0,
            };
            parent = Some((ptr, ordering));
        }

        self.attach(value, parent);
        self.len += 1;

        trace!(len = self.len, inserted = true, "insert");
        true
    }

    /// Whether an equal value is stored in the tree.
    pub fn contains(&self, value: &T) -> bool {
        self.find_node(value).is_some()
    }

    /// A cursor at the value equal to `value`, or the end cursor if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(10);
    ///
    /// assert_eq!(tree.find(&10).get(), Some(&10));
    /// assert_eq!(tree.find(&20), tree.end());
    /// ```
    pub fn find(&self, value: &T) -> Cursor<'_, T> {
        Cursor::new(self.find_node(value))
    }

    /// Mutable counterpart of [`find`][Self::find].
    pub fn find_mut(&mut self, value: &T) -> CursorMut<'_, T> {
        CursorMut::new(self.find_node(value))
    }

    /// A cursor at the smallest value strictly greater than `value`, or the end cursor if no value
    /// is greater. `value` itself needn't be in the tree.
    pub fn min_greater_than(&self, value: &T) -> Cursor<'_, T> {
        Cursor::new(self.min_greater_than_node(value))
    }

    /// Mutable counterpart of [`min_greater_than`][Self::min_greater_than].
    pub fn min_greater_than_mut(&mut self, value: &T) -> CursorMut<'_, T> {
        CursorMut::new(self.min_greater_than_node(value))
    }

    /// Whether every left subtree holds only smaller values and every right subtree only greater
    /// ones. Writing through a [`CursorMut`] or [`IterMut`] can make this false. The tree is never
    /// repaired.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<i32> = [1, 2, 3].into_iter().collect();
    /// assert!(tree.check_sorting_invariant());
    ///
    /// if let Some(two) = tree.find_mut(&2).get_mut() {
    ///     *two = 4;
    /// }
    /// assert!(!tree.check_sorting_invariant());
    /// ```
    pub fn check_sorting_invariant(&self) -> bool {
        match self.check_order() {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, "sorting invariant violated");
                false
            }
        }
    }

    /// Checks every invariant of the tree: ordering, the recorded length, and parent pointers.
    /// Reports the first violation found.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let result = self.check_structure().and_then(|()| self.check_order());
        if let Err(err) = &result {
            debug!(%err, len = self.len, "tree failed validation");
        }
        result
    }

    /// Walks the tree carrying the bounds implied by each node's ancestors: the nearest ancestor
    /// it hangs right of is its lower bound and the nearest it hangs left of is its upper bound.
    fn check_order(&self) -> Result<(), InvariantError> {
        let mut stack: Vec<(&Node<T>, Option<&T>, Option<&T>, usize)> =
            self.root().map(|root| (root, None, None, 1)).into_iter().collect();
        while let Some((node, lower, upper, depth)) = stack.pop() {
            let above_lower = lower.map_or(true, |lower| node.value > *lower);
            let below_upper = upper.map_or(true, |upper| node.value < *upper);
            if !(above_lower && below_upper) {
                return Err(InvariantError::OutOfOrder { depth });
            }
            stack.extend(
                node.right()
                    .map(|right| (right, Some(&node.value), upper, depth + 1)),
            );
            stack.extend(
                node.left()
                    .map(|left| (left, lower, Some(&node.value), depth + 1)),
            );
        }
        Ok(())
    }

    fn find_node(&self, value: &T) -> Option<NonNull<Node<T>>> {
        let mut current = self.root.0;
        while let Some(ptr) = current {
            // SAFETY: Every node reachable from the root is live while `self` is borrowed.
            let node = unsafe { ptr.as_ref() };
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.0,
                Ordering::Equal => return Some(ptr),
                Ordering::Greater => node.right.0,
            };
        }
        None
    }

    /// Walks down from the root remembering the last node that was greater than `value`. Going
    /// left from such a node can only find something closer to `value`.
    fn min_greater_than_node(&self, value: &T) -> Option<NonNull<Node<T>>> {
        let mut candidate = None;
        let mut current = self.root.0;
        while let Some(ptr) = current {
            // SAFETY: Every node reachable from the root is live while `self` is borrowed.
            let node = unsafe { ptr.as_ref() };
            if node.value > *value {
                candidate = Some(ptr);
                current = node.left.0;
            } else {
                current = node.right.0;
            }
        }
        candidate
    }
}

pub(crate) struct Link<T>(pub(crate) Option<NonNull<Node<T>>>);

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Link<T> {}

impl<T> Link<T> {
    fn node(&self) -> Option<&Node<T>> {
        // SAFETY: A non-`None` link always points at a live `Node`. The returned reference is
        // bounded by the borrow of the link, which in turn is bounded by a borrow of the owning
        // tree, so no `&mut` to the node can exist at the same time.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    /// Non-owning. `None` for the root.
    pub(crate) parent: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(value: T, parent: Link<T>) -> Box<Self> {
        Box::new(Node {
            value,
            left: Link(None),
            right: Link(None),
            parent,
        })
    }

    fn left(&self) -> Option<&Self> {
        self.left.node()
    }

    fn right(&self) -> Option<&Self> {
        self.right.node()
    }

    /// Follows left children from `node` until there are none.
    ///
    /// # Safety
    ///
    /// `node` must point at a live node. Only the link fields are read, so this is fine to call
    /// while someone holds a `&mut` to a node's value.
    pub(crate) unsafe fn leftmost(mut node: NonNull<Self>) -> NonNull<Self> {
        while let Some(left) = (*node.as_ptr()).left.0 {
            node = left;
        }
        node
    }

    /// # Safety
    ///
    /// Same as [`Node::leftmost`].
    pub(crate) unsafe fn rightmost(mut node: NonNull<Self>) -> NonNull<Self> {
        while let Some(right) = (*node.as_ptr()).right.0 {
            node = right;
        }
        node
    }

    /// The next node in ascending order, or `None` after the last one. If there's a right subtree
    /// the answer is its leftmost node. Otherwise climb until we arrive from a left child.
    ///
    /// # Safety
    ///
    /// Same as [`Node::leftmost`], and the tree must not be structurally modified during the
    /// call.
    pub(crate) unsafe fn successor(node: NonNull<Self>) -> Option<NonNull<Self>> {
        if let Some(right) = (*node.as_ptr()).right.0 {
            return Some(Self::leftmost(right));
        }
        let mut child = node;
        while let Some(parent) = (*child.as_ptr()).parent.0 {
            if (*parent.as_ptr()).left.0 == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    fn traverse_inorder<W>(&self, out: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
        T: fmt::Display,
    {
        if let Some(left) = self.left() {
            left.traverse_inorder(out)?;
        }
        write!(out, "{} ", self.value)?;
        if let Some(right) = self.right() {
            right.traverse_inorder(out)?;
        }
        Ok(())
    }

    fn traverse_preorder<W>(&self, out: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
        T: fmt::Display,
    {
        write!(out, "{} ", self.value)?;
        if let Some(left) = self.left() {
            left.traverse_preorder(out)?;
        }
        if let Some(right) = self.right() {
            right.traverse_preorder(out)?;
        }
        Ok(())
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        T: fmt::Display,
    {
        f.write_str("(")?;
        match self.left() {
            Some(left) => left.render(f)?,
            None => f.write_str("()")?,
        }
        write!(f, " {} ", self.value)?;
        match self.right() {
            Some(right) => right.render(f)?,
            None => f.write_str("()")?,
        }
        f.write_str(")")
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;
    use std::ops::Bound;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`, checking that they agree after
    /// every step. The set is the model the tree is expected to follow.
    fn do_ops<T>(ops: &[Op<T>], bst: &mut OrderedTree<T>, set: &mut BTreeSet<T>)
    where
        T: Ord + Clone + fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(x) => {
                    assert_eq!(bst.insert(x.clone()), set.insert(x.clone()));
                }
                Op::Find(x) => {
                    assert_eq!(bst.find(x).get(), set.get(x));
                }
                Op::MinGreaterThan(x) => {
                    let expected = set.range((Bound::Excluded(x), Bound::Unbounded)).next();
                    assert_eq!(bst.min_greater_than(x).get(), expected);
                }
                Op::Iter => {
                    assert!(bst.iter().eq(set.iter()));
                }
                Op::CloneTree => {
                    *bst = bst.clone();
                }
            }
            assert_eq!(bst.len(), set.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = OrderedTree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            tree.validate().is_ok() && set.iter().all(|x| tree.contains(x))
        }
    }

    quickcheck::quickcheck! {
        fn height_between_balanced_and_chain(xs: Vec<i8>) -> bool {
            let tree: OrderedTree<_> = xs.iter().copied().collect();

            // A perfectly balanced tree of `len` nodes needs as many levels as `len` has bits.
            let balanced_height = (usize::BITS - tree.len().leading_zeros()) as usize;
            tree.height() >= balanced_height && tree.height() <= tree.len()
        }
    }
}
