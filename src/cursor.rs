//! Positions inside an [`OrderedTree`][crate::OrderedTree] and the iterators built on top of them.
//!
//! A cursor either points at a value or is the end cursor, which sits one past the largest value.
//! Moving forward walks to the in-order successor through parent pointers, so a step costs at most
//! `O(height)` and no stack is kept.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let tree: OrderedTree<i32> = [4, 2, 6, 3, 5, 7].into_iter().collect();
//!
//! let mut cursor = tree.begin();
//! for expected in 2..=7 {
//!     assert_eq!(cursor.get(), Some(&expected));
//!     cursor.move_next();
//! }
//! assert_eq!(cursor, tree.end());
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::tree::Node;

/// A read-only position in a tree. Cursors are cheap to copy and compare equal when they point at
/// the same node, or when both are the end cursor.
pub struct Cursor<'a, T> {
    node: Option<NonNull<Node<T>>>,
    _tree: PhantomData<&'a T>,
}

// SAFETY: A `Cursor` only hands out shared references to values, just like `&T`.
unsafe impl<T: Sync> Send for Cursor<'_, T> {}
unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}
impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(node: Option<NonNull<Node<T>>>) -> Self {
        Self {
            node,
            _tree: PhantomData,
        }
    }

    /// The value under the cursor, or `None` for the end cursor.
    pub fn get(&self) -> Option<&'a T> {
        // SAFETY: The node is live for `'a` because the tree is borrowed for `'a`, and a shared
        // borrow of the tree rules out any `&mut` to its values.
        self.node.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Whether this is the end cursor.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Moves to the next value in ascending order. Moving past the largest value gives the end
    /// cursor, and moving the end cursor leaves it where it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(10);
    ///
    /// let mut cursor = tree.begin();
    /// cursor.move_next();
    /// assert_eq!(cursor, tree.end());
    ///
    /// cursor.move_next();
    /// assert!(cursor.is_end());
    /// ```
    pub fn move_next(&mut self) {
        // SAFETY: The node is live and the tree can't be modified while it is borrowed for `'a`.
        self.node = self.node.and_then(|node| unsafe { Node::successor(node) });
    }
}

/// A position in a tree that can write to the value under it.
///
/// The tree is borrowed mutably for as long as the cursor lives, so nothing can be inserted while
/// a `CursorMut` is around.
pub struct CursorMut<'a, T> {
    node: Option<NonNull<Node<T>>>,
    _tree: PhantomData<&'a mut T>,
}

// SAFETY: A `CursorMut` behaves like a `&mut T` to one value at a time.
unsafe impl<T: Send> Send for CursorMut<'_, T> {}
unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}

impl<T> fmt::Debug for CursorMut<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get()).finish()
    }
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(node: Option<NonNull<Node<T>>>) -> Self {
        Self {
            node,
            _tree: PhantomData,
        }
    }

    /// The value under the cursor, or `None` for the end cursor.
    pub fn get(&self) -> Option<&T> {
        // SAFETY: The node is live while the tree is borrowed, and the returned reference borrows
        // `self` so it can't overlap a reference from `get_mut`.
        self.node.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Mutable access to the value under the cursor, or `None` for the end cursor.
    ///
    /// The tree does not notice writes made through this reference and won't move the node. If
    /// the new value no longer fits between its neighbours the tree is left out of order, which
    /// [`OrderedTree::check_sorting_invariant`][crate::OrderedTree::check_sorting_invariant]
    /// reports. Lookups on an out of order tree may miss values that are present.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        // SAFETY: The node is live while the tree is borrowed mutably, and the returned reference
        // borrows `self` mutably so it is the only reference to the value.
        self.node.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Turns the cursor into a mutable reference to its value that lives as long as the borrow of
    /// the tree.
    pub fn into_mut(self) -> Option<&'a mut T> {
        // SAFETY: Consuming `self` means no other reference can be made through this cursor.
        self.node.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Whether this is the end cursor.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Moves to the next node in tree order. This follows the shape of the tree, so after a write
    /// through [`get_mut`][Self::get_mut] the values visited may not be ascending.
    pub fn move_next(&mut self) {
        // SAFETY: The node is live and `successor` only reads link fields, never values.
        self.node = self.node.and_then(|node| unsafe { Node::successor(node) });
    }

    /// A read-only cursor at the same position, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.node)
    }
}

/// An iterator over the values of a tree in ascending order.
pub struct Iter<'a, T> {
    next: Cursor<'a, T>,
    len: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(first: Option<NonNull<Node<T>>>, len: usize) -> Self {
        Self {
            next: Cursor::new(first),
            len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.next.get()?;
        self.next.move_next();
        self.len -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// An iterator over mutable references to the values of a tree, in tree order.
pub struct IterMut<'a, T> {
    next: Option<NonNull<Node<T>>>,
    len: usize,
    _tree: PhantomData<&'a mut T>,
}

// SAFETY: `IterMut` hands out disjoint `&mut T`s, like `std::slice::IterMut`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(first: Option<NonNull<Node<T>>>, len: usize) -> Self {
        Self {
            next: first,
            len,
            _tree: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        // SAFETY: `successor` only reads link fields, so it doesn't alias the values already
        // handed out. Each node is visited once, so every `&mut T` is unique.
        unsafe {
            self.next = Node::successor(node);
            self.len -= 1;
            Some(&mut (*node.as_ptr()).value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

/// An owning iterator over the values of a tree in ascending order.
///
/// Each step unlinks the smallest remaining node. That node never has a left child, so its right
/// subtree simply takes its place.
pub struct IntoIter<T> {
    next: Option<NonNull<Node<T>>>,
    len: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

// SAFETY: The iterator owns the remaining nodes exclusively.
unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    /// # Safety
    ///
    /// `root` must be the root of a well-linked tree that nothing else owns any more.
    pub(crate) unsafe fn new(root: Option<NonNull<Node<T>>>, len: usize) -> Self {
        Self {
            next: root.map(|root| Node::leftmost(root)),
            len,
            _owns: PhantomData,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        // SAFETY: `node` is the leftmost node and is owned by this iterator. It was allocated with
        // `Box::new` and, once its right child is spliced into its place, nothing points at it.
        let node = unsafe { Box::from_raw(node.as_ptr()) };
        let parent = node.parent.0;
        let right = node.right.0;
        unsafe {
            if let Some(right) = right {
                (*right.as_ptr()).parent.0 = parent;
            }
            if let Some(parent) = parent {
                (*parent.as_ptr()).left.0 = right;
            }
            self.next = match right {
                Some(right) => Some(Node::leftmost(right)),
                None => parent,
            };
        }
        self.len -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for _ in self {}
    }
}

#[cfg(test)]
mod tests {
    use crate::OrderedTree;

    #[test]
    fn begin_walks_every_value() {
        let tree: OrderedTree<i32> = (1..=5).collect();

        let mut count = 0;
        let mut cursor = tree.begin();
        while cursor != tree.end() {
            count += 1;
            cursor.move_next();
        }
        assert_eq!(count, 5);
    }

    #[test]
    fn increment_past_single_value() {
        let tree: OrderedTree<i32> = [10].into_iter().collect();

        let mut cursor = tree.begin();
        cursor.move_next();
        assert_eq!(cursor, tree.end());
        assert_eq!(cursor.get(), None);
    }

    #[test]
    fn increment_through_small_tree() {
        let tree: OrderedTree<i32> = [3, 2, 4].into_iter().collect();

        let mut cursor = tree.begin();
        assert_eq!(cursor.get(), Some(&2));
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&3));
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&4));
    }

    #[test]
    fn increment_climbs_through_parents() {
        // 7 climbs two levels to reach 8 and 14 climbs out of the tree entirely.
        let tree: OrderedTree<i32> = [8, 3, 10, 1, 6, 14, 4, 7, 13].into_iter().collect();

        let mut cursor = tree.find(&7);
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&8));

        let mut cursor = tree.find(&14);
        cursor.move_next();
        assert!(cursor.is_end());
    }

    #[test]
    fn cursors_compare_by_position() {
        let tree: OrderedTree<i32> = [2, 1, 3].into_iter().collect();

        let mut from_begin = tree.begin();
        from_begin.move_next();
        assert_eq!(from_begin, tree.find(&2));
        assert_ne!(from_begin, tree.find(&3));
        assert_ne!(from_begin, tree.end());
        assert_eq!(format!("{:?}", from_begin), "Cursor(Some(2))");
    }

    #[test]
    fn cursor_mut_moves_and_writes() {
        let mut tree: OrderedTree<i32> = [20, 10, 30].into_iter().collect();

        let mut cursor = tree.min_element_mut();
        while let Some(value) = cursor.get_mut() {
            *value += 1;
            cursor.move_next();
        }
        assert!(cursor.is_end());

        assert!(tree.iter().eq([11, 21, 31].iter()));
        assert!(tree.check_sorting_invariant());
    }

    #[test]
    fn cursor_mut_views() {
        let mut tree: OrderedTree<i32> = [5, 1, 9].into_iter().collect();

        let cursor = tree.max_element_mut();
        assert_eq!(cursor.get(), Some(&9));
        assert_eq!(cursor.as_cursor().get(), Some(&9));
        *cursor.into_mut().unwrap() = 10;

        let cursor = tree.min_greater_than_mut(&1);
        assert_eq!(cursor.get(), Some(&5));

        assert!(tree.find_mut(&42).is_end());
        assert!(tree.begin_mut().get_mut().is_some());
        assert_eq!(tree.max_element().get(), Some(&10));
    }

    #[test]
    fn iter_is_exact_and_fused() {
        let tree: OrderedTree<i32> = [4, 2, 6, 1, 3].into_iter().collect();

        let mut iter = tree.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.by_ref().count(), 4);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_debug_lists_remaining_values() {
        let tree: OrderedTree<i32> = [2, 1, 3].into_iter().collect();

        let mut iter = tree.iter();
        iter.next();
        assert_eq!(format!("{:?}", iter), "[2, 3]");
    }

    #[test]
    fn iter_mut_can_break_ordering() {
        let mut tree: OrderedTree<i32> = [1, 2, 3].into_iter().collect();

        for value in &mut tree {
            *value = -*value;
        }

        assert!(!tree.check_sorting_invariant());
        assert!(tree.iter().eq([-1, -2, -3].iter()));
    }

    #[test]
    fn into_iter_on_chain_and_partial_drop() {
        let tree: OrderedTree<i32> = (0..100).rev().collect();

        let mut into_iter = tree.into_iter();
        assert_eq!(into_iter.len(), 100);
        assert!(into_iter.by_ref().take(50).eq(0..50));
        assert_eq!(into_iter.len(), 50);
    }
}
