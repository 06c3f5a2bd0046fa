//! This crate exposes an ordered, mutable Binary Search Tree with cursors, mostly for educational
//! purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and walk stored
//! values in order. BSTs are typically defined recursively using the notion of a `Node`. A `Node`
//! stores a value and will sometimes have child `Node`s. The most important invariants of a BST
//! are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a value less than its
//!    own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a value greater than
//!    its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is the number of `Node`s on
//! the longest path from the root `Node` to a leaf `Node`). [`OrderedTree`] does not rebalance, so
//! inserting values in sorted order gives a tree of height `N`, one long chain of `Node`s. BSTs
//! also naturally support sorted iteration by visiting the left subtree, then the subtree root,
//! then the right subtree.
//!
//! ## Cursors
//!
//! Lookups return a [`Cursor`] rather than an `Option`. A cursor either points at a value or is
//! the end cursor, and can be stepped forward to the next value in order. Each `Node` keeps a
//! pointer to its parent so stepping forward needs no extra memory.
//!
//! A [`CursorMut`] can write to the value it points at. The tree can't tell, so a write that
//! moves a value past its neighbours leaves the tree out of order.
//! [`OrderedTree::check_sorting_invariant`] and [`OrderedTree::validate`] report this but never
//! repair it.
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree: OrderedTree<i32> = [1, 2, 3].into_iter().collect();
//!
//! *tree.find_mut(&2).into_mut().unwrap() = 4;
//! assert!(!tree.check_sorting_invariant());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod cursor;
pub mod errors;
mod tree;


pub use cursor::{Cursor, CursorMut, IntoIter, Iter, IterMut};
pub use errors::InvariantError;
pub use tree::OrderedTree;
