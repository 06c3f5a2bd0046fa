//! Structured reports for broken [`OrderedTree`][crate::OrderedTree] invariants.
//!
//! The tree never fails on its own: querying for something that isn't there yields the end
//! cursor instead. The only way to get an [`InvariantError`] is to ask for one with
//! [`OrderedTree::validate`][crate::OrderedTree::validate], typically after handing out mutable
//! access through a [`CursorMut`][crate::CursorMut].

use thiserror::Error;

/// Describes the first invariant violation found while walking a tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantError {
    /// A node's value is not strictly between the bounds implied by its ancestors. `depth` is 1
    /// for the root.
    #[error("node at depth {depth} is out of order with respect to its ancestors")]
    OutOfOrder {
        /// Depth of the offending node.
        depth: usize,
    },
    /// The number of reachable nodes disagrees with the recorded length.
    #[error("tree records {recorded} elements but {counted} are reachable")]
    SizeMismatch {
        /// What `len()` reports.
        recorded: usize,
        /// How many nodes a full walk visited.
        counted: usize,
    },
    /// A child's parent link doesn't point back at the node that owns it.
    #[error("node at depth {depth} has a parent link that doesn't point at its owner")]
    BrokenParentLink {
        /// Depth of the child whose link is wrong.
        depth: usize,
    },
    /// The root has a parent link.
    #[error("root node has a parent link")]
    RootHasParent,
}
