//! A mutable Binary Search Tree (BST) built out of nodes that each know
//! their parent.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! will sometimes have child `Node`s. The most important invariants of the
//! BST in this crate are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have a
//!    value less than or equal to its own value. Equal values always go left.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have a
//!    value strictly greater than its own value.
//! 3. Every child `Node` records the `Node` owning it as its parent.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! This tree makes no attempt to stay balanced, so inserting sorted values
//! degrades it into a list and every operation to `O(N)`.
//!
//! ## Nodes as subtrees
//!
//! Every [`Node`] is also a view of the subtree rooted at it: `first`,
//! `last`, `depth`, `size`, `find` and friends all answer for that subtree,
//! and [`NodeMut`] mutates just that subtree. [`Tree`] owns the nodes and
//! forwards its methods to its root node.
//!
//! ```
//! use node_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for word in ["k", "i", "d", "o"] {
//!     tree.add(word)?;
//! }
//!
//! assert_eq!(tree.to_string(), "k(i(d, -), o)");
//! assert_eq!(tree.first().value(), Some(&"d"));
//! assert_eq!(tree.root().left().map(|n| n.size()), Some(2));
//! # Ok::<(), node_bst::TreeError>(())
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod iter;
pub mod node;
pub mod tree;
mod util;

#[cfg(test)]
mod test;

pub use error::{TreeError, TreeResult};
pub use iter::{InOrder, Iter};
pub use node::{Node, NodeMut, Shape};
pub use tree::{NodeId, Tree};
