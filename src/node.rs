//! Handles onto single nodes of a [`Tree`]. A node doubles as the subtree rooted at it, so every
//! query here answers for that subtree, and every mutation through [`NodeMut`] only touches that
//! subtree.
//!
//! # Examples
//!
//! ```
//! use node_bst::{Shape, Tree};
//!
//! let mut tree = Tree::new();
//! for x in [5, 3, 8, 7] {
//!     tree.add(x)?;
//! }
//!
//! let eight = tree.find(&8).unwrap();
//! assert_eq!(eight.shape(), Shape::LeftOnly);
//! assert_eq!(eight.parent().and_then(|n| n.value()), Some(&5));
//! assert_eq!(eight.root(), tree.root());
//! assert_eq!(eight.to_string(), "8(7, -)");
//! # Ok::<(), node_bst::TreeError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ptr;

use generational_arena::Index;
use tracing::instrument;

use crate::error::{TreeError, TreeResult};
use crate::iter::{InOrder, Iter};
use crate::tree::{NodeId, Slot, Tree};

/// Which children a node has.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// No value and no children. Only the root of an empty tree looks like this.
    Empty,
    /// A value and no children.
    Leaf,
    /// A value and only a left child.
    LeftOnly,
    /// A value and only a right child.
    RightOnly,
    /// A value and both children.
    Full,
}

/// A read-only view of one node and the subtree below it.
pub struct Node<'a, T> {
    pub(crate) tree: &'a Tree<T>,
    pub(crate) index: Index,
}

/// Manual implementations of `Clone` and `Copy` so we don't require `T: Clone`.
impl<T> Clone for Node<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Node<'_, T> {}

/// Two handles are equal when they name the same node of the same tree, whatever the values.
impl<T> PartialEq for Node<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}
impl<T> Eq for Node<'_, T> {}

impl<'a, T> Node<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, index: Index) -> Self {
        Self { tree, index }
    }

    fn slot(&self) -> &'a Slot<T> {
        self.tree.slot(self.index)
    }

    fn at(&self, index: Option<Index>) -> Option<Self> {
        index.map(|index| Self::new(self.tree, index))
    }

    /// A handle that can be used to find this node again later with [`Tree::node`].
    pub fn id(&self) -> NodeId {
        NodeId(self.index)
    }

    /// The value stored here. Only an empty tree's root has none.
    pub fn value(&self) -> Option<&'a T> {
        self.slot().value.as_ref()
    }

    /// The node owning this one, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.at(self.slot().parent)
    }

    /// The left child.
    pub fn left(&self) -> Option<Self> {
        self.at(self.slot().left)
    }

    /// The right child.
    pub fn right(&self) -> Option<Self> {
        self.at(self.slot().right)
    }

    /// Whether this node has a parent, i.e. isn't the root.
    pub fn has_parent(&self) -> bool {
        self.slot().parent.is_some()
    }

    /// Whether this node has a left child.
    pub fn has_left(&self) -> bool {
        self.slot().left.is_some()
    }

    /// Whether this node has a right child.
    pub fn has_right(&self) -> bool {
        self.slot().right.is_some()
    }

    /// Whether this node holds no value.
    pub fn is_empty(&self) -> bool {
        self.slot().value.is_none()
    }

    /// Which children this node has.
    pub fn shape(&self) -> Shape {
        let slot = self.slot();
        match (&slot.value, slot.left, slot.right) {
            (None, _, _) => Shape::Empty,
            (Some(_), None, None) => Shape::Leaf,
            (Some(_), Some(_), None) => Shape::LeftOnly,
            (Some(_), None, Some(_)) => Shape::RightOnly,
            (Some(_), Some(_), Some(_)) => Shape::Full,
        }
    }

    /// Walks parent links up to the root of the whole tree.
    pub fn root(&self) -> Self {
        let mut current = *self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// The node holding the smallest value in this subtree, found by following left children.
    pub fn first(&self) -> Self {
        let mut current = *self;
        while let Some(left) = current.left() {
            current = left;
        }
        current
    }

    /// The node holding the largest value in this subtree, found by following right children.
    pub fn last(&self) -> Self {
        let mut current = *self;
        while let Some(right) = current.right() {
            current = right;
        }
        current
    }

    /// The number of edges on the longest path down from this node: `0` for an empty node or a
    /// leaf, otherwise one more than the deepest child.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.index, 0)];
        while let Some((index, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let slot = self.tree.slot(index);
            stack.extend(slot.left.map(|left| (left, depth + 1)));
            stack.extend(slot.right.map(|right| (right, depth + 1)));
        }
        deepest
    }

    /// The number of values in this subtree.
    pub fn size(&self) -> usize {
        // Only the root can be empty and it has no children then, so this counts every node.
        self.iter().count()
    }

    /// Finds the topmost node in this subtree holding `value` by walking down from here.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(2)?;
    /// tree.add(1)?;
    ///
    /// assert_eq!(tree.root().find(&1).and_then(|n| n.value()), Some(&1));
    /// assert!(tree.root().find(&42).is_none());
    /// # Ok::<(), node_bst::TreeError>(())
    /// ```
    pub fn find(&self, value: &T) -> Option<Self>
    where
        T: Ord,
    {
        let mut current = *self;
        loop {
            match value.cmp(current.value()?) {
                Ordering::Less => current = current.left()?,
                Ordering::Equal => return Some(current),
                Ordering::Greater => current = current.right()?,
            }
        }
    }

    /// Whether this subtree holds `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find(value).is_some()
    }

    /// Iterates this subtree's values: this node's value, then the left subtree's, then the right
    /// subtree's. Note that this is not sorted; see [`Node::in_order`] for that.
    pub fn iter(&self) -> Iter<'a, T> {
        Iter::new(*self)
    }

    /// Iterates this subtree's values in sorted order.
    pub fn in_order(&self) -> InOrder<'a, T> {
        InOrder::new(*self)
    }

    /// Collects [`Node::iter`].
    pub fn to_list(&self) -> Vec<&'a T> {
        self.iter().collect()
    }
}

/// Renders the subtree as `value(left, right)`, writing `-` for a missing child and dropping the
/// parentheses for a leaf. An empty node renders as nothing.
impl<T> fmt::Display for Node<'_, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Render::Node(self.index)];
        while let Some(next) = stack.pop() {
            let index = match next {
                Render::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Render::Node(index) => index,
            };
            let slot = self.tree.slot(index);
            let Some(value) = &slot.value else {
                continue;
            };
            write!(f, "{value}")?;
            // Pushed in reverse so they come off the stack left to right.
            match (slot.left, slot.right) {
                (None, None) => {}
                (Some(left), Some(right)) => {
                    f.write_str("(")?;
                    stack.extend([
                        Render::Text(")"),
                        Render::Node(right),
                        Render::Text(", "),
                        Render::Node(left),
                    ]);
                }
                (Some(left), None) => {
                    f.write_str("(")?;
                    stack.extend([Render::Text(", -)"), Render::Node(left)]);
                }
                (None, Some(right)) => {
                    f.write_str("(-, ")?;
                    stack.extend([Render::Text(")"), Render::Node(right)]);
                }
            }
        }
        Ok(())
    }
}

/// Pending work while rendering a subtree.
enum Render {
    /// Render the subtree rooted here.
    Node(Index),
    /// Write this punctuation.
    Text(&'static str),
}

impl<T> fmt::Debug for Node<'_, T>
where
    T: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

/// A mutable handle on one node and the subtree below it.
///
/// Mutations never reach outside this subtree, so adding through a handle that isn't the root
/// is only order-preserving for the whole tree if the value belongs in this subtree.
pub struct NodeMut<'a, T> {
    tree: &'a mut Tree<T>,
    index: Index,
}

impl<'a, T> NodeMut<'a, T> {
    pub(crate) fn new(tree: &'a mut Tree<T>, index: Index) -> Self {
        Self { tree, index }
    }

    /// See [`Node::id`].
    pub fn id(&self) -> NodeId {
        NodeId(self.index)
    }

    /// Borrows a read-only view of this node.
    pub fn as_node(&self) -> Node<'_, T> {
        Node::new(self.tree, self.index)
    }

    /// Turns this handle into a read-only view of this node.
    pub fn into_node(self) -> Node<'a, T> {
        Node::new(self.tree, self.index)
    }

    /// Moves this handle up to the parent, if there is one.
    pub fn into_parent(self) -> Option<Self> {
        let parent = self.tree.slot(self.index).parent?;
        Some(Self::new(self.tree, parent))
    }

    /// Moves this handle down to the left child, if there is one.
    pub fn into_left(self) -> Option<Self> {
        let left = self.tree.slot(self.index).left?;
        Some(Self::new(self.tree, left))
    }

    /// Moves this handle down to the right child, if there is one.
    pub fn into_right(self) -> Option<Self> {
        let right = self.tree.slot(self.index).right?;
        Some(Self::new(self.tree, right))
    }

    /// Adds `value` to this subtree. An empty node stores the value itself; otherwise a new leaf
    /// is hung below it, with values equal to an existing one going left.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidArgument`] when `value` is `None`. The tree isn't touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_bst::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// tree.root_mut().add(1)?;
    /// tree.root_mut().add(1)?;
    /// assert_eq!(tree.to_string(), "1(1, -)");
    ///
    /// let err = tree.root_mut().add(None::<i32>);
    /// assert!(matches!(err, Err(TreeError::InvalidArgument(_))));
    /// # Ok::<(), TreeError>(())
    /// ```
    #[instrument(level = "trace", skip_all, fields(node = ?self.index))]
    pub fn add<V>(&mut self, value: V) -> TreeResult<()>
    where
        T: Ord,
        V: Into<Option<T>>,
    {
        let value = value
            .into()
            .ok_or(TreeError::InvalidArgument("cannot add an absent value"))?;
        self.tree.add_at(self.index, value);
        Ok(())
    }

    /// Removes the topmost node holding `value` in this subtree and returns the value. Does
    /// nothing if the subtree doesn't hold `value`.
    ///
    /// This consumes the handle since the node it names may be the one that goes away.
    ///
    /// A node with two children isn't freed; it takes over its in-order predecessor's value and
    /// the predecessor's node is removed instead. A node with one child takes over that child.
    #[instrument(level = "trace", skip_all, fields(node = ?self.index))]
    pub fn remove(self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        self.tree.remove_at(self.index, value)
    }

    /// Detaches this node from its parent and drops it along with its whole subtree. Clearing the
    /// root empties the tree instead.
    #[instrument(level = "trace", skip_all, fields(node = ?self.index))]
    pub fn clear(self) {
        self.tree.clear_at(self.index);
    }
}
