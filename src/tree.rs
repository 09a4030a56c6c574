//! The owner of every node in a BST, and the algorithms that mutate it.
//!
//! Nodes live in a generational arena. A node owns its children through its `left` and `right`
//! indices, while its `parent` index is purely navigational. Because indices are generational, a
//! [`NodeId`] kept around after its node has been freed is detected as stale instead of silently
//! pointing at whatever reused the slot.
//!
//! # Examples
//!
//! ```
//! use node_bst::Tree;
//!
//! let mut tree = Tree::new();
//! assert!(tree.is_empty());
//!
//! tree.add("k")?;
//! tree.add("i")?;
//! tree.add("d")?;
//! assert_eq!(tree.to_string(), "k(i(d, -), -)");
//!
//! // Removing a node with one child pulls that child up.
//! assert_eq!(tree.remove(&"k"), Some("k"));
//! assert_eq!(tree.to_string(), "i(d, -)");
//!
//! // Removing a leaf just drops it.
//! tree.remove(&"d");
//! assert_eq!(tree.to_string(), "i");
//!
//! // Absent values are rejected.
//! assert!(tree.add(None::<&str>).is_err());
//! # Ok::<(), node_bst::TreeError>(())
//! ```

use std::fmt;
use std::mem;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::error::TreeResult;
use crate::iter::{InOrder, Iter};
use crate::node::{Node, NodeMut};
use crate::util::Side;

/// An opaque handle naming one node of a [`Tree`]. It stays valid for as long as the node it
/// names is in the tree; see [`Tree::node`].
///
/// An id only means something to the tree that handed it out. Nothing ties it to that tree, so
/// passing it to another tree may name an unrelated node of that tree. A [clone][Clone] of a
/// tree is the exception: it keeps every id of the original.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// The storage behind a single node.
#[derive(Clone, Debug)]
pub(crate) struct Slot<T> {
    pub(crate) value: Option<T>,
    pub(crate) parent: Option<Index>,
    pub(crate) left: Option<Index>,
    pub(crate) right: Option<Index>,
}

impl<T> Slot<T> {
    fn empty() -> Self {
        Self {
            value: None,
            parent: None,
            left: None,
            right: None,
        }
    }

    fn leaf(value: T, parent: Index) -> Self {
        Self {
            value: Some(value),
            parent: Some(parent),
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<Index> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<Index> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A mutable, unbalanced Binary Search Tree.
///
/// Values that compare equal to an existing value are stored in that value's left subtree, so
/// every left subtree holds values `<=` its parent and every right subtree holds values `>` it.
///
/// Every method here is shorthand for the same method on the root node; use [`Tree::root`] or
/// [`Tree::root_mut`] (or [`Tree::node`]/[`Tree::node_mut`]) to work on a subtree instead.
#[derive(Clone)]
pub struct Tree<T> {
    pub(crate) arena: Arena<Slot<T>>,
    // The root slot always exists. An empty tree is an empty root slot.
    root: Index,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Slot::empty());
        Self { arena, root }
    }

    /// The root node of the tree. This node is empty when the tree is.
    pub fn root(&self) -> Node<'_, T> {
        Node::new(self, self.root)
    }

    /// A mutable handle to the root node of the tree.
    pub fn root_mut(&mut self) -> NodeMut<'_, T> {
        let root = self.root;
        NodeMut::new(self, root)
    }

    /// Looks up the node named by `id`. Returns `None` when that node has since been removed from
    /// the tree, either by [`clear`][NodeMut::clear] or because a removal absorbed it into its
    /// parent.
    ///
    /// `id` must come from this tree; see [`NodeId`].
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
    /// let one = tree.find(&1).unwrap().id();
    /// assert_eq!(tree.node(one).and_then(|n| n.value()), Some(&1));
    ///
    /// tree.remove(&1);
    /// assert!(tree.node(one).is_none());
    /// # Ok::<(), node_bst::TreeError>(())
    /// ```
    pub fn node(&self, id: NodeId) -> Option<Node<'_, T>> {
        self.arena.contains(id.0).then(|| Node::new(self, id.0))
    }

    /// Mutable version of [`Tree::node`]. As there, `id` must come from this tree.
    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_, T>> {
        if !self.arena.contains(id.0) {
            return None;
        }
        Some(NodeMut::new(self, id.0))
    }

    /// Adds `value` to the tree. Passing `None` is rejected with
    /// [`InvalidArgument`][crate::TreeError::InvalidArgument] and leaves the tree as it was.
    pub fn add<V>(&mut self, value: V) -> TreeResult<()>
    where
        T: Ord,
        V: Into<Option<T>>,
    {
        self.root_mut().add(value)
    }

    /// Removes one occurrence of `value` from the tree and returns it. If the tree does not
    /// contain `value`, nothing happens.
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        self.root_mut().remove(value)
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        self.root_mut().clear();
    }

    /// Finds the topmost node holding `value`, if any.
    pub fn find(&self, value: &T) -> Option<Node<'_, T>>
    where
        T: Ord,
    {
        self.root().find(value)
    }

    /// Whether any node holds `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.root().contains(value)
    }

    /// The node holding the smallest value.
    pub fn first(&self) -> Node<'_, T> {
        self.root().first()
    }

    /// The node holding the largest value.
    pub fn last(&self) -> Node<'_, T> {
        self.root().last()
    }

    /// The number of edges on the longest path down from the root. See [`Node::depth`].
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.root().depth()
    }

    /// The number of values in the tree.
    #[instrument(level = "debug", skip(self))]
    pub fn size(&self) -> usize {
        self.root().size()
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root().is_empty()
    }

    /// Iterates the tree's values root first, then the left subtree, then the right subtree.
    pub fn iter(&self) -> Iter<'_, T> {
        self.root().iter()
    }

    /// Iterates the tree's values in sorted order.
    pub fn in_order(&self) -> InOrder<'_, T> {
        self.root().in_order()
    }

    /// Collects [`Tree::iter`].
    pub fn to_list(&self) -> Vec<&T> {
        self.root().to_list()
    }

    pub(crate) fn slot(&self, at: Index) -> &Slot<T> {
        &self.arena[at]
    }

    /// Adds `value` to the subtree rooted at `at`. An empty node takes the value itself, otherwise
    /// we walk down to a free child slot and hang a new node there.
    #[instrument(level = "trace", skip_all)]
    pub(crate) fn add_at(&mut self, at: Index, value: T)
    where
        T: Ord,
    {
        if self.arena[at].value.is_none() {
            debug!(node = ?at, "filling empty node");
            self.arena[at].value = Some(value);
            return;
        }

        let mut current = at;
        loop {
            let slot = &self.arena[current];
            // Equal values go left.
            let side = match &slot.value {
                Some(current_value) if value > *current_value => Side::Right,
                _ => Side::Left,
            };
            match slot.child(side) {
                Some(child) => current = child,
                None => {
                    let child = self.arena.insert(Slot::leaf(value, current));
                    *self.arena[current].child_mut(side) = Some(child);
                    debug!(parent = ?current, node = ?child, ?side, "attached new node");
                    self.check_links(current);
                    return;
                }
            }
        }
    }

    /// Removes the topmost node holding `value` from the subtree rooted at `at`.
    #[instrument(level = "trace", skip_all)]
    pub(crate) fn remove_at(&mut self, at: Index, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let target = Node::new(self, at).find(value)?.index;
        self.unlink(target)
    }

    /// Detaches `at` from its parent and frees it along with everything below it. The root can't
    /// be detached so it's reset to empty instead.
    #[instrument(level = "trace", skip_all)]
    pub(crate) fn clear_at(&mut self, at: Index) {
        let slot = &mut self.arena[at];
        let children = [slot.left.take(), slot.right.take()];
        slot.value = None;
        let parent = slot.parent;

        match parent {
            Some(parent) => {
                let parent_slot = &mut self.arena[parent];
                if let Some(side) = Side::of(at, parent_slot.left, parent_slot.right) {
                    *parent_slot.child_mut(side) = None;
                }
                debug!(node = ?at, ?parent, "detached node");
                self.arena.remove(at);
                self.check_links(parent);
            }
            None => debug!(node = ?at, "reset root to empty"),
        }

        for child in children.into_iter().flatten() {
            self.free(child);
        }
    }

    /// Takes the value out of `target` while keeping the order and parent links intact.
    ///
    /// A node with two children takes its predecessor's value. Equal values sort left, so the
    /// largest value on the left is the only replacement that keeps the right side strictly
    /// greater.
    fn unlink(&mut self, target: Index) -> Option<T> {
        let slot = &self.arena[target];
        match (slot.left, slot.right) {
            (Some(left), Some(_)) => {
                let predecessor = Node::new(self, left).last().index;
                debug!(node = ?target, ?predecessor, "replacing with predecessor");
                // The predecessor has no right child so this only recurses once.
                let replacement = self.unlink(predecessor);
                mem::replace(&mut self.arena[target].value, replacement)
            }
            (Some(child), None) | (None, Some(child)) => self.absorb(target, child),
            (None, None) => {
                let value = self.arena[target].value.take();
                self.clear_at(target);
                value
            }
        }
    }

    /// Pulls the only child of `target` up into `target`, adopting its value and children, and
    /// frees the child's old node. Returns `target`'s previous value.
    fn absorb(&mut self, target: Index, child: Index) -> Option<T> {
        debug!(node = ?target, ?child, "absorbing only child");
        let absorbed = self.arena.remove(child)?;
        for grandchild in [absorbed.left, absorbed.right].into_iter().flatten() {
            self.arena[grandchild].parent = Some(target);
        }

        let slot = &mut self.arena[target];
        slot.left = absorbed.left;
        slot.right = absorbed.right;
        let value = mem::replace(&mut slot.value, absorbed.value);
        self.check_links(target);
        value
    }

    /// Frees `at` and its whole subtree.
    fn free(&mut self, at: Index) {
        let mut stack = vec![at];
        while let Some(index) = stack.pop() {
            if let Some(slot) = self.arena.remove(index) {
                stack.extend(slot.left);
                stack.extend(slot.right);
            }
        }
    }

    /// In debug builds, asserts that `at`'s children point back at it and that an empty node has
    /// no children.
    fn check_links(&self, at: Index) {
        if cfg!(debug_assertions) {
            let slot = &self.arena[at];
            for child in [slot.left, slot.right].into_iter().flatten() {
                assert_eq!(self.arena[child].parent, Some(at));
            }
            if slot.value.is_none() {
                assert!(slot.left.is_none() && slot.right.is_none());
            }
        }
    }
}

impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root()).finish()
    }
}
