//! Iterators over the values of a subtree.

use generational_arena::Index;

use crate::node::Node;
use crate::tree::Tree;

/// Iterates a subtree root first, then its left subtree, then its right subtree. This is the
/// order of [`Node::to_list`] and of the rendered form, not sorted order.
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<Index>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(start: Node<'a, T>) -> Self {
        Self {
            tree: start.tree,
            stack: vec![start.index],
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.stack.pop() {
            let slot = self.tree.slot(index);
            // Push right first so left comes off the stack first.
            self.stack.extend(slot.right);
            self.stack.extend(slot.left);
            if let Some(value) = &slot.value {
                return Some(value);
            }
        }
        None
    }
}

/// Iterates a subtree in sorted order: left subtree, then the node, then the right subtree.
///
/// # Examples
///
/// ```
/// use node_bst::Tree;
///
/// let mut tree = Tree::new();
/// for x in [5, 3, 8, 5] {
///     tree.add(x)?;
/// }
///
/// assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), vec![3, 5, 5, 8]);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![5, 3, 5, 8]);
/// # Ok::<(), node_bst::TreeError>(())
/// ```
pub struct InOrder<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<Index>,
    // The next subtree whose leftmost spine still has to be pushed.
    next: Option<Index>,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(start: Node<'a, T>) -> Self {
        Self {
            tree: start.tree,
            stack: Vec::new(),
            next: Some(start.index),
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.next {
            self.stack.push(index);
            self.next = self.tree.slot(index).left;
        }

        let slot = self.tree.slot(self.stack.pop()?);
        self.next = slot.right;
        slot.value.as_ref()
    }
}
