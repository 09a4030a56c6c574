use node_bst::{Node, Tree};

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and a vector of the values it should hold.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same values in both.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, values: &mut Vec<T>)
where
    T: Ord + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Add(x) => {
                bst.add(x.clone()).unwrap();
                values.push(x.clone());
            }
            Op::Remove(x) => {
                let expected = values
                    .iter()
                    .position(|y| y == x)
                    .map(|pos| values.swap_remove(pos));
                assert_eq!(bst.remove(x), expected);
            }
        }
    }
}

/// Checks order and parent links using nothing but the public API.
fn is_well_formed<T: Ord>(node: Node<'_, T>) -> bool {
    let Some(value) = node.value() else {
        return !node.has_left() && !node.has_right();
    };
    let left_ok = node.left().map_or(true, |left| {
        left.parent() == Some(node) && left.last().value() <= Some(value) && is_well_formed(left)
    });
    let right_ok = node.right().map_or(true, |right| {
        right.parent() == Some(node) && right.first().value() > Some(value) && is_well_formed(right)
    });
    left_ok && right_ok
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut values = Vec::new();

        do_ops(&ops, &mut tree, &mut values);
        values.sort();

        is_well_formed(tree.root())
            && tree.size() == values.len()
            && tree.in_order().copied().collect::<Vec<_>>() == values
            && values.iter().all(|x| tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.add(*x).unwrap();
        }

        tree.size() == xs.len() && xs.iter().all(|x| tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.add(*x).unwrap();
        }
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn first_and_last(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.add(*x).unwrap();
        }

        tree.first().value() == xs.iter().min() && tree.last().value() == xs.iter().max()
    }
}

quickcheck::quickcheck! {
    fn add_absent_changes_nothing(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.add(*x).unwrap();
        }
        let before = tree.to_string();

        tree.add(None::<i8>).is_err() && tree.to_string() == before && tree.size() == xs.len()
    }
}

quickcheck::quickcheck! {
    fn remove_unique_shrinks_by_one(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        let unique: HashSet<_> = xs.iter().copied().collect();
        for x in &unique {
            tree.add(*x).unwrap();
        }

        unique.iter().all(|x| {
            let size = tree.size();
            tree.remove(x) == Some(*x)
                && !tree.contains(x)
                && tree.size() == size - 1
                && is_well_formed(tree.root())
        }) && tree.is_empty()
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.add(*x).unwrap();
        }
        for delete in &deletes {
            // We may have added the same value multiple times - remove each one.
            while tree.remove(delete).is_some() {}
        }

        let mut still_present = xs;
        still_present.retain(|x| !deletes.contains(x));

        deletes.iter().all(|x| !tree.contains(x))
            && still_present.iter().all(|x| tree.contains(x))
            && tree.size() == still_present.len()
    }
}
