//! Helpers shared by the unit tests.


use std::sync::Once;

use generational_arena::Index;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::tree::Tree;

static TEST_LOGGING: Once = Once::new();

/// Installs a global `tracing` subscriber once per test binary. Set `RUST_LOG` (e.g.
/// `RUST_LOG=node_bst=debug`) to see the deletion cases as they run.
pub(crate) fn init_test_logging() {
    TEST_LOGGING.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_filter(env_filter),
            )
            .try_init();
    });
}

/// Walks every node reachable from the root and asserts:
///
/// 1. every child points back at the node owning it,
/// 2. left subtrees hold values `<=` their parent and right subtrees values `>` it,
/// 3. only the root may be empty, and an empty node has no children,
/// 4. nothing unreachable is left in the arena.
pub(crate) fn assert_invariants<T>(tree: &Tree<T>)
where
    T: Ord + std::fmt::Debug,
{
    let root = tree.root().index;
    assert_eq!(tree.arena[root].parent, None);

    // (node, exclusive lower bound, inclusive upper bound)
    let mut stack: Vec<(Index, Option<&T>, Option<&T>)> = vec![(root, None, None)];
    let mut reachable = 0;
    while let Some((index, lower, upper)) = stack.pop() {
        reachable += 1;
        let slot = &tree.arena[index];

        let Some(value) = &slot.value else {
            assert_eq!(index, root, "only the root may be empty");
            assert!(slot.left.is_none() && slot.right.is_none());
            continue;
        };
        if let Some(lower) = lower {
            assert!(value > lower, "{value:?} should be > {lower:?}");
        }
        if let Some(upper) = upper {
            assert!(value <= upper, "{value:?} should be <= {upper:?}");
        }

        if let Some(left) = slot.left {
            assert_eq!(tree.arena[left].parent, Some(index));
            stack.push((left, lower, Some(value)));
        }
        if let Some(right) = slot.right {
            assert_eq!(tree.arena[right].parent, Some(index));
            stack.push((right, Some(value), upper));
        }
    }

    assert_eq!(tree.arena.len(), reachable, "arena holds unreachable nodes");
}
