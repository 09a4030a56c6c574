use generational_arena::Index;

/// Which child slot of a parent a node hangs from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    /// Works out which slot of a parent with the given children holds `child`. This compares
    /// identities, never values, so duplicates can't confuse it.
    pub(crate) fn of(child: Index, left: Option<Index>, right: Option<Index>) -> Option<Self> {
        if left == Some(child) {
            Some(Side::Left)
        } else if right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}
