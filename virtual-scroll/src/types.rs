/// The role a cell plays in the virtualized list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Item,
    Header,
    Footer,
}

/// The identity half of a [`CellId`].
///
/// `Keyed` values come from the caller's item-key function and survive item-list replacement.
/// `Serial` values are handed out by the engine and never repeat, so a rebuild without an
/// item-key function produces all-new identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKey {
    Keyed(u64),
    Serial(u64),
}

/// Explicit identity of a cell, used by the reconciler to recognise "the same cell as before".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId {
    pub kind: CellKind,
    pub key: CellKey,
}

/// An inclusive range of cell indexes that must be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub top: usize,
    pub bottom: usize, // inclusive
}

impl VisibleRange {
    pub fn len(&self) -> usize {
        self.bottom.saturating_sub(self.top) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.top && index <= self.bottom
    }
}

/// What the render dispatcher must do with a node descriptor in the current pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeKind {
    /// Not claimed this pass and already out of view; the element is left untouched.
    #[default]
    None,
    /// Shown last pass but not claimed this one; the element is hidden.
    Retired,
    /// Still bound to the same cell; only its offset is rewritten.
    Repositioned,
    /// Bound to a different cell (or newly created); the element is re-rendered.
    Rebound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}
