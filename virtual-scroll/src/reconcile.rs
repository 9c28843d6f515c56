use alloc::vec::Vec;

use crate::{Cell, CellId, CellKind, ChangeKind, VisibleRange};

/// The cell a node descriptor currently represents.
///
/// `index` is the cell's position in the cell list as of the last reconciliation. It is a weak
/// association: after a cell rebuild it may point at a different cell, which is why lookups
/// also compare `id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellBinding {
    pub id: CellId,
    pub kind: CellKind,
    pub index: usize,
}

/// A reusable slot standing for one concrete element in the container.
///
/// Pool position `i` always corresponds to child element `i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeDescriptor {
    pub cell: CellBinding,
    /// Pixel offset to place the element at. `None` means off-screen (not claimed this pass).
    pub top: Option<u64>,
    pub change: ChangeKind,
    pub(crate) stale: bool,
}

impl NodeDescriptor {
    pub fn is_visible(&self) -> bool {
        self.top.is_some()
    }
}

/// The node descriptor pool. It grows when more cells are visible at once than there are
/// descriptors, and never shrinks.
#[derive(Clone, Debug, Default)]
pub struct NodePool {
    nodes: Vec<NodeDescriptor>,
    unmatched: Vec<usize>, // scratch, cell indexes still needing a slot
}

impl NodePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Takes every descriptor off-screen without rebinding it. Descriptors that were on screen
    /// are marked [`ChangeKind::Retired`] so the dispatcher hides their elements.
    pub(crate) fn retire_all(&mut self) {
        for node in &mut self.nodes {
            node.change = match node.top.take() {
                Some(_) => ChangeKind::Retired,
                None => ChangeKind::None,
            };
            node.stale = true;
        }
    }

    /// Reassigns descriptors to the cells in `range`, in place.
    ///
    /// Descriptors still bound to a visible cell (same [`CellId`]) are kept and marked
    /// [`ChangeKind::Repositioned`]. Remaining cells take over a leftover descriptor of the same
    /// [`CellKind`], or get a new one, and are marked [`ChangeKind::Rebound`]. Descriptors that
    /// are not claimed keep their binding, lose their offset and are left for later passes; those
    /// that were on screen are marked [`ChangeKind::Retired`].
    pub fn reconcile<S>(&mut self, cells: &[Cell<S>], offsets: &[u64], range: VisibleRange) {
        self.retire_all();

        let end = range.bottom.saturating_add(1).min(cells.len()).min(offsets.len());
        if range.top >= end {
            vwarn!(
                top = range.top,
                bottom = range.bottom,
                cells = cells.len(),
                "NodePool::reconcile: range outside the cell list"
            );
            return;
        }

        // Pass 1: identity matches.
        self.unmatched.clear();
        for i in range.top..end {
            let cell = &cells[i];
            match self
                .nodes
                .iter_mut()
                .find(|n| n.stale && n.cell.id == cell.id)
            {
                Some(node) => {
                    node.stale = false;
                    node.change = ChangeKind::Repositioned;
                    node.top = Some(offsets[i]);
                    node.cell.index = i;
                }
                None => self.unmatched.push(i),
            }
        }

        // Pass 2: recycle leftovers of the same kind, or grow.
        for &i in &self.unmatched {
            let cell = &cells[i];
            let binding = CellBinding {
                id: cell.id,
                kind: cell.kind,
                index: i,
            };
            match self
                .nodes
                .iter_mut()
                .find(|n| n.stale && n.cell.kind == cell.kind)
            {
                Some(node) => {
                    node.stale = false;
                    node.change = ChangeKind::Rebound;
                    node.cell = binding;
                    node.top = Some(offsets[i]);
                }
                None => {
                    self.nodes.push(NodeDescriptor {
                        cell: binding,
                        top: Some(offsets[i]),
                        change: ChangeKind::Rebound,
                        stale: false,
                    });
                }
            }
        }

        vtrace!(
            top = range.top,
            bottom = range.bottom,
            rebound = self.unmatched.len(),
            pool = self.nodes.len(),
            "NodePool::reconcile"
        );
    }
}
