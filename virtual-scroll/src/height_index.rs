use alloc::vec::Vec;

use crate::Cell;

/// Cumulative pixel offsets over a cell list.
///
/// Entry `i` is the sum of the heights of cells `[0, i)`. Height changes only mark the table
/// dirty from the lowest changed index; the next [`HeightIndex::ensure`] recomputes from there.
#[derive(Clone, Debug)]
pub struct HeightIndex {
    offsets: Vec<u64>,
    total: u64,
    dirty_from: Option<usize>,
}

impl Default for HeightIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl HeightIndex {
    pub fn new() -> Self {
        Self {
            offsets: Vec::new(),
            total: 0,
            dirty_from: Some(0),
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_from.is_some()
    }

    /// Lowest index whose offset may be stale, if any.
    pub fn dirty_from(&self) -> Option<usize> {
        self.dirty_from
    }

    /// Marks offsets from `index` onward as stale.
    ///
    /// The caller must pass an index no higher than the lowest cell whose height changed;
    /// entries before the mark are not re-verified.
    pub fn invalidate_from(&mut self, index: usize) {
        self.dirty_from = Some(match self.dirty_from {
            Some(cur) => cur.min(index),
            None => index,
        });
    }

    pub fn invalidate_all(&mut self) {
        self.dirty_from = Some(0);
    }

    /// Brings the table up to date with `cells` and returns the offsets.
    ///
    /// The buffer is reused: it is only reallocated when the cell count grows past its
    /// capacity.
    pub fn ensure<S>(&mut self, cells: &[Cell<S>]) -> &[u64] {
        let Some(dirty) = self.dirty_from.take() else {
            return &self.offsets;
        };

        let n = cells.len();
        let prev_len = self.offsets.len();
        self.offsets.resize(n, 0);

        // Offsets before `start` are trusted, but only if they existed before the resize.
        let start = dirty.min(prev_len).min(n);
        let mut acc = if start == 0 {
            0
        } else {
            self.offsets[start - 1].saturating_add(cells[start - 1].height as u64)
        };
        for (offset, cell) in self.offsets[start..].iter_mut().zip(&cells[start..]) {
            *offset = acc;
            acc = acc.saturating_add(cell.height as u64);
        }
        self.total = acc;

        vtrace!(from = start, len = n, total = self.total, "HeightIndex::ensure");
        &self.offsets
    }

    /// Offsets as of the last [`HeightIndex::ensure`]. May be stale if the table is dirty.
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    pub fn offset(&self, index: usize) -> Option<u64> {
        self.offsets.get(index).copied()
    }

    /// Sum of all cell heights as of the last [`HeightIndex::ensure`].
    pub fn total(&self) -> u64 {
        self.total
    }
}
