use crate::{ScrollMargins, VisibleRange};

/// Resolves the inclusive range of cells to render for a scroll position.
///
/// The range covers every cell intersecting
/// `[scroll_top - viewport_margin, scroll_top + viewport_height + viewport_margin]`, widened by
/// `boundary_cells` on both ends and clamped to the table. Returns `None` for an empty table.
///
/// Each edge resolves to the cell *containing* it (the last cell whose offset is `<=` the
/// position), not the first cell starting past it, so the widened window sits one cell higher
/// than it would with the latter rule. For 20px cells, a 50px viewport at 0 and one boundary
/// cell, the range is `0..=3`, not `0..=4`.
///
/// Both bounds are found by binary search over the (non-decreasing) offsets, and both are
/// monotonic in `scroll_top`.
pub fn get_bounds(
    offsets: &[u64],
    viewport_height: u32,
    scroll_top: u64,
    margins: ScrollMargins,
) -> Option<VisibleRange> {
    if offsets.is_empty() {
        return None;
    }
    let last = offsets.len() - 1;
    let margin = margins.viewport_margin as u64;
    let top_pos = scroll_top.saturating_sub(margin);
    let bottom_pos = scroll_top
        .saturating_add(viewport_height as u64)
        .saturating_add(margin);

    // First index whose offset exceeds the position; the cell containing the position is the
    // one right before it.
    let i = offsets.partition_point(|&o| o <= top_pos);
    let j = i + offsets[i..].partition_point(|&o| o <= bottom_pos);

    let top = i.saturating_sub(1).saturating_sub(margins.boundary_cells);
    let bottom = j
        .saturating_sub(1)
        .saturating_add(margins.boundary_cells)
        .min(last);

    Some(VisibleRange { top, bottom })
}

/// Returns `true` if `next` differs enough from the last rendered range to be worth
/// reconciling.
pub fn should_update(previous: Option<VisibleRange>, next: VisibleRange, batch: usize) -> bool {
    let Some(prev) = previous else {
        return true;
    };
    prev.top.abs_diff(next.top) > batch || prev.bottom.abs_diff(next.bottom) > batch
}
