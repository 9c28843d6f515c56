use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::bounds::{get_bounds, should_update};
use crate::cells::build_cells;
use crate::render::{Container, Frame, Renderer, dispatch};
use crate::{
    Align, Cell, CellKind, HeightIndex, NodeDescriptor, NodePool, RenderState, ScrollMargins,
    ViewportState, VirtualScrollOptions, VisibleRange,
};

/// A headless windowing and element-recycling engine.
///
/// The engine owns the cell list, the height index, the node descriptor pool and the last
/// reconciled range. It holds no UI objects:
/// - your adapter feeds it scroll offsets and viewport heights through [`Self::update`],
/// - rendering goes through [`Self::render`] into any [`Container`].
///
/// For lifecycle handling (listeners, deferred write phases), see the `virtual-scroll-adapter`
/// crate.
#[derive(Clone, Debug)]
pub struct VirtualScroll<T, S = alloc::string::String> {
    options: VirtualScrollOptions<T, S>,
    cells: Vec<Cell<S>>,
    heights: HeightIndex,
    pool: NodePool,
    range: Option<VisibleRange>,
    viewport: ViewportState,
    serial: u64,
}

impl<T, S> VirtualScroll<T, S> {
    pub fn new(options: VirtualScrollOptions<T, S>) -> Self {
        vdebug!(
            items = options.items.as_ref().map_or(0, |items| items.len()),
            has_item_height = options.item_height.is_some(),
            "VirtualScroll::new"
        );
        let mut v = Self {
            options,
            cells: Vec::new(),
            heights: HeightIndex::new(),
            pool: NodePool::new(),
            range: None,
            viewport: ViewportState::default(),
            serial: 0,
        };
        v.rebuild_cells();
        v
    }

    pub fn options(&self) -> &VirtualScrollOptions<T, S> {
        &self.options
    }

    /// Replaces the options, rebuilding cells only when the item list, a closure or a section
    /// height actually changed.
    pub fn set_options(&mut self, options: VirtualScrollOptions<T, S>) {
        let rebuild = self.options.cells_differ(&options);
        self.options = options;
        vtrace!(rebuild, "VirtualScroll::set_options");
        if rebuild {
            self.rebuild_cells();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut VirtualScrollOptions<T, S>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    /// Sets the item list. Passing the same `Arc` again is a no-op.
    pub fn set_items(&mut self, items: Option<Arc<[T]>>) {
        self.update_options(|o| o.items = items);
    }

    pub fn set_item_height(&mut self, f: Option<impl Fn(&T, usize) -> u32 + Send + Sync + 'static>) {
        self.options.item_height = f.map(|f| Arc::new(f) as _);
        self.rebuild_cells();
    }

    pub fn set_item_key(&mut self, f: Option<impl Fn(&T, usize) -> u64 + Send + Sync + 'static>) {
        self.options.item_key = f.map(|f| Arc::new(f) as _);
        self.rebuild_cells();
    }

    pub fn set_header_fn(
        &mut self,
        f: Option<impl Fn(&T, usize, &[T]) -> Option<S> + Send + Sync + 'static>,
    ) {
        self.options.header_fn = f.map(|f| Arc::new(f) as _);
        self.rebuild_cells();
    }

    pub fn set_footer_fn(
        &mut self,
        f: Option<impl Fn(&T, usize, &[T]) -> Option<S> + Send + Sync + 'static>,
    ) {
        self.options.footer_fn = f.map(|f| Arc::new(f) as _);
        self.rebuild_cells();
    }

    pub fn set_header_height(&mut self, height: u32) {
        self.update_options(|o| o.header_height = height);
    }

    pub fn set_footer_height(&mut self, height: u32) {
        self.update_options(|o| o.footer_height = height);
    }

    pub fn set_margins(&mut self, margins: ScrollMargins) {
        self.options.margins = margins;
    }

    /// Rebuilds every cell from the current options and marks the whole height index dirty.
    ///
    /// The last rendered range is forgotten, so the next [`Self::update`] always reconciles.
    pub fn rebuild_cells(&mut self) {
        build_cells(&self.options, &mut self.serial, &mut self.cells);
        self.heights.invalidate_all();
        self.range = None;
        vdebug!(cells = self.cells.len(), "rebuild_cells");
    }

    pub fn cells(&self) -> &[Cell<S>] {
        &self.cells
    }

    pub fn items(&self) -> &[T] {
        self.options.items.as_deref().unwrap_or(&[])
    }

    pub fn nodes(&self) -> &[NodeDescriptor] {
        self.pool.nodes()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn has_height_fn(&self) -> bool {
        self.options.item_height.is_some()
    }

    /// Returns the up-to-date height index, recomputing it from the dirty mark if needed.
    ///
    /// Without an item height function the index is never computed and this returns `None`.
    pub fn height_index(&mut self) -> Option<&[u64]> {
        if !self.has_height_fn() {
            return None;
        }
        Some(self.heights.ensure(&self.cells))
    }

    /// Marks the whole height index dirty (e.g. after a viewport resize).
    pub fn invalidate_heights(&mut self) {
        self.heights.invalidate_all();
    }

    /// Records a measured height for the cell at `index`.
    ///
    /// Offsets are recomputed lazily from the lowest changed index, and the next
    /// [`Self::update`] reconciles even if the range is unchanged so that offsets get rewritten.
    /// Returns `true` if the height actually changed.
    pub fn update_cell_height(&mut self, index: usize, height: u32) -> bool {
        let Some(cell) = self.cells.get_mut(index) else {
            return false;
        };
        if cell.height == height {
            return false;
        }
        vtrace!(index, from = cell.height, to = height, "update_cell_height");
        cell.height = height;
        self.heights.invalidate_from(index);
        self.range = None;
        true
    }

    /// Drops every node descriptor, for a container that has no children yet.
    pub fn reset_pool(&mut self) {
        vdebug!(pool = self.pool.len(), "reset_pool");
        self.pool = NodePool::new();
        self.range = None;
    }

    /// Resolves the range for a scroll position without touching the pool.
    pub fn visible_range_for(&mut self, scroll_top: u64, viewport_height: u32) -> Option<VisibleRange> {
        let margins = self.options.margins;
        let offsets = self.height_index()?;
        get_bounds(offsets, viewport_height, scroll_top, margins)
    }

    /// The range reconciled by the last successful [`Self::update`].
    pub fn last_range(&self) -> Option<VisibleRange> {
        self.range
    }

    pub fn viewport_state(&self) -> ViewportState {
        self.viewport
    }

    /// Runs resolve → gate → reconcile for a scroll position.
    ///
    /// Returns `true` when the pool changed and a render pass is needed.
    pub fn update(&mut self, scroll_top: u64, viewport_height: u32) -> bool {
        self.viewport = ViewportState {
            scroll_top,
            viewport_height,
        };
        if !self.has_height_fn() {
            vdebug!("update: no item height function, nothing to index");
            return false;
        }

        let margins = self.options.margins;
        let offsets = self.heights.ensure(&self.cells);
        let Some(range) = get_bounds(offsets, viewport_height, scroll_top, margins) else {
            // Nothing left to show; collapse once if something was showing.
            let was_showing = self.range.take().is_some()
                || self.pool.nodes().iter().any(NodeDescriptor::is_visible);
            if was_showing {
                self.pool.retire_all();
            }
            return was_showing;
        };

        if !should_update(self.range, range, margins.batch) {
            return false;
        }
        vtrace!(
            scroll_top,
            viewport_height,
            top = range.top,
            bottom = range.bottom,
            "update"
        );
        self.range = Some(range);
        self.pool.reconcile(&self.cells, offsets, range);
        true
    }

    /// Sum of all cell heights as of the last index computation.
    pub fn total_height(&self) -> u64 {
        self.heights.total()
    }

    pub fn position_for_cell(&mut self, index: usize) -> Option<u64> {
        self.height_index()?.get(index).copied()
    }

    /// Index of the item cell derived from item `source_index`.
    pub fn cell_index_for_item(&self, source_index: usize) -> Option<usize> {
        // Cells are ordered by source index; an item has at most a header before it.
        let start = self.cells.partition_point(|c| c.source_index < source_index);
        self.cells[start..]
            .iter()
            .take_while(|c| c.source_index == source_index)
            .position(|c| c.kind == CellKind::Item)
            .map(|i| start + i)
    }

    /// Pixel offset of item `source_index`, for callers that want to scroll to an item.
    pub fn position_for_item(&mut self, source_index: usize) -> Option<u64> {
        let index = self.cell_index_for_item(source_index)?;
        self.position_for_cell(index)
    }

    /// Computes the scroll offset that brings item `source_index` into view with `align`.
    ///
    /// `scroll_top` is only consulted for [`Align::Auto`]. The result is clamped to the
    /// scrollable range.
    pub fn scroll_to_item_offset(
        &mut self,
        source_index: usize,
        align: Align,
        scroll_top: u64,
        viewport_height: u32,
    ) -> Option<u64> {
        let index = self.cell_index_for_item(source_index)?;
        let start = self.position_for_cell(index)?;
        let size = self.cells[index].height as u64;
        let end = start.saturating_add(size);
        let view = viewport_height as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => start.saturating_add(size / 2).saturating_sub(view / 2),
            Align::Auto => {
                let cur_end = scroll_top.saturating_add(view);
                if start >= scroll_top && end <= cur_end {
                    scroll_top
                } else if start < scroll_top {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        let max_scroll = self.heights.total().saturating_sub(view);
        Some(target.min(max_scroll))
    }

    /// A read-only view of the current pass, for bulk renderers and custom dispatch.
    pub fn frame(&self) -> Frame<'_, T, S> {
        Frame {
            nodes: self.pool.nodes(),
            cells: &self.cells,
            items: self.items(),
            total_height: self.heights.total(),
        }
    }

    /// Applies the current pool to `container` with `renderer`.
    pub fn render<C: Container>(&self, container: &mut C, renderer: &Renderer<T, S, C::Element>) {
        dispatch(container, renderer, &self.frame());
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            viewport: self.viewport,
            range: self.range,
            pool_len: self.pool.len(),
            total_height: self.heights.total(),
        }
    }
}
