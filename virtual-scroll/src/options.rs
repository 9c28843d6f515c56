use alloc::sync::Arc;

/// Returns the pixel height of the item at `index`.
pub type ItemHeightFn<T> = Arc<dyn Fn(&T, usize) -> u32 + Send + Sync>;

/// Returns a stable identity for the item at `index`.
///
/// Cells built from items with equal keys are treated as the same cell across item-list
/// replacements, which lets the reconciler keep their elements in place.
pub type ItemKeyFn<T> = Arc<dyn Fn(&T, usize) -> u64 + Send + Sync>;

/// Decides whether a header (or footer) cell is emitted around the item at `index`.
///
/// Called once per item during cell-list construction with `(item, index, items)`. Returning
/// `None` means "no section here".
pub type SectionFn<T, S> = Arc<dyn Fn(&T, usize, &[T]) -> Option<S> + Send + Sync>;

pub const DEFAULT_VIEWPORT_MARGIN: u32 = 100;
pub const DEFAULT_BOUNDARY_CELLS: usize = 1;
pub const DEFAULT_BATCH: usize = 0;
pub const DEFAULT_SECTION_HEIGHT: u32 = 45;

/// Tuning knobs for the visible-range resolver and the update gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMargins {
    /// Extra pixels rendered above and below the viewport.
    pub viewport_margin: u32,
    /// Extra cells added on both ends of the resolved range.
    pub boundary_cells: usize,
    /// How far a bound must drift (in cells) before a new range is reconciled.
    /// `0` means any change triggers an update.
    pub batch: usize,
}

impl Default for ScrollMargins {
    fn default() -> Self {
        Self {
            viewport_margin: DEFAULT_VIEWPORT_MARGIN,
            boundary_cells: DEFAULT_BOUNDARY_CELLS,
            batch: DEFAULT_BATCH,
        }
    }
}

impl ScrollMargins {
    /// No pixel margin, no boundary cells, any change triggers an update.
    pub const fn tight() -> Self {
        Self {
            viewport_margin: 0,
            boundary_cells: 0,
            batch: 0,
        }
    }
}

/// Configuration for [`crate::VirtualScroll`].
///
/// Like the render callbacks, every closure lives behind an `Arc`: cloning the options is cheap,
/// and [`crate::VirtualScroll::set_options`] uses pointer equality to decide whether the cell
/// list has to be rebuilt.
pub struct VirtualScrollOptions<T, S = alloc::string::String> {
    /// The items to virtualize. Replacing the `Arc` (pointer change) rebuilds every cell.
    pub items: Option<Arc<[T]>>,
    /// Per-item height. Without it the height index is never computed and nothing renders.
    pub item_height: Option<ItemHeightFn<T>>,
    pub item_key: Option<ItemKeyFn<T>>,
    pub header_fn: Option<SectionFn<T, S>>,
    pub footer_fn: Option<SectionFn<T, S>>,
    pub header_height: u32,
    pub footer_height: u32,
    pub margins: ScrollMargins,
}

impl<T, S> Clone for VirtualScrollOptions<T, S> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            item_height: self.item_height.clone(),
            item_key: self.item_key.clone(),
            header_fn: self.header_fn.clone(),
            footer_fn: self.footer_fn.clone(),
            header_height: self.header_height,
            footer_height: self.footer_height,
            margins: self.margins,
        }
    }
}

impl<T, S> Default for VirtualScrollOptions<T, S> {
    fn default() -> Self {
        Self {
            items: None,
            item_height: None,
            item_key: None,
            header_fn: None,
            footer_fn: None,
            header_height: DEFAULT_SECTION_HEIGHT,
            footer_height: DEFAULT_SECTION_HEIGHT,
            margins: ScrollMargins::default(),
        }
    }
}

impl<T, S> VirtualScrollOptions<T, S> {
    /// Creates options for `items` with a per-item height function.
    pub fn new(
        items: impl Into<Arc<[T]>>,
        item_height: impl Fn(&T, usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            items: Some(items.into()),
            item_height: Some(Arc::new(item_height)),
            ..Self::default()
        }
    }

    pub fn with_items(mut self, items: impl Into<Arc<[T]>>) -> Self {
        self.items = Some(items.into());
        self
    }

    pub fn with_item_height(
        mut self,
        item_height: impl Fn(&T, usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.item_height = Some(Arc::new(item_height));
        self
    }

    pub fn with_item_key(
        mut self,
        item_key: impl Fn(&T, usize) -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.item_key = Some(Arc::new(item_key));
        self
    }

    pub fn with_header_fn(
        mut self,
        header_fn: impl Fn(&T, usize, &[T]) -> Option<S> + Send + Sync + 'static,
    ) -> Self {
        self.header_fn = Some(Arc::new(header_fn));
        self
    }

    pub fn with_footer_fn(
        mut self,
        footer_fn: impl Fn(&T, usize, &[T]) -> Option<S> + Send + Sync + 'static,
    ) -> Self {
        self.footer_fn = Some(Arc::new(footer_fn));
        self
    }

    pub fn with_header_height(mut self, header_height: u32) -> Self {
        self.header_height = header_height;
        self
    }

    pub fn with_footer_height(mut self, footer_height: u32) -> Self {
        self.footer_height = footer_height;
        self
    }

    pub fn with_margins(mut self, margins: ScrollMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Returns `true` if rebuilding cells is required to go from `self` to `next`.
    pub(crate) fn cells_differ(&self, next: &Self) -> bool {
        !opt_ptr_eq(&self.items, &next.items)
            || !opt_arc_eq(&self.item_height, &next.item_height)
            || !opt_arc_eq(&self.item_key, &next.item_key)
            || !opt_arc_eq(&self.header_fn, &next.header_fn)
            || !opt_arc_eq(&self.footer_fn, &next.footer_fn)
            || self.header_height != next.header_height
            || self.footer_height != next.footer_height
    }
}

fn opt_ptr_eq<T>(a: &Option<Arc<[T]>>, b: &Option<Arc<[T]>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

fn opt_arc_eq<F: ?Sized>(a: &Option<Arc<F>>, b: &Option<Arc<F>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl<T, S> core::fmt::Debug for VirtualScrollOptions<T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualScrollOptions")
            .field("items", &self.items.as_ref().map(|items| items.len()))
            .field("has_item_height", &self.item_height.is_some())
            .field("has_item_key", &self.item_key.is_some())
            .field("has_header_fn", &self.header_fn.is_some())
            .field("has_footer_fn", &self.footer_fn.is_some())
            .field("header_height", &self.header_height)
            .field("footer_height", &self.footer_height)
            .field("margins", &self.margins)
            .finish_non_exhaustive()
    }
}
