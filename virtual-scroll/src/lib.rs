//! A headless windowing and element-recycling engine for very long vertical lists.
//!
//! For lifecycle plumbing (scroll listening, deferred write phases), see the
//! `virtual-scroll-adapter` crate.
//!
//! The engine derives a flat list of cells (items plus optional section headers and footers)
//! from your data, keeps a lazily recomputed table of cumulative pixel offsets, resolves which
//! cells intersect the viewport plus a margin, and reassigns a small pool of reusable node
//! descriptors to those cells so that only changed elements are re-rendered.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - the scroll offset and viewport height
//! - an item height function (and, optionally, measured heights)
//! - a [`Container`] that owns the concrete elements
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod bounds;
mod cells;
mod height_index;
mod options;
mod reconcile;
mod render;
mod state;
mod types;
mod virtual_scroll;


pub use bounds::{get_bounds, should_update};
pub use cells::{Cell, CellValue};
pub use height_index::HeightIndex;
pub use options::{
    DEFAULT_BATCH, DEFAULT_BOUNDARY_CELLS, DEFAULT_SECTION_HEIGHT, DEFAULT_VIEWPORT_MARGIN,
    ItemHeightFn, ItemKeyFn, ScrollMargins, SectionFn, VirtualScrollOptions,
};
pub use reconcile::{CellBinding, NodeDescriptor, NodePool};
pub use render::{BulkRenderFn, Container, Frame, ItemRenderFn, Renderer, dispatch};
pub use state::{RenderState, ViewportState};
pub use types::{Align, CellId, CellKey, CellKind, ChangeKind, VisibleRange};
pub use virtual_scroll::VirtualScroll;
