use alloc::sync::Arc;

use crate::cells::cell_value;
use crate::{Cell, CellKind, CellValue, ChangeKind, NodeDescriptor};

/// Per-element render callback: `(existing, value, kind, source_index)`.
///
/// Called once per [`ChangeKind::Rebound`] descriptor. For an element that already exists at
/// the descriptor's pool position, `existing` is `Some`: mutate it in place and return `None`,
/// or return `Some` to replace it. For a new pool position `existing` is `None` and the callback
/// must return the element to append.
pub type ItemRenderFn<T, S, E> =
    Arc<dyn Fn(Option<&mut E>, CellValue<'_, T, S>, CellKind, usize) -> Option<E> + Send + Sync>;

/// Whole-pool render callback. The caller performs its own diffed update from the frame.
pub type BulkRenderFn<T, S> = Arc<dyn Fn(&Frame<'_, T, S>) + Send + Sync>;

/// How reconciled descriptors are turned into concrete elements. Exactly one strategy is active.
pub enum Renderer<T, S, E> {
    Item(ItemRenderFn<T, S, E>),
    Bulk(BulkRenderFn<T, S>),
}

impl<T, S, E> Clone for Renderer<T, S, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Item(f) => Self::Item(Arc::clone(f)),
            Self::Bulk(f) => Self::Bulk(Arc::clone(f)),
        }
    }
}

impl<T, S, E> Renderer<T, S, E> {
    pub fn item(
        f: impl Fn(Option<&mut E>, CellValue<'_, T, S>, CellKind, usize) -> Option<E>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self::Item(Arc::new(f))
    }

    pub fn bulk(f: impl Fn(&Frame<'_, T, S>) + Send + Sync + 'static) -> Self {
        Self::Bulk(Arc::new(f))
    }
}

impl<T, S, E> core::fmt::Debug for Renderer<T, S, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Item(_) => f.write_str("Renderer::Item(..)"),
            Self::Bulk(_) => f.write_str("Renderer::Bulk(..)"),
        }
    }
}

/// The element host the dispatcher writes into.
///
/// Children are addressed by position; child `i` belongs to pool descriptor `i`.
pub trait Container {
    type Element;

    fn child_count(&self) -> usize;

    fn child_mut(&mut self, index: usize) -> Option<&mut Self::Element>;

    fn append_child(&mut self, element: Self::Element);

    fn replace_child(&mut self, index: usize, element: Self::Element);

    /// Writes the element's position (a single transform/offset write). A hidden element is
    /// shown again.
    fn set_child_offset(&mut self, index: usize, top: u64);

    /// Takes the element out of view until its next [`Container::set_child_offset`].
    fn hide_child(&mut self, index: usize);

    /// Sets the container's total scrollable extent.
    fn set_extent(&mut self, extent: u64);

    /// Runs all writes of one pass. Hosts that can coalesce layout work override this.
    fn write_batch(&mut self, f: impl FnOnce(&mut Self))
    where
        Self: Sized,
    {
        f(self);
    }
}

/// A read-only view of one reconciled pass.
#[derive(Debug)]
pub struct Frame<'a, T, S> {
    pub nodes: &'a [NodeDescriptor],
    pub cells: &'a [Cell<S>],
    pub items: &'a [T],
    pub total_height: u64,
}

impl<T, S> Clone for Frame<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S> Copy for Frame<'_, T, S> {}

impl<'a, T, S> Frame<'a, T, S> {
    /// Returns the cell a descriptor is bound to, if it still exists in the current cell list.
    pub fn cell(&self, node: &NodeDescriptor) -> Option<&'a Cell<S>> {
        self.cells
            .get(node.cell.index)
            .filter(|cell| cell.id == node.cell.id)
    }

    pub fn value(&self, node: &NodeDescriptor) -> Option<CellValue<'a, T, S>> {
        let cell = self.cell(node)?;
        cell_value(cell, self.items)
    }
}

/// Applies one reconciled pass to `container` using `renderer`.
pub fn dispatch<T, S, C: Container>(
    container: &mut C,
    renderer: &Renderer<T, S, C::Element>,
    frame: &Frame<'_, T, S>,
) {
    container.write_batch(|c| match renderer {
        Renderer::Item(render) => {
            render_items(c, render, frame);
            c.set_extent(frame.total_height);
        }
        Renderer::Bulk(render) => {
            render(frame);
            c.set_extent(frame.total_height);
        }
    });
}

fn render_items<T, S, C: Container>(
    container: &mut C,
    render: &ItemRenderFn<T, S, C::Element>,
    frame: &Frame<'_, T, S>,
) {
    for (i, node) in frame.nodes.iter().enumerate() {
        match node.change {
            ChangeKind::None => continue,
            ChangeKind::Retired => {
                if i < container.child_count() {
                    container.hide_child(i);
                }
                continue;
            }
            ChangeKind::Repositioned | ChangeKind::Rebound => {}
        }

        if node.change == ChangeKind::Rebound {
            let Some((cell, value)) = frame
                .cell(node)
                .and_then(|cell| Some((cell, cell_value(cell, frame.items)?)))
            else {
                vwarn!(index = i, "dispatch: descriptor bound to a missing cell");
                if i >= container.child_count() {
                    return;
                }
                continue;
            };

            if i < container.child_count() {
                let existing = container.child_mut(i);
                if let Some(replacement) = render(existing, value, cell.kind, cell.source_index) {
                    container.replace_child(i, replacement);
                }
            } else {
                if i > container.child_count() {
                    vwarn!(
                        index = i,
                        children = container.child_count(),
                        "dispatch: pool and container children diverged"
                    );
                    return;
                }
                let Some(element) = render(None, value, cell.kind, cell.source_index) else {
                    // Appending later descriptors would shift every position after this one.
                    vwarn!(index = i, "dispatch: item render returned no element for a new slot");
                    return;
                };
                container.append_child(element);
            }
        }

        if let Some(top) = node.top {
            if i < container.child_count() {
                container.set_child_offset(i, top);
            }
        }
    }
}
