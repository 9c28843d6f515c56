use alloc::vec::Vec;

use crate::{CellId, CellKey, CellKind, VirtualScrollOptions};

/// One renderable unit of the virtualized list.
///
/// Item cells carry no payload of their own: their value is the item at `source_index` in the
/// shared item slice. Header and footer cells own the section value returned by the classifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell<S> {
    pub id: CellId,
    pub kind: CellKind,
    pub section: Option<S>,
    pub source_index: usize,
    pub height: u32,
}

/// A borrowed view of a cell's payload, handed to render callbacks.
#[derive(Debug)]
pub enum CellValue<'a, T, S> {
    Item(&'a T),
    Header(&'a S),
    Footer(&'a S),
}

impl<T, S> Clone for CellValue<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S> Copy for CellValue<'_, T, S> {}

impl<'a, T, S> CellValue<'a, T, S> {
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Item(_) => CellKind::Item,
            Self::Header(_) => CellKind::Header,
            Self::Footer(_) => CellKind::Footer,
        }
    }

    pub fn item(&self) -> Option<&'a T> {
        match *self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn section(&self) -> Option<&'a S> {
        match *self {
            Self::Header(s) | Self::Footer(s) => Some(s),
            Self::Item(_) => None,
        }
    }
}

/// Resolves a cell to its payload. Returns `None` for an item cell whose source index is no
/// longer inside `items`.
pub(crate) fn cell_value<'a, T, S>(cell: &'a Cell<S>, items: &'a [T]) -> Option<CellValue<'a, T, S>> {
    match cell.kind {
        CellKind::Item => items.get(cell.source_index).map(CellValue::Item),
        CellKind::Header => cell.section.as_ref().map(CellValue::Header),
        CellKind::Footer => cell.section.as_ref().map(CellValue::Footer),
    }
}

/// Rebuilds `out` from the items and classifiers in `options`.
///
/// `serial` is the engine's identity counter; it is only advanced when no item-key function is
/// configured.
pub(crate) fn build_cells<T, S>(
    options: &VirtualScrollOptions<T, S>,
    serial: &mut u64,
    out: &mut Vec<Cell<S>>,
) {
    out.clear();
    let Some(items) = options.items.as_deref() else {
        return;
    };

    let mut next_key = |item: &T, index: usize| match &options.item_key {
        Some(f) => CellKey::Keyed(f(item, index)),
        None => {
            let key = *serial;
            *serial = serial.wrapping_add(1);
            CellKey::Serial(key)
        }
    };

    for (i, item) in items.iter().enumerate() {
        let key = next_key(item, i);

        if let Some(header_fn) = &options.header_fn {
            if let Some(section) = header_fn(item, i, items) {
                out.push(Cell {
                    id: CellId {
                        kind: CellKind::Header,
                        key,
                    },
                    kind: CellKind::Header,
                    section: Some(section),
                    source_index: i,
                    height: options.header_height,
                });
            }
        }

        let height = options.item_height.as_ref().map_or(0, |f| f(item, i));
        out.push(Cell {
            id: CellId {
                kind: CellKind::Item,
                key,
            },
            kind: CellKind::Item,
            section: None,
            source_index: i,
            height,
        });

        if let Some(footer_fn) = &options.footer_fn {
            if let Some(section) = footer_fn(item, i, items) {
                out.push(Cell {
                    id: CellId {
                        kind: CellKind::Footer,
                        key,
                    },
                    kind: CellKind::Footer,
                    section: Some(section),
                    source_index: i,
                    height: options.footer_height,
                });
            }
        }
    }

    vtrace!(items = items.len(), cells = out.len(), "build_cells");
}
