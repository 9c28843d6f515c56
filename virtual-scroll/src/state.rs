use crate::VisibleRange;

/// A lightweight, serializable snapshot of the geometry used by the last update.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_top: u64,
    pub viewport_height: u32,
}

/// A lightweight, serializable snapshot of what was last reconciled.
///
/// This is useful for diagnostics and for hosts that persist UI state between sessions
/// without holding on to the engine itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderState {
    pub viewport: ViewportState,
    pub range: Option<VisibleRange>,
    pub pool_len: usize,
    pub total_height: u64,
}
