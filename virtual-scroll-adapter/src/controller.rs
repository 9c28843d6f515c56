use alloc::string::String;
use alloc::sync::Arc;

use virtual_scroll::{
    Align, CellKind, CellValue, Container, Frame, RenderState, Renderer, ScrollMargins,
    VirtualScroll, VirtualScrollOptions,
};

use crate::ScrollHost;

/// A lightweight, serializable snapshot of the controller lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerState {
    pub enabled: bool,
    pub write_pending: bool,
    pub viewport_height: u32,
    pub render: RenderState,
}

/// Drives a [`VirtualScroll`] engine on behalf of a host scroll container.
///
/// The controller is either disabled or enabled. It is enabled exactly when a host is mounted,
/// an item list is set, a renderer is configured and the viewport has a non-zero height.
/// While enabled the host's scroll listener is attached and every scroll or resize event runs
/// resolve → gate → reconcile synchronously; the resulting writes are applied in a separate
/// write phase:
/// - the controller calls [`crate::WriteScheduler::request_write_phase`] once per batch,
/// - the host calls [`Controller::write_phase`] when it is ready to mutate its elements.
///
/// At most one batch is pending. Scroll events arriving meanwhile are coalesced: the pipeline
/// runs once more, with the latest scroll offset, right after the pending batch is written.
pub struct Controller<T, H: Container, S = String> {
    engine: VirtualScroll<T, S>,
    host: Option<H>,
    renderer: Option<Renderer<T, S, H::Element>>,
    viewport_height: u32,
    enabled: bool,
    write_pending: bool,
    resync: bool,
}

impl<T, H: Container, S> core::fmt::Debug for Controller<T, H, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("enabled", &self.enabled)
            .field("write_pending", &self.write_pending)
            .field("viewport_height", &self.viewport_height)
            .field("has_host", &self.host.is_some())
            .field("renderer", &self.renderer)
            .field("render_state", &self.engine.render_state())
            .finish_non_exhaustive()
    }
}

impl<T, H: ScrollHost, S> Controller<T, H, S> {
    pub fn new(options: VirtualScrollOptions<T, S>) -> Self {
        Self::from_engine(VirtualScroll::new(options))
    }

    pub fn from_engine(engine: VirtualScroll<T, S>) -> Self {
        Self {
            engine,
            host: None,
            renderer: None,
            viewport_height: 0,
            enabled: false,
            write_pending: false,
            resync: false,
        }
    }

    pub fn engine(&self) -> &VirtualScroll<T, S> {
        &self.engine
    }

    /// Direct engine access. Changes made here bypass the lifecycle; call
    /// [`Self::update_state`] or [`Self::on_scroll`] afterwards.
    pub fn engine_mut(&mut self) -> &mut VirtualScroll<T, S> {
        &mut self.engine
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn renderer(&self) -> Option<&Renderer<T, S, H::Element>> {
        self.renderer.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_write_pending(&self) -> bool {
        self.write_pending
    }

    /// Viewport height as of the last dimension read.
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn state(&self) -> ControllerState {
        ControllerState {
            enabled: self.enabled,
            write_pending: self.write_pending,
            viewport_height: self.viewport_height,
            render: self.engine.render_state(),
        }
    }

    /// Attaches the controller to a host container.
    ///
    /// The container is expected to have no children yet. Passing `None` is reported and leaves
    /// the controller disabled.
    pub fn mount(&mut self, host: Option<H>) {
        let Some(host) = host else {
            verror!("Controller::mount: no host container, staying disabled");
            return;
        };
        if self.host.is_some() {
            self.unmount();
        }
        self.host = Some(host);
        self.calc_dimensions();
        self.engine.reset_pool();
        self.engine.rebuild_cells();
        vdebug!(viewport_height = self.viewport_height, "Controller::mount");
        self.update_state();
    }

    /// Detaches the listener, disables the controller and hands the host back.
    ///
    /// A pending batch is discarded.
    pub fn unmount(&mut self) -> Option<H> {
        let mut host = self.host.take()?;
        if self.enabled {
            host.set_scroll_listening(false);
        }
        self.enabled = false;
        self.write_pending = false;
        self.resync = false;
        vdebug!("Controller::unmount");
        Some(host)
    }

    /// Re-evaluates the enable condition and toggles the scroll listener on a change.
    ///
    /// Entering the enabled state re-reads the viewport, rebuilds cells and the height index from
    /// scratch and runs one pipeline pass immediately.
    pub fn update_state(&mut self) {
        let enable = self.host.is_some()
            && self.engine.options().items.is_some()
            && self.renderer.is_some()
            && self.viewport_height > 0;
        if enable == self.enabled {
            return;
        }

        vdebug!(
            enabled = enable,
            viewport_height = self.viewport_height,
            "Controller::update_state"
        );
        if enable {
            self.flush_pending_write();
        }
        self.enabled = enable;
        if let Some(host) = self.host.as_mut() {
            host.set_scroll_listening(enable);
        }
        if enable {
            self.calc_dimensions();
            self.engine.rebuild_cells();
            self.run_pipeline();
        }
    }

    /// Call this from the host's scroll listener.
    pub fn on_scroll(&mut self) {
        self.run_pipeline();
    }

    /// Call this when the viewport is resized.
    pub fn on_resize(&mut self) {
        self.engine.invalidate_heights();
        self.calc_dimensions();
        self.refresh();
    }

    /// Applies the pending batch to the host container.
    ///
    /// Returns `true` if a batch was pending. A pending batch is written even if the controller
    /// was disabled after it was requested.
    pub fn write_phase(&mut self) -> bool {
        if !self.write_pending {
            return false;
        }
        self.write_pending = false;
        self.dispatch();

        if core::mem::take(&mut self.resync) {
            self.run_pipeline();
        }
        true
    }

    pub fn set_items(&mut self, items: Option<Arc<[T]>>) {
        self.flush_pending_write();
        self.engine.set_items(items);
        self.refresh();
    }

    /// Clones the current options, applies `f`, then refreshes like any data change.
    pub fn update_options(&mut self, f: impl FnOnce(&mut VirtualScrollOptions<T, S>)) {
        self.flush_pending_write();
        self.engine.update_options(f);
        self.refresh();
    }

    pub fn set_item_height(&mut self, f: Option<impl Fn(&T, usize) -> u32 + Send + Sync + 'static>) {
        self.flush_pending_write();
        self.engine.set_item_height(f);
        self.refresh();
    }

    pub fn set_item_key(&mut self, f: Option<impl Fn(&T, usize) -> u64 + Send + Sync + 'static>) {
        self.flush_pending_write();
        self.engine.set_item_key(f);
        self.refresh();
    }

    pub fn set_header_fn(
        &mut self,
        f: Option<impl Fn(&T, usize, &[T]) -> Option<S> + Send + Sync + 'static>,
    ) {
        self.flush_pending_write();
        self.engine.set_header_fn(f);
        self.refresh();
    }

    pub fn set_footer_fn(
        &mut self,
        f: Option<impl Fn(&T, usize, &[T]) -> Option<S> + Send + Sync + 'static>,
    ) {
        self.flush_pending_write();
        self.engine.set_footer_fn(f);
        self.refresh();
    }

    pub fn set_header_height(&mut self, height: u32) {
        self.flush_pending_write();
        self.engine.set_header_height(height);
        self.refresh();
    }

    pub fn set_footer_height(&mut self, height: u32) {
        self.flush_pending_write();
        self.engine.set_footer_height(height);
        self.refresh();
    }

    pub fn set_margins(&mut self, margins: ScrollMargins) {
        self.engine.set_margins(margins);
        self.run_pipeline();
    }

    /// Renders each rebound cell into its own element. Replaces any bulk renderer.
    pub fn set_item_render(
        &mut self,
        f: impl Fn(Option<&mut H::Element>, CellValue<'_, T, S>, CellKind, usize) -> Option<H::Element>
        + Send
        + Sync
        + 'static,
    ) {
        self.set_renderer(Some(Renderer::item(f)));
    }

    /// Hands every pass to `f` as a whole. Replaces any item renderer.
    pub fn set_bulk_render(&mut self, f: impl Fn(&Frame<'_, T, S>) + Send + Sync + 'static) {
        self.set_renderer(Some(Renderer::bulk(f)));
    }

    pub fn clear_renderer(&mut self) {
        self.set_renderer(None);
    }

    /// Sets the render strategy. A pending batch is written with the previous one first.
    pub fn set_renderer(&mut self, renderer: Option<Renderer<T, S, H::Element>>) {
        self.flush_pending_write();
        self.renderer = renderer;
        self.update_state();
    }

    /// Records a measured height for the cell at `index` and re-runs the pipeline if it changed.
    pub fn update_cell_height(&mut self, index: usize, height: u32) -> bool {
        if !self.engine.update_cell_height(index, height) {
            return false;
        }
        self.run_pipeline();
        true
    }

    /// Pixel offset of item `source_index`, for callers that want to scroll to an item.
    pub fn position_for_item(&mut self, source_index: usize) -> Option<u64> {
        self.engine.position_for_item(source_index)
    }

    /// Scroll offset that brings item `source_index` into view, given the host's current
    /// scroll position.
    pub fn scroll_to_item_offset(&mut self, source_index: usize, align: Align) -> Option<u64> {
        let scroll_top = self.host.as_ref().map_or(0, |h| h.scroll_top());
        self.engine
            .scroll_to_item_offset(source_index, align, scroll_top, self.viewport_height)
    }

    fn calc_dimensions(&mut self) {
        if let Some(host) = &self.host {
            self.viewport_height = host.viewport_height();
        }
    }

    /// Re-evaluates the lifecycle after a data or geometry change; a controller that stays
    /// enabled runs a fresh pass.
    fn refresh(&mut self) {
        let was_enabled = self.enabled;
        self.update_state();
        if was_enabled && self.enabled {
            self.run_pipeline();
        }
    }

    fn run_pipeline(&mut self) {
        if !self.enabled {
            return;
        }
        if self.write_pending {
            vtrace!("Controller: write pending, coalescing");
            self.resync = true;
            return;
        }
        let Some(host) = self.host.as_mut() else {
            return;
        };

        let scroll_top = host.scroll_top();
        if self.engine.update(scroll_top, self.viewport_height) {
            self.write_pending = true;
            host.request_write_phase();
            vtrace!(scroll_top, "Controller: write phase requested");
        }
    }

    /// Writes a pending batch right away, before the pool is reconciled against new cells.
    fn flush_pending_write(&mut self) {
        if core::mem::take(&mut self.write_pending) {
            self.dispatch();
        }
    }

    fn dispatch(&mut self) {
        let (Some(host), Some(renderer)) = (self.host.as_mut(), self.renderer.as_ref()) else {
            vwarn!("Controller: write phase without a host or renderer");
            return;
        };
        self.engine.render(host, renderer);
    }
}
