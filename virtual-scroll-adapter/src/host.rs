use virtual_scroll::Container;

/// Reads the geometry of the scrollable element.
pub trait ScrollSource {
    fn scroll_top(&self) -> u64;

    /// Visible height of the scroll container. `0` keeps the controller disabled.
    fn viewport_height(&self) -> u32;
}

/// Attaches or detaches the host's scroll listener.
///
/// While listening, the host forwards scroll events to [`crate::Controller::on_scroll`].
pub trait ListenerControl {
    fn set_scroll_listening(&mut self, listening: bool);
}

/// Deferred write-phase scheduling.
///
/// The controller calls this at most once per pending batch. The host must later call
/// [`crate::Controller::write_phase`] (typically right before the next frame).
pub trait WriteScheduler {
    fn request_write_phase(&mut self);
}

/// Everything a [`crate::Controller`] needs from its host.
pub trait ScrollHost: ScrollSource + ListenerControl + WriteScheduler + Container {}

impl<H> ScrollHost for H where H: ScrollSource + ListenerControl + WriteScheduler + Container {}
