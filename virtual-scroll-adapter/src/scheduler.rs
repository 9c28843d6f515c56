use crate::WriteScheduler;

/// A headless single-slot frame scheduler.
///
/// Hosts that run their own frame loop can embed one, forward
/// [`WriteScheduler::request_write_phase`] to it, and call
/// [`crate::Controller::write_phase`] whenever [`FrameScheduler::take_requested`] returns `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameScheduler {
    requested: bool,
}

impl FrameScheduler {
    pub const fn new() -> Self {
        Self { requested: false }
    }

    /// Requests a frame. Returns `false` if one was already pending.
    pub fn request(&mut self) -> bool {
        !core::mem::replace(&mut self.requested, true)
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Consumes the pending request, if any.
    pub fn take_requested(&mut self) -> bool {
        core::mem::take(&mut self.requested)
    }
}

impl WriteScheduler for FrameScheduler {
    fn request_write_phase(&mut self) {
        self.request();
    }
}
