//! Lifecycle plumbing for the `virtual-scroll` crate.
//!
//! The `virtual-scroll` engine is UI-agnostic and holds no host objects. This crate provides the
//! piece most hosts would otherwise write themselves:
//!
//! - [`Controller`]: enable/disable lifecycle, scroll/resize handling and the deferred,
//!   at-most-one-pending write phase
//! - collaborator traits describing the host ([`ScrollSource`], [`ListenerControl`],
//!   [`WriteScheduler`], and the [`ScrollHost`] union)
//! - [`FrameScheduler`], a headless single-slot scheduler for hosts that drive a frame loop
//!
//! This crate is intentionally framework-agnostic (no DOM or GUI bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod host;
mod scheduler;

#[cfg(test)]
mod tests;

pub use controller::{Controller, ControllerState};
pub use host::{ListenerControl, ScrollHost, ScrollSource, WriteScheduler};
pub use scheduler::FrameScheduler;
