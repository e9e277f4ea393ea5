#![forbid(unsafe_code)]

//! Per-frame coalescing of scroll work.
//!
//! Scroll notifications can arrive many times per rendered frame. A
//! [`FrameGate`] admits at most one pending animation-frame request: the
//! first request asks the host for a frame, later ones are dropped until that
//! frame has been delivered and [`FrameGate::complete`] releases the gate.

use crate::host::{FrameId, Timers};

/// Boolean scheduling guard ("ticking") for animation-frame work.
#[derive(Debug, Clone, Default)]
pub struct FrameGate {
    pending: Option<FrameId>,
    dropped: u64,
}

impl FrameGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a frame unless one is already pending.
    ///
    /// Returns `true` when a new frame was requested.
    pub fn request<T: Timers + ?Sized>(&mut self, timers: &mut T) -> bool {
        if self.pending.is_some() {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        self.pending = Some(timers.request_animation_frame());
        true
    }

    /// Release the gate if `frame` is the pending one.
    ///
    /// Returns `true` when the caller should run the frame's work.
    pub fn complete(&mut self, frame: FrameId) -> bool {
        if self.pending == Some(frame) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Forget the pending frame. When it is delivered later it is stale and
    /// [`FrameGate::complete`] rejects it.
    ///
    /// Returns `true` if a frame was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Requests dropped because a frame was already pending.
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }
}
