#![forbid(unsafe_code)]

//! Trailing-edge debounce over host timers.
//!
//! Every [`Debounce::call`] restarts the quiescence window. When the host
//! reports the window's timer as expired, [`Debounce::fire`] hands back the
//! arguments of the most recent call, once. The caller runs its callback with
//! them.

use core::time::Duration;

use crate::host::{TimerId, Timers};

#[derive(Debug, Clone)]
pub struct Debounce<A> {
    wait: Duration,
    pending: Option<(TimerId, A)>,
}

impl<A> Debounce<A> {
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    /// Record a call, replacing any pending one and restarting the window.
    pub fn call<T: Timers + ?Sized>(&mut self, timers: &mut T, args: A) {
        if let Some((previous, _)) = self.pending.take() {
            timers.clear_timeout(previous);
        }
        let id = timers.set_timeout(self.wait);
        self.pending = Some((id, args));
    }

    /// Timer expiry. Returns the trailing call's arguments when `id` belongs
    /// to this debounce.
    pub fn fire(&mut self, id: TimerId) -> Option<A> {
        match &self.pending {
            Some((pending, _)) if *pending == id => self.pending.take().map(|(_, args)| args),
            _ => None,
        }
    }

    /// Drop the pending call without running it.
    pub fn cancel<T: Timers + ?Sized>(&mut self, timers: &mut T) {
        if let Some((id, _)) = self.pending.take() {
            timers.clear_timeout(id);
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
