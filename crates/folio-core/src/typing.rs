#![forbid(unsafe_code)]

//! Typewriter reveal for the hero title.
//!
//! On start the element's text is captured and cleared. After the start delay
//! one character is appended per step until the captured text is back. Each
//! step arms the next only after appending, so the chain is strictly
//! sequential. There is no cancellation.

use core::time::Duration;

use tracing::trace;

use crate::config::TypingConfig;
use crate::host::{Dom, StyleProperty, TimerId, Timers};

#[derive(Debug, Clone)]
pub struct TypeWriter<N> {
    node: N,
    chars: Vec<char>,
    typed: usize,
    step: Duration,
    pending: Option<TimerId>,
}

impl<N: Clone + PartialEq> TypeWriter<N> {
    /// Capture and clear `node`'s text, make it visible, and arm the first
    /// step.
    pub fn start<H>(host: &mut H, node: N, config: &TypingConfig) -> Self
    where
        H: Dom<Node = N> + Timers,
    {
        let chars: Vec<char> = host.text(&node).chars().collect();
        host.set_text(&node, "");
        host.set_style(&node, StyleProperty::Opacity, "1");
        let pending = Some(host.set_timeout(config.start_delay()));
        Self {
            node,
            chars,
            typed: 0,
            step: config.step(),
            pending,
        }
    }

    /// Timer expiry. Returns `false` if `id` is not this animation's timer.
    pub fn on_timer<H>(&mut self, host: &mut H, id: TimerId) -> bool
    where
        H: Dom<Node = N> + Timers,
    {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = None;

        if let Some(&ch) = self.chars.get(self.typed) {
            let mut text = host.text(&self.node);
            text.push(ch);
            host.set_text(&self.node, &text);
            self.typed += 1;
            trace!(typed = self.typed, total = self.chars.len(), "typing step");
            if self.typed < self.chars.len() {
                self.pending = Some(host.set_timeout(self.step));
            }
        }
        true
    }

    /// Characters revealed so far.
    #[must_use]
    pub const fn typed(&self) -> usize {
        self.typed
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.pending.is_none()
    }

    /// The text being typed.
    #[must_use]
    pub fn target_text(&self) -> String {
        self.chars.iter().collect()
    }
}
