#![forbid(unsafe_code)]

//! Deterministic page simulator for testing.
//!
//! `PageSimulator` boots a [`PageController`] over a [`SimHost`] and plays the
//! role of the browser's event loop: it routes clicks through the element
//! path, fans scroll/resize out to window listeners, fires due timers in
//! deadline order, delivers animation frames, and reports intersection
//! changes.
//!
//! # Example
//!
//! ```
//! use folio_core::PageConfig;
//! use folio_sim::{PageSimulator, fixture};
//!
//! let (host, nodes) = fixture::portfolio();
//! let mut sim = PageSimulator::boot(host, PageConfig::default());
//!
//! sim.scroll_to(250.0);
//! assert!(sim.document().has_class(nodes.navbar, "scrolled"));
//! ```

use core::time::Duration;

use folio_core::{DomEvent, EventKind, EventSource, PageConfig, PageController};
use tracing::trace;

use crate::document::{MemoryDocument, NodeId};
use crate::host::SimHost;

/// What a simulated click did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Listeners the click reached.
    pub listeners_run: usize,
    /// Some listener suppressed the default action.
    pub default_prevented: bool,
}

pub struct PageSimulator {
    page: PageController<SimHost>,
}

impl PageSimulator {
    /// Boot the controller against `host`, as on `DOMContentLoaded`.
    pub fn boot(host: SimHost, config: PageConfig) -> Self {
        Self {
            page: PageController::boot(host, config),
        }
    }

    #[must_use]
    pub fn page(&self) -> &PageController<SimHost> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut PageController<SimHost> {
        &mut self.page
    }

    #[must_use]
    pub fn host(&self) -> &SimHost {
        self.page.host()
    }

    #[must_use]
    pub fn document(&self) -> &MemoryDocument {
        self.page.host().document()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.host().now()
    }

    /// Click `target`, bubbling through its ancestors to the document.
    pub fn click(&mut self, target: NodeId) -> ClickOutcome {
        let route = self.host().click_route(target);
        let event = DomEvent::Click {
            target: Some(target),
        };
        let mut outcome = ClickOutcome::default();
        for listener in route {
            let dispatched = self.page.dispatch(listener, &event);
            outcome.listeners_run += 1;
            outcome.default_prevented |= dispatched.prevent_default;
        }
        trace!(?target, ?outcome, "click");
        outcome
    }

    /// Scroll to `y`, notify scroll listeners, then report intersection
    /// changes.
    pub fn scroll_to(&mut self, y: f64) {
        self.page.host_mut().set_scroll_y(y);
        self.fire_window(EventKind::Scroll, &DomEvent::Scroll);
        self.flush_intersections();
    }

    /// Change the viewport and notify resize listeners.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.page.host_mut().set_viewport(width, height);
        self.fire_window(EventKind::Resize, &DomEvent::Resize);
    }

    fn fire_window(&mut self, kind: EventKind, event: &DomEvent<NodeId>) {
        let listeners = self.host().source_listeners(&EventSource::Window, kind);
        for listener in listeners {
            self.page.dispatch(listener, event);
        }
    }

    /// Advance time by `dt`, firing every timer that comes due on the way
    /// (including timers armed by earlier ones). Returns how many fired.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let until = self.now().saturating_add(dt);
        let mut fired = 0;
        while let Some(id) = self.page.host_mut().next_due(until) {
            self.page.on_timer(id);
            fired += 1;
        }
        self.page.host_mut().set_now(until);
        fired
    }

    /// Deliver every pending animation frame. Returns how many were delivered.
    pub fn run_frame(&mut self) -> usize {
        let frames = self.page.host_mut().take_frames();
        let count = frames.len();
        for frame in frames {
            self.page.on_animation_frame(frame);
        }
        count
    }

    /// Report intersection changes to the controller.
    pub fn flush_intersections(&mut self) {
        let entries = self.page.host_mut().take_intersections();
        if !entries.is_empty() {
            self.page.on_intersection(&entries);
        }
    }
}
