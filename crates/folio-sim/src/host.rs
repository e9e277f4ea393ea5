#![forbid(unsafe_code)]

//! Deterministic host.
//!
//! [`SimHost`] implements every `folio_core` host trait on top of a
//! [`MemoryDocument`]. Nothing happens on its own: time moves only when the
//! caller advances the [`DeterministicClock`], frames are delivered only when
//! the caller drains them, and intersection changes are computed on demand
//! from the fixed layout boxes and the current scroll offset.

use core::time::Duration;

use folio_core::{
    Console, Dom, EventKind, EventSource, FrameId, IntersectionEntry, ListenerId, Listeners,
    Observer, ObserverOptions, ScrollBehavior, Selector, StyleProperty, TimerId, Timers, Viewport,
};

use crate::document::{MemoryDocument, NodeId};

/// Monotonic clock controlled by the caller.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Never moves backwards.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// A programmatic scroll the controller asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// One styled console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub text: String,
    pub style: String,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    id: TimerId,
    deadline: Duration,
}

#[derive(Debug, Clone)]
struct Registration {
    id: ListenerId,
    source: EventSource<NodeId>,
    kind: EventKind,
}

#[derive(Debug, Clone, Copy)]
struct Watched {
    node: NodeId,
    /// Last state reported to the controller; `None` until the first report.
    reported: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct SimHost {
    document: MemoryDocument,
    clock: DeterministicClock,
    scroll_y: f64,
    inner_width: f64,
    inner_height: f64,
    scroll_requests: Vec<ScrollRequest>,
    timers: Vec<PendingTimer>,
    next_timer: u32,
    frames: Vec<FrameId>,
    next_frame: u32,
    listeners: Vec<Registration>,
    observer: Option<ObserverOptions>,
    watched: Vec<Watched>,
    console: Vec<ConsoleLine>,
}

impl SimHost {
    /// Host over `document` with a `width` × `height` viewport at scroll 0.
    #[must_use]
    pub fn new(document: MemoryDocument, width: f64, height: f64) -> Self {
        Self {
            document,
            clock: DeterministicClock::new(),
            scroll_y: 0.0,
            inner_width: width,
            inner_height: height,
            scroll_requests: Vec::new(),
            timers: Vec::new(),
            next_timer: 1,
            frames: Vec::new(),
            next_frame: 1,
            listeners: Vec::new(),
            observer: None,
            watched: Vec::new(),
            console: Vec::new(),
        }
    }

    #[must_use]
    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut MemoryDocument {
        &mut self.document
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.inner_width = width;
        self.inner_height = height;
    }

    #[must_use]
    pub const fn inner_height(&self) -> f64 {
        self.inner_height
    }

    #[must_use]
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    #[must_use]
    pub fn console(&self) -> &[ConsoleLine] {
        &self.console
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn observer_options(&self) -> Option<ObserverOptions> {
        self.observer
    }

    #[must_use]
    pub fn is_observed(&self, node: NodeId) -> bool {
        self.watched.iter().any(|w| w.node == node)
    }

    /// Listeners a click on `target` reaches, in dispatch order: the target
    /// and each ancestor (registration order per node), then the document,
    /// then the window.
    #[must_use]
    pub fn click_route(&self, target: NodeId) -> Vec<ListenerId> {
        let mut route = Vec::new();
        for node in self.document.path(target) {
            route.extend(self.listeners.iter().filter_map(|reg| match &reg.source {
                EventSource::Element(n) if *n == node && reg.kind == EventKind::Click => {
                    Some(reg.id)
                }
                _ => None,
            }));
        }
        route.extend(self.source_listeners(&EventSource::Document, EventKind::Click));
        route.extend(self.source_listeners(&EventSource::Window, EventKind::Click));
        route
    }

    /// Listeners registered on `source` for `kind`, in registration order.
    #[must_use]
    pub fn source_listeners(&self, source: &EventSource<NodeId>, kind: EventKind) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|reg| &reg.source == source && reg.kind == kind)
            .map(|reg| reg.id)
            .collect()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline.
    pub fn next_due(&mut self, until: Duration) -> Option<TimerId> {
        let (pos, timer) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(pos, t)| (pos, *t))?;
        self.timers.remove(pos);
        self.clock.set(timer.deadline);
        Some(timer.id)
    }

    pub fn set_now(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Take every requested frame.
    pub fn take_frames(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.frames)
    }

    /// Entries whose intersecting state differs from the last report (every
    /// newly observed element reports once).
    pub fn take_intersections(&mut self) -> Vec<IntersectionEntry<NodeId>> {
        let Some(options) = self.observer else {
            return Vec::new();
        };
        let mut entries = Vec::new();
        for idx in 0..self.watched.len() {
            let node = self.watched[idx].node;
            let now = self.intersects(node, &options);
            if self.watched[idx].reported != Some(now) {
                self.watched[idx].reported = Some(now);
                entries.push(IntersectionEntry {
                    target: node,
                    is_intersecting: now,
                });
            }
        }
        entries
    }

    fn intersects(&self, node: NodeId, options: &ObserverOptions) -> bool {
        let margin = options.root_margin;
        let root_top = self.scroll_y - margin.top;
        let root_bottom = self.scroll_y + self.inner_height + margin.bottom;
        let top = self.document.top(node);
        let height = self.document.height(node);

        if height <= 0.0 {
            return top >= root_top && top < root_bottom;
        }
        let overlap = (top + height).min(root_bottom) - top.max(root_top);
        overlap > 0.0 && overlap / height >= options.threshold
    }
}

impl Dom for SimHost {
    type Node = NodeId;

    fn query(&self, selector: &Selector) -> Option<NodeId> {
        self.document.query(selector)
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.document.query_all(selector)
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.document.contains(*ancestor, *node)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.document.attribute(*node, name).map(str::to_owned)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        self.document.set_attribute(*node, name, value);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.document.has_class(*node, class)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        self.document.add_class(*node, class);
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.document.remove_class(*node, class);
    }

    fn set_style(&mut self, node: &NodeId, property: StyleProperty, value: &str) {
        self.document.set_style(*node, property.css_name(), value);
    }

    fn text(&self, node: &NodeId) -> String {
        self.document.text(*node)
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        self.document.set_text(*node, text);
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.document.top(*node)
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.document.height(*node)
    }

    fn create_element(&mut self, tag: &str) -> Option<NodeId> {
        Some(self.document.create(tag))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.document.append(*parent, *child);
    }
}

impl Viewport for SimHost {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn inner_width(&self) -> f64 {
        self.inner_width
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests.push(ScrollRequest { top, behavior });
    }
}

impl Timers for SimHost {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);
        self.timers.push(PendingTimer {
            id,
            deadline: self.clock.now().saturating_add(delay),
        });
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    fn request_animation_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_frame);
        self.next_frame = self.next_frame.wrapping_add(1);
        self.frames.push(id);
        id
    }
}

impl Listeners for SimHost {
    fn listen(&mut self, source: &EventSource<NodeId>, kind: EventKind, id: ListenerId) {
        self.listeners.push(Registration {
            id,
            source: source.clone(),
            kind,
        });
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|reg| reg.id != id);
    }
}

impl Observer for SimHost {
    fn create_observer(&mut self, options: ObserverOptions) {
        self.observer = Some(options);
        self.watched.clear();
    }

    fn observe(&mut self, node: &NodeId) {
        if !self.is_observed(*node) {
            self.watched.push(Watched {
                node: *node,
                reported: None,
            });
        }
    }

    fn unobserve(&mut self, node: &NodeId) {
        self.watched.retain(|w| w.node != *node);
    }
}

impl Console for SimHost {
    fn log_styled(&mut self, text: &str, style: &str) {
        self.console.push(ConsoleLine {
            text: text.to_owned(),
            style: style.to_owned(),
        });
    }
}
