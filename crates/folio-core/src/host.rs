#![forbid(unsafe_code)]

//! Host abstraction.
//!
//! The page controller is host-driven: it never owns a browser window or a
//! document. Everything it needs from the environment goes through the traits
//! below, and everything the environment wants to tell it (clicks, scrolls,
//! timers, frames, intersections) is pushed back by id.
//!
//! - [`Dom`]: element lookup, class/style/text/attribute mutation, geometry.
//! - [`Viewport`]: scroll offset, width, programmatic scrolling.
//! - [`Timers`]: one-shot timeouts and animation frames.
//! - [`Listeners`]: event listener registration keyed by [`ListenerId`].
//! - [`Observer`]: the reveal-on-scroll intersection watcher.
//! - [`Console`]: styled developer-console output.
//!
//! [`Host`] is the blanket combination of all of them.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::selector::Selector;

/// Inline style properties the controller writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    AnimationDelay,
    Transform,
    Opacity,
}

impl StyleProperty {
    /// CSS property name (`animation-delay`, ...).
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::AnimationDelay => "animation-delay",
            Self::Transform => "transform",
            Self::Opacity => "opacity",
        }
    }
}

/// Programmatic scroll behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// DOM access.
pub trait Dom {
    /// Handle to a live element. The document owns the node; handles are
    /// cheap references into it.
    type Node: Clone + PartialEq + fmt::Debug;

    fn query(&self, selector: &Selector) -> Option<Self::Node>;
    fn query_all(&self, selector: &Selector) -> Vec<Self::Node>;

    /// `true` when `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Flip `class`; returns whether it is present afterwards.
    fn toggle_class(&mut self, node: &Self::Node, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn set_style(&mut self, node: &Self::Node, property: StyleProperty, value: &str);

    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Layout offset from the top of the document, in CSS pixels.
    fn offset_top(&self, node: &Self::Node) -> f64;
    /// Rendered height, in CSS pixels.
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// `None` if the host refuses to create the element.
    fn create_element(&mut self, tag: &str) -> Option<Self::Node>;
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);
}

/// The browser viewport.
pub trait Viewport {
    /// Vertical scroll offset (`pageYOffset`).
    fn scroll_y(&self) -> f64;
    /// Layout viewport width (`innerWidth`).
    fn inner_width(&self) -> f64;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}

/// Identifier of a scheduled timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

/// Identifier of a requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u32);

/// Host-scheduled callbacks. Expiry is reported back through
/// `PageController::on_timer` / `PageController::on_animation_frame`.
pub trait Timers {
    fn set_timeout(&mut self, delay: Duration) -> TimerId;
    fn clear_timeout(&mut self, id: TimerId);
    fn request_animation_frame(&mut self) -> FrameId;
}

/// Identifier of a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// Event names the controller listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
    Resize,
}

impl EventKind {
    /// DOM event type string.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
        }
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum EventSource<N> {
    Window,
    Document,
    Element(N),
}

/// An event delivered to a listener.
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent<N> {
    /// `target` is `None` when the click did not originate on an element.
    Click { target: Option<N> },
    Scroll,
    Resize,
}

impl<N> DomEvent<N> {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::Scroll => EventKind::Scroll,
            Self::Resize => EventKind::Resize,
        }
    }
}

/// Result of dispatching one event to one listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The host must suppress the event's default action.
    pub prevent_default: bool,
}

/// Listener registration.
///
/// The host stores `id` against `(source, kind)` and, when that event fires,
/// hands `id` back to `PageController::dispatch`.
pub trait Listeners: Dom {
    fn listen(&mut self, source: &EventSource<Self::Node>, kind: EventKind, id: ListenerId);
    fn unlisten(&mut self, id: ListenerId);
}

/// Root margin in pixels (`top right bottom left`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// CSS `rootMargin` string.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Intersection watcher configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    /// Visible fraction at which an element counts as intersecting.
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin {
                bottom: -50.0,
                ..RootMargin::default()
            },
        }
    }
}

/// One intersection notification.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<N> {
    pub target: N,
    pub is_intersecting: bool,
}

/// The reveal-on-scroll watcher. Entries come back through
/// `PageController::on_intersection`.
pub trait Observer: Dom {
    /// Create (or replace) the watcher. Called once at boot.
    fn create_observer(&mut self, options: ObserverOptions);
    fn observe(&mut self, node: &Self::Node);
    fn unobserve(&mut self, node: &Self::Node);
}

/// Developer console.
pub trait Console {
    /// Log `text` styled with the inline CSS `style` (`%c` formatting).
    fn log_styled(&mut self, text: &str, style: &str);
}

/// Everything the page controller needs from its environment.
pub trait Host: Dom + Viewport + Timers + Listeners + Observer + Console {}

impl<T> Host for T where T: Dom + Viewport + Timers + Listeners + Observer + Console {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_observer_options_match_reveal_contract() {
        let opts = ObserverOptions::default();
        assert_eq!(opts.threshold, 0.1);
        assert_eq!(opts.root_margin.to_css(), "0px 0px -50px 0px");
    }

    #[test]
    fn style_and_event_names() {
        assert_eq!(StyleProperty::AnimationDelay.css_name(), "animation-delay");
        assert_eq!(StyleProperty::Transform.css_name(), "transform");
        assert_eq!(EventKind::Scroll.dom_name(), "scroll");
        assert_eq!(DomEvent::<u32>::Click { target: None }.kind(), EventKind::Click);
    }
}
