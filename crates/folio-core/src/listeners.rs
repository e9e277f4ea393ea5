#![forbid(unsafe_code)]

//! Listener registry.
//!
//! Each registration ties a [`Handler`] to an `(event source, event kind)`
//! pair under a fresh [`ListenerId`]. The host only ever sees the id; the
//! registry maps it back to the behavior to run. Teardown is an explicit
//! deregistration of every id.

use crate::host::{EventKind, EventSource, ListenerId, Listeners};

/// Controller behavior bound to a listener.
#[derive(Debug, Clone, PartialEq)]
pub enum Handler<N> {
    /// Flip `active` on the toggle and the menu.
    ToggleMenu,
    /// Clear `active` on the toggle and the menu (nav link clicked).
    CloseMenu,
    /// Clear `active` when the click landed outside toggle and menu.
    DismissOutside,
    NavbarScroll,
    Parallax,
    Highlight,
    /// Intercept an in-page anchor.
    SmoothScroll { anchor: N },
    /// Feed the frame gate (per-frame scroll mode).
    FrameRequest,
    /// Restart the resize debounce window.
    ResizeDebounce,
}

#[derive(Debug, Clone)]
struct Registration<N> {
    id: ListenerId,
    kind: EventKind,
    handler: Handler<N>,
}

#[derive(Debug, Clone)]
pub struct ListenerRegistry<N> {
    next_id: u32,
    entries: Vec<Registration<N>>,
}

impl<N> Default for ListenerRegistry<N> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<N: Clone> ListenerRegistry<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` and install it on the host.
    pub fn register<L>(
        &mut self,
        host: &mut L,
        source: EventSource<N>,
        kind: EventKind,
        handler: Handler<N>,
    ) -> ListenerId
    where
        L: Listeners<Node = N> + ?Sized,
    {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        host.listen(&source, kind, id);
        self.entries.push(Registration { id, kind, handler });
        id
    }

    /// Handler for `id`, if it is registered for `kind`.
    #[must_use]
    pub fn handler(&self, id: ListenerId, kind: EventKind) -> Option<&Handler<N>> {
        self.entries
            .iter()
            .find(|entry| entry.id == id && entry.kind == kind)
            .map(|entry| &entry.handler)
    }

    /// Deregister everything, in registration order.
    pub fn remove_all<L>(&mut self, host: &mut L)
    where
        L: Listeners<Node = N> + ?Sized,
    {
        for entry in self.entries.drain(..) {
            host.unlisten(entry.id);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
