#![forbid(unsafe_code)]

//! The page controller.
//!
//! [`PageController::boot`] runs once when the document is interactive: it
//! queries the structural hooks, registers listeners, renders the project
//! cards, runs the first highlight pass and starts the typing animation.
//! From then on the host pushes events in:
//!
//! - [`PageController::dispatch`] for listener events (click/scroll/resize),
//! - [`PageController::on_timer`] for expired timeouts,
//! - [`PageController::on_animation_frame`] for delivered frames,
//! - [`PageController::on_intersection`] for reveal-on-scroll entries.
//!
//! Every hook is optional. A missing hook disables exactly the behavior that
//! depends on it, silently.

use tracing::{debug, info, trace};

use crate::config::{PageConfig, ScrollMode};
use crate::debounce::Debounce;
use crate::effects;
use crate::frame_gate::FrameGate;
use crate::greeting;
use crate::host::{
    DispatchOutcome, DomEvent, EventKind, EventSource, FrameId, Host, IntersectionEntry,
    ListenerId, ScrollBehavior, StyleProperty, TimerId,
};
use crate::listeners::{Handler, ListenerRegistry};
use crate::project::{self, PROJECTS};
use crate::selector::Selector;
use crate::typing::TypeWriter;

/// Open menu / current nav link.
pub const ACTIVE_CLASS: &str = "active";
/// Navbar past the scroll threshold.
pub const SCROLLED_CLASS: &str = "scrolled";
/// Revealed fade-in element.
pub const VISIBLE_CLASS: &str = "visible";

#[derive(Debug, Clone)]
struct NavMenu<N> {
    toggle: N,
    menu: N,
}

pub struct PageController<H: Host> {
    host: H,
    config: PageConfig,
    listeners: ListenerRegistry<H::Node>,
    nav: Option<NavMenu<H::Node>>,
    navbar: Option<H::Node>,
    hero: Option<H::Node>,
    sections: Vec<H::Node>,
    /// Elements still registered with the intersection watcher.
    observed: Vec<H::Node>,
    typing: Option<TypeWriter<H::Node>>,
    frame_gate: FrameGate,
    resize: Option<Debounce<()>>,
    last_scroll: f64,
    rendered_projects: usize,
}

impl<H: Host> PageController<H> {
    /// Wire every behavior against `host`'s document.
    pub fn boot(host: H, config: PageConfig) -> Self {
        let mut page = Self {
            host,
            config,
            listeners: ListenerRegistry::new(),
            nav: None,
            navbar: None,
            hero: None,
            sections: Vec::new(),
            observed: Vec::new(),
            typing: None,
            frame_gate: FrameGate::new(),
            resize: None,
            last_scroll: 0.0,
            rendered_projects: 0,
        };

        if page.config.greeting {
            greeting::emit(&mut page.host);
        }
        page.wire_menu();
        page.wire_navbar();
        page.wire_reveal();
        page.wire_anchors();
        page.render_projects();
        page.wire_parallax();
        page.wire_highlight();
        page.start_typing();
        page.wire_resize();

        info!(
            listeners = page.listeners.len(),
            projects = page.rendered_projects,
            observed = page.observed.len(),
            scroll_mode = ?page.config.scroll_mode,
            "page controller booted"
        );
        page
    }

    // ── Wiring ──────────────────────────────────────────────────────────

    fn listen(&mut self, source: EventSource<H::Node>, kind: EventKind, handler: Handler<H::Node>) {
        self.listeners.register(&mut self.host, source, kind, handler);
    }

    fn wire_menu(&mut self) {
        let hooks = &self.config.hooks;
        let toggle = self.host.query(&hooks.nav_toggle());
        let menu = self.host.query(&hooks.nav_menu());
        let (Some(toggle), Some(menu)) = (toggle, menu) else {
            debug!("nav toggle or menu missing; mobile menu disabled");
            return;
        };
        let links = self.host.query_all(&hooks.nav_links());

        self.listen(
            EventSource::Element(toggle.clone()),
            EventKind::Click,
            Handler::ToggleMenu,
        );
        for link in &links {
            self.listen(
                EventSource::Element(link.clone()),
                EventKind::Click,
                Handler::CloseMenu,
            );
        }
        self.listen(EventSource::Document, EventKind::Click, Handler::DismissOutside);
        debug!(links = links.len(), "mobile menu wired");
        self.nav = Some(NavMenu { toggle, menu });
    }

    fn wire_navbar(&mut self) {
        self.navbar = self.host.query(&self.config.hooks.navbar());
        if self.navbar.is_none() {
            debug!("navbar missing; scroll styling disabled");
        }
        match self.config.scroll_mode {
            ScrollMode::Direct => {
                self.listen(EventSource::Window, EventKind::Scroll, Handler::NavbarScroll);
            }
            ScrollMode::PerFrame => {
                self.listen(EventSource::Window, EventKind::Scroll, Handler::FrameRequest);
            }
        }
    }

    fn wire_reveal(&mut self) {
        self.host.create_observer(self.config.reveal);
        for node in self.host.query_all(&self.config.hooks.fade_in()) {
            self.observe(node);
        }
    }

    fn observe(&mut self, node: H::Node) {
        self.host.observe(&node);
        self.observed.push(node);
    }

    fn wire_anchors(&mut self) {
        let anchors = self.host.query_all(&self.config.hooks.in_page_anchors());
        for anchor in &anchors {
            self.listen(
                EventSource::Element(anchor.clone()),
                EventKind::Click,
                Handler::SmoothScroll {
                    anchor: anchor.clone(),
                },
            );
        }
        debug!(anchors = anchors.len(), "in-page anchors wired");
    }

    fn render_projects(&mut self) {
        let Some(container) = self.host.query(&self.config.hooks.project_list()) else {
            debug!("project list missing; cards not rendered");
            return;
        };
        for (index, entry) in PROJECTS.iter().enumerate() {
            let Some(card) = project::build_card(
                &mut self.host,
                entry,
                index,
                &self.config.hooks.fade_in,
                self.config.stagger_step_secs,
            ) else {
                debug!(index, "project card could not be created");
                continue;
            };
            self.host.append_child(&container, &card);
            self.observe(card);
            self.rendered_projects += 1;
        }
    }

    fn wire_parallax(&mut self) {
        self.hero = self.host.query(&self.config.hooks.hero());
        if self.hero.is_none() {
            debug!("hero missing; parallax disabled");
            return;
        }
        if self.config.scroll_mode == ScrollMode::Direct {
            self.listen(EventSource::Window, EventKind::Scroll, Handler::Parallax);
        }
    }

    fn wire_highlight(&mut self) {
        self.sections = self.host.query_all(&self.config.hooks.sections());
        if self.config.scroll_mode == ScrollMode::Direct {
            self.listen(EventSource::Window, EventKind::Scroll, Handler::Highlight);
        }
        self.highlight_navigation();
    }

    fn start_typing(&mut self) {
        let Some(title) = self.host.query(&self.config.hooks.hero_title()) else {
            return;
        };
        let width = self.host.inner_width();
        if width <= self.config.typing.min_viewport_width {
            debug!(width, "viewport too narrow; typing animation skipped");
            return;
        }
        self.typing = Some(TypeWriter::start(&mut self.host, title, &self.config.typing));
    }

    fn wire_resize(&mut self) {
        let Some(wait) = self.config.resize_debounce() else {
            return;
        };
        self.resize = Some(Debounce::new(wait));
        self.listen(EventSource::Window, EventKind::Resize, Handler::ResizeDebounce);
    }

    // ── Host entry points ───────────────────────────────────────────────

    /// Run the behavior registered under `listener` for `event`.
    ///
    /// Unknown ids, or ids registered for a different event kind, are
    /// ignored.
    pub fn dispatch(&mut self, listener: ListenerId, event: &DomEvent<H::Node>) -> DispatchOutcome {
        let Some(handler) = self.listeners.handler(listener, event.kind()).cloned() else {
            trace!(?listener, "event for unknown listener ignored");
            return DispatchOutcome::default();
        };

        match handler {
            Handler::ToggleMenu => self.toggle_menu(),
            Handler::CloseMenu => self.close_menu(),
            Handler::DismissOutside => {
                if let DomEvent::Click { target } = event {
                    self.dismiss_outside(target.as_ref());
                }
            }
            Handler::NavbarScroll => self.update_navbar(),
            Handler::Parallax => self.update_parallax(),
            Handler::Highlight => self.highlight_navigation(),
            Handler::SmoothScroll { anchor } => return self.smooth_scroll(&anchor),
            Handler::FrameRequest => {
                self.frame_gate.request(&mut self.host);
            }
            Handler::ResizeDebounce => {
                if let Some(resize) = self.resize.as_mut() {
                    resize.call(&mut self.host, ());
                }
            }
        }
        DispatchOutcome::default()
    }

    /// A timeout armed through the host expired.
    pub fn on_timer(&mut self, id: TimerId) {
        if let Some(typing) = self.typing.as_mut() {
            if typing.on_timer(&mut self.host, id) {
                return;
            }
        }
        let resized = self
            .resize
            .as_mut()
            .and_then(|resize| resize.fire(id))
            .is_some();
        if resized {
            trace!("debounced resize");
            self.highlight_navigation();
        }
    }

    /// An animation frame requested through the frame gate was delivered.
    pub fn on_animation_frame(&mut self, id: FrameId) {
        if self.frame_gate.complete(id) {
            self.update_navbar();
            self.update_parallax();
            self.highlight_navigation();
        }
    }

    /// Reveal entries that became intersecting and stop watching them.
    pub fn on_intersection(&mut self, entries: &[IntersectionEntry<H::Node>]) {
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            self.host.add_class(&entry.target, VISIBLE_CLASS);
            self.host.unobserve(&entry.target);
            self.observed.retain(|node| node != &entry.target);
        }
    }

    /// Deregister every listener, stop watching every element and drop any
    /// pending scroll frame.
    ///
    /// A running typing animation is left to finish.
    pub fn teardown(&mut self) {
        self.listeners.remove_all(&mut self.host);
        for node in self.observed.drain(..) {
            self.host.unobserve(&node);
        }
        if let Some(resize) = self.resize.as_mut() {
            resize.cancel(&mut self.host);
        }
        self.frame_gate.cancel();
        debug!("page controller torn down");
    }

    // ── Behaviors ───────────────────────────────────────────────────────

    fn toggle_menu(&mut self) {
        if let Some(nav) = &self.nav {
            self.host.toggle_class(&nav.menu, ACTIVE_CLASS);
            self.host.toggle_class(&nav.toggle, ACTIVE_CLASS);
        }
    }

    fn close_menu(&mut self) {
        if let Some(nav) = &self.nav {
            self.host.remove_class(&nav.menu, ACTIVE_CLASS);
            self.host.remove_class(&nav.toggle, ACTIVE_CLASS);
        }
    }

    fn dismiss_outside(&mut self, target: Option<&H::Node>) {
        let Some(nav) = &self.nav else {
            return;
        };
        let inside = target.is_some_and(|target| {
            self.host.contains(&nav.toggle, target) || self.host.contains(&nav.menu, target)
        });
        if !inside {
            self.close_menu();
        }
    }

    fn update_navbar(&mut self) {
        let scroll_y = self.host.scroll_y();
        if let Some(navbar) = &self.navbar {
            if effects::navbar_scrolled(scroll_y, self.config.navbar_threshold) {
                self.host.add_class(navbar, SCROLLED_CLASS);
            } else {
                self.host.remove_class(navbar, SCROLLED_CLASS);
            }
        }
        self.last_scroll = scroll_y;
    }

    fn update_parallax(&mut self) {
        let Some(hero) = &self.hero else {
            return;
        };
        let scroll_y = self.host.scroll_y();
        let height = self.host.offset_height(hero);
        let offset = effects::parallax_offset(scroll_y, height, self.config.parallax_rate);
        self.host
            .set_style(hero, StyleProperty::Transform, &effects::translate_y(offset));
    }

    fn highlight_navigation(&mut self) {
        let scroll_y = self.host.scroll_y();
        for section in &self.sections {
            let Some(id) = self.host.attribute(section, "id") else {
                continue;
            };
            let active = effects::section_active(
                scroll_y,
                self.host.offset_top(section),
                self.host.offset_height(section),
                self.config.section_offset,
            );
            let Some(link) = self.host.query(&self.config.hooks.nav_link_for(&id)) else {
                continue;
            };
            if active {
                self.host.add_class(&link, ACTIVE_CLASS);
            } else {
                self.host.remove_class(&link, ACTIVE_CLASS);
            }
        }
    }

    fn smooth_scroll(&mut self, anchor: &H::Node) -> DispatchOutcome {
        let Some(href) = self.host.attribute(anchor, "href") else {
            return DispatchOutcome::default();
        };
        let Some(target) = Selector::from_fragment(&href).and_then(|sel| self.host.query(&sel))
        else {
            trace!(href = %href, "anchor target not found");
            return DispatchOutcome::default();
        };
        let top = self.host.offset_top(&target) - self.config.anchor_offset;
        self.host.scroll_to(top, ScrollBehavior::Smooth);
        DispatchOutcome {
            prevent_default: true,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Scroll offset seen by the most recent navbar update.
    #[must_use]
    pub const fn last_scroll(&self) -> f64 {
        self.last_scroll
    }

    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry<H::Node> {
        &self.listeners
    }

    #[must_use]
    pub const fn rendered_projects(&self) -> usize {
        self.rendered_projects
    }

    /// Elements still waiting to be revealed.
    #[must_use]
    pub fn pending_reveals(&self) -> usize {
        self.observed.len()
    }

    #[must_use]
    pub fn typing(&self) -> Option<&TypeWriter<H::Node>> {
        self.typing.as_ref()
    }

    #[must_use]
    pub fn frame_gate(&self) -> &FrameGate {
        &self.frame_gate
    }

    /// Whether the mobile menu is currently open. `None` without a menu.
    #[must_use]
    pub fn menu_open(&self) -> Option<bool> {
        self.nav
            .as_ref()
            .map(|nav| self.host.has_class(&nav.menu, ACTIVE_CLASS))
    }
}
