#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_core::{
    Console, Dom, DomEvent, EventKind, EventSource, FrameId, IntersectionEntry, ListenerId,
    Listeners, Observer, ObserverOptions, PageConfig, PageController, ScrollBehavior, Selector,
    StyleProperty, TimerId, Timers, Viewport,
};
use js_sys::{Array, Function};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollToOptions,
    Window,
};

use crate::{BootError, BootSlot, parse_config};

type SharedPage = Rc<RefCell<PageController<BrowserHost>>>;

thread_local! {
    static PAGE: RefCell<BootSlot<SharedPage>> = const { RefCell::new(BootSlot::Empty) };
}

/// Route from browser callbacks back into the controller.
///
/// Holds a weak handle so the callbacks stored inside the host never keep
/// the controller alive on their own. Events arriving while the controller
/// is already borrowed are dropped.
#[derive(Clone, Default)]
struct PageLink(Rc<RefCell<Weak<RefCell<PageController<BrowserHost>>>>>);

impl PageLink {
    fn attach(&self, page: &SharedPage) {
        *self.0.borrow_mut() = Rc::downgrade(page);
    }

    fn with<R>(&self, f: impl FnOnce(&mut PageController<BrowserHost>) -> R) -> Option<R> {
        let page = self.0.borrow().upgrade()?;
        match page.try_borrow_mut() {
            Ok(mut page) => Some(f(&mut page)),
            Err(_) => {
                warn!("page controller busy; callback dropped");
                None
            }
        }
    }
}

struct InstalledListener {
    target: EventTarget,
    kind: EventKind,
    callback: Closure<dyn FnMut(Event)>,
}

type IntersectionCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// [`folio_core::Host`] over the live browser document.
pub struct BrowserHost {
    window: Window,
    document: Document,
    link: PageLink,
    listeners: HashMap<ListenerId, InstalledListener>,
    timers: HashMap<TimerId, (i32, Closure<dyn FnMut()>)>,
    next_timer: u32,
    next_frame: u32,
    observer: Option<(IntersectionObserver, IntersectionCallback)>,
}

impl BrowserHost {
    fn new(window: Window, document: Document, link: PageLink) -> Self {
        Self {
            window,
            document,
            link,
            listeners: HashMap::new(),
            timers: HashMap::new(),
            next_timer: 1,
            next_frame: 1,
            observer: None,
        }
    }

    fn forget_timer(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn event_target(&self, source: &EventSource<Element>) -> EventTarget {
        match source {
            EventSource::Window => self.window.clone().into(),
            EventSource::Document => self.document.clone().into(),
            EventSource::Element(element) => element.clone().into(),
        }
    }
}

fn dom_event(kind: EventKind, event: &Event) -> DomEvent<Element> {
    match kind {
        EventKind::Click => DomEvent::Click {
            target: event.target().and_then(|t| t.dyn_into::<Element>().ok()),
        },
        EventKind::Scroll => DomEvent::Scroll,
        EventKind::Resize => DomEvent::Resize,
    }
}

fn delay_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

impl Dom for BrowserHost {
    type Node = Element;

    fn query(&self, selector: &Selector) -> Option<Element> {
        self.document
            .query_selector(&selector.to_css())
            .ok()
            .flatten()
    }

    fn query_all(&self, selector: &Selector) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(&selector.to_css()) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node.as_ref();
        ancestor.contains(Some(node))
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            warn!(name, ?err, "set_attribute failed");
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            warn!(class, ?err, "classList.add failed");
        }
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            warn!(class, ?err, "classList.remove failed");
        }
    }

    fn set_style(&mut self, node: &Element, property: StyleProperty, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = element.style().set_property(property.css_name(), value) {
            warn!(property = property.css_name(), ?err, "style write failed");
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_top()))
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn create_element(&mut self, tag: &str) -> Option<Element> {
        match self.document.create_element(tag) {
            Ok(element) => Some(element),
            Err(err) => {
                warn!(tag, ?err, "createElement failed");
                None
            }
        }
    }

    fn append_child(&mut self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            warn!(?err, "appendChild failed");
        }
    }
}

impl Viewport for BrowserHost {
    fn scroll_y(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn inner_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

impl Timers for BrowserHost {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);
        let link = self.link.clone();
        let callback = Closure::once(move || {
            link.with(|page| {
                page.host_mut().forget_timer(id);
                page.on_timer(id);
            });
        });
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_millis(delay),
            ) {
            Ok(handle) => {
                self.timers.insert(id, (handle, callback));
            }
            Err(err) => warn!(?err, "setTimeout failed"),
        }
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        if let Some((handle, _callback)) = self.timers.remove(&id) {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn request_animation_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_frame);
        self.next_frame = self.next_frame.wrapping_add(1);
        let link = self.link.clone();
        let callback = Closure::once_into_js(move |_timestamp: f64| {
            link.with(|page| page.on_animation_frame(id));
        });
        if let Err(err) = self
            .window
            .request_animation_frame(callback.unchecked_ref::<Function>())
        {
            warn!(?err, "requestAnimationFrame failed");
        }
        id
    }
}

impl Listeners for BrowserHost {
    fn listen(&mut self, source: &EventSource<Element>, kind: EventKind, id: ListenerId) {
        let target = self.event_target(source);
        let link = self.link.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let outcome = link.with(|page| page.dispatch(id, &dom_event(kind, &event)));
            if outcome.is_some_and(|o| o.prevent_default) {
                event.prevent_default();
            }
        });

        let options = AddEventListenerOptions::new();
        // Scroll and resize handlers never cancel the event.
        options.set_passive(kind != EventKind::Click);
        if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind.dom_name(),
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            warn!(listener = id.0, ?err, "addEventListener failed");
            return;
        }
        self.listeners.insert(
            id,
            InstalledListener {
                target,
                kind,
                callback,
            },
        );
    }

    fn unlisten(&mut self, id: ListenerId) {
        let Some(installed) = self.listeners.remove(&id) else {
            return;
        };
        if let Err(err) = installed.target.remove_event_listener_with_callback(
            installed.kind.dom_name(),
            installed.callback.as_ref().unchecked_ref(),
        ) {
            warn!(listener = id.0, ?err, "removeEventListener failed");
        }
    }
}

impl Observer for BrowserHost {
    fn create_observer(&mut self, options: ObserverOptions) {
        if let Some((previous, _)) = self.observer.take() {
            previous.disconnect();
        }

        let link = self.link.clone();
        let callback: IntersectionCallback =
            Closure::new(move |entries: Array, _observer: IntersectionObserver| {
                let entries: Vec<IntersectionEntry<Element>> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| IntersectionEntry {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                link.with(|page| page.on_intersection(&entries));
            });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin.to_css());
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => self.observer = Some((observer, callback)),
            Err(err) => warn!(?err, "IntersectionObserver unavailable; reveal disabled"),
        }
    }

    fn observe(&mut self, node: &Element) {
        if let Some((observer, _)) = &self.observer {
            observer.observe(node);
        }
    }

    fn unobserve(&mut self, node: &Element) {
        if let Some((observer, _)) = &self.observer {
            observer.unobserve(node);
        }
    }
}

impl Console for BrowserHost {
    fn log_styled(&mut self, text: &str, style: &str) {
        web_sys::console::log_2(
            &JsValue::from_str(&format!("%c{text}")),
            &JsValue::from_str(style),
        );
    }
}

impl From<BootError> for JsValue {
    fn from(err: BootError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn boot_now(window: Window, document: Document, config: PageConfig) {
    let link = PageLink::default();
    let host = BrowserHost::new(window, document, link.clone());
    let page = Rc::new(RefCell::new(PageController::boot(host, config)));
    link.attach(&page);
    PAGE.with(|slot| slot.borrow_mut().fill(page));
}

/// Boot now if the document is interactive, else on `DOMContentLoaded`.
///
/// The slot is claimed synchronously, so a second call fails even while the
/// first boot is still deferred.
fn boot_when_ready(config: PageConfig) -> Result<(), BootError> {
    let window = web_sys::window().ok_or(BootError::NoWindow)?;
    let document = window.document().ok_or(BootError::NoDocument)?;
    PAGE.with(|slot| slot.borrow_mut().claim())?;
    if document.ready_state() != "loading" {
        boot_now(window, document, config);
        return Ok(());
    }

    debug!("document still loading; deferring boot");
    let target = document.clone();
    let callback = Closure::once_into_js(move || boot_now(window, document, config));
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        callback.unchecked_ref::<Function>(),
        &options,
    ) {
        warn!(?err, "could not defer boot");
        PAGE.with(|slot| slot.borrow_mut().release());
        return Err(BootError::NoDocument);
    }
    Ok(())
}

/// Module entry point: boots with the default config.
#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    boot_when_ready(PageConfig::default())?;
    Ok(())
}

/// Boot with a JSON config (see `PageConfig`). An empty string means
/// defaults. Fails if a boot already happened or is queued.
#[wasm_bindgen(js_name = bootWithConfig)]
pub fn boot_with_config(json: &str) -> Result<(), BootError> {
    let config = parse_config(json)?;
    boot_when_ready(config)?;
    info!("boot requested with custom config");
    Ok(())
}

/// Detach every listener and watcher. Returns `false` if nothing was booted.
#[wasm_bindgen]
pub fn teardown() -> bool {
    let page = PAGE.with(|slot| slot.borrow().booted().map(Rc::clone));
    let Some(page) = page else {
        return false;
    };
    match page.try_borrow_mut() {
        Ok(mut page) => {
            page.teardown();
            true
        }
        Err(_) => false,
    }
}
