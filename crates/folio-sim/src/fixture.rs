#![forbid(unsafe_code)]

//! Fixture pages.
//!
//! [`portfolio`] builds the stock portfolio markup with a fixed layout:
//!
//! | element   | top  | height |
//! |-----------|------|--------|
//! | `#home` (hero) | 0 | 600 |
//! | `#about`  | 600  | 500 |
//! | `#projects` | 1100 | 700 |
//! | `#contact` | 1800 | 400 |
//!
//! in a 1024 × 800 viewport.

use crate::document::{MemoryDocument, NodeId};
use crate::host::SimHost;

pub const VIEWPORT_WIDTH: f64 = 1024.0;
pub const VIEWPORT_HEIGHT: f64 = 800.0;
pub const HERO_TITLE: &str = "Hello World";

/// Handles to the interesting elements of [`portfolio`].
#[derive(Debug, Clone)]
pub struct PortfolioNodes {
    pub navbar: NodeId,
    pub logo: NodeId,
    pub toggle: NodeId,
    pub toggle_bar: NodeId,
    pub menu: NodeId,
    /// `(section id, nav link)` in menu order.
    pub links: Vec<(&'static str, NodeId)>,
    pub hero: NodeId,
    pub hero_title: NodeId,
    pub about: NodeId,
    pub projects: NodeId,
    pub project_list: NodeId,
    pub contact: NodeId,
    pub broken_anchor: NodeId,
    pub footer: NodeId,
}

impl PortfolioNodes {
    /// Nav link for `section`.
    #[must_use]
    pub fn link(&self, section: &str) -> NodeId {
        self.links
            .iter()
            .find(|(id, _)| *id == section)
            .map(|(_, node)| *node)
            .unwrap_or_else(|| panic!("fixture has no link for #{section}"))
    }
}

/// The stock portfolio page.
#[must_use]
pub fn portfolio() -> (SimHost, PortfolioNodes) {
    let mut doc = MemoryDocument::new();
    let body = doc.body();

    let navbar = doc.element(body, "nav", &["navbar"]);
    doc.set_layout(navbar, 0.0, 70.0);
    let logo = doc.element(navbar, "a", &["logo"]);
    doc.set_attribute(logo, "href", "#");
    doc.set_text(logo, "AS");
    let toggle = doc.element(navbar, "button", &["nav-toggle"]);
    let toggle_bar = doc.element(toggle, "span", &["bar"]);
    let menu = doc.element(navbar, "ul", &["nav-menu"]);

    let mut links = Vec::new();
    for id in ["home", "about", "projects", "contact"] {
        let item = doc.element(menu, "li", &[]);
        let link = doc.element(item, "a", &["nav-link"]);
        doc.set_attribute(link, "href", &format!("#{id}"));
        doc.set_text(link, id);
        links.push((id, link));
    }

    let hero = section(&mut doc, body, "home", &["hero"], 0.0, 600.0);
    let title = doc.element(hero, "h1", &["hero-title"]);
    let hero_title = doc.element(title, "span", &["gradient-text"]);
    doc.set_text(hero_title, HERO_TITLE);

    let about = section(&mut doc, body, "about", &["fade-in"], 600.0, 500.0);
    let projects = section(&mut doc, body, "projects", &["fade-in"], 1100.0, 700.0);
    let project_list = doc.element(projects, "div", &["project-list"]);
    doc.set_layout(project_list, 1180.0, 600.0);
    let contact = section(&mut doc, body, "contact", &["fade-in"], 1800.0, 400.0);
    let broken_anchor = doc.element(contact, "a", &[]);
    doc.set_attribute(broken_anchor, "href", "#nonexistent");

    let footer = doc.element(body, "footer", &[]);
    doc.set_layout(footer, 2200.0, 100.0);

    let nodes = PortfolioNodes {
        navbar,
        logo,
        toggle,
        toggle_bar,
        menu,
        links,
        hero,
        hero_title,
        about,
        projects,
        project_list,
        contact,
        broken_anchor,
        footer,
    };
    (SimHost::new(doc, VIEWPORT_WIDTH, VIEWPORT_HEIGHT), nodes)
}

/// `<section id="...">` with a layout box.
pub fn section(
    doc: &mut MemoryDocument,
    parent: NodeId,
    id: &str,
    classes: &[&str],
    top: f64,
    height: f64,
) -> NodeId {
    let node = doc.element(parent, "section", classes);
    doc.set_attribute(node, "id", id);
    doc.set_layout(node, top, height);
    node
}
