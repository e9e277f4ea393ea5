//! End-to-end behavior of the page controller on the stock portfolio page.

use std::time::Duration;

use folio_core::effects::translate_y;
use folio_core::project::{LINK_LABEL, LINK_REL, LINK_TARGET, PROJECTS, Project, build_card};
use folio_core::{PageConfig, ScrollBehavior};
use folio_sim::fixture::{self, HERO_TITLE, PortfolioNodes};
use folio_sim::{MemoryDocument, NodeId, PageSimulator, ScrollRequest, SimHost};
use pretty_assertions::assert_eq;

fn boot() -> (PageSimulator, PortfolioNodes) {
    let (host, nodes) = fixture::portfolio();
    (PageSimulator::boot(host, PageConfig::default()), nodes)
}

fn is_active(sim: &PageSimulator, node: NodeId) -> bool {
    sim.document().has_class(node, "active")
}

// ── Mobile menu ────────────────────────────────────────────────────────

#[test]
fn toggle_flips_menu_and_toggle_together() {
    let (mut sim, nodes) = boot();
    assert_eq!(sim.page().menu_open(), Some(false));

    sim.click(nodes.toggle);
    assert!(is_active(&sim, nodes.menu));
    assert!(is_active(&sim, nodes.toggle));

    sim.click(nodes.toggle);
    assert!(!is_active(&sim, nodes.menu));
    assert!(!is_active(&sim, nodes.toggle));
}

#[test]
fn click_inside_toggle_child_counts_as_toggle() {
    let (mut sim, nodes) = boot();
    sim.click(nodes.toggle_bar);
    assert_eq!(sim.page().menu_open(), Some(true));
}

#[test]
fn nav_link_click_closes_menu() {
    let (mut sim, nodes) = boot();
    sim.click(nodes.toggle);
    assert_eq!(sim.page().menu_open(), Some(true));

    sim.click(nodes.link("about"));
    assert_eq!(sim.page().menu_open(), Some(false));
    assert!(!is_active(&sim, nodes.toggle));

    // Already closed stays closed.
    sim.click(nodes.link("contact"));
    assert_eq!(sim.page().menu_open(), Some(false));
}

#[test]
fn click_outside_dismisses_menu() {
    let (mut sim, nodes) = boot();
    sim.click(nodes.toggle);
    sim.click(nodes.footer);
    assert_eq!(sim.page().menu_open(), Some(false));
    assert!(!is_active(&sim, nodes.toggle));
}

#[test]
fn click_inside_menu_keeps_it_open() {
    let (mut sim, nodes) = boot();
    sim.click(nodes.toggle);
    sim.click(nodes.menu);
    assert_eq!(sim.page().menu_open(), Some(true));
}

// ── Navbar ─────────────────────────────────────────────────────────────

#[test]
fn navbar_scrolled_above_threshold_only() {
    let (mut sim, nodes) = boot();

    sim.scroll_to(100.0);
    assert!(!sim.document().has_class(nodes.navbar, "scrolled"));

    sim.scroll_to(101.0);
    assert!(sim.document().has_class(nodes.navbar, "scrolled"));
    assert_eq!(sim.page().last_scroll(), 101.0);

    sim.scroll_to(40.0);
    assert!(!sim.document().has_class(nodes.navbar, "scrolled"));
    assert_eq!(sim.page().last_scroll(), 40.0);
}

// ── Parallax ───────────────────────────────────────────────────────────

#[test]
fn hero_translates_while_visible_and_resets_after() {
    let (mut sim, nodes) = boot();

    sim.scroll_to(100.0);
    assert_eq!(
        sim.document().style(nodes.hero, "transform"),
        Some(translate_y(100.0 * 0.3).as_str())
    );

    sim.scroll_to(599.0);
    assert_eq!(
        sim.document().style(nodes.hero, "transform"),
        Some(translate_y(599.0 * 0.3).as_str())
    );

    sim.scroll_to(600.0);
    assert_eq!(
        sim.document().style(nodes.hero, "transform"),
        Some("translateY(0px)")
    );
}

// ── Smooth anchors ─────────────────────────────────────────────────────

#[test]
fn anchor_scrolls_to_target_minus_navbar_offset() {
    let (mut sim, nodes) = boot();
    let outcome = sim.click(nodes.link("about"));

    assert!(outcome.default_prevented);
    assert_eq!(
        sim.host().scroll_requests(),
        &[ScrollRequest {
            top: 520.0,
            behavior: ScrollBehavior::Smooth,
        }]
    );
}

#[test]
fn missing_anchor_target_falls_through() {
    let (mut sim, nodes) = boot();
    let outcome = sim.click(nodes.broken_anchor);

    assert!(!outcome.default_prevented);
    assert!(sim.host().scroll_requests().is_empty());
}

#[test]
fn bare_hash_anchor_is_ignored() {
    let (mut sim, nodes) = boot();
    let outcome = sim.click(nodes.logo);

    assert!(!outcome.default_prevented);
    assert!(sim.host().scroll_requests().is_empty());
}

// ── Projects ───────────────────────────────────────────────────────────

#[test]
fn projects_render_in_order_with_staggered_delays() {
    let (sim, nodes) = boot();
    let doc = sim.document();
    let cards = doc.children(nodes.project_list).to_vec();

    assert_eq!(cards.len(), PROJECTS.len());
    assert_eq!(sim.page().rendered_projects(), 3);

    for (index, (card, project)) in cards.iter().zip(PROJECTS).enumerate() {
        assert_eq!(doc.classes(*card), ["project", "fade-in"]);
        let delay = format!("{}s", index as f64 * 0.1);
        assert_eq!(doc.style(*card, "animation-delay"), Some(delay.as_str()));

        let children = doc.children(*card);
        assert_eq!(children.len(), 3);
        assert_eq!(doc.tag(children[0]), "h3");
        assert_eq!(doc.text(children[0]), project.name);
        assert_eq!(doc.tag(children[1]), "p");
        assert_eq!(Some(doc.text(children[1]).as_str()), project.description);

        let link = children[2];
        assert_eq!(doc.tag(link), "a");
        assert_eq!(doc.attribute(link, "href"), Some(project.link));
        assert_eq!(doc.attribute(link, "target"), Some(LINK_TARGET));
        assert_eq!(doc.attribute(link, "rel"), Some(LINK_REL));
        assert_eq!(doc.text(link), LINK_LABEL);
    }
}

#[test]
fn card_without_description_has_no_paragraph() {
    let mut host = SimHost::new(MemoryDocument::new(), 1024.0, 800.0);
    let entry = Project {
        name: "Side Project",
        link: "https://example.org/side",
        description: None,
    };
    let card = build_card(&mut host, &entry, 2, "fade-in", 0.1).expect("card");

    let doc = host.document();
    let tags: Vec<&str> = doc.children(card).iter().map(|c| doc.tag(*c)).collect();
    assert_eq!(tags, ["h3", "a"]);
    assert_eq!(doc.text(doc.children(card)[0]), "Side Project");
    assert_eq!(doc.style(card, "animation-delay"), Some("0.2s"));
    assert_eq!(doc.parent(card), None);
}

#[test]
fn missing_project_list_skips_rendering() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    doc.element(body, "div", &["projects"]);
    let mut sim = PageSimulator::boot(SimHost::new(doc, 1024.0, 800.0), PageConfig::default());

    assert_eq!(sim.page().rendered_projects(), 0);
    assert!(sim.document().query(&folio_core::Selector::class("project")).is_none());
    sim.scroll_to(500.0);
}

// ── Reveal on scroll ───────────────────────────────────────────────────

#[test]
fn fade_in_elements_reveal_once() {
    let (mut sim, nodes) = boot();
    let cards = sim.document().children(nodes.project_list).to_vec();
    for (i, card) in cards.iter().enumerate() {
        let top = 1200.0 + 200.0 * i as f64;
        sim.page_mut()
            .host_mut()
            .document_mut()
            .set_layout(*card, top, 150.0);
    }

    sim.flush_intersections();
    assert!(sim.document().has_class(nodes.about, "visible"));
    assert!(!sim.document().has_class(nodes.projects, "visible"));
    assert!(!sim.host().is_observed(nodes.about));
    assert_eq!(sim.page().pending_reveals(), 5);

    sim.scroll_to(1000.0);
    assert!(sim.document().has_class(nodes.projects, "visible"));
    for card in &cards {
        assert!(sim.document().has_class(*card, "visible"));
    }
    assert!(!sim.document().has_class(nodes.contact, "visible"));
    assert_eq!(sim.page().pending_reveals(), 1);

    // Never re-hidden.
    sim.scroll_to(0.0);
    assert!(sim.document().has_class(nodes.projects, "visible"));
    assert!(sim.document().has_class(nodes.about, "visible"));
}

// ── Active section highlighting ────────────────────────────────────────

#[test]
fn single_section_highlight_scenario() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let link = doc.element(body, "a", &["nav-link"]);
    doc.set_attribute(link, "href", "#about");
    fixture::section(&mut doc, body, "about", &[], 300.0, 400.0);

    let mut sim = PageSimulator::boot(SimHost::new(doc, 1024.0, 800.0), PageConfig::default());
    assert!(!is_active(&sim, link));

    sim.scroll_to(250.0);
    assert!(is_active(&sim, link));

    sim.scroll_to(750.0);
    assert!(!is_active(&sim, link));
}

#[test]
fn highlight_runs_eagerly_at_boot() {
    let (sim, nodes) = boot();
    assert!(is_active(&sim, nodes.link("home")));
    assert!(!is_active(&sim, nodes.link("about")));
}

#[test]
fn highlight_follows_scroll_through_sections() {
    let (mut sim, nodes) = boot();

    sim.scroll_to(700.0);
    assert!(!is_active(&sim, nodes.link("home")));
    assert!(is_active(&sim, nodes.link("about")));

    sim.scroll_to(1750.0);
    assert!(!is_active(&sim, nodes.link("about")));
    assert!(is_active(&sim, nodes.link("contact")));
    assert!(!is_active(&sim, nodes.link("projects")));
}

#[test]
fn section_without_nav_link_is_skipped() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    fixture::section(&mut doc, body, "orphan", &[], 0.0, 400.0);
    let mut sim = PageSimulator::boot(SimHost::new(doc, 1024.0, 800.0), PageConfig::default());
    sim.scroll_to(10.0);
}

// ── Typing animation ───────────────────────────────────────────────────

#[test]
fn hero_title_types_out_character_by_character() {
    let (mut sim, nodes) = boot();
    let title = nodes.hero_title;

    assert_eq!(sim.document().text(title), "");
    assert_eq!(sim.document().style(title, "opacity"), Some("1"));

    sim.advance(Duration::from_millis(499));
    assert_eq!(sim.document().text(title), "");

    sim.advance(Duration::from_millis(1));
    assert_eq!(sim.document().text(title), "H");

    sim.advance(Duration::from_millis(400));
    assert_eq!(sim.document().text(title), "Hello");

    sim.advance(Duration::from_millis(700));
    assert_eq!(sim.now(), Duration::from_millis(500 + 100 * 11));
    assert_eq!(sim.document().text(title), HERO_TITLE);

    sim.advance(Duration::from_secs(10));
    assert_eq!(sim.document().text(title), HERO_TITLE);
    assert!(sim.page().typing().is_some_and(|t| t.is_finished()));
}

#[test]
fn typing_takes_one_timer_per_character() {
    let (mut sim, _) = boot();
    let fired = sim.advance(Duration::from_millis(500 + 100 * 11));
    assert_eq!(fired, HERO_TITLE.chars().count());
    assert_eq!(sim.host().pending_timers(), 0);
}

#[test]
fn narrow_viewport_skips_typing() {
    let (mut host, nodes) = fixture::portfolio();
    host.set_viewport(768.0, 900.0);
    let mut sim = PageSimulator::boot(host, PageConfig::default());

    assert!(sim.page().typing().is_none());
    assert_eq!(sim.document().text(nodes.hero_title), HERO_TITLE);
    assert_eq!(sim.document().style(nodes.hero_title, "opacity"), None);
    sim.advance(Duration::from_secs(2));
    assert_eq!(sim.document().text(nodes.hero_title), HERO_TITLE);
}

// ── Missing hooks ──────────────────────────────────────────────────────

#[test]
fn empty_document_boots_and_ignores_events() {
    let doc = MemoryDocument::new();
    let body = doc.body();
    let mut sim = PageSimulator::boot(SimHost::new(doc, 1024.0, 800.0), PageConfig::default());

    assert_eq!(sim.page().menu_open(), None);
    // navbar scroll, highlight scroll, debounced resize
    assert_eq!(sim.host().listener_count(), 3);

    sim.click(body);
    sim.scroll_to(300.0);
    sim.resize(500.0, 500.0);
    sim.advance(Duration::from_secs(1));
    assert_eq!(sim.page().last_scroll(), 300.0);
}

#[test]
fn missing_toggle_attaches_no_menu_listeners() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let menu = doc.element(body, "ul", &["nav-menu"]);
    let link = doc.element(menu, "a", &["nav-link"]);
    doc.set_attribute(link, "href", "https://example.com");
    doc.add_class(menu, "active");
    let mut sim = PageSimulator::boot(SimHost::new(doc, 1024.0, 800.0), PageConfig::default());

    let outcome = sim.click(link);
    assert_eq!(outcome.listeners_run, 0);
    assert!(sim.document().has_class(menu, "active"));
    assert_eq!(sim.page().menu_open(), None);
}

#[test]
fn boot_listener_inventory() {
    let (sim, _) = boot();
    // toggle + 4 links + document, navbar, 6 anchors, parallax, highlight, resize
    assert_eq!(sim.host().listener_count(), 16);
    assert_eq!(sim.page().listeners().len(), 16);
    assert_eq!(sim.page().pending_reveals(), 6);
}
