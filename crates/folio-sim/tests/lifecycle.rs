//! Scroll scheduling modes, debounced resize, teardown, greeting and logging.

use std::time::Duration;

use folio_core::effects::translate_y;
use folio_core::greeting::GREETING;
use folio_core::{PageConfig, ScrollMode};
use folio_sim::fixture::{self, HERO_TITLE, PortfolioNodes};
use folio_sim::{MemoryDocument, PageSimulator, SimHost};
use tracing_test::traced_test;

fn boot_with(config: PageConfig) -> (PageSimulator, PortfolioNodes) {
    let (host, nodes) = fixture::portfolio();
    (PageSimulator::boot(host, config), nodes)
}

fn per_frame() -> PageConfig {
    PageConfig {
        scroll_mode: ScrollMode::PerFrame,
        ..PageConfig::default()
    }
}

#[test]
fn per_frame_mode_coalesces_scroll_bursts() {
    let (mut sim, nodes) = boot_with(per_frame());
    // toggle + 4 links + document, frame request, 6 anchors, resize
    assert_eq!(sim.host().listener_count(), 14);

    sim.scroll_to(300.0);
    sim.scroll_to(310.0);
    sim.scroll_to(320.0);
    assert_eq!(sim.host().pending_frames(), 1);
    assert!(sim.page().frame_gate().is_pending());
    assert_eq!(sim.page().frame_gate().dropped(), 2);
    assert!(!sim.document().has_class(nodes.navbar, "scrolled"));

    assert_eq!(sim.run_frame(), 1);
    assert!(sim.document().has_class(nodes.navbar, "scrolled"));
    assert_eq!(
        sim.document().style(nodes.hero, "transform"),
        Some(translate_y(320.0 * 0.3).as_str())
    );
    assert!(sim.document().has_class(nodes.link("home"), "active"));
    assert!(!sim.page().frame_gate().is_pending());

    sim.scroll_to(700.0);
    assert_eq!(sim.host().pending_frames(), 1);
    sim.run_frame();
    assert!(sim.document().has_class(nodes.link("about"), "active"));
    assert!(!sim.document().has_class(nodes.link("home"), "active"));
}

#[test]
fn no_frame_without_scroll() {
    let (mut sim, _) = boot_with(per_frame());
    assert_eq!(sim.run_frame(), 0);
}

#[test]
fn resize_rehighlights_after_quiet_window() {
    let (mut sim, nodes) = boot_with(PageConfig::default());
    // Layout moved under us without a scroll event.
    sim.page_mut().host_mut().set_scroll_y(650.0);

    sim.resize(900.0, 800.0);
    sim.advance(Duration::from_millis(100));
    sim.resize(880.0, 760.0);
    assert_eq!(sim.host().inner_height(), 760.0);
    sim.advance(Duration::from_millis(100));
    assert!(!sim.document().has_class(nodes.link("about"), "active"));

    sim.advance(Duration::from_millis(50));
    assert!(sim.document().has_class(nodes.link("about"), "active"));
    assert!(!sim.document().has_class(nodes.link("home"), "active"));
}

#[test]
fn resize_listener_can_be_disabled() {
    let config = PageConfig {
        resize_debounce_ms: None,
        ..PageConfig::default()
    };
    let (sim, _) = boot_with(config);
    assert_eq!(sim.host().listener_count(), 15);
}

#[test]
fn teardown_detaches_everything_but_typing() {
    let (mut sim, nodes) = boot_with(PageConfig::default());
    sim.page_mut().teardown();

    assert_eq!(sim.host().listener_count(), 0);
    assert!(sim.page().listeners().is_empty());
    assert_eq!(sim.page().pending_reveals(), 0);
    assert!(!sim.host().is_observed(nodes.about));

    sim.click(nodes.toggle);
    assert_eq!(sim.page().menu_open(), Some(false));
    sim.scroll_to(500.0);
    assert!(!sim.document().has_class(nodes.navbar, "scrolled"));
    assert!(!sim.document().has_class(nodes.about, "visible"));

    sim.advance(Duration::from_secs(2));
    assert_eq!(sim.document().text(nodes.hero_title), HERO_TITLE);
}

#[test]
fn teardown_drops_frame_already_in_flight() {
    let (mut sim, nodes) = boot_with(per_frame());
    sim.scroll_to(50.0);
    assert!(sim.page().frame_gate().is_pending());

    sim.page_mut().teardown();
    assert!(!sim.page().frame_gate().is_pending());

    sim.page_mut().host_mut().set_scroll_y(700.0);
    assert_eq!(sim.run_frame(), 1);
    assert!(!sim.document().has_class(nodes.navbar, "scrolled"));
    assert!(!sim.document().has_class(nodes.link("about"), "active"));
    assert!(sim.document().has_class(nodes.link("home"), "active"));
    assert_eq!(sim.document().style(nodes.hero, "transform"), None);
}

#[test]
fn greeting_is_printed_once_at_boot() {
    let (sim, _) = boot_with(PageConfig::default());
    let lines = sim.host().console();
    assert_eq!(lines.len(), GREETING.len());
    for (line, (text, style)) in lines.iter().zip(GREETING) {
        assert_eq!(line.text, text);
        assert_eq!(line.style, style);
    }
    assert!(lines[0].text.contains("Hey there!"));
}

#[test]
fn greeting_can_be_silenced() {
    let config = PageConfig {
        greeting: false,
        ..PageConfig::default()
    };
    let (sim, _) = boot_with(config);
    assert!(sim.host().console().is_empty());
}

#[test]
fn reveal_observer_uses_configured_options() {
    let (sim, _) = boot_with(PageConfig::default());
    let options = sim.host().observer_options().expect("observer created");
    assert_eq!(options.threshold, 0.1);
    assert_eq!(options.root_margin.to_css(), "0px 0px -50px 0px");
}

#[test]
fn json_config_drives_thresholds() {
    let config = PageConfig::from_json(r#"{ "navbar_threshold": 10, "anchor_offset": 0 }"#)
        .expect("valid config");
    let (mut sim, nodes) = boot_with(config);

    sim.scroll_to(11.0);
    assert!(sim.document().has_class(nodes.navbar, "scrolled"));

    sim.click(nodes.link("projects"));
    assert_eq!(sim.host().scroll_requests()[0].top, 1100.0);
}

#[test]
#[traced_test]
fn boot_is_logged() {
    let _ = boot_with(PageConfig::default());
    assert!(logs_contain("page controller booted"));
    assert!(logs_contain("mobile menu wired"));
}

#[test]
#[traced_test]
fn missing_hooks_are_logged_not_raised() {
    let doc = MemoryDocument::new();
    let _ = PageSimulator::boot(SimHost::new(doc, 1024.0, 800.0), PageConfig::default());
    assert!(logs_contain("mobile menu disabled"));
    assert!(logs_contain("parallax disabled"));
    assert!(logs_contain("cards not rendered"));
}
