#![forbid(unsafe_code)]

//! Page controller configuration.
//!
//! Every field has a default matching the shipped page, so
//! `PageConfig::default()` reproduces the stock behavior and a JSON config
//! only needs to name what it overrides.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::host::ObserverOptions;
use crate::selector::Selector;

/// How scroll-driven effects are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    /// One listener per effect, run on every scroll notification.
    #[default]
    Direct,
    /// A single listener requests an animation frame through the frame gate;
    /// all scroll effects run once inside that frame.
    PerFrame,
}

/// Typing animation timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// The animation only runs when the viewport is strictly wider than this.
    pub min_viewport_width: f64,
    pub start_delay_ms: u64,
    pub step_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: 768.0,
            start_delay_ms: 500,
            step_ms: 100,
        }
    }
}

impl TypingConfig {
    #[must_use]
    pub const fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    #[must_use]
    pub const fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }
}

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Navbar gets `scrolled` when the offset is strictly above this.
    pub navbar_threshold: f64,
    /// Clearance left above an anchor target for the fixed navbar.
    pub anchor_offset: f64,
    /// Hero translation per scrolled pixel.
    pub parallax_rate: f64,
    /// Sections count as current this many pixels before their top.
    pub section_offset: f64,
    /// Animation delay step between consecutive project cards, in seconds.
    pub stagger_step_secs: f64,
    pub reveal: ObserverOptions,
    pub typing: TypingConfig,
    pub scroll_mode: ScrollMode,
    /// Quiescence window for resize-triggered re-highlighting. `None`
    /// disables the resize listener.
    pub resize_debounce_ms: Option<u64>,
    /// Print the console greeting at boot.
    pub greeting: bool,
    pub hooks: DocumentHooks,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            navbar_threshold: 100.0,
            anchor_offset: 80.0,
            parallax_rate: 0.3,
            section_offset: 100.0,
            stagger_step_secs: 0.1,
            reveal: ObserverOptions::default(),
            typing: TypingConfig::default(),
            scroll_mode: ScrollMode::Direct,
            resize_debounce_ms: Some(150),
            greeting: true,
            hooks: DocumentHooks::default(),
        }
    }
}

impl PageConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    ///
    /// The top level must be an object; positional (array) configs are
    /// rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        if !value.is_object() {
            return Err(ConfigError::NotAnObject);
        }
        serde_json::from_value(value).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    #[must_use]
    pub fn resize_debounce(&self) -> Option<Duration> {
        self.resize_debounce_ms.map(Duration::from_millis)
    }
}

/// Class names of the page's structural hooks.
///
/// The controller derives every selector it uses from these, so a page with
/// different markup only needs to rename them here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentHooks {
    pub nav_toggle: String,
    pub nav_menu: String,
    pub nav_link: String,
    pub navbar: String,
    pub hero: String,
    pub hero_title: String,
    pub hero_title_text: String,
    pub fade_in: String,
    pub project_list: String,
    pub section_tag: String,
}

impl Default for DocumentHooks {
    fn default() -> Self {
        Self {
            nav_toggle: "nav-toggle".into(),
            nav_menu: "nav-menu".into(),
            nav_link: "nav-link".into(),
            navbar: "navbar".into(),
            hero: "hero".into(),
            hero_title: "hero-title".into(),
            hero_title_text: "gradient-text".into(),
            fade_in: "fade-in".into(),
            project_list: "project-list".into(),
            section_tag: "section".into(),
        }
    }
}

impl DocumentHooks {
    #[must_use]
    pub fn nav_toggle(&self) -> Selector {
        Selector::class(&self.nav_toggle)
    }

    #[must_use]
    pub fn nav_menu(&self) -> Selector {
        Selector::class(&self.nav_menu)
    }

    #[must_use]
    pub fn nav_links(&self) -> Selector {
        Selector::class(&self.nav_link)
    }

    /// The nav link pointing at `#section_id`.
    #[must_use]
    pub fn nav_link_for(&self, section_id: &str) -> Selector {
        Selector::class_with_attr(&self.nav_link, "href", &format!("#{section_id}"))
    }

    #[must_use]
    pub fn navbar(&self) -> Selector {
        Selector::class(&self.navbar)
    }

    #[must_use]
    pub fn hero(&self) -> Selector {
        Selector::class(&self.hero)
    }

    #[must_use]
    pub fn hero_title(&self) -> Selector {
        Selector::descendant(
            Selector::class(&self.hero_title),
            Selector::class(&self.hero_title_text),
        )
    }

    #[must_use]
    pub fn fade_in(&self) -> Selector {
        Selector::class(&self.fade_in)
    }

    #[must_use]
    pub fn project_list(&self) -> Selector {
        Selector::class(&self.project_list)
    }

    /// Sections carrying an `id`.
    #[must_use]
    pub fn sections(&self) -> Selector {
        Selector::tag_with_attr(&self.section_tag, "id")
    }

    /// Anchors whose `href` starts with `#`.
    #[must_use]
    pub fn in_page_anchors(&self) -> Selector {
        Selector::attr_prefix("a", "href", "#")
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON could not be parsed into a [`PageConfig`].
    Parse(String),
    /// The top-level JSON value is not an object.
    NotAnObject,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid page config: {msg}"),
            Self::NotAnObject => write!(f, "invalid page config: expected a JSON object"),
        }
    }
}

impl std::error::Error for ConfigError {}
