#![forbid(unsafe_code)]

//! WASM frontend for folio.
//!
//! Binds the host-driven [`folio_core::PageController`] to a real browser
//! document through `web-sys`. The module boots the controller once the
//! document is interactive; pages that want non-default thresholds call
//! `bootWithConfig(json)` instead (build with `--no-default-features` to
//! drop the automatic start).
//!
//! Native builds compile a stub so `cargo check --workspace` stays green on
//! non-wasm targets.

use core::fmt;

use folio_core::{ConfigError, PageConfig};

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{BrowserHost, boot_with_config, teardown};

/// Errors raised while binding the controller to the browser.
#[derive(Debug, Clone, PartialEq)]
pub enum BootError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// `window.document` is missing.
    NoDocument,
    /// A controller is already bound to this document.
    AlreadyBooted,
    Config(ConfigError),
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::AlreadyBooted => write!(f, "page controller already booted"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BootError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for BootError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Boot state of one document.
///
/// A boot claims the slot synchronously, before any deferral, so a second
/// boot is rejected even while the first waits for `DOMContentLoaded`.
#[derive(Debug, Default)]
pub enum BootSlot<T> {
    #[default]
    Empty,
    /// Claimed; the controller is not built yet.
    Pending,
    Booted(T),
}

impl<T> BootSlot<T> {
    /// Reserve the slot for a boot.
    pub fn claim(&mut self) -> Result<(), BootError> {
        if !matches!(self, Self::Empty) {
            return Err(BootError::AlreadyBooted);
        }
        *self = Self::Pending;
        Ok(())
    }

    pub fn fill(&mut self, page: T) {
        *self = Self::Booted(page);
    }

    /// Give up a pending claim. A booted slot is left alone.
    pub fn release(&mut self) {
        if matches!(self, Self::Pending) {
            *self = Self::Empty;
        }
    }

    #[must_use]
    pub fn booted(&self) -> Option<&T> {
        match self {
            Self::Booted(page) => Some(page),
            Self::Empty | Self::Pending => None,
        }
    }
}

/// Parse the JSON config accepted by `bootWithConfig`. An empty string means
/// defaults.
pub fn parse_config(json: &str) -> Result<PageConfig, BootError> {
    if json.trim().is_empty() {
        return Ok(PageConfig::default());
    }
    Ok(PageConfig::from_json(json)?)
}

/// Native stub: validates the config, then reports that there is no browser.
#[cfg(not(target_arch = "wasm32"))]
pub fn boot_with_config(json: &str) -> Result<(), BootError> {
    parse_config(json)?;
    Err(BootError::NoWindow)
}

/// Native stub: nothing is ever booted.
#[cfg(not(target_arch = "wasm32"))]
pub fn teardown() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn empty_config_means_defaults() {
        assert_eq!(parse_config("").expect("defaults"), PageConfig::default());
        assert_eq!(parse_config("  \n").expect("defaults"), PageConfig::default());
    }

    #[test]
    fn config_errors_surface_through_boot_error() {
        let err = parse_config("{ nope").expect_err("malformed");
        assert!(matches!(err, BootError::Config(_)));
        assert!(err.to_string().starts_with("invalid page config"));
        assert!(err.source().is_some());
    }

    #[test]
    fn boot_error_messages() {
        assert_eq!(BootError::NoWindow.to_string(), "no global window");
        assert_eq!(BootError::NoDocument.to_string(), "window has no document");
        assert!(BootError::AlreadyBooted.source().is_none());
    }

    #[test]
    fn pending_boot_rejects_second_claim() {
        let mut slot = BootSlot::<&str>::default();
        assert_eq!(slot.claim(), Ok(()));
        assert!(matches!(slot, BootSlot::Pending));
        assert_eq!(slot.claim(), Err(BootError::AlreadyBooted));
        assert_eq!(slot.booted(), None);

        slot.fill("page");
        assert_eq!(slot.booted(), Some(&"page"));
        assert_eq!(slot.claim(), Err(BootError::AlreadyBooted));
        slot.release();
        assert_eq!(slot.booted(), Some(&"page"));
    }

    #[test]
    fn released_claim_can_boot_again() {
        let mut slot = BootSlot::<u8>::default();
        slot.claim().expect("first claim");
        slot.release();
        assert!(matches!(slot, BootSlot::Empty));
        assert_eq!(slot.claim(), Ok(()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_stub_never_boots() {
        assert_eq!(boot_with_config("{}"), Err(BootError::NoWindow));
        assert_eq!(boot_with_config(""), Err(BootError::NoWindow));
        assert!(matches!(
            boot_with_config("{ nope"),
            Err(BootError::Config(ConfigError::Parse(_)))
        ));
        assert_eq!(
            boot_with_config("[1]"),
            Err(BootError::Config(ConfigError::NotAnObject))
        );
        assert!(!teardown());
    }
}
