#![forbid(unsafe_code)]

//! `folio-core` is the host-agnostic page controller for the folio portfolio
//! site.
//!
//! Design goals:
//! - **Host-driven**: the embedding environment (browser or simulator) pushes
//!   clicks, scrolls, timer expiries, frames and intersection entries.
//! - **No owned DOM**: all document access goes through the [`host`] traits,
//!   and every lookup is optional.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! `folio-web` wraps this crate for the browser; `folio-sim` provides a
//! deterministic in-memory host for tests.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod effects;
pub mod frame_gate;
pub mod greeting;
pub mod host;
pub mod listeners;
pub mod project;
pub mod selector;
pub mod typing;

pub use config::{ConfigError, DocumentHooks, PageConfig, ScrollMode, TypingConfig};
pub use controller::{ACTIVE_CLASS, PageController, SCROLLED_CLASS, VISIBLE_CLASS};
pub use host::{
    Console, DispatchOutcome, Dom, DomEvent, EventKind, EventSource, FrameId, Host,
    IntersectionEntry, ListenerId, Listeners, Observer, ObserverOptions, RootMargin,
    ScrollBehavior, StyleProperty, TimerId, Timers, Viewport,
};
pub use project::{PROJECTS, Project};
pub use selector::Selector;
