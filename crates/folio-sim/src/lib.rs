#![forbid(unsafe_code)]

//! `folio-sim` runs the folio page controller without a browser.
//!
//! - [`MemoryDocument`]: arena-backed element tree with fixed layout boxes.
//! - [`SimHost`]: implements the `folio_core` host traits over it, with a
//!   caller-driven clock.
//! - [`PageSimulator`]: the event loop stand-in used by tests.
//! - [`fixture`]: ready-made pages.

pub mod document;
pub mod fixture;
pub mod host;
pub mod simulator;

pub use document::{MemoryDocument, NodeId};
pub use host::{ConsoleLine, DeterministicClock, ScrollRequest, SimHost};
pub use simulator::{ClickOutcome, PageSimulator};
