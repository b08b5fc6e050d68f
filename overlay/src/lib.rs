//! Hover overlay, board selector, and save orchestration for the extension.
//!
//! Everything here is sans-IO: time arrives as explicit millisecond
//! timestamps, the page is reached through the [`hover::OverlayHost`] trait,
//! and the save workflow talks to the page through
//! [`orchestrator::SaveSurface`]. The `extension` crate wires these to the
//! real DOM and timers; tests drive them with a [`clock::ManualClock`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`clock`] | Virtual clock, one-shot delays, and the debouncer |
//! | [`consts`] | Timing and layout constants |
//! | [`geometry`] | Overlay and dialog placement math |
//! | [`hover`] | Hover-overlay manager (at most one overlay) |
//! | [`dialog`] | Board-selector state machine |
//! | [`feedback`] | Save-control feedback states and glyphs |
//! | [`orchestrator`] | Save session state machine |
//! | [`controller`] | Top-level owner of the overlay context |

pub mod clock;
pub mod consts;
pub mod controller;
pub mod dialog;
pub mod feedback;
pub mod geometry;
pub mod hover;
pub mod orchestrator;

#[cfg(test)]
pub(crate) mod test_helpers;
