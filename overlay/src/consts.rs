//! Shared timing and layout constants for the overlay crate.

use crate::clock::Millis;

// ── Timing ──────────────────────────────────────────────────────

/// Coalescing window for document-wide pointer-over events.
pub const HOVER_DEBOUNCE_MS: Millis = 30;

/// Grace period before an un-hovered overlay is removed.
pub const REMOVAL_DELAY_MS: Millis = 10;

/// Idle time after the last keystroke before a board search is sent.
pub const SEARCH_DEBOUNCE_MS: Millis = 300;

/// How long the "needs auth" glyph stays up.
pub const TOKEN_MISSING_HOLD_MS: Millis = 1500;

/// How long the success glyph stays up.
pub const SUCCESS_HOLD_MS: Millis = 1000;

/// How long the failure glyph stays up.
pub const ERROR_HOLD_MS: Millis = 1500;

// ── Layout (CSS pixels) ─────────────────────────────────────────

/// Estimated save-button width; the overlay sits this far left of the image's right edge.
pub const BUTTON_WIDTH_ESTIMATE_PX: f64 = 40.0;

/// Gap between the image's top edge and the overlay.
pub const OVERLAY_TOP_INSET_PX: f64 = 5.0;

/// Estimated rendered width of the board selector.
pub const DIALOG_WIDTH_ESTIMATE_PX: f64 = 200.0;

/// Slack kept between the selector and the viewport edge.
pub const DIALOG_PADDING_PX: f64 = 10.0;

/// Extra leftward shift applied when the selector would overflow.
pub const DIALOG_SHIFT_MARGIN_PX: f64 = 50.0;
