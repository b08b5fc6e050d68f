//! Placement math for the overlay and the board selector.
//!
//! All inputs are CSS pixels. Client rects are viewport-relative, overlay
//! positions are document-relative (they become `style.left/top` on an
//! absolutely positioned child of `<body>`).

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::consts::{
    BUTTON_WIDTH_ESTIMATE_PX, DIALOG_PADDING_PX, DIALOG_SHIFT_MARGIN_PX, DIALOG_WIDTH_ESTIMATE_PX,
    OVERLAY_TOP_INSET_PX,
};

/// A viewport-relative bounding box, as from `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }
}

/// Scroll offsets and width of the visible area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub inner_width: f64,
}

/// Document-relative top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

/// Overlay anchor: the image's top-right corner, pulled in by the button
/// width, in document coordinates, clamped to non-negative values.
#[must_use]
pub fn overlay_position(image: Rect, viewport: Viewport) -> Position {
    let top = viewport.scroll_y + image.top + OVERLAY_TOP_INSET_PX;
    let left = viewport.scroll_x + image.right - BUTTON_WIDTH_ESTIMATE_PX;
    Position { left: left.max(0.0), top: top.max(0.0) }
}

/// Document-relative left edge the overlay should move to so the opened
/// selector fits, or `None` if it already fits.
#[must_use]
pub fn dialog_shift(overlay: Rect, viewport: Viewport) -> Option<f64> {
    if overlay.left + DIALOG_WIDTH_ESTIMATE_PX + DIALOG_PADDING_PX <= viewport.inner_width {
        return None;
    }
    let left = viewport.inner_width - DIALOG_WIDTH_ESTIMATE_PX - DIALOG_PADDING_PX - DIALOG_SHIFT_MARGIN_PX;
    Some((viewport.scroll_x + left).max(0.0))
}
