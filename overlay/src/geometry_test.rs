#![allow(clippy::float_cmp)]

use super::*;

fn viewport(scroll_x: f64, scroll_y: f64, inner_width: f64) -> Viewport {
    Viewport { scroll_x, scroll_y, inner_width }
}

// =============================================================
// overlay_position
// =============================================================

#[test]
fn overlay_sits_at_top_right_of_image() {
    let pos = overlay_position(Rect::new(100.0, 50.0, 400.0, 250.0), viewport(0.0, 0.0, 1280.0));
    assert_eq!(pos, Position { left: 360.0, top: 55.0 });
}

#[test]
fn overlay_position_adds_scroll_offsets() {
    let pos = overlay_position(Rect::new(100.0, 50.0, 400.0, 250.0), viewport(20.0, 600.0, 1280.0));
    assert_eq!(pos, Position { left: 380.0, top: 655.0 });
}

#[test]
fn overlay_position_clamps_to_zero() {
    let pos = overlay_position(Rect::new(-300.0, -80.0, 10.0, 20.0), viewport(0.0, 0.0, 1280.0));
    assert_eq!(pos, Position { left: 0.0, top: 0.0 });
}

// =============================================================
// dialog_shift
// =============================================================

#[test]
fn dialog_that_fits_is_not_shifted() {
    assert_eq!(dialog_shift(Rect::new(500.0, 0.0, 540.0, 40.0), viewport(0.0, 0.0, 1280.0)), None);
}

#[test]
fn dialog_exactly_fitting_is_not_shifted() {
    assert_eq!(dialog_shift(Rect::new(1070.0, 0.0, 1110.0, 40.0), viewport(0.0, 0.0, 1280.0)), None);
}

#[test]
fn overflowing_dialog_moves_left_with_margin() {
    let shifted = dialog_shift(Rect::new(1200.0, 0.0, 1240.0, 40.0), viewport(0.0, 0.0, 1280.0));
    assert_eq!(shifted, Some(1020.0));
}

#[test]
fn dialog_shift_is_document_relative() {
    let shifted = dialog_shift(Rect::new(1200.0, 0.0, 1240.0, 40.0), viewport(300.0, 0.0, 1280.0));
    assert_eq!(shifted, Some(1320.0));
}

#[test]
fn dialog_shift_never_negative() {
    let shifted = dialog_shift(Rect::new(150.0, 0.0, 190.0, 40.0), viewport(0.0, 0.0, 200.0));
    assert_eq!(shifted, Some(0.0));
}
