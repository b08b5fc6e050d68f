#![allow(clippy::float_cmp)]

use super::*;
use crate::clock::{Clock, ManualClock};
use crate::test_helpers::{FakeHost, IMG_1, IMG_2, OVERLAY_BUTTON, OVERLAY_LOGO, TEXT};

struct Harness {
    clock: ManualClock,
    manager: HoverManager<FakeHost>,
}

impl Harness {
    fn new() -> Self {
        Self { clock: ManualClock::new(0), manager: HoverManager::new(FakeHost::page()) }
    }

    /// Removal slower than the hover debounce, so a later hover can still
    /// catch a pending removal.
    fn with_slow_removal() -> Self {
        Self { clock: ManualClock::new(0), manager: HoverManager::with_delays(FakeHost::page(), HOVER_DEBOUNCE_MS, 100) }
    }

    /// Pointer over `target`, then let the debounce window close.
    fn hover(&mut self, target: u32) {
        self.manager.on_pointer_over(self.clock.now(), target);
        self.wait(HOVER_DEBOUNCE_MS);
    }

    fn wait(&mut self, ms: Millis) {
        let now = self.clock.advance(ms);
        self.manager.tick(now);
    }

    fn anchor(&self) -> Option<u32> {
        self.manager.active().map(|a| a.anchor)
    }

    fn surface(&self) -> Option<u32> {
        self.manager.active().map(|a| a.surface)
    }

    fn host(&self) -> &FakeHost {
        self.manager.host()
    }
}

// =============================================================
// Creation and placement
// =============================================================

#[test]
fn hovering_image_mounts_overlay_at_top_right() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    assert_eq!(h.anchor(), Some(IMG_1));
    assert_eq!(h.host().mounted.len(), 1);
    assert!(h.host().marked.contains(&IMG_1));
    let pos = h.manager.active().map(|a| a.position).unwrap();
    assert_eq!(pos, Position { left: 170.0, top: 125.0 });
}

#[test]
fn nothing_happens_before_debounce_window_closes() {
    let mut h = Harness::new();
    h.manager.on_pointer_over(0, IMG_1);
    h.wait(HOVER_DEBOUNCE_MS - 1);
    assert!(h.anchor().is_none());
    h.wait(1);
    assert_eq!(h.anchor(), Some(IMG_1));
}

#[test]
fn debounce_acts_on_latest_target_only() {
    let mut h = Harness::new();
    h.manager.on_pointer_over(0, IMG_1);
    h.wait(10);
    h.manager.on_pointer_over(h.clock.now(), TEXT);
    h.wait(10);
    h.manager.on_pointer_over(h.clock.now(), IMG_2);
    h.wait(HOVER_DEBOUNCE_MS);
    assert_eq!(h.anchor(), Some(IMG_2));
    assert_eq!(h.host().mounts, 1);
}

#[test]
fn failed_mount_leaves_no_overlay_or_marker() {
    let mut h = Harness::new();
    h.manager.host_mut().refuse_mount = true;
    h.hover(IMG_1);
    assert!(h.anchor().is_none());
    assert!(h.host().marked.is_empty());
}

// =============================================================
// Identity and switching
// =============================================================

#[test]
fn rehovering_tracked_image_keeps_same_surface() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    let first = h.surface();
    h.hover(IMG_1);
    h.hover(IMG_1);
    assert_eq!(h.surface(), first);
    assert_eq!(h.host().mounts, 1);
}

#[test]
fn rehovering_tracked_image_cancels_pending_removal() {
    let mut h = Harness::with_slow_removal();
    h.hover(IMG_1);
    h.manager.on_pointer_over(h.clock.now(), TEXT);
    h.wait(HOVER_DEBOUNCE_MS);
    assert!(h.manager.is_removal_pending());
    h.manager.on_pointer_over(h.clock.now(), IMG_1);
    h.wait(HOVER_DEBOUNCE_MS);
    assert!(!h.manager.is_removal_pending());
    assert_eq!(h.anchor(), Some(IMG_1));
    assert_eq!(h.host().mounts, 1);
}

#[test]
fn removal_due_before_rehover_wins() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    h.manager.on_pointer_over(h.clock.now(), TEXT);
    h.wait(HOVER_DEBOUNCE_MS);
    h.manager.on_pointer_over(h.clock.now(), IMG_1);
    // Jump past both deadlines at once; the earlier removal still runs first.
    h.wait(HOVER_DEBOUNCE_MS);
    assert_eq!(h.anchor(), Some(IMG_1));
    assert_eq!(h.host().mounts, 2);
}

#[test]
fn switching_images_replaces_overlay() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    let first = h.surface();
    h.hover(IMG_2);
    assert_eq!(h.anchor(), Some(IMG_2));
    assert_ne!(h.surface(), first);
    assert_eq!(h.host().mounted.len(), 1);
    assert!(!h.host().marked.contains(&IMG_1));
    assert!(h.host().marked.contains(&IMG_2));
}

#[test]
fn at_most_one_overlay_for_any_hover_sequence() {
    let mut h = Harness::new();
    let sequence = [IMG_1, IMG_2, TEXT, IMG_1, OVERLAY_BUTTON, IMG_2, IMG_2, TEXT, TEXT, IMG_1, OVERLAY_LOGO];
    for (i, target) in sequence.iter().cycle().take(200).enumerate() {
        h.manager.on_pointer_over(h.clock.now(), *target);
        // Mix sub-window and full-window gaps.
        h.wait(if i % 3 == 0 { 5 } else { HOVER_DEBOUNCE_MS });
        assert!(h.host().mounted.len() <= 1, "step {i}: {:?}", h.host().mounted);
        assert!(h.host().marked.len() <= 1);
    }
}

// =============================================================
// Removal
// =============================================================

#[test]
fn leaving_to_other_content_removes_after_delay() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    h.hover(TEXT);
    assert!(h.manager.is_removal_pending());
    h.wait(REMOVAL_DELAY_MS);
    assert!(h.anchor().is_none());
    assert!(h.host().mounted.is_empty());
    assert!(h.host().marked.is_empty());
}

#[test]
fn moving_into_overlay_cancels_removal() {
    let mut h = Harness::with_slow_removal();
    h.hover(IMG_1);
    h.manager.on_pointer_over(h.clock.now(), TEXT);
    h.wait(HOVER_DEBOUNCE_MS);
    h.manager.on_pointer_over(h.clock.now(), OVERLAY_LOGO);
    h.wait(HOVER_DEBOUNCE_MS);
    assert!(!h.manager.is_removal_pending());
    h.wait(1_000);
    assert_eq!(h.anchor(), Some(IMG_1));
}

#[test]
fn image_inside_overlay_does_not_spawn_new_overlay() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    h.hover(OVERLAY_LOGO);
    assert_eq!(h.anchor(), Some(IMG_1));
    assert_eq!(h.host().mounts, 1);
}

#[test]
fn other_content_without_overlay_starts_nothing() {
    let mut h = Harness::new();
    h.hover(TEXT);
    assert!(!h.manager.is_removal_pending());
    assert_eq!(h.manager.next_deadline(), None);
}

#[test]
fn pointer_leave_removes_immediately() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    h.manager.on_pointer_over(h.clock.now(), IMG_2);
    h.manager.on_pointer_leave();
    assert!(h.anchor().is_none());
    h.wait(HOVER_DEBOUNCE_MS);
    assert!(h.anchor().is_none(), "pending hover must be dropped on leave");
}

// =============================================================
// Suppression
// =============================================================

#[test]
fn suppression_blocks_removal_timer() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    h.manager.set_suppressed(true);
    h.hover(TEXT);
    h.wait(1_000);
    assert_eq!(h.anchor(), Some(IMG_1));
}

#[test]
fn suppression_cancels_already_pending_removal() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    h.hover(TEXT);
    assert!(h.manager.is_removal_pending());
    h.manager.set_suppressed(true);
    h.wait(REMOVAL_DELAY_MS);
    assert_eq!(h.anchor(), Some(IMG_1));
}

#[test]
fn suppression_blocks_switch_and_pointer_leave() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    h.manager.set_suppressed(true);
    h.hover(IMG_2);
    h.manager.on_pointer_leave();
    assert_eq!(h.anchor(), Some(IMG_1));
    assert_eq!(h.host().mounts, 1);
}

#[test]
fn lifting_suppression_restores_normal_removal() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    h.manager.set_suppressed(true);
    h.manager.set_suppressed(false);
    h.hover(TEXT);
    h.wait(REMOVAL_DELAY_MS);
    assert!(h.anchor().is_none());
}

#[test]
fn teardown_surface_ignores_stale_surface() {
    let mut h = Harness::new();
    h.hover(IMG_1);
    let stale = h.surface().unwrap();
    h.hover(IMG_2);
    assert!(!h.manager.teardown_surface(&stale));
    assert_eq!(h.anchor(), Some(IMG_2));
    let current = h.surface().unwrap();
    assert!(h.manager.teardown_surface(&current));
    assert!(h.anchor().is_none());
}
