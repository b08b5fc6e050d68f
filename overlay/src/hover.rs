//! Hover-overlay manager.
//!
//! Owns the one transient overlay anchored to a hovered image. Pointer-over
//! events from anywhere in the document are debounced; when the window
//! closes, the *latest* target decides what happens:
//!
//! - an image that is not the current anchor gets a fresh overlay (the old
//!   one is torn down first),
//! - anything inside the overlay (or the current anchor itself) cancels a
//!   pending removal,
//! - anything else starts the removal delay.
//!
//! While a save session is running, removal and re-anchoring are suppressed
//! so the in-flight UI stays put.

#[cfg(test)]
#[path = "hover_test.rs"]
mod hover_test;

use crate::clock::{Debouncer, Delay, Millis, earliest};
use crate::consts::{HOVER_DEBOUNCE_MS, REMOVAL_DELAY_MS};
use crate::geometry::{Position, Rect, Viewport, overlay_position};

/// How the host classifies a pointer target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Inside a mounted overlay surface (including the overlay's own icon).
    Overlay,
    /// An image element on the page.
    Image,
    /// Anything else.
    Other,
}

/// The page, as seen by the manager.
pub trait OverlayHost {
    /// A page element (pointer target or anchor image).
    type Element: Clone + PartialEq;
    /// A mounted overlay surface.
    type Surface: Clone + PartialEq;

    fn classify(&self, target: &Self::Element) -> TargetKind;

    /// Current viewport-relative bounding box of `image`.
    fn bounding_rect(&self, image: &Self::Element) -> Rect;

    fn viewport(&self) -> Viewport;

    /// Build an overlay for `image` and append it to the document body at
    /// `at`. `None` if the surface could not be assembled.
    fn mount(&mut self, image: &Self::Element, at: Position) -> Option<Self::Surface>;

    /// Detach `surface` from the document.
    fn unmount(&mut self, surface: &Self::Surface);

    /// Set or clear the marker that tags `image` as the current anchor.
    fn mark_anchor(&mut self, image: &Self::Element, tracked: bool);
}

/// The live overlay and the image it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveOverlay<E, S> {
    pub anchor: E,
    pub surface: S,
    pub position: Position,
}

pub struct HoverManager<H: OverlayHost> {
    host: H,
    active: Option<ActiveOverlay<H::Element, H::Surface>>,
    hover: Debouncer<H::Element>,
    removal: Delay,
    removal_delay: Millis,
    suppressed: bool,
}

impl<H: OverlayHost> HoverManager<H> {
    pub fn new(host: H) -> Self {
        Self::with_delays(host, HOVER_DEBOUNCE_MS, REMOVAL_DELAY_MS)
    }

    pub fn with_delays(host: H, hover_debounce: Millis, removal_delay: Millis) -> Self {
        Self {
            host,
            active: None,
            hover: Debouncer::new(hover_debounce),
            removal: Delay::default(),
            removal_delay,
            suppressed: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn active(&self) -> Option<&ActiveOverlay<H::Element, H::Surface>> {
        self.active.as_ref()
    }

    pub fn is_removal_pending(&self) -> bool {
        self.removal.is_pending()
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    // --- Events ---

    /// Record a pointer-over target; acted on when the debounce window closes.
    pub fn on_pointer_over(&mut self, now: Millis, target: H::Element) {
        self.hover.push(now, target);
    }

    /// The pointer left the document: drop any pending hover and remove the
    /// overlay right away, unless a save session holds it.
    pub fn on_pointer_leave(&mut self) {
        self.hover.cancel();
        if self.suppressed {
            return;
        }
        self.teardown();
    }

    /// Run everything due at `now`, in deadline order.
    pub fn tick(&mut self, now: Millis) {
        loop {
            let hover_at = self.hover.deadline().filter(|at| *at <= now);
            let removal_at = self.removal.deadline().filter(|at| *at <= now);
            match (hover_at, removal_at) {
                (Some(h), Some(r)) if r < h => self.fire_removal(r),
                (Some(h), _) => {
                    if let Some(target) = self.hover.fire(h) {
                        self.resolve(h, &target);
                    }
                }
                (None, Some(r)) => self.fire_removal(r),
                (None, None) => break,
            }
        }
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        earliest([self.hover.deadline(), self.removal.deadline()])
    }

    // --- Session coupling ---

    /// Hold the overlay in place while a save session shows feedback.
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
        if suppressed {
            self.removal.cancel();
        }
    }

    /// Remove the overlay now, whatever state it is in.
    pub fn teardown(&mut self) {
        self.removal.cancel();
        if let Some(active) = self.active.take() {
            self.host.unmount(&active.surface);
            self.host.mark_anchor(&active.anchor, false);
        }
    }

    /// Remove the overlay only if it is still `surface`.
    pub fn teardown_surface(&mut self, surface: &H::Surface) -> bool {
        if self.active.as_ref().is_some_and(|a| &a.surface == surface) {
            self.teardown();
            return true;
        }
        false
    }

    // --- Internals ---

    fn resolve(&mut self, now: Millis, target: &H::Element) {
        match self.host.classify(target) {
            TargetKind::Overlay => self.removal.cancel(),
            TargetKind::Image if self.is_anchor(target) => self.removal.cancel(),
            TargetKind::Image if self.suppressed => {
                log::debug!("save in progress; ignoring hover on another image");
            }
            TargetKind::Image => self.show(target),
            TargetKind::Other => self.start_removal(now),
        }
    }

    fn fire_removal(&mut self, at: Millis) {
        if self.removal.fire(at) {
            log::debug!("hover removal delay elapsed");
            self.teardown();
        }
    }

    fn is_anchor(&self, target: &H::Element) -> bool {
        self.active.as_ref().is_some_and(|a| &a.anchor == target)
    }

    fn start_removal(&mut self, now: Millis) {
        if self.suppressed || self.active.is_none() {
            return;
        }
        self.removal.start(now, self.removal_delay);
    }

    fn show(&mut self, image: &H::Element) {
        self.teardown();
        let position = overlay_position(self.host.bounding_rect(image), self.host.viewport());
        let Some(surface) = self.host.mount(image, position) else {
            log::error!("overlay surface could not be assembled");
            return;
        };
        self.host.mark_anchor(image, true);
        self.active = Some(ActiveOverlay { anchor: image.clone(), surface, position });
    }
}
