//! Top-level owner of the overlay context.
//!
//! One [`OverlayController`] per page holds the hover manager (and through
//! it the single live overlay), the board selector nested in that overlay,
//! and whether a save session currently holds the overlay in place. Page
//! glue forwards DOM events here and arms one host timer for
//! [`OverlayController::next_deadline`].

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use boards::board::Board;

use crate::clock::{Millis, earliest};
use crate::consts::BUTTON_WIDTH_ESTIMATE_PX;
use crate::dialog::{BoardSelector, DialogError, ListKind, Resolution, SearchRequest};
use crate::geometry::Rect;
use crate::hover::{ActiveOverlay, HoverManager, OverlayHost, TargetKind};

pub struct OverlayController<H: OverlayHost> {
    hover: HoverManager<H>,
    selector: BoardSelector,
    session_active: bool,
}

impl<H: OverlayHost> OverlayController<H> {
    pub fn new(host: H) -> Self {
        Self::from_parts(HoverManager::new(host), BoardSelector::new())
    }

    pub fn from_parts(hover: HoverManager<H>, selector: BoardSelector) -> Self {
        Self { hover, selector, session_active: false }
    }

    pub fn host(&self) -> &H {
        self.hover.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.hover.host_mut()
    }

    pub fn active(&self) -> Option<&ActiveOverlay<H::Element, H::Surface>> {
        self.hover.active()
    }

    pub fn selector(&self) -> &BoardSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut BoardSelector {
        &mut self.selector
    }

    #[must_use]
    pub fn is_session_active(&self) -> bool {
        self.session_active
    }

    // --- Pointer events ---

    pub fn on_pointer_over(&mut self, now: Millis, target: H::Element) {
        self.hover.on_pointer_over(now, target);
    }

    pub fn on_pointer_leave(&mut self) {
        self.hover.on_pointer_leave();
    }

    /// Document pointer-down in the capture phase.
    pub fn on_pointer_down(&mut self, target: &H::Element) -> Option<Resolution> {
        let inside = self.host().classify(target) == TargetKind::Overlay;
        self.selector.on_pointer_down(inside)
    }

    // --- Time ---

    /// Run every timer due at `now`. Returns a search to send, if the
    /// selector's debounce fired.
    pub fn tick(&mut self, now: Millis) -> Option<SearchRequest> {
        self.hover.tick(now);
        self.selector.tick(now)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        earliest([self.hover.next_deadline(), self.selector.next_deadline()])
    }

    // --- Save sessions ---

    pub fn set_session_active(&mut self, active: bool) {
        self.session_active = active;
        self.hover.set_suppressed(active);
    }

    /// Open the selector over the live overlay. Returns the left position
    /// the overlay must move to, if the selector would overflow.
    ///
    /// # Errors
    ///
    /// [`DialogError::NoOverlay`] without a live overlay,
    /// [`DialogError::AlreadyOpen`] while a presentation is pending.
    pub fn open_selector(&mut self, recents: Vec<Board>) -> Result<Option<f64>, DialogError> {
        let position = self.hover.active().map(|a| a.position).ok_or(DialogError::NoOverlay)?;
        let viewport = self.hover.host().viewport();
        let left = position.left - viewport.scroll_x;
        let top = position.top - viewport.scroll_y;
        let rect = Rect::new(left, top, left + BUTTON_WIDTH_ESTIMATE_PX, top);
        self.selector.present(recents, position.left, rect, viewport)
    }

    pub fn choose(&mut self, list: ListKind, index: usize) -> Option<Resolution> {
        self.selector.choose(list, index)
    }

    pub fn cancel_selector(&mut self) -> Option<Resolution> {
        self.selector.cancel()
    }

    /// Remove the overlay if it is still `surface`, closing any open
    /// selector with it.
    pub fn teardown_surface(&mut self, surface: &H::Surface) -> bool {
        if !self.hover.active().is_some_and(|a| &a.surface == surface) {
            return false;
        }
        if self.selector.dismiss().is_some() {
            log::debug!("selector closed with its overlay");
        }
        self.hover.teardown_surface(surface)
    }
}
