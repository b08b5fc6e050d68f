//! Hand-written fakes shared by this crate's unit tests.

use std::collections::{HashMap, HashSet};

use crate::geometry::{Position, Rect, Viewport};
use crate::hover::{OverlayHost, TargetKind};

// =============================================================
// FakeHost
// =============================================================

pub(crate) const IMG_1: u32 = 1;
pub(crate) const IMG_2: u32 = 2;
pub(crate) const TEXT: u32 = 10;
pub(crate) const OVERLAY_BUTTON: u32 = 20;
pub(crate) const OVERLAY_LOGO: u32 = 21;

#[derive(Default)]
pub(crate) struct FakeHost {
    pub(crate) kinds: HashMap<u32, TargetKind>,
    pub(crate) rects: HashMap<u32, Rect>,
    pub(crate) viewport: Viewport,
    pub(crate) mounted: Vec<u32>,
    pub(crate) marked: HashSet<u32>,
    pub(crate) next_surface: u32,
    pub(crate) mounts: usize,
    pub(crate) refuse_mount: bool,
}

impl FakeHost {
    pub(crate) fn page() -> Self {
        let mut host = Self { viewport: Viewport { scroll_x: 0.0, scroll_y: 100.0, inner_width: 1280.0 }, ..Self::default() };
        host.kinds.insert(IMG_1, TargetKind::Image);
        host.kinds.insert(IMG_2, TargetKind::Image);
        host.kinds.insert(TEXT, TargetKind::Other);
        host.kinds.insert(OVERLAY_BUTTON, TargetKind::Overlay);
        host.kinds.insert(OVERLAY_LOGO, TargetKind::Overlay);
        host.rects.insert(IMG_1, Rect::new(10.0, 20.0, 210.0, 220.0));
        host.rects.insert(IMG_2, Rect::new(300.0, 20.0, 600.0, 220.0));
        host
    }
}

impl OverlayHost for FakeHost {
    type Element = u32;
    type Surface = u32;

    fn classify(&self, target: &u32) -> TargetKind {
        self.kinds.get(target).copied().unwrap_or(TargetKind::Other)
    }

    fn bounding_rect(&self, image: &u32) -> Rect {
        self.rects.get(image).copied().unwrap_or_default()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn mount(&mut self, _image: &u32, _at: Position) -> Option<u32> {
        if self.refuse_mount {
            return None;
        }
        self.next_surface += 1;
        self.mounts += 1;
        self.mounted.push(100 + self.next_surface);
        Some(100 + self.next_surface)
    }

    fn unmount(&mut self, surface: &u32) {
        self.mounted.retain(|s| s != surface);
    }

    fn mark_anchor(&mut self, image: &u32, tracked: bool) {
        if tracked {
            self.marked.insert(*image);
        } else {
            self.marked.remove(image);
        }
    }
}
