//! [`OverlayHost`] over the live page DOM.
//!
//! Each mounted overlay is an absolutely positioned `<div>` appended to
//! `<body>` (not to the image, which may clip it). Its save button fires
//! [`SAVE_EVENT`] on `document`; the click listener is owned here and
//! dropped when the overlay unmounts.

use overlay::geometry::{Position, Rect, Viewport};
use overlay::hover::{OverlayHost, TargetKind};
use overlay::orchestrator::SAVE_EVENT;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Document, Element, Event, HtmlElement, HtmlImageElement, Window};

use crate::chrome;
use crate::markup::{
    ANCHOR_ATTR, LOGO_ASSET, LOGO_CLASS, OVERLAY_CLASS, SAVE_BUTTON_CLASS, class_selector, overlay_skeleton,
    position_style,
};

type Listener = Closure<dyn FnMut(Event)>;

pub struct DomHost {
    window: Window,
    document: Document,
    logo_url: Option<String>,
    listeners: Vec<(HtmlElement, HtmlElement, Listener)>,
}

impl DomHost {
    pub fn new(window: Window, document: Document) -> Self {
        let logo_url = match chrome::asset_url(LOGO_ASSET) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("logo asset unavailable: {}", chrome::describe(&e));
                None
            }
        };
        Self { window, document, logo_url, listeners: Vec::new() }
    }

    fn build(&mut self, image: &Element, at: Position) -> Result<HtmlElement, JsValue> {
        let surface: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        surface.set_class_name(OVERLAY_CLASS);
        surface.set_inner_html(&overlay_skeleton());
        let style = surface.style();
        let (left, top) = position_style(at);
        style.set_property("position", "absolute")?;
        style.set_property("left", &left)?;
        style.set_property("top", &top)?;

        if let (Some(url), Some(logo)) = (&self.logo_url, query(&surface, LOGO_CLASS)) {
            logo.set_attribute("src", url)?;
        }
        let button = query(&surface, SAVE_BUTTON_CLASS)
            .ok_or_else(|| JsValue::from_str("overlay skeleton has no save button"))?;

        let image_src = image_source(image);
        let page_url = self.window.location().href()?;
        let document = self.document.clone();
        let trigger = button.clone();
        let listener = Listener::new(move |event: Event| {
            event.stop_propagation();
            event.prevent_default();
            if let Err(e) = dispatch_save(&document, &image_src, &page_url, &trigger) {
                log::error!("could not dispatch save event: {}", chrome::describe(&e));
            }
        });
        button.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;

        self.document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .append_child(&surface)?;
        self.listeners.push((surface.clone(), button, listener));
        Ok(surface)
    }
}

impl OverlayHost for DomHost {
    type Element = Element;
    type Surface = HtmlElement;

    fn classify(&self, target: &Element) -> TargetKind {
        if matches!(target.closest(&class_selector(OVERLAY_CLASS)), Ok(Some(_))) {
            return TargetKind::Overlay;
        }
        if target.tag_name().eq_ignore_ascii_case("img") {
            return TargetKind::Image;
        }
        TargetKind::Other
    }

    fn bounding_rect(&self, image: &Element) -> Rect {
        let r = image.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_x: self.window.scroll_x().unwrap_or_default(),
            scroll_y: self.window.scroll_y().unwrap_or_default(),
            inner_width: self
                .window
                .inner_width()
                .map(|w| w.as_f64().unwrap_or_default())
                .unwrap_or_default(),
        }
    }

    fn mount(&mut self, image: &Element, at: Position) -> Option<HtmlElement> {
        match self.build(image, at) {
            Ok(surface) => Some(surface),
            Err(e) => {
                log::error!("overlay mount failed: {}", chrome::describe(&e));
                None
            }
        }
    }

    fn unmount(&mut self, surface: &HtmlElement) {
        surface.remove();
        self.listeners.retain(|(owner, button, listener)| {
            if owner != surface {
                return true;
            }
            if let Err(e) = button.remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref()) {
                log::debug!("save listener already gone: {}", chrome::describe(&e));
            }
            false
        });
    }

    fn mark_anchor(&mut self, image: &Element, tracked: bool) {
        let result = if tracked { image.set_attribute(ANCHOR_ATTR, "1") } else { image.remove_attribute(ANCHOR_ATTR) };
        if let Err(e) = result {
            log::debug!("anchor marker not updated: {}", chrome::describe(&e));
        }
    }
}

/// First descendant of `root` carrying `class`.
pub fn query(root: &Element, class: &str) -> Option<HtmlElement> {
    match root.query_selector(&class_selector(class)) {
        Ok(found) => found.and_then(|el| el.dyn_ref::<HtmlElement>().cloned()),
        Err(e) => {
            log::error!("selector query for {class} failed: {}", chrome::describe(&e));
            None
        }
    }
}

fn image_source(image: &Element) -> String {
    match image.dyn_ref::<HtmlImageElement>() {
        Some(img) if !img.current_src().is_empty() => img.current_src(),
        Some(img) => img.src(),
        None => image.get_attribute("src").unwrap_or_default(),
    }
}

fn dispatch_save(document: &Document, image_src: &str, page_url: &str, trigger: &HtmlElement) -> Result<(), JsValue> {
    let detail = js_sys::Object::new();
    js_sys::Reflect::set(&detail, &"imageSrc".into(), &image_src.into())?;
    js_sys::Reflect::set(&detail, &"pageUrl".into(), &page_url.into())?;
    js_sys::Reflect::set(&detail, &"trigger".into(), trigger)?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(SAVE_EVENT, &init)?;
    document.dispatch_event(&event)?;
    Ok(())
}
