//! Content-script entry: wires page events, one host timer, and save
//! sessions to the [`OverlayController`].
//!
//! SYSTEM CONTEXT
//! ==============
//! Document-level listeners forward pointer and input events to the
//! controller. After every event the single `gloo` timeout is re-armed for
//! the controller's earliest deadline. A [`SAVE_EVENT`] spawns one save
//! session; the session reaches the page through [`PageSurface`].
//!
//! DESIGN
//! ======
//! The page context is an `Rc<Page>`. `RefCell` borrows are never held
//! across an `.await`; the board selector hands its result back through a
//! oneshot channel so the awaiting session does not touch the controller.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use boards::board::Board;
use boards::config::ApiConfig;
use boards::repo::{BoardRepository, RestBoardRepository};
use boards::token::Token;
use futures::channel::oneshot;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use js_sys::Reflect;
use overlay::clock::Millis;
use overlay::controller::OverlayController;
use overlay::dialog::{Resolution, SearchRequest};
use overlay::feedback::TriggerControl;
use overlay::orchestrator::{SAVE_EVENT, SaveOrchestrator, SaveRequest, SaveSession, SaveSurface, SessionOutcome};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, CustomEvent, Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::chrome;
use crate::dom::DomHost;
use crate::http::GlooHttp;
use crate::markup::{CANCEL_CLASS, OVERLAY_CLASS, ROW_ATTR, SEARCH_INPUT_CLASS, class_selector, parse_row_key};
use crate::runtime::MessageTokenProvider;
use crate::selector_view;
use crate::storage::ExtensionStorage;

type Repo = RestBoardRepository<GlooHttp, ExtensionStorage>;

struct Page {
    controller: RefCell<OverlayController<DomHost>>,
    timer: RefCell<Option<Timeout>>,
    choice: RefCell<Option<oneshot::Sender<Option<Board>>>>,
    search_token: RefCell<Option<Token>>,
    orchestrator: SaveOrchestrator<MessageTokenProvider, Repo>,
}

pub fn start(config: ApiConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let page = Rc::new(Page {
        controller: RefCell::new(OverlayController::new(DomHost::new(window, document.clone()))),
        timer: RefCell::new(None),
        choice: RefCell::new(None),
        search_token: RefCell::new(None),
        orchestrator: SaveOrchestrator::new(
            MessageTokenProvider,
            RestBoardRepository::new(config, GlooHttp, ExtensionStorage),
        ),
    });

    listen(&document, "pointerover", false, &page, on_pointer_over)?;
    listen(&document, "pointerdown", true, &page, on_pointer_down)?;
    listen(&document, "click", false, &page, on_click)?;
    listen(&document, "input", false, &page, on_input)?;
    listen(&document, SAVE_EVENT, false, &page, on_save)?;
    if let Some(root) = document.document_element() {
        listen(&root, "mouseleave", false, &page, |page, _| {
            page.controller.borrow_mut().on_pointer_leave();
            rearm(page);
        })?;
    }
    log::info!("content script ready");
    Ok(())
}

fn listen(
    target: &web_sys::EventTarget,
    name: &str,
    capture: bool,
    page: &Rc<Page>,
    handler: fn(&Rc<Page>, Event),
) -> Result<(), JsValue> {
    let page = Rc::clone(page);
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| handler(&page, event));
    let options = AddEventListenerOptions::new();
    options.set_capture(capture);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        name,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now() -> Millis {
    js_sys::Date::now() as Millis
}

fn target_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_ref::<Element>().cloned())
}

// =============================================================================
// TIMER
// =============================================================================

/// Replace the host timeout with one for the controller's next deadline.
fn rearm(page: &Rc<Page>) {
    let deadline = page.controller.borrow().next_deadline();
    let next = deadline.map(|at| {
        let delay = u32::try_from(at.saturating_sub(now())).unwrap_or(u32::MAX);
        let page = Rc::clone(page);
        Timeout::new(delay, move || on_timer(&page))
    });
    // Dropping the old handle cancels it.
    *page.timer.borrow_mut() = next;
}

fn on_timer(page: &Rc<Page>) {
    let request = page.controller.borrow_mut().tick(now());
    if let Some(request) = request {
        render_selector(page);
        spawn_search(page, request);
    }
    rearm(page);
}

// =============================================================================
// SELECTOR
// =============================================================================

fn render_selector(page: &Page) {
    let controller = page.controller.borrow();
    let (Some(active), Some(view)) = (controller.active(), controller.selector().view()) else {
        return;
    };
    if let Err(e) = selector_view::render(&active.surface, &view) {
        log::error!("selector render failed: {}", chrome::describe(&e));
    }
}

fn spawn_search(page: &Rc<Page>, request: SearchRequest) {
    let Some(token) = page.search_token.borrow().clone() else {
        log::warn!("search requested without a token");
        return;
    };
    let page = Rc::clone(page);
    wasm_bindgen_futures::spawn_local(async move {
        let results = page.orchestrator.boards().search(&token, &request.term).await;
        let applied = page.controller.borrow_mut().selector_mut().on_search_results(&request, results);
        if applied {
            render_selector(&page);
        }
    });
}

/// Close the selector's DOM and hand the choice to the waiting session.
fn deliver(page: &Page, resolution: Resolution) {
    let surface = page.controller.borrow().active().map(|a| a.surface.clone());
    if let Some(surface) = surface {
        if let Err(e) = selector_view::close(&surface, resolution.restore_left) {
            log::error!("selector close failed: {}", chrome::describe(&e));
        }
    }
    page.search_token.borrow_mut().take();
    if let Some(sender) = page.choice.borrow_mut().take() {
        if sender.send(resolution.choice).is_err() {
            log::debug!("save session ended before the selector resolved");
        }
    }
}

// =============================================================================
// EVENTS
// =============================================================================

fn on_pointer_over(page: &Rc<Page>, event: Event) {
    let Some(target) = target_element(&event) else {
        return;
    };
    page.controller.borrow_mut().on_pointer_over(now(), target);
    rearm(page);
}

fn on_pointer_down(page: &Rc<Page>, event: Event) {
    let Some(target) = target_element(&event) else {
        return;
    };
    let resolution = page.controller.borrow_mut().on_pointer_down(&target);
    if let Some(resolution) = resolution {
        deliver(page, resolution);
    }
}

fn on_click(page: &Rc<Page>, event: Event) {
    let Some(target) = target_element(&event) else {
        return;
    };
    if !matches!(target.closest(&class_selector(OVERLAY_CLASS)), Ok(Some(_))) {
        return;
    }
    let resolution = if let Ok(Some(row)) = target.closest(&format!("[{ROW_ATTR}]")) {
        row.get_attribute(ROW_ATTR)
            .and_then(|key| parse_row_key(&key))
            .and_then(|(list, index)| page.controller.borrow_mut().choose(list, index))
    } else if matches!(target.closest(&class_selector(CANCEL_CLASS)), Ok(Some(_))) {
        page.controller.borrow_mut().cancel_selector()
    } else {
        None
    };
    if let Some(resolution) = resolution {
        deliver(page, resolution);
    }
}

fn on_input(page: &Rc<Page>, event: Event) {
    let Some(input) = event.target().and_then(|t| t.dyn_ref::<HtmlInputElement>().cloned()) else {
        return;
    };
    if !input.class_list().contains(SEARCH_INPUT_CLASS) {
        return;
    }
    page.controller.borrow_mut().selector_mut().on_input(now(), &input.value());
    rearm(page);
}

fn on_save(page: &Rc<Page>, event: Event) {
    let session = match read_session(&event) {
        Ok(session) => session,
        Err(e) => {
            log::error!("malformed save event: {}", chrome::describe(&e));
            return;
        }
    };
    let page = Rc::clone(page);
    wasm_bindgen_futures::spawn_local(async move {
        let surface = PageSurface { page: Rc::clone(&page) };
        match page.orchestrator.run(&surface, &session).await {
            SessionOutcome::Saved(board) => log::info!("saved to {}", board.title),
            SessionOutcome::Failed(message) => log::warn!("save failed: {message}"),
            SessionOutcome::TokenMissing => log::info!("save needs authorization"),
            SessionOutcome::Cancelled => log::debug!("save cancelled"),
        }
    });
}

fn read_session(event: &Event) -> Result<SaveSession<SaveTrigger>, JsValue> {
    let custom = event
        .dyn_ref::<CustomEvent>()
        .ok_or_else(|| JsValue::from_str("not a CustomEvent"))?;
    let detail = custom.detail();
    let field = |name: &str| -> Result<JsValue, JsValue> { Reflect::get(&detail, &JsValue::from_str(name)) };
    let request = SaveRequest {
        image_src: field("imageSrc")?.as_string().unwrap_or_default(),
        page_url: field("pageUrl")?.as_string().unwrap_or_default(),
    };
    let button: HtmlButtonElement = field("trigger")?.dyn_into()?;
    let surface = button
        .closest(&class_selector(OVERLAY_CLASS))?
        .and_then(|el| el.dyn_ref::<HtmlElement>().cloned())
        .ok_or_else(|| JsValue::from_str("save button is outside an overlay"))?;
    Ok(SaveSession { request, trigger: SaveTrigger { button, surface } })
}

// =============================================================================
// SAVE SURFACE
// =============================================================================

/// The save button that started a session and the overlay that owns it.
struct SaveTrigger {
    button: HtmlButtonElement,
    surface: HtmlElement,
}

struct PageSurface {
    page: Rc<Page>,
}

#[async_trait(?Send)]
impl SaveSurface for PageSurface {
    type Trigger = SaveTrigger;

    fn is_disabled(&self, trigger: &SaveTrigger) -> bool {
        trigger.button.disabled()
    }

    fn show(&self, trigger: &SaveTrigger, control: TriggerControl) {
        if let Err(e) = selector_view::apply_control(&trigger.button, &control) {
            log::error!("save control update failed: {}", chrome::describe(&e));
        }
    }

    fn set_removal_suppressed(&self, suppressed: bool) {
        self.page.controller.borrow_mut().set_session_active(suppressed);
        rearm(&self.page);
    }

    async fn choose_board(&self, token: &Token, recents: Vec<Board>) -> Option<Board> {
        let (sender, receiver) = oneshot::channel();
        {
            let mut controller = self.page.controller.borrow_mut();
            let shift = match controller.open_selector(recents) {
                Ok(shift) => shift,
                Err(e) => {
                    log::error!("board selector unavailable: {e}");
                    return None;
                }
            };
            let surface = controller.active().map(|a| a.surface.clone())?;
            if let Err(e) = selector_view::open(&surface, shift) {
                log::error!("board selector could not be shown: {}", chrome::describe(&e));
                controller.cancel_selector();
                return None;
            }
        }
        *self.page.search_token.borrow_mut() = Some(token.clone());
        *self.page.choice.borrow_mut() = Some(sender);
        render_selector(&self.page);

        // Arm outside dismissal after the opening click has finished.
        let page = Rc::clone(&self.page);
        Timeout::new(0, move || page.controller.borrow_mut().selector_mut().arm_outside_dismiss()).forget();

        receiver.await.unwrap_or_default()
    }

    async fn sleep(&self, ms: Millis) {
        TimeoutFuture::new(u32::try_from(ms).unwrap_or(u32::MAX)).await;
    }

    fn teardown(&self, trigger: &SaveTrigger) {
        let removed = self.page.controller.borrow_mut().teardown_surface(&trigger.surface);
        if !removed {
            log::debug!("overlay already replaced; nothing to tear down");
        }
        rearm(&self.page);
    }
}
