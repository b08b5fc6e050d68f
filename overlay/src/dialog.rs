//! Board-selector state machine.
//!
//! One presentation turns the recents list plus an optional remote search
//! into a single [`Resolution`]: a chosen board, or none on cancel or an
//! outside pointer-down. After resolving, the selector is closed and every
//! further event is a no-op until the next [`BoardSelector::present`].
//!
//! Searches are debounced on input and tagged with a generation number.
//! Only the reply to the most recently issued search is rendered; replies
//! that arrive after a newer search was issued are dropped.

#[cfg(test)]
#[path = "dialog_test.rs"]
mod dialog_test;

use boards::board::Board;

use crate::clock::{Debouncer, Millis};
use crate::consts::SEARCH_DEBOUNCE_MS;
use crate::geometry::{Rect, Viewport, dialog_shift};

pub const PROMPT_MESSAGE: &str = "Type to search.";
pub const SEARCHING_MESSAGE: &str = "Searching...";
pub const NO_RECENTS_MESSAGE: &str = "No recent boards.";

#[must_use]
pub fn not_found_message(term: &str) -> String {
    format!("No boards found for \"{term}\".")
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DialogError {
    #[error("board selector is already open")]
    AlreadyOpen,
    #[error("no overlay to host the board selector")]
    NoOverlay,
}

/// Which list a clicked row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Recent,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    /// Input is blank.
    Prompt,
    /// A search for `term` is in flight.
    Searching { term: String },
    /// The last search returned results.
    Found,
    /// The last search for `term` returned nothing.
    NotFound { term: String },
}

impl SearchStatus {
    /// Helper text under the results list.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Prompt => PROMPT_MESSAGE.to_owned(),
            Self::Searching { .. } => SEARCHING_MESSAGE.to_owned(),
            Self::Found => String::new(),
            Self::NotFound { term } => not_found_message(term),
        }
    }
}

/// A debounced search ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub generation: u64,
}

/// How a presentation ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The chosen board, or `None` for cancel / outside click.
    pub choice: Option<Board>,
    /// Left position to restore on the overlay if it was shifted to fit.
    pub restore_left: Option<f64>,
}

/// Everything the renderer needs for one frame of the selector.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogView<'a> {
    pub recents: &'a [Board],
    pub results: &'a [Board],
    pub status: &'a SearchStatus,
    /// The results heading is shown only when there are results.
    pub show_results_title: bool,
}

#[derive(Debug)]
struct Presentation {
    recents: Vec<Board>,
    results: Vec<Board>,
    status: SearchStatus,
    query: Debouncer<String>,
    generation: u64,
    outside_armed: bool,
    original_left: f64,
    shifted_left: Option<f64>,
}

#[derive(Debug)]
pub struct BoardSelector {
    open: Option<Presentation>,
    search_debounce: Millis,
}

impl Default for BoardSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::with_debounce(SEARCH_DEBOUNCE_MS)
    }

    #[must_use]
    pub fn with_debounce(search_debounce: Millis) -> Self {
        Self { open: None, search_debounce }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open the selector over an overlay whose `style.left` is
    /// `overlay_left` and whose current client rect is `overlay_rect`.
    ///
    /// Returns the left position the overlay should move to so the selector
    /// stays on screen, if it needs to move.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::AlreadyOpen`] while a presentation is pending.
    pub fn present(
        &mut self,
        recents: Vec<Board>,
        overlay_left: f64,
        overlay_rect: Rect,
        viewport: Viewport,
    ) -> Result<Option<f64>, DialogError> {
        if self.open.is_some() {
            return Err(DialogError::AlreadyOpen);
        }
        let shifted_left = dialog_shift(overlay_rect, viewport);
        self.open = Some(Presentation {
            recents,
            results: Vec::new(),
            status: SearchStatus::Prompt,
            query: Debouncer::new(self.search_debounce),
            generation: 0,
            outside_armed: false,
            original_left: overlay_left,
            shifted_left,
        });
        Ok(shifted_left)
    }

    /// Start honouring outside pointer-downs. Called on the tick after
    /// presenting so the click that opened the selector cannot close it.
    pub fn arm_outside_dismiss(&mut self) {
        if let Some(p) = self.open.as_mut() {
            p.outside_armed = true;
        }
    }

    /// The search input changed.
    pub fn on_input(&mut self, now: Millis, text: &str) {
        if let Some(p) = self.open.as_mut() {
            p.query.push(now, text.to_owned());
        }
    }

    /// Fire the search debounce if due. Blank input resets to the prompt
    /// without a request.
    pub fn tick(&mut self, now: Millis) -> Option<SearchRequest> {
        let p = self.open.as_mut()?;
        let raw = p.query.fire(now)?;
        let term = raw.trim();
        p.results.clear();
        p.generation += 1;
        if term.is_empty() {
            p.status = SearchStatus::Prompt;
            return None;
        }
        p.status = SearchStatus::Searching { term: term.to_owned() };
        Some(SearchRequest { term: term.to_owned(), generation: p.generation })
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.open.as_ref().and_then(|p| p.query.deadline())
    }

    /// Render the reply to `request`. Returns `false` when the reply is
    /// stale or the selector has closed.
    pub fn on_search_results(&mut self, request: &SearchRequest, boards: Vec<Board>) -> bool {
        let Some(p) = self.open.as_mut() else {
            return false;
        };
        if request.generation != p.generation {
            log::debug!("dropping stale search reply for {:?}", request.term);
            return false;
        }
        p.status = if boards.is_empty() {
            SearchStatus::NotFound { term: request.term.clone() }
        } else {
            SearchStatus::Found
        };
        p.results = boards;
        true
    }

    /// A row was clicked.
    pub fn choose(&mut self, list: ListKind, index: usize) -> Option<Resolution> {
        let p = self.open.as_ref()?;
        let rows = match list {
            ListKind::Recent => &p.recents,
            ListKind::Results => &p.results,
        };
        let board = rows.get(index)?.clone();
        Some(self.resolve(Some(board)))
    }

    /// The cancel button was clicked.
    pub fn cancel(&mut self) -> Option<Resolution> {
        self.open.as_ref()?;
        Some(self.resolve(None))
    }

    /// A document-level pointer-down, captured before page handlers run.
    pub fn on_pointer_down(&mut self, inside_overlay: bool) -> Option<Resolution> {
        let armed = self.open.as_ref()?.outside_armed;
        if inside_overlay || !armed {
            return None;
        }
        Some(self.resolve(None))
    }

    /// Close without a choice; used when the overlay disappears underneath.
    pub fn dismiss(&mut self) -> Option<Resolution> {
        self.cancel()
    }

    #[must_use]
    pub fn view(&self) -> Option<DialogView<'_>> {
        let p = self.open.as_ref()?;
        Some(DialogView {
            recents: &p.recents,
            results: &p.results,
            status: &p.status,
            show_results_title: !p.results.is_empty(),
        })
    }

    fn resolve(&mut self, choice: Option<Board>) -> Resolution {
        let restore_left = self
            .open
            .take()
            .and_then(|p| p.shifted_left.map(|_| p.original_left));
        Resolution { choice, restore_left }
    }
}
