//! Save orchestrator.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page's save control dispatches [`SAVE_EVENT`] carrying a
//! [`SaveRequest`]. The content script wraps it in a [`SaveSession`] and
//! hands it to [`SaveOrchestrator::run`], which sequences token acquisition,
//! recents seeding, board selection, and the save call against the page
//! through the [`SaveSurface`] trait.
//!
//! DESIGN
//! ======
//! `run` is one async function; each `.await` is a point where pointer
//! events and timers on the page may interleave. The overlay's auto-removal
//! is held for the whole session by a guard that releases it on drop, so
//! every exit (including a dropped future) resumes normal hover behavior.
//!
//! ERROR HANDLING
//! ==============
//! Collaborators never fail outward: no token ends the session in
//! `TokenMissing`, an unsuccessful save ends it in `Error`. Both show their
//! glyph for a fixed hold, restore the control, then remove the overlay.

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod orchestrator_test;

use async_trait::async_trait;
use boards::board::Board;
use boards::repo::BoardRepository;
use boards::token::{Token, TokenProvider};
use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::feedback::{Feedback, FeedbackState, TriggerControl};

/// Name of the DOM event a save control dispatches on `document`.
pub const SAVE_EVENT: &str = "image:board-save";

/// Payload of [`SAVE_EVENT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub image_src: String,
    pub page_url: String,
}

/// One user-initiated save, tied to the control that started it.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSession<T> {
    pub request: SaveRequest,
    pub trigger: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user closed the selector without choosing.
    Cancelled,
    TokenMissing,
    Saved(Board),
    Failed(String),
}

/// The page as seen by a running save session.
#[async_trait(?Send)]
pub trait SaveSurface {
    type Trigger;

    fn is_disabled(&self, trigger: &Self::Trigger) -> bool;

    fn show(&self, trigger: &Self::Trigger, control: TriggerControl);

    fn set_removal_suppressed(&self, suppressed: bool);

    /// Present the board selector and wait for its single resolution.
    async fn choose_board(&self, token: &Token, recents: Vec<Board>) -> Option<Board>;

    async fn sleep(&self, ms: Millis);

    /// Remove the overlay that owns `trigger`, if it is still mounted.
    fn teardown(&self, trigger: &Self::Trigger);
}

/// Holds overlay auto-removal off until dropped.
struct RemovalHold<'a, S: SaveSurface + ?Sized> {
    surface: &'a S,
}

impl<'a, S: SaveSurface + ?Sized> RemovalHold<'a, S> {
    fn engage(surface: &'a S) -> Self {
        surface.set_removal_suppressed(true);
        Self { surface }
    }
}

impl<S: SaveSurface + ?Sized> Drop for RemovalHold<'_, S> {
    fn drop(&mut self) {
        self.surface.set_removal_suppressed(false);
    }
}

pub struct SaveOrchestrator<P, R> {
    tokens: P,
    boards: R,
}

impl<P, R> SaveOrchestrator<P, R>
where
    P: TokenProvider,
    R: BoardRepository,
{
    pub fn new(tokens: P, boards: R) -> Self {
        Self { tokens, boards }
    }

    pub fn boards(&self) -> &R {
        &self.boards
    }

    pub async fn run<S>(&self, surface: &S, session: &SaveSession<S::Trigger>) -> SessionOutcome
    where
        S: SaveSurface + ?Sized,
    {
        let trigger = &session.trigger;
        let hold = RemovalHold::engage(surface);
        let mut feedback = Feedback::new(surface.is_disabled(trigger));
        show(surface, trigger, &mut feedback, FeedbackState::Loading);

        let Some(token) = self.tokens.acquire_token().await else {
            log::info!("no board token; save aborted");
            finish(surface, trigger, feedback, hold, FeedbackState::TokenMissing).await;
            return SessionOutcome::TokenMissing;
        };

        self.boards.populate_initial_recents(&token).await;
        let recents = self.boards.list_recents().await;
        let Some(board) = surface.choose_board(&token, recents).await else {
            log::debug!("board selection cancelled");
            show(surface, trigger, &mut feedback, FeedbackState::Idle);
            drop(hold);
            return SessionOutcome::Cancelled;
        };

        show(surface, trigger, &mut feedback, FeedbackState::Saving);
        let outcome = self
            .boards
            .save(&token, &board, &session.request.image_src, &session.request.page_url)
            .await;
        if outcome.success {
            log::info!("saved image to board {} ({})", board.id, board.title);
            finish(surface, trigger, feedback, hold, FeedbackState::Success).await;
            SessionOutcome::Saved(board)
        } else {
            log::warn!("save to board {} failed: {}", board.id, outcome.message);
            finish(surface, trigger, feedback, hold, FeedbackState::Error).await;
            SessionOutcome::Failed(outcome.message)
        }
    }
}

fn show<S>(surface: &S, trigger: &S::Trigger, feedback: &mut Feedback, next: FeedbackState)
where
    S: SaveSurface + ?Sized,
{
    if let Some(control) = feedback.enter(next) {
        surface.show(trigger, control);
    }
}

/// Show a terminal glyph for its hold, restore the control, release the
/// removal hold, then remove the overlay.
async fn finish<S>(
    surface: &S,
    trigger: &S::Trigger,
    mut feedback: Feedback,
    hold: RemovalHold<'_, S>,
    terminal: FeedbackState,
) where
    S: SaveSurface + ?Sized,
{
    show(surface, trigger, &mut feedback, terminal);
    if let Some(ms) = terminal.hold_ms() {
        surface.sleep(ms).await;
    }
    show(surface, trigger, &mut feedback, FeedbackState::Idle);
    drop(hold);
    surface.teardown(trigger);
}
