//! Save-control feedback.
//!
//! A save session moves the trigger control through
//! `Idle → Loading → {TokenMissing | Saving → {Success | Error}} → Idle`,
//! plus `Loading → Idle` when the user cancels board selection. Each state
//! maps to a [`TriggerControl`] snapshot the surface renders verbatim.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use crate::clock::Millis;
use crate::consts::{ERROR_HOLD_MS, SUCCESS_HOLD_MS, TOKEN_MISSING_HOLD_MS};

pub const LOADING_GLYPH: &str = "...";
pub const TOKEN_MISSING_GLYPH: &str = "🔑";
pub const SAVING_GLYPH: &str = "💾";
pub const SUCCESS_GLYPH: &str = "✅";
pub const ERROR_GLYPH: &str = "❌";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    Idle,
    Loading,
    TokenMissing,
    Saving,
    Success,
    Error,
}

impl FeedbackState {
    #[must_use]
    pub fn glyph(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Loading => Some(LOADING_GLYPH),
            Self::TokenMissing => Some(TOKEN_MISSING_GLYPH),
            Self::Saving => Some(SAVING_GLYPH),
            Self::Success => Some(SUCCESS_GLYPH),
            Self::Error => Some(ERROR_GLYPH),
        }
    }

    /// How long a terminal glyph stays up before the session ends.
    #[must_use]
    pub fn hold_ms(self) -> Option<Millis> {
        match self {
            Self::TokenMissing => Some(TOKEN_MISSING_HOLD_MS),
            Self::Success => Some(SUCCESS_HOLD_MS),
            Self::Error => Some(ERROR_HOLD_MS),
            Self::Idle | Self::Loading | Self::Saving => None,
        }
    }

    #[must_use]
    pub fn allows(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Loading)
                | (Self::Loading, Self::TokenMissing | Self::Saving | Self::Error | Self::Idle)
                | (Self::Saving, Self::Success | Self::Error)
                | (Self::TokenMissing | Self::Success | Self::Error, Self::Idle)
        )
    }
}

/// What the trigger control should look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerControl {
    pub disabled: bool,
    /// Feedback glyph in place of the logo, if any.
    pub glyph: Option<&'static str>,
    pub icon_visible: bool,
}

/// Feedback for one session, remembering the control's pre-session flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    state: FeedbackState,
    original_disabled: bool,
}

impl Feedback {
    #[must_use]
    pub fn new(original_disabled: bool) -> Self {
        Self { state: FeedbackState::Idle, original_disabled }
    }

    #[must_use]
    pub fn state(&self) -> FeedbackState {
        self.state
    }

    /// Move to `next`, returning the control to render. Illegal moves are
    /// logged and leave the state unchanged.
    pub fn enter(&mut self, next: FeedbackState) -> Option<TriggerControl> {
        if !self.state.allows(next) {
            log::warn!("ignoring feedback transition {:?} -> {next:?}", self.state);
            return None;
        }
        self.state = next;
        Some(self.control())
    }

    #[must_use]
    pub fn control(&self) -> TriggerControl {
        match self.state {
            FeedbackState::Idle => TriggerControl {
                disabled: self.original_disabled,
                glyph: None,
                icon_visible: true,
            },
            busy => TriggerControl { disabled: true, glyph: busy.glyph(), icon_visible: false },
        }
    }
}
