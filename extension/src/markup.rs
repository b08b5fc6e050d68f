//! DOM vocabulary shared by the content script: class names, the overlay
//! skeleton, row keys, and style strings.
//!
//! Kept free of `web-sys` so it compiles and tests natively.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

use boards::board::Board;
use overlay::dialog::{DialogView, ListKind, NO_RECENTS_MESSAGE};
use overlay::feedback::TriggerControl;
use overlay::geometry::Position;

// ── Class names ─────────────────────────────────────────────────

pub const OVERLAY_CLASS: &str = "board-save-overlay";
pub const OVERLAY_ACTIVE_CLASS: &str = "board-save-overlay--active";
pub const SAVE_BUTTON_CLASS: &str = "board-save-button";
pub const LOGO_CLASS: &str = "board-save-logo";
pub const GLYPH_CLASS: &str = "board-save-glyph";
pub const SELECTOR_CLASS: &str = "board-save-selector";
pub const RECENT_LIST_CLASS: &str = "board-save-recent-list";
pub const SEARCH_INPUT_CLASS: &str = "board-save-search";
pub const RESULTS_TITLE_CLASS: &str = "board-save-results-title";
pub const RESULTS_LIST_CLASS: &str = "board-save-results-list";
pub const MESSAGE_CLASS: &str = "board-save-message";
pub const CANCEL_CLASS: &str = "board-save-cancel";
pub const PLACEHOLDER_CLASS: &str = "board-save-placeholder";

// ── Attributes ──────────────────────────────────────────────────

/// Set on the image the live overlay is anchored to.
pub const ANCHOR_ATTR: &str = "data-board-save-anchor";

/// Identifies a clickable board row, see [`row_key`].
pub const ROW_ATTR: &str = "data-board-row";

/// Extension-relative path of the logo shown on the save button.
pub const LOGO_ASSET: &str = "icons/logo.svg";

pub const SAVE_LABEL: &str = "Save to board";

/// Static inner markup of a freshly mounted overlay. Board titles are never
/// interpolated here; rows are built element by element.
pub fn overlay_skeleton() -> String {
    format!(
        r#"<button class="{SAVE_BUTTON_CLASS}" aria-label="{SAVE_LABEL}"><img class="{LOGO_CLASS}" alt="{SAVE_LABEL}"><span class="{GLYPH_CLASS}" style="display: none;"></span></button><div class="{SELECTOR_CLASS}" style="display: none;"><div class="board-save-header">Choose Board</div><div class="board-save-title">Recent:</div><ul class="{RECENT_LIST_CLASS}"></ul><input type="search" placeholder="Search boards..." class="{SEARCH_INPUT_CLASS}"><div class="{RESULTS_TITLE_CLASS}" style="display: none;">Search Results:</div><ul class="{RESULTS_LIST_CLASS}"></ul><div class="{MESSAGE_CLASS}"></div><button class="{CANCEL_CLASS}">Cancel</button></div>"#
    )
}

/// `.{class}` selector.
pub fn class_selector(class: &str) -> String {
    format!(".{class}")
}

pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// `(left, top)` style values for an overlay at `position`.
pub fn position_style(position: Position) -> (String, String) {
    (px(position.left), px(position.top))
}

/// One `<li>` in a board list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// [`ROW_ATTR`] value; `None` for a non-clickable placeholder.
    pub key: Option<String>,
    pub label: String,
}

pub fn row_key(list: ListKind, index: usize) -> String {
    let prefix = match list {
        ListKind::Recent => "recent",
        ListKind::Results => "result",
    };
    format!("{prefix}:{index}")
}

pub fn parse_row_key(key: &str) -> Option<(ListKind, usize)> {
    let (prefix, index) = key.split_once(':')?;
    let list = match prefix {
        "recent" => ListKind::Recent,
        "result" => ListKind::Results,
        _ => return None,
    };
    match index.parse() {
        Ok(index) => Some((list, index)),
        Err(_) => None,
    }
}

fn rows(list: ListKind, boards: &[Board]) -> Vec<Row> {
    boards
        .iter()
        .enumerate()
        .map(|(i, b)| Row { key: Some(row_key(list, i)), label: b.title.clone() })
        .collect()
}

/// Recent rows, or the single placeholder row when there are none.
pub fn recent_rows(view: &DialogView<'_>) -> Vec<Row> {
    if view.recents.is_empty() {
        return vec![Row { key: None, label: NO_RECENTS_MESSAGE.to_owned() }];
    }
    rows(ListKind::Recent, view.recents)
}

pub fn result_rows(view: &DialogView<'_>) -> Vec<Row> {
    rows(ListKind::Results, view.results)
}

/// CSS `display` value for an element that is either shown or hidden.
pub fn display(visible: bool, shown_as: &'static str) -> &'static str {
    if visible { shown_as } else { "none" }
}

/// Glyph text and its `display`, for the save button's status span.
pub fn glyph_display(control: &TriggerControl) -> (&'static str, &'static str) {
    match control.glyph {
        Some(glyph) => (glyph, "block"),
        None => ("", "none"),
    }
}
