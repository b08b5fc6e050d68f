#![allow(clippy::float_cmp)]

use super::*;

fn board(id: i64, title: &str) -> Board {
    Board::new(id, title)
}

fn recents() -> Vec<Board> {
    vec![board(1, "Moodboard"), board(2, "Type specimens")]
}

fn narrow_vp() -> Viewport {
    Viewport { scroll_x: 0.0, scroll_y: 0.0, inner_width: 400.0 }
}

fn wide_vp() -> Viewport {
    Viewport { scroll_x: 0.0, scroll_y: 0.0, inner_width: 1280.0 }
}

fn open() -> BoardSelector {
    let mut selector = BoardSelector::new();
    let shift = selector.present(recents(), 170.0, Rect::new(170.0, 25.0, 210.0, 55.0), wide_vp());
    assert_eq!(shift, Ok(None));
    selector
}

// =============================================================
// Presentation
// =============================================================

#[test]
fn present_starts_with_prompt_and_recents() {
    let selector = open();
    let view = selector.view().expect("open");
    assert_eq!(view.recents.len(), 2);
    assert!(view.results.is_empty());
    assert_eq!(view.status.message(), PROMPT_MESSAGE);
    assert!(!view.show_results_title);
}

#[test]
fn second_present_while_open_is_rejected() {
    let mut selector = open();
    let again = selector.present(Vec::new(), 0.0, Rect::default(), wide_vp());
    assert_eq!(again, Err(DialogError::AlreadyOpen));
    assert_eq!(selector.view().expect("open").recents.len(), 2);
}

#[test]
fn overflowing_selector_shifts_overlay_and_restores_on_resolve() {
    let mut selector = BoardSelector::new();
    let shift = selector
        .present(recents(), 330.0, Rect::new(330.0, 25.0, 370.0, 55.0), narrow_vp())
        .expect("present");
    assert_eq!(shift, Some(140.0));

    let resolution = selector.cancel().expect("resolves");
    assert_eq!(resolution.restore_left, Some(330.0));
}

#[test]
fn unshifted_overlay_has_nothing_to_restore() {
    let mut selector = open();
    let resolution = selector.choose(ListKind::Recent, 0).expect("resolves");
    assert_eq!(resolution.restore_left, None);
}

#[test]
fn no_recents_message_constant() {
    assert_eq!(NO_RECENTS_MESSAGE, "No recent boards.");
}

// =============================================================
// Search
// =============================================================

#[test]
fn continued_typing_issues_one_search_for_final_text() {
    let mut selector = open();
    selector.on_input(0, "d");
    selector.on_input(100, "de");
    selector.on_input(250, "design");
    assert_eq!(selector.tick(400), None);
    assert_eq!(selector.next_deadline(), Some(550));

    let request = selector.tick(550).expect("search due");
    assert_eq!(request.term, "design");
    assert_eq!(selector.tick(10_000), None);
    assert_eq!(selector.view().expect("open").status.message(), SEARCHING_MESSAGE);
}

#[test]
fn search_term_is_trimmed() {
    let mut selector = open();
    selector.on_input(0, "  design  ");
    let request = selector.tick(SEARCH_DEBOUNCE_MS).expect("search due");
    assert_eq!(request.term, "design");
}

#[test]
fn blank_input_resets_to_prompt_without_request() {
    let mut selector = open();
    selector.on_input(0, "design");
    let request = selector.tick(300).expect("search due");
    assert!(selector.on_search_results(&request, vec![board(9, "Design refs")]));

    selector.on_input(400, "   ");
    assert_eq!(selector.tick(700), None);
    let view = selector.view().expect("open");
    assert!(view.results.is_empty());
    assert_eq!(view.status, &SearchStatus::Prompt);
}

#[test]
fn empty_results_show_not_found_message() {
    let mut selector = open();
    selector.on_input(0, "design");
    let request = selector.tick(300).expect("search due");
    assert!(selector.on_search_results(&request, Vec::new()));

    let view = selector.view().expect("open");
    assert_eq!(view.status.message(), "No boards found for \"design\".");
    assert!(!view.show_results_title);
}

#[test]
fn results_show_title_and_clear_message() {
    let mut selector = open();
    selector.on_input(0, "design");
    let request = selector.tick(300).expect("search due");
    assert!(selector.on_search_results(&request, vec![board(9, "Design refs")]));

    let view = selector.view().expect("open");
    assert_eq!(view.results.len(), 1);
    assert!(view.show_results_title);
    assert_eq!(view.status.message(), "");
}

#[test]
fn stale_reply_is_dropped() {
    let mut selector = open();
    selector.on_input(0, "des");
    let first = selector.tick(300).expect("first search");
    selector.on_input(310, "design");
    let second = selector.tick(610).expect("second search");

    assert!(!selector.on_search_results(&first, vec![board(3, "Desks")]));
    assert_eq!(selector.view().expect("open").status.message(), SEARCHING_MESSAGE);

    assert!(selector.on_search_results(&second, vec![board(9, "Design refs")]));
    assert_eq!(selector.view().expect("open").results[0].id, 9);
}

#[test]
fn reply_after_clearing_input_is_dropped() {
    let mut selector = open();
    selector.on_input(0, "design");
    let request = selector.tick(300).expect("search due");
    selector.on_input(310, "");
    assert_eq!(selector.tick(610), None);

    assert!(!selector.on_search_results(&request, vec![board(9, "Design refs")]));
    let view = selector.view().expect("open");
    assert_eq!(view.status.message(), PROMPT_MESSAGE);
    assert!(view.results.is_empty());
    assert!(!view.show_results_title);
}

#[test]
fn reply_after_close_is_dropped() {
    let mut selector = open();
    selector.on_input(0, "design");
    let request = selector.tick(300).expect("search due");
    assert!(selector.cancel().is_some());
    assert!(!selector.on_search_results(&request, vec![board(9, "Design refs")]));
}

// =============================================================
// Resolution
// =============================================================

#[test]
fn choosing_recent_resolves_with_board() {
    let mut selector = open();
    let resolution = selector.choose(ListKind::Recent, 1).expect("resolves");
    assert_eq!(resolution.choice, Some(board(2, "Type specimens")));
    assert!(!selector.is_open());
}

#[test]
fn choosing_result_resolves_with_board() {
    let mut selector = open();
    selector.on_input(0, "design");
    let request = selector.tick(300).expect("search due");
    selector.on_search_results(&request, vec![board(9, "Design refs")]);
    let resolution = selector.choose(ListKind::Results, 0).expect("resolves");
    assert_eq!(resolution.choice.map(|b| b.id), Some(9));
}

#[test]
fn out_of_range_row_does_not_resolve() {
    let mut selector = open();
    assert_eq!(selector.choose(ListKind::Results, 0), None);
    assert!(selector.is_open());
}

#[test]
fn cancel_resolves_with_none() {
    let mut selector = open();
    let resolution = selector.cancel().expect("resolves");
    assert_eq!(resolution.choice, None);
}

#[test]
fn resolves_at_most_once() {
    let mut selector = open();
    assert!(selector.choose(ListKind::Recent, 0).is_some());
    assert_eq!(selector.cancel(), None);
    assert_eq!(selector.choose(ListKind::Recent, 0), None);
    assert_eq!(selector.on_pointer_down(false), None);
    assert_eq!(selector.view(), None);
}

#[test]
fn outside_pointer_down_ignored_until_armed() {
    let mut selector = open();
    assert_eq!(selector.on_pointer_down(false), None);
    assert!(selector.is_open());

    selector.arm_outside_dismiss();
    let resolution = selector.on_pointer_down(false).expect("resolves");
    assert_eq!(resolution.choice, None);
}

#[test]
fn pointer_down_inside_overlay_keeps_selector_open() {
    let mut selector = open();
    selector.arm_outside_dismiss();
    assert_eq!(selector.on_pointer_down(true), None);
    assert!(selector.is_open());
}

#[test]
fn closed_selector_ignores_input() {
    let mut selector = BoardSelector::new();
    selector.on_input(0, "design");
    assert_eq!(selector.next_deadline(), None);
    assert_eq!(selector.tick(1_000), None);
}
