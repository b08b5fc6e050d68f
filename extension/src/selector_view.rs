//! Renders board-selector state and save-control feedback into an overlay.

use overlay::dialog::DialogView;
use overlay::feedback::TriggerControl;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::dom::query;
use crate::markup::{
    CANCEL_CLASS, GLYPH_CLASS, LOGO_CLASS, MESSAGE_CLASS, OVERLAY_ACTIVE_CLASS, PLACEHOLDER_CLASS,
    RECENT_LIST_CLASS, RESULTS_LIST_CLASS, RESULTS_TITLE_CLASS, ROW_ATTR, Row, SAVE_BUTTON_CLASS, SEARCH_INPUT_CLASS,
    SELECTOR_CLASS, display, glyph_display, px, recent_rows, result_rows,
};

fn part(surface: &HtmlElement, class: &str) -> Result<HtmlElement, JsValue> {
    query(surface, class).ok_or_else(|| JsValue::from_str(&format!("overlay is missing .{class}")))
}

fn set_display(el: &HtmlElement, value: &str) -> Result<(), JsValue> {
    el.style().set_property("display", value)
}

/// Swap the save button for the selector, move the overlay if it needs to
/// shift, and focus the search box.
pub fn open(surface: &HtmlElement, shift_left: Option<f64>) -> Result<(), JsValue> {
    for class in [CANCEL_CLASS, RECENT_LIST_CLASS, RESULTS_LIST_CLASS, MESSAGE_CLASS, RESULTS_TITLE_CLASS] {
        part(surface, class)?;
    }
    set_display(&part(surface, SAVE_BUTTON_CLASS)?, "none")?;
    set_display(&part(surface, SELECTOR_CLASS)?, "block")?;
    surface.class_list().add_1(OVERLAY_ACTIVE_CLASS)?;
    if let Some(left) = shift_left {
        surface.style().set_property("left", &px(left))?;
    }
    let input: HtmlInputElement = part(surface, SEARCH_INPUT_CLASS)?.dyn_into()?;
    input.set_value("");
    input.focus()?;
    input.select();
    Ok(())
}

/// Redraw both lists, the results heading, and the status message.
pub fn render(surface: &HtmlElement, view: &DialogView<'_>) -> Result<(), JsValue> {
    fill(&part(surface, RECENT_LIST_CLASS)?, &recent_rows(view))?;
    fill(&part(surface, RESULTS_LIST_CLASS)?, &result_rows(view))?;
    set_display(&part(surface, RESULTS_TITLE_CLASS)?, display(view.show_results_title, "block"))?;
    part(surface, MESSAGE_CLASS)?.set_text_content(Some(&view.status.message()));
    Ok(())
}

/// Clear the lists, hide the selector, bring the save button back, and
/// restore the overlay's position if it was shifted.
pub fn close(surface: &HtmlElement, restore_left: Option<f64>) -> Result<(), JsValue> {
    part(surface, RECENT_LIST_CLASS)?.set_inner_html("");
    part(surface, RESULTS_LIST_CLASS)?.set_inner_html("");
    set_display(&part(surface, SELECTOR_CLASS)?, "none")?;
    set_display(&part(surface, SAVE_BUTTON_CLASS)?, "block")?;
    surface.class_list().remove_1(OVERLAY_ACTIVE_CLASS)?;
    if let Some(left) = restore_left {
        surface.style().set_property("left", &px(left))?;
    }
    Ok(())
}

fn fill(list: &Element, rows: &[Row]) -> Result<(), JsValue> {
    list.set_inner_html("");
    let Some(document) = list.owner_document() else {
        return Err(JsValue::from_str("list is detached from the document"));
    };
    for row in rows {
        let item = document.create_element("li")?;
        item.set_text_content(Some(&row.label));
        match &row.key {
            Some(key) => item.set_attribute(ROW_ATTR, key)?,
            None => item.set_class_name(PLACEHOLDER_CLASS),
        }
        list.append_child(&item)?;
    }
    Ok(())
}

/// Apply a feedback snapshot to the save button.
pub fn apply_control(button: &HtmlButtonElement, control: &TriggerControl) -> Result<(), JsValue> {
    button.set_disabled(control.disabled);
    let (glyph, glyph_shown) = glyph_display(control);
    let status = part(button, GLYPH_CLASS)?;
    status.set_text_content(Some(glyph));
    set_display(&status, glyph_shown)?;
    set_display(&part(button, LOGO_CLASS)?, display(control.icon_visible, "inline-block"))?;
    Ok(())
}
