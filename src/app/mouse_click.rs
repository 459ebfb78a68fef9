//! Mouse click handling
//!
//! Routes presses to the pickers and moves form focus to the field that was
//! hit.

use super::app_state::App;
use crate::layout::rect_contains;

/// Handle left mouse button press at (column, row)
pub fn handle_click(app: &mut App, column: u16, row: u16) {
    // An open dialog is modal: presses outside it only close lists
    if app.dialog_open
        && !app
            .dialog_area
            .is_some_and(|area| rect_contains(area, column, row))
    {
        app.registry.dismiss_all();
        return;
    }

    if let Some((input, _)) = app.registry.pointer_down(column, row)
        && app.focusable_inputs().contains(&input)
    {
        app.focus = input;
    }
}

#[cfg(test)]
#[path = "mouse_click_tests.rs"]
mod mouse_click_tests;
