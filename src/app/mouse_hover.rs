//! Mouse hover handling
//!
//! Updates the hovered suggestion row of open lists.

use super::app_state::App;

/// Handle mouse movement to (column, row)
pub fn handle_hover(app: &mut App, column: u16, row: u16) {
    app.registry.pointer_move(column, row);
}

#[cfg(test)]
#[path = "mouse_hover_tests.rs"]
mod mouse_hover_tests;
