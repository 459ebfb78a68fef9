use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use super::app_state::App;
use super::{mouse_click, mouse_hover};
use crate::picker::KeyOutcome;

impl App {
    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_event(key, now);
            }
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Resize(width, height) => {
                self.viewport = Rect::new(0, 0, width, height);
                self.registry.viewport_changed(self.viewport);
            }
            _ => {}
        }
        self.apply_registry_events();
    }

    /// Handle key press events
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        // Try global keys first
        if self.handle_global_keys(key) {
            return;
        }

        // Then the focused picker
        if self.registry.handle_key(self.focus, key) == KeyOutcome::Consumed {
            return;
        }

        match key.code {
            // Esc with no list open: leave the dialog, or quit without output
            KeyCode::Esc => {
                if self.dialog_open {
                    self.close_dialog();
                } else {
                    self.quit();
                }
            }
            _ => self.edit_focused(key, now),
        }
    }

    /// Handle global keys that work regardless of focus
    /// Returns true if key was handled, false otherwise
    fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Ctrl+C: Exit application without output
            KeyCode::Char('c') if ctrl => {
                self.quit();
                true
            }
            // Ctrl+S: Submit the form
            KeyCode::Char('s') if ctrl => {
                self.submit();
                true
            }
            KeyCode::F(2) => {
                self.open_dialog();
                true
            }
            KeyCode::Tab => {
                self.cycle_focus(true);
                true
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                true
            }
            _ => false,
        }
    }

    /// Let the focused field's editor take the key and report text changes
    fn edit_focused(&mut self, key: KeyEvent, now: Instant) {
        let input = self.focus;
        let Some(field) = self.field_mut(input) else {
            return;
        };
        if field.edit(key) {
            let text = field.text().to_string();
            self.registry.text_changed(input, &text, now);
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                mouse_click::handle_click(self, mouse.column, mouse.row);
            }
            MouseEventKind::Moved => mouse_hover::handle_hover(self, mouse.column, mouse.row),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
