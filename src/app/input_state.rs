use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

use crate::picker::InputId;

/// Host input field a picker is attached to
///
/// The textarea is only the editing buffer; the picker renderer draws the
/// field.
pub struct InputState {
    pub input: InputId,
    pub title: &'static str,
    pub textarea: TextArea<'static>,
}

impl InputState {
    pub fn new(input: InputId, title: &'static str) -> Self {
        Self {
            input,
            title,
            textarea: single_line(""),
        }
    }

    /// Get the current text
    pub fn text(&self) -> &str {
        self.textarea.lines().first().map_or("", String::as_str)
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.textarea.cursor().1
    }

    /// Replace the text and move the cursor to its end
    pub fn set_text(&mut self, text: &str) {
        self.textarea = single_line(text);
    }

    /// Feed a key to the editing buffer; returns true when the text changed
    pub fn edit(&mut self, key: KeyEvent) -> bool {
        // Single-line field
        if key.code == KeyCode::Enter {
            return false;
        }
        let before = self.text().to_string();
        self.textarea.input(key);
        self.text() != before
    }
}

fn single_line(text: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(vec![text.to_string()]);
    // Remove default underline from cursor line
    textarea.set_cursor_line_style(Style::default());
    textarea.move_cursor(CursorMove::End);
    textarea
}
