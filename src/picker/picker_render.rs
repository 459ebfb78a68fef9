//! Picker rendering
//!
//! Draws a picker's input line (chips, text and clear control) and its
//! floating suggestion list. The renderer reports where the interactive parts
//! landed so pointer events can be hit-tested against the same geometry.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::picker_state::Picker;
use super::view::{PickerRegions, RowView};
use crate::widgets::popup;

const DISMISS_GLYPH: &str = "×";
const HIGHLIGHT_MARKER: &str = "► ";
const ROW_INDENT: &str = "  ";

/// Host input contents handed to [`render_field`]
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub title: &'a str,
    pub text: &'a str,
    /// Cursor position in characters; `None` when the field is not focused
    pub cursor: Option<usize>,
}

/// Render the input field of `picker` into `area`
///
/// Returns the regions of the input, chip dismiss controls and clear control.
pub fn render_field(
    picker: &Picker,
    frame: &mut Frame,
    area: Rect,
    field: &FieldView<'_>,
) -> PickerRegions {
    let border_color = if field.cursor.is_some() {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", field.title))
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut regions = PickerRegions {
        input: Some(area),
        ..Default::default()
    };
    if inner.width == 0 || inner.height == 0 {
        return regions;
    }

    let right = inner.right();
    let mut spans = Vec::new();
    let mut x = inner.x;

    for item in picker.chips() {
        let label = format!(" {} ", item.label);
        x = x.saturating_add(label.width() as u16);
        spans.push(Span::styled(label, chip_style()));

        if x < right {
            regions
                .chip_dismiss
                .push((item.id, Rect::new(x, inner.y, DISMISS_GLYPH.width() as u16, 1)));
        }
        spans.push(Span::styled(DISMISS_GLYPH, chip_dismiss_style()));
        spans.push(Span::raw(" "));
        x = x.saturating_add(DISMISS_GLYPH.width() as u16 + 1);
    }

    let text_x = x;
    spans.push(Span::styled(field.text, Style::default().fg(Color::White)));
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    if picker.shows_clear_control() {
        let clear = Rect::new(right.saturating_sub(1), inner.y, 1, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(DISMISS_GLYPH, clear_style())),
            clear,
        );
        regions.clear = Some(clear);
    }

    if let Some(cursor) = field.cursor {
        let before: String = field.text.chars().take(cursor).collect();
        let column = text_x
            .saturating_add(before.width() as u16)
            .min(right.saturating_sub(1));
        frame.set_cursor_position(Position::new(column, inner.y));
    }

    regions
}

/// Render the suggestion list of `picker` at its anchored area
///
/// Draws nothing while the list is closed or not yet anchored.
pub fn render_dropdown(picker: &Picker, frame: &mut Frame) {
    let Some(area) = picker.list_area().filter(|_| picker.is_open()) else {
        return;
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let visible = area.height.saturating_sub(2) as usize;
    let total = picker.suggestions().len();

    let items: Vec<ListItem> = picker
        .rows()
        .iter()
        .skip(picker.scroll_offset())
        .take(visible)
        .map(|row| ListItem::new(row_line(row, inner_width)))
        .collect();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    if total > visible {
        block = block.title(format!(" {}/{} ", picker.active_index().map_or(0, |i| i + 1), total));
    }

    popup::clear_area(frame, area);
    frame.render_widget(List::new(items).block(block), area);
}

fn row_line(row: &RowView<'_>, width: usize) -> Line<'static> {
    let (marker, style) = if row.highlighted {
        (
            HIGHLIGHT_MARKER,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else if row.hovered {
        (ROW_INDENT, Style::default().fg(Color::White).bg(Color::DarkGray))
    } else {
        (ROW_INDENT, Style::default().fg(Color::White).bg(Color::Black))
    };

    let text = format!("{}{}", marker, row.item.label);
    let padding = width.saturating_sub(text.width());
    Line::from(Span::styled(
        format!("{}{}", text, " ".repeat(padding)),
        style,
    ))
}

fn chip_style() -> Style {
    Style::default().fg(Color::White).bg(Color::DarkGray)
}

fn chip_dismiss_style() -> Style {
    Style::default().fg(Color::Red).bg(Color::DarkGray)
}

fn clear_style() -> Style {
    Style::default().fg(Color::Red)
}

#[cfg(test)]
#[path = "picker_render_tests.rs"]
mod picker_render_tests;
