use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app_state::{App, CO_THEME};
use crate::layout::{Anchor, PortalHost};
use crate::picker::{FieldView, InputId, PickerRegions, render_dropdown, render_field};
use crate::widgets::popup;

const FORM_MAX_WIDTH: u16 = 60;
const FIELD_HEIGHT: u16 = 3;
const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 16;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area != self.viewport {
            self.viewport = area;
            self.registry.viewport_changed(area);
        }

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                " Assign position ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            layout[0],
        );

        let form_inputs = self.form_inputs();
        let form_interactive = !self.dialog_open;
        for (input, row) in form_inputs.iter().zip(&layout[1..4]) {
            let field_area = Rect {
                width: row.width.min(FORM_MAX_WIDTH),
                ..*row
            };
            self.render_input(
                frame,
                *input,
                field_area,
                PortalHost::Viewport(area),
                form_interactive,
            );
        }

        self.render_help_line(frame, layout[5]);

        // Lists float over every field, so they go last
        for input in form_inputs {
            if let Some(picker) = self.registry.picker(*input) {
                render_dropdown(picker, frame);
            }
        }

        if self.dialog_open {
            self.render_dialog(frame, area);
        }
    }

    /// Draw one field; fields under an open dialog are drawn but not clickable
    fn render_input(
        &mut self,
        frame: &mut Frame,
        input: InputId,
        area: Rect,
        host: PortalHost,
        interactive: bool,
    ) {
        let (Some(field), Some(picker)) = (self.field(input), self.registry.picker(input)) else {
            return;
        };
        let view = FieldView {
            title: field.title,
            text: field.text(),
            cursor: (self.focus == input).then(|| field.cursor()),
        };
        let mut regions = render_field(picker, frame, area, &view);
        if !interactive {
            regions = PickerRegions::default();
        }

        self.registry.set_regions(input, regions);
        self.registry.set_anchor(input, Anchor::new(area, host));
    }

    fn render_dialog(&mut self, frame: &mut Frame, area: Rect) {
        let dialog = popup::centered_popup(area, DIALOG_WIDTH, DIALOG_HEIGHT);
        self.dialog_area = Some(dialog);
        popup::clear_area(frame, dialog);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Co-theme ")
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let layout = Layout::vertical([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .horizontal_margin(1)
        .split(inner);

        self.render_input(frame, CO_THEME, layout[0], PortalHost::Modal(dialog), true);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Esc close",
                Style::default().fg(Color::DarkGray),
            )),
            layout[2],
        );

        if let Some(picker) = self.registry.picker(CO_THEME) {
            render_dropdown(picker, frame);
        }
    }

    fn render_help_line(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default().fg(Color::Cyan);
        let text_style = Style::default().fg(Color::DarkGray);
        let mut spans = vec![
            Span::styled("Tab", key_style),
            Span::styled(" next  ", text_style),
            Span::styled("↑↓", key_style),
            Span::styled(" choose  ", text_style),
            Span::styled("F2", key_style),
            Span::styled(" co-theme  ", text_style),
            Span::styled("Ctrl+S", key_style),
            Span::styled(" submit  ", text_style),
            Span::styled("Esc", key_style),
            Span::styled(" quit", text_style),
        ];

        let status = self.status();
        if !status.is_empty() {
            spans.push(Span::styled(
                format!("  {}", status),
                Style::default().fg(Color::Green),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
