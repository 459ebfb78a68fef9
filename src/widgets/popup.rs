use ratatui::{Frame, layout::Rect, widgets::Clear};

pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Place a popup directly under `anchor`, clamped to `host`
pub fn popup_below_anchor(anchor: Rect, host: Rect, width: u16, height: u16) -> Rect {
    let popup_y = anchor.bottom().max(host.y);
    let space_below = host.bottom().saturating_sub(popup_y);
    let (popup_x, popup_width) = clamp_span(anchor.x, width, host.x, host.width);

    Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: height.min(space_below),
    }
}

/// Place a popup directly over `anchor`, clamped to `host`
pub fn popup_above_anchor(anchor: Rect, host: Rect, width: u16, height: u16) -> Rect {
    let space_above = anchor.y.saturating_sub(host.y);
    let popup_height = height.min(space_above);
    let (popup_x, popup_width) = clamp_span(anchor.x, width, host.x, host.width);

    Rect {
        x: popup_x,
        y: anchor.y.saturating_sub(popup_height),
        width: popup_width,
        height: popup_height,
    }
}

// Fit a horizontal span inside [host_x, host_x + host_width), shifting left before shrinking
fn clamp_span(x: u16, width: u16, host_x: u16, host_width: u16) -> (u16, u16) {
    let width = width.min(host_width);
    let host_right = host_x.saturating_add(host_width);
    let x = x.max(host_x).min(host_right.saturating_sub(width));
    (x, width)
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod popup_tests;
