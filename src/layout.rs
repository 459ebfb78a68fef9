//! Layout module for anchoring floating suggestion lists
//!
//! A suggestion list is drawn as an overlay attached to its input's current
//! rectangle. The overlay lives in a portal host: the whole terminal frame, or
//! the bounds of the open dialog that contains the input so the list stays on
//! the dialog's layer.

use ratatui::layout::Rect;

use crate::widgets::popup;

/// Rows taken by the dropdown border
const DROPDOWN_BORDER_HEIGHT: u16 = 2;

/// Where a floating list is inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalHost {
    /// Top-level frame
    Viewport(Rect),
    /// Open modal dialog containing the input
    Modal(Rect),
}

impl PortalHost {
    pub fn bounds(&self) -> Rect {
        match self {
            PortalHost::Viewport(rect) | PortalHost::Modal(rect) => *rect,
        }
    }

    pub fn is_modal(&self) -> bool {
        matches!(self, PortalHost::Modal(_))
    }
}

/// On-screen geometry of a host input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub input: Rect,
    pub host: PortalHost,
}

impl Anchor {
    pub fn new(input: Rect, host: PortalHost) -> Self {
        Self { input, host }
    }

    /// Same input, with the host swapped for new viewport bounds
    ///
    /// Modal hosts keep their own bounds; they are re-laid out by whoever owns
    /// the dialog.
    pub fn with_viewport(self, viewport: Rect) -> Self {
        match self.host {
            PortalHost::Viewport(_) => Self::new(self.input, PortalHost::Viewport(viewport)),
            PortalHost::Modal(_) => self,
        }
    }
}

/// Compute the dropdown rectangle for `rows` suggestions
///
/// The list matches the input's width and opens below it, flipping above
/// when there is more room there. It never leaves the portal host.
pub fn dropdown_area(anchor: &Anchor, rows: usize, max_visible_rows: u16) -> Rect {
    let visible = (rows.min(max_visible_rows as usize)) as u16;
    let height = visible + DROPDOWN_BORDER_HEIGHT;
    let host = anchor.host.bounds();
    let width = anchor.input.width;

    let below = popup::popup_below_anchor(anchor.input, host, width, height);
    if below.height >= height {
        return below;
    }

    let above = popup::popup_above_anchor(anchor.input, host, width, height);
    if above.height > below.height { above } else { below }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Index of the dropdown row under (column, row), ignoring the border
pub fn dropdown_row_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    let inner = Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if !rect_contains(inner, column, row) {
        return None;
    }
    Some((row - inner.y) as usize)
}
