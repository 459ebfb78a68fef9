//! View records handed to renderers
//!
//! Pickers never draw themselves. They describe what should be visible and a
//! renderer turns the description into widgets.

use ratatui::layout::Rect;

use super::item::{Item, ItemId};

/// Visual state of one suggestion row
///
/// `highlighted` and `hovered` are never both set: hover styling is
/// suppressed on the keyboard-highlighted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowView<'a> {
    pub item: &'a Item,
    pub highlighted: bool,
    pub hovered: bool,
}

/// Screen regions of a picker's interactive parts, recorded by the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerRegions {
    /// The host input line
    pub input: Option<Rect>,
    /// Dismiss controls of rendered chips
    pub chip_dismiss: Vec<(ItemId, Rect)>,
    /// Clear control of single pickers without chips
    pub clear: Option<Rect>,
}

/// Pointer target inside a picker, in hit-test priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerHit {
    Row(usize),
    ChipDismiss(ItemId),
    Clear,
    Input,
}
