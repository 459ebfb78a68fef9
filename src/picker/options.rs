//! Picker construction options

use std::fmt;
use std::time::Duration;

use super::item::Item;

/// Delay between the last keystroke and the search it triggers
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Maximum number of suggestions kept from a single search
pub const DEFAULT_MAX_SUGGESTIONS: usize = 25;

/// Minimum query length before a search is issued
pub const DEFAULT_MIN_CHARS: usize = 2;

/// Suggestion rows visible at once in the dropdown
pub const DEFAULT_MAX_VISIBLE_ROWS: u16 = 10;

/// Selection cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerMode {
    /// At most one selected item
    #[default]
    Single,
    /// Any number of distinct items, shown as chips
    Multi,
}

/// Callback invoked synchronously after each commit
pub type PickCallback = Box<dyn FnMut(&Item)>;

/// How a picker searches and commits
pub struct PickerOptions {
    pub mode: PickerMode,
    /// Query length below which no search is issued; 0 searches the empty query
    pub min_chars: usize,
    /// Render the single-mode selection as a removable chip instead of input text
    pub chip_single: bool,
    pub debounce: Duration,
    pub max_suggestions: usize,
    pub max_visible_rows: u16,
    pub(crate) on_pick: Option<PickCallback>,
}

impl fmt::Debug for PickerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerOptions")
            .field("mode", &self.mode)
            .field("min_chars", &self.min_chars)
            .field("chip_single", &self.chip_single)
            .field("debounce", &self.debounce)
            .field("max_suggestions", &self.max_suggestions)
            .field("max_visible_rows", &self.max_visible_rows)
            .field("on_pick", &self.on_pick.is_some())
            .finish()
    }
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            mode: PickerMode::Single,
            min_chars: DEFAULT_MIN_CHARS,
            chip_single: false,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
            on_pick: None,
        }
    }
}

impl PickerOptions {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn multi() -> Self {
        Self {
            mode: PickerMode::Multi,
            ..Self::default()
        }
    }

    pub fn min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn chip_single(mut self, chip_single: bool) -> Self {
        self.chip_single = chip_single;
        self
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    pub fn max_visible_rows(mut self, rows: u16) -> Self {
        self.max_visible_rows = rows.max(1);
        self
    }

    pub fn on_pick(mut self, callback: impl FnMut(&Item) + 'static) -> Self {
        self.on_pick = Some(Box::new(callback));
        self
    }

    /// Whether selections are displayed as chips
    pub fn shows_chips(&self) -> bool {
        self.mode == PickerMode::Multi || self.chip_single
    }

    /// Whether the input carries a clear ("×") control
    pub fn has_clear_control(&self) -> bool {
        self.mode == PickerMode::Single && !self.chip_single
    }
}
