//! Incremental-search picker
//!
//! A picker attaches to a single-line input, searches as the user types,
//! shows suggestions in a floating list and commits one (single mode) or
//! several (multi mode) items.

mod debounce;
mod item;
mod options;
mod picker_render;
mod picker_state;
mod request;
mod selection;
mod view;

pub use debounce::SearchDebouncer;
pub use item::{Item, ItemId};
pub use options::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_SUGGESTIONS, DEFAULT_MAX_VISIBLE_ROWS, DEFAULT_MIN_CHARS,
    PickCallback, PickerMode, PickerOptions,
};
pub use picker_render::{FieldView, render_dropdown, render_field};
pub use picker_state::{KeyOutcome, Picker, PickerEvent};
pub use request::{InputId, SearchRequest, SearchResponse};
pub use selection::{PickerValue, SelectionSet};
pub use view::{PickerHit, PickerRegions, RowView};
