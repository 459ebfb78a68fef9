//! Picker state machine
//!
//! Owns one input's selection and suggestion list. Every handler is
//! synchronous: searches are described as [`SearchRequest`]s for the caller to
//! run, and their results come back through [`Picker::apply_response`].

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;

use crate::fetch::{FetchError, Fetcher};
use crate::layout::{self, Anchor};

use super::debounce::SearchDebouncer;
use super::item::{Item, ItemId};
use super::options::{PickerMode, PickerOptions};
use super::request::{InputId, SearchRequest};
use super::selection::{PickerValue, SelectionSet};
use super::view::{PickerHit, PickerRegions, RowView};

/// Whether a key was handled by the picker or should reach the host input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    Ignored,
}

/// Notifications for the host, drained with [`Picker::take_events`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// An item was committed
    Picked(Item),
    /// The picker replaced the input text
    TextReplaced(String),
}

pub struct Picker {
    input: InputId,
    options: PickerOptions,
    fetcher: Arc<dyn Fetcher>,
    text: String,
    selection: SelectionSet,
    debouncer: SearchDebouncer,
    latest_seq: u64,
    issued: Option<SearchRequest>,
    suggestions: Vec<Item>,
    open: bool,
    active: Option<usize>,
    hovered: Option<usize>,
    highlight_on_open: bool,
    anchor: Option<Anchor>,
    list_area: Option<Rect>,
    regions: PickerRegions,
    events: Vec<PickerEvent>,
}

impl Picker {
    pub fn new(input: InputId, options: PickerOptions, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            input,
            selection: SelectionSet::new(options.mode),
            debouncer: SearchDebouncer::new(options.debounce),
            options,
            fetcher,
            text: String::new(),
            latest_seq: 0,
            issued: None,
            suggestions: Vec::new(),
            open: false,
            active: None,
            hovered: None,
            highlight_on_open: false,
            anchor: None,
            list_area: None,
            regions: PickerRegions::default(),
            events: Vec::new(),
        }
    }

    pub fn input_id(&self) -> InputId {
        self.input
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    /// Current input text (transient, may differ from the selection)
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> &[Item] {
        self.selection.items()
    }

    /// Committed value: ordered ids in multi mode, the sole id in single mode
    pub fn value(&self) -> PickerValue {
        self.selection.value()
    }

    pub fn suggestions(&self) -> &[Item] {
        &self.suggestions
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the list currently follows scroll and resize changes
    pub fn is_tracking(&self) -> bool {
        self.open && self.list_area.is_some()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Dropdown rectangle while the list is open and anchored
    pub fn list_area(&self) -> Option<Rect> {
        self.list_area
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    pub fn regions(&self) -> &PickerRegions {
        &self.regions
    }

    /// Deadline of the pending debounced search
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.due_at()
    }

    fn query(&self) -> &str {
        self.text.trim()
    }

    fn satisfies_min_chars(&self, query: &str) -> bool {
        query.chars().count() >= self.options.min_chars
    }

    // ---- search cycle ----

    /// The host input's text changed
    pub fn handle_text_changed(&mut self, text: &str, now: Instant) {
        self.text = text.to_string();
        self.highlight_on_open = false;

        let query = self.query().to_string();
        if !self.satisfies_min_chars(&query) {
            self.dismiss();
            return;
        }
        self.debouncer.schedule(query, now);
    }

    /// The host input gained focus (or was clicked)
    pub fn handle_focus(&mut self) {
        self.search_now();
    }

    /// Issue a search for the current query right away, skipping the delay
    ///
    /// Returns false when the query is shorter than `min_chars`.
    pub fn search_now(&mut self) -> bool {
        self.debouncer.cancel();
        let query = self.query().to_string();
        if !self.satisfies_min_chars(&query) {
            return false;
        }
        self.issue(query);
        true
    }

    /// Fire the debounced search once its delay has elapsed
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.take_due(now) {
            self.issue(query);
        }
    }

    fn issue(&mut self, query: String) {
        self.latest_seq = self.latest_seq.wrapping_add(1);
        log::debug!(
            "picker {:?}: search #{} for {:?}",
            self.input,
            self.latest_seq,
            query
        );
        self.issued = Some(SearchRequest {
            input: self.input,
            seq: self.latest_seq,
            query,
            fetcher: Arc::clone(&self.fetcher),
        });
    }

    /// Make every in-flight search stale
    fn invalidate(&mut self) {
        self.latest_seq = self.latest_seq.wrapping_add(1);
        self.issued = None;
    }

    /// Take the most recently issued search that has not been dispatched yet
    pub fn take_request(&mut self) -> Option<SearchRequest> {
        self.issued.take()
    }

    /// Apply a search result; returns false when it was stale and dropped
    pub fn apply_response(&mut self, seq: u64, result: Result<Vec<Item>, FetchError>) -> bool {
        if seq != self.latest_seq {
            log::debug!(
                "picker {:?}: dropping stale result #{} (latest #{})",
                self.input,
                seq,
                self.latest_seq
            );
            return false;
        }

        let items = match result {
            Ok(items) => items,
            Err(e) => {
                log::debug!("picker {:?}: search #{} failed: {}", self.input, seq, e);
                Vec::new()
            }
        };
        self.show_suggestions(items);
        true
    }

    fn show_suggestions(&mut self, mut items: Vec<Item>) {
        items.truncate(self.options.max_suggestions);
        self.suggestions = items;
        self.active = None;
        self.hovered = None;

        if self.suggestions.is_empty() {
            self.close();
            return;
        }

        self.open = true;
        self.reposition();
        if self.highlight_on_open {
            self.active = Some(0);
            self.highlight_on_open = false;
        }
    }

    // ---- list visibility ----

    fn close(&mut self) {
        self.open = false;
        self.suggestions.clear();
        self.active = None;
        self.hovered = None;
        self.highlight_on_open = false;
        self.list_area = None;
    }

    /// Close the list and forget pending or in-flight searches
    ///
    /// Used for Escape, outside interactions and another picker opening, so
    /// a late result cannot pop the list back up.
    pub fn dismiss(&mut self) {
        self.debouncer.cancel();
        self.invalidate();
        self.close();
    }

    // ---- positioning ----

    /// Record the input's current geometry; an open list follows it
    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = Some(anchor);
        if self.open {
            self.reposition();
        }
    }

    /// The viewport was resized or scrolled
    pub fn viewport_changed(&mut self, viewport: Rect) {
        if !self.open {
            return;
        }
        if let Some(anchor) = self.anchor {
            self.anchor = Some(anchor.with_viewport(viewport));
        }
        self.reposition();
    }

    fn reposition(&mut self) {
        self.list_area = self.anchor.map(|anchor| {
            layout::dropdown_area(
                &anchor,
                self.suggestions.len(),
                self.options.max_visible_rows,
            )
        });
    }

    pub fn set_regions(&mut self, regions: PickerRegions) {
        self.regions = regions;
    }

    // ---- keyboard ----

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Down => {
                if !self.open {
                    self.highlight_on_open = self.search_now();
                } else if !self.suggestions.is_empty() {
                    let last = self.suggestions.len() - 1;
                    self.active = Some(match self.active {
                        None => 0,
                        Some(i) => (i + 1).min(last),
                    });
                }
                KeyOutcome::Consumed
            }
            KeyCode::Up => {
                if self.open && !self.suggestions.is_empty() {
                    self.active = Some(self.active.map_or(0, |i| i.saturating_sub(1)));
                }
                KeyOutcome::Consumed
            }
            KeyCode::Enter => match self.active {
                Some(index) if self.open => {
                    self.choose_index(index);
                    KeyOutcome::Consumed
                }
                _ => KeyOutcome::Ignored,
            },
            KeyCode::Esc => {
                let was_open = self.open;
                self.dismiss();
                if was_open {
                    KeyOutcome::Consumed
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyCode::Backspace if self.text.is_empty() && self.options.shows_chips() => {
                match self.selection.items().last().map(|item| item.id) {
                    Some(id) => {
                        self.remove(id);
                        KeyOutcome::Consumed
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }

    // ---- pointer ----

    /// Update the hovered row; `None` when the pointer left the list
    pub fn hover(&mut self, index: Option<usize>) {
        self.hovered = index.filter(|i| self.open && *i < self.suggestions.len());
    }

    /// Which interactive part of this picker is at (column, row)
    pub fn hit_test(&self, column: u16, row: u16) -> Option<PickerHit> {
        if let Some(area) = self.list_area.filter(|_| self.open) {
            if layout::rect_contains(area, column, row) {
                return layout::dropdown_row_at(area, column, row)
                    .map(|i| i + self.scroll_offset())
                    .filter(|i| *i < self.suggestions.len())
                    .map(PickerHit::Row)
                    .or(Some(PickerHit::Input));
            }
        }
        if let Some((id, _)) = self
            .regions
            .chip_dismiss
            .iter()
            .find(|(_, rect)| layout::rect_contains(*rect, column, row))
        {
            return Some(PickerHit::ChipDismiss(*id));
        }
        if self
            .regions
            .clear
            .is_some_and(|rect| layout::rect_contains(rect, column, row))
        {
            return Some(PickerHit::Clear);
        }
        if self
            .regions
            .input
            .is_some_and(|rect| layout::rect_contains(rect, column, row))
        {
            return Some(PickerHit::Input);
        }
        None
    }

    // ---- commit and removal ----

    /// Commit the suggestion at `index`
    pub fn choose_index(&mut self, index: usize) {
        if let Some(item) = self.suggestions.get(index).cloned() {
            self.choose(item);
        }
    }

    /// Commit `item` to the selection
    pub fn choose(&mut self, item: Item) {
        match self.options.mode {
            PickerMode::Multi => {
                self.selection.insert(item.clone());
                self.replace_text(String::new());
            }
            PickerMode::Single => {
                self.selection.insert(item.clone());
                if self.options.chip_single {
                    self.replace_text(String::new());
                } else {
                    self.replace_text(item.label.clone());
                }
            }
        }

        self.dismiss();

        if let Some(on_pick) = self.options.on_pick.as_mut() {
            on_pick(&item);
        }
        self.events.push(PickerEvent::Picked(item));
    }

    /// Dismiss the chip for `id`
    ///
    /// Leaves the suggestion list untouched and never searches.
    pub fn remove(&mut self, id: ItemId) {
        let removed = match self.options.mode {
            PickerMode::Multi => self.selection.remove(id),
            PickerMode::Single => {
                let had = self.selection.contains(id);
                self.selection.clear();
                had
            }
        };
        if removed && !self.text.is_empty() {
            self.replace_text(String::new());
        }
    }

    /// Activate the clear control: drop text and selection, then re-run the
    /// focus search so pickers with `min_chars = 0` reopen
    pub fn clear(&mut self) {
        self.selection.clear();
        self.replace_text(String::new());
        self.dismiss();
        self.search_now();
    }

    /// Whether the clear control should currently be shown
    pub fn shows_clear_control(&self) -> bool {
        self.options.has_clear_control() && (!self.text.is_empty() || !self.selection.is_empty())
    }

    fn replace_text(&mut self, text: String) {
        if self.text == text {
            return;
        }
        self.text = text.clone();
        self.events.push(PickerEvent::TextReplaced(text));
    }

    pub fn take_events(&mut self) -> Vec<PickerEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- view ----

    /// Suggestion rows with their visual state
    pub fn rows(&self) -> Vec<RowView<'_>> {
        self.suggestions
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let highlighted = self.active == Some(i);
                RowView {
                    item,
                    highlighted,
                    hovered: !highlighted && self.hovered == Some(i),
                }
            })
            .collect()
    }

    /// Index of the first suggestion visible in the dropdown
    ///
    /// The window slides just far enough to keep the highlighted row visible.
    /// Its height is that of the placed list, which may be clamped below
    /// `max_visible_rows` by a short host.
    pub fn scroll_offset(&self) -> usize {
        let visible = self
            .list_area()
            .map_or(self.options.max_visible_rows, |area| area.height.saturating_sub(2))
            .max(1) as usize;
        match self.active {
            Some(i) if i >= visible => i + 1 - visible,
            _ => 0,
        }
    }

    /// Items rendered as chips, in display order
    pub fn chips(&self) -> &[Item] {
        if self.options.shows_chips() {
            self.selection.items()
        } else {
            &[]
        }
    }
}

#[cfg(test)]
#[path = "picker_state_tests.rs"]
mod picker_state_tests;
