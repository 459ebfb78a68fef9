use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::fetch::Fetcher;
use crate::layout::Anchor;
use crate::picker::{
    InputId, Item, KeyOutcome, Picker, PickerEvent, PickerHit, PickerOptions, PickerRegions,
    PickerValue, SearchRequest, SearchResponse,
};

/// Host-facing notifications, drained with [`PickerRegistry::drain_events`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// An item was committed on `input`
    Picked { input: InputId, item: Item },
    /// The host input's text must be replaced
    SetText { input: InputId, text: String },
}

#[derive(Default)]
pub struct PickerRegistry {
    pickers: BTreeMap<InputId, Picker>,
    focused: Option<InputId>,
}

impl PickerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a picker to `input`
    ///
    /// Attaching an input that already has a picker keeps the existing
    /// instance and returns false.
    pub fn attach(
        &mut self,
        input: InputId,
        options: PickerOptions,
        fetcher: Arc<dyn Fetcher>,
    ) -> bool {
        if self.pickers.contains_key(&input) {
            log::debug!("picker {:?} already attached, keeping it", input);
            return false;
        }
        self.pickers.insert(input, Picker::new(input, options, fetcher));
        true
    }

    /// Tear down the picker on `input`; its in-flight responses are dropped
    pub fn detach(&mut self, input: InputId) -> bool {
        if self.focused == Some(input) {
            self.focused = None;
        }
        self.pickers.remove(&input).is_some()
    }

    pub fn is_attached(&self, input: InputId) -> bool {
        self.pickers.contains_key(&input)
    }

    pub fn picker(&self, input: InputId) -> Option<&Picker> {
        self.pickers.get(&input)
    }

    pub fn picker_mut(&mut self, input: InputId) -> Option<&mut Picker> {
        self.pickers.get_mut(&input)
    }

    pub fn pickers(&self) -> impl Iterator<Item = &Picker> {
        self.pickers.values()
    }

    pub fn focused(&self) -> Option<InputId> {
        self.focused
    }

    /// Input whose list is currently open, if any
    pub fn open_input(&self) -> Option<InputId> {
        self.pickers
            .values()
            .find(|picker| picker.is_open())
            .map(Picker::input_id)
    }

    /// Value of the picker on `input`
    pub fn value(&self, input: InputId) -> Option<PickerValue> {
        self.pickers.get(&input).map(Picker::value)
    }

    // ---- focus ----

    /// Focus moved to `input`, or to something that is not a picker
    ///
    /// Lists of every other picker close. Focusing a picker also runs its
    /// focus search.
    pub fn focus(&mut self, input: Option<InputId>) {
        self.focused = input.filter(|id| self.pickers.contains_key(id));
        self.dismiss_others(self.focused);

        if let Some(picker) = self.focused.and_then(|id| self.pickers.get_mut(&id)) {
            picker.handle_focus();
        }
    }

    /// Close every open list, e.g. for a press outside an open dialog
    pub fn dismiss_all(&mut self) {
        self.dismiss_others(None);
    }

    // ---- routed input ----

    pub fn text_changed(&mut self, input: InputId, text: &str, now: Instant) {
        if let Some(picker) = self.pickers.get_mut(&input) {
            picker.handle_text_changed(text, now);
        }
    }

    pub fn handle_key(&mut self, input: InputId, key: KeyEvent) -> KeyOutcome {
        let Some(picker) = self.pickers.get_mut(&input) else {
            return KeyOutcome::Ignored;
        };
        let outcome = picker.handle_key(key);
        self.enforce_single_open(input);
        outcome
    }

    /// Pointer pressed at (column, row)
    ///
    /// Returns the picker part that was hit. Every picker that was not hit
    /// has its list dismissed. Chip dismiss and clear controls act on their
    /// own picker only and leave other lists alone.
    pub fn pointer_down(&mut self, column: u16, row: u16) -> Option<(InputId, PickerHit)> {
        let hit = self.hit_test(column, row);

        match hit {
            Some((input, PickerHit::Row(index))) => {
                self.dismiss_others(Some(input));
                if let Some(picker) = self.pickers.get_mut(&input) {
                    picker.choose_index(index);
                }
            }
            Some((input, PickerHit::ChipDismiss(id))) => {
                if let Some(picker) = self.pickers.get_mut(&input) {
                    picker.remove(id);
                }
            }
            Some((input, PickerHit::Clear)) => {
                if let Some(picker) = self.pickers.get_mut(&input) {
                    picker.clear();
                }
            }
            Some((input, PickerHit::Input)) => {
                let list_hit = self
                    .pickers
                    .get(&input)
                    .and_then(Picker::list_area)
                    .is_some_and(|area| crate::layout::rect_contains(area, column, row));
                if list_hit {
                    // Border of the open list: keep it open
                    self.dismiss_others(Some(input));
                } else {
                    self.focus(Some(input));
                }
            }
            None => self.dismiss_all(),
        }

        hit
    }

    /// Pointer moved to (column, row); updates row hover states
    pub fn pointer_move(&mut self, column: u16, row: u16) {
        for picker in self.pickers.values_mut().filter(|p| p.is_open()) {
            let index = match picker.hit_test(column, row) {
                Some(PickerHit::Row(index)) => Some(index),
                _ => None,
            };
            picker.hover(index);
        }
    }

    fn hit_test(&self, column: u16, row: u16) -> Option<(InputId, PickerHit)> {
        // Open lists float above every input
        let open_hit = self
            .pickers
            .values()
            .filter(|picker| picker.is_open())
            .filter(|picker| {
                picker
                    .list_area()
                    .is_some_and(|area| crate::layout::rect_contains(area, column, row))
            })
            .find_map(|picker| {
                picker
                    .hit_test(column, row)
                    .map(|hit| (picker.input_id(), hit))
            });

        open_hit.or_else(|| {
            self.pickers.values().find_map(|picker| {
                picker
                    .hit_test(column, row)
                    .map(|hit| (picker.input_id(), hit))
            })
        })
    }

    // ---- search cycle ----

    /// Expire due debounce delays and collect every issued search
    pub fn poll_requests(&mut self, now: Instant) -> Vec<SearchRequest> {
        self.pickers
            .values_mut()
            .filter_map(|picker| {
                picker.tick(now);
                picker.take_request()
            })
            .collect()
    }

    /// Earliest pending debounce deadline across all pickers
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pickers
            .values()
            .filter_map(Picker::next_deadline)
            .min()
    }

    /// Route a fetch response to its picker
    ///
    /// Returns true when the response was applied. Responses for detached
    /// inputs and stale responses are dropped.
    pub fn apply_response(&mut self, response: SearchResponse) -> bool {
        let Some(picker) = self.pickers.get_mut(&response.input) else {
            log::debug!(
                "dropping search #{} for detached input {:?}",
                response.seq,
                response.input
            );
            return false;
        };

        let applied = picker.apply_response(response.seq, response.result);
        if applied {
            self.enforce_single_open(response.input);
        }
        applied
    }

    // ---- positioning ----

    pub fn set_anchor(&mut self, input: InputId, anchor: Anchor) {
        if let Some(picker) = self.pickers.get_mut(&input) {
            picker.set_anchor(anchor);
        }
    }

    pub fn set_regions(&mut self, input: InputId, regions: PickerRegions) {
        if let Some(picker) = self.pickers.get_mut(&input) {
            picker.set_regions(regions);
        }
    }

    /// The viewport was resized or scrolled; open lists follow their inputs
    pub fn viewport_changed(&mut self, viewport: Rect) {
        for picker in self.pickers.values_mut() {
            picker.viewport_changed(viewport);
        }
    }

    // ---- events ----

    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        self.pickers
            .values_mut()
            .flat_map(|picker| {
                let input = picker.input_id();
                picker
                    .take_events()
                    .into_iter()
                    .map(move |event| match event {
                        PickerEvent::Picked(item) => RegistryEvent::Picked { input, item },
                        PickerEvent::TextReplaced(text) => RegistryEvent::SetText { input, text },
                    })
            })
            .collect()
    }

    // ---- exclusivity ----

    /// Keep `input`'s list the only open one
    fn enforce_single_open(&mut self, input: InputId) {
        if self.pickers.get(&input).is_some_and(Picker::is_open) {
            self.dismiss_others(Some(input));
        }
    }

    // Also forgets pending searches so a late result cannot reopen a list
    fn dismiss_others(&mut self, keep: Option<InputId>) {
        for picker in self.pickers.values_mut() {
            if Some(picker.input_id()) != keep {
                picker.dismiss();
            }
        }
    }
}

#[cfg(test)]
#[path = "registry_state_tests.rs"]
mod registry_state_tests;
