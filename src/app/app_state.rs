use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use ratatui::layout::Rect;
use serde::Serialize;

use super::input_state::InputState;
use crate::catalog::Catalog;
use crate::config::{LocalConfig, PickerConfig};
use crate::fetch::{Endpoint, Fetcher, HttpFetcher, LocalFetcher};
use crate::picker::{
    InputId, ItemId, PickerOptions, PickerRegions, PickerValue, SearchRequest, SearchResponse,
};
use crate::registry::{PickerRegistry, RegistryEvent};

pub const PERSON: InputId = InputId(1);
pub const THEME: InputId = InputId(2);
pub const STRUCTURES: InputId = InputId(3);
/// Lives in the dialog opened with F2
pub const CO_THEME: InputId = InputId(4);

const FORM_INPUTS: [InputId; 3] = [PERSON, THEME, STRUCTURES];
const DIALOG_INPUTS: [InputId; 1] = [CO_THEME];

/// Fetchers behind the form's pickers
#[derive(Clone)]
pub struct Sources {
    pub people: Arc<dyn Fetcher>,
    pub themes: Arc<dyn Fetcher>,
    pub structures: Arc<dyn Fetcher>,
}

impl Sources {
    /// Search an in-memory catalog
    pub fn local(catalog: Catalog, config: &LocalConfig) -> Self {
        let fetcher = |items| -> Arc<dyn Fetcher> {
            Arc::new(
                LocalFetcher::new(items)
                    .with_strategy(config.matching)
                    .with_limit(config.limit),
            )
        };
        Self {
            people: fetcher(catalog.people),
            themes: fetcher(catalog.themes),
            structures: fetcher(catalog.structures),
        }
    }

    /// Search the backend endpoints, sharing one HTTP client
    pub fn http(base_url: &str, token: Option<String>) -> Self {
        let client = reqwest::Client::new();
        let fetcher = |endpoint| -> Arc<dyn Fetcher> {
            Arc::new(
                HttpFetcher::new(base_url, endpoint)
                    .with_client(client.clone())
                    .with_token(token.clone()),
            )
        };
        Self {
            people: fetcher(Endpoint::People),
            themes: fetcher(Endpoint::Themes),
            structures: fetcher(Endpoint::Structures),
        }
    }
}

/// Committed form values, printed as JSON on submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub person: Option<ItemId>,
    pub theme: Option<ItemId>,
    pub structures: Vec<ItemId>,
    pub co_theme: Option<ItemId>,
}

/// Application state
pub struct App {
    pub registry: PickerRegistry,
    pub fields: Vec<InputState>,
    pub focus: InputId,
    pub dialog_open: bool,
    /// Area of the dialog as last rendered
    pub dialog_area: Option<Rect>,
    pub viewport: Rect,
    return_focus: InputId,
    status: Rc<RefCell<String>>,
    should_quit: bool,
    submission: Option<Submission>,
}

impl App {
    pub fn new(sources: Sources, config: &PickerConfig) -> Self {
        let status = Rc::new(RefCell::new(String::new()));
        let tuned = |options: PickerOptions| {
            let status = Rc::clone(&status);
            options
                .debounce(std::time::Duration::from_millis(config.debounce_ms))
                .max_suggestions(config.max_suggestions)
                .max_visible_rows(config.max_visible_rows)
                .on_pick(move |item| *status.borrow_mut() = format!("Picked {}", item.label))
        };

        let mut registry = PickerRegistry::new();
        registry.attach(PERSON, tuned(PickerOptions::single().min_chars(0)), sources.people);
        registry.attach(
            THEME,
            tuned(PickerOptions::single().min_chars(0)),
            Arc::clone(&sources.themes),
        );
        registry.attach(STRUCTURES, tuned(PickerOptions::multi()), sources.structures);
        registry.attach(
            CO_THEME,
            tuned(PickerOptions::single().min_chars(0).chip_single(true)),
            sources.themes,
        );

        Self {
            registry,
            fields: vec![
                InputState::new(PERSON, "Person"),
                InputState::new(THEME, "Theme"),
                InputState::new(STRUCTURES, "Structures"),
                InputState::new(CO_THEME, "Co-theme"),
            ],
            focus: PERSON,
            dialog_open: false,
            dialog_area: None,
            viewport: Rect::default(),
            return_focus: PERSON,
            status,
            should_quit: false,
            submission: None,
        }
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Values submitted with Ctrl+S, if the form was submitted
    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    pub fn field(&self, input: InputId) -> Option<&InputState> {
        self.fields.iter().find(|field| field.input == input)
    }

    pub fn field_mut(&mut self, input: InputId) -> Option<&mut InputState> {
        self.fields.iter_mut().find(|field| field.input == input)
    }

    /// Inputs that can take focus right now
    pub fn focusable_inputs(&self) -> &'static [InputId] {
        if self.dialog_open {
            &DIALOG_INPUTS
        } else {
            &FORM_INPUTS
        }
    }

    pub fn form_inputs(&self) -> &'static [InputId] {
        &FORM_INPUTS
    }

    // ---- focus ----

    /// Move focus to `input`, running its focus search
    pub fn focus_input(&mut self, input: InputId) {
        self.focus = input;
        self.registry.focus(Some(input));
    }

    /// Tab / Shift+Tab
    pub fn cycle_focus(&mut self, forward: bool) {
        let inputs = self.focusable_inputs();
        let current = inputs.iter().position(|id| *id == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % inputs.len()
        } else {
            (current + inputs.len() - 1) % inputs.len()
        };
        self.focus_input(inputs[next]);
    }

    pub fn open_dialog(&mut self) {
        if self.dialog_open {
            return;
        }
        self.return_focus = self.focus;
        self.dialog_open = true;
        self.focus_input(CO_THEME);
    }

    /// Close the dialog and hand focus back to the form field that had it
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.dialog_area = None;
        self.registry.dismiss_all();
        self.registry.set_regions(CO_THEME, PickerRegions::default());
        self.focus_input(self.return_focus);
    }

    // ---- form values ----

    pub fn values(&self) -> Submission {
        let single = |input| match self.registry.value(input) {
            Some(PickerValue::Single(id)) => id,
            _ => None,
        };
        Submission {
            person: single(PERSON),
            theme: single(THEME),
            structures: self
                .registry
                .value(STRUCTURES)
                .map(|value| value.ids())
                .unwrap_or_default(),
            co_theme: single(CO_THEME),
        }
    }

    pub fn submit(&mut self) {
        self.submission = Some(self.values());
        self.should_quit = true;
    }

    // ---- search plumbing ----

    /// Searches whose debounce delay has expired, ready for the fetch worker
    pub fn poll_requests(&mut self, now: Instant) -> Vec<SearchRequest> {
        self.registry.poll_requests(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.registry.next_deadline()
    }

    pub fn apply_response(&mut self, response: SearchResponse) {
        self.registry.apply_response(response);
    }

    /// Apply text replacements requested by pickers to their fields
    pub fn apply_registry_events(&mut self) {
        for event in self.registry.drain_events() {
            match event {
                RegistryEvent::SetText { input, text } => {
                    if let Some(field) = self.field_mut(input) {
                        field.set_text(&text);
                    }
                }
                RegistryEvent::Picked { input, item } => {
                    log::debug!("{:?} picked {} ({})", input, item.label, item.id);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
