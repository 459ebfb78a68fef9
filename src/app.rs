//! Demo form: assign a person, a theme and structures to a position
//!
//! Four pickers share one screen. Three sit on the form and a fourth lives
//! in a dialog opened with F2, so its list is anchored inside the dialog.

mod app_events;
mod app_render;
mod app_state;
mod input_state;
mod mouse_click;
mod mouse_hover;

pub use app_state::{App, CO_THEME, PERSON, STRUCTURES, Sources, Submission, THEME};
pub use input_state::InputState;
