//! Incremental-search pickers for terminal forms
//!
//! A [`picker::Picker`] attaches to a single-line input, searches as the user
//! types through an asynchronous [`fetch::Fetcher`], shows suggestions in a
//! floating list and commits one or several items. A
//! [`registry::PickerRegistry`] keeps several pickers on one screen in line,
//! and [`fetch::FetchWorker`] runs their searches off the UI thread.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod logging;
pub mod picker;
pub mod registry;
pub mod widgets;

#[cfg(test)]
mod test_utils;
