//! Registry of pickers attached to a form
//!
//! Maps each host input to its [`Picker`](crate::picker::Picker) and enforces
//! the rules that span pickers: only one suggestion list is open at a time,
//! and pointer or focus activity outside a picker closes its list.

mod registry_state;

pub use registry_state::{PickerRegistry, RegistryEvent};
