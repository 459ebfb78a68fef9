//! Committed selections and the value extracted from them

use serde::Serialize;

use super::item::{Item, ItemId};
use super::options::PickerMode;

/// Value a picker exposes to form consumers
///
/// Serializes as `null` or an id in single mode and as an id array in multi mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PickerValue {
    Single(Option<ItemId>),
    Multi(Vec<ItemId>),
}

impl PickerValue {
    pub fn is_empty(&self) -> bool {
        match self {
            PickerValue::Single(id) => id.is_none(),
            PickerValue::Multi(ids) => ids.is_empty(),
        }
    }

    /// Selected ids in commit order
    pub fn ids(&self) -> Vec<ItemId> {
        match self {
            PickerValue::Single(id) => id.iter().copied().collect(),
            PickerValue::Multi(ids) => ids.clone(),
        }
    }
}

/// Ordered set of committed items
///
/// Single mode holds at most one item. Multi mode holds distinct ids in
/// insertion order.
#[derive(Debug, Clone)]
pub struct SelectionSet {
    mode: PickerMode,
    items: Vec<Item>,
}

impl SelectionSet {
    pub fn new(mode: PickerMode) -> Self {
        Self {
            mode,
            items: Vec::new(),
        }
    }

    /// Commit `item`; returns false when a multi selection already holds its id
    pub fn insert(&mut self, item: Item) -> bool {
        match self.mode {
            PickerMode::Single => {
                self.items.clear();
                self.items.push(item);
                true
            }
            PickerMode::Multi => {
                if self.contains(item.id) {
                    return false;
                }
                self.items.push(item);
                true
            }
        }
    }

    /// Remove the item with `id`; returns whether anything was removed
    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Remove the most recently committed item
    pub fn pop(&mut self) -> Option<Item> {
        self.items.pop()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn value(&self) -> PickerValue {
        match self.mode {
            PickerMode::Single => PickerValue::Single(self.items.first().map(|item| item.id)),
            PickerMode::Multi => PickerValue::Multi(self.items.iter().map(|item| item.id).collect()),
        }
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
