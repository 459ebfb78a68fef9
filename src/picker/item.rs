//! Items offered and selected by a picker

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier of an [`Item`]
///
/// Backends return ids either as JSON numbers or as numeric strings, so
/// deserialization accepts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(ItemId(n)),
            RawId::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(ItemId)
                .map_err(|_| serde::de::Error::custom(format!("non-numeric id: {:?}", s))),
        }
    }
}

/// A searchable entry: an id and the label shown to the user
///
/// Two items are equal when their ids are equal, whatever their labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub label: String,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

#[cfg(test)]
#[path = "item_tests.rs"]
mod item_tests;
