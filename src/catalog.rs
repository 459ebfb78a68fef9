//! Local search catalog
//!
//! A JSON document holding the rows each demo picker searches when no backend
//! is used:
//!
//! ```json
//! { "people": [...], "themes": [...], "structures": [...] }
//! ```
//!
//! Rows use the same shapes the backend returns, so exported search results
//! can be dropped in as-is.

use std::path::Path;

use serde::Deserialize;

use crate::error::PosipickError;
use crate::fetch::rows_to_items;
use crate::picker::Item;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub people: Vec<Item>,
    pub themes: Vec<Item>,
    pub structures: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    people: Vec<serde_json::Value>,
    #[serde(default)]
    themes: Vec<serde_json::Value>,
    #[serde(default)]
    structures: Vec<serde_json::Value>,
}

impl Catalog {
    pub fn parse(json: &str) -> Result<Self, PosipickError> {
        let raw: RawCatalog =
            serde_json::from_str(json).map_err(|e| PosipickError::InvalidCatalog(e.to_string()))?;

        Ok(Catalog {
            people: rows_to_items(raw.people),
            themes: rows_to_items(raw.themes),
            structures: rows_to_items(raw.structures),
        })
    }

    pub fn load(path: &Path) -> Result<Self, PosipickError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod catalog_tests;
