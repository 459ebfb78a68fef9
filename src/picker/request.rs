//! Search requests issued by pickers and the responses routed back to them

use std::fmt;
use std::sync::Arc;

use crate::fetch::{FetchError, Fetcher};

use super::item::Item;

/// Identity of a host input field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputId(pub u32);

/// One search to run against a picker's fetcher
#[derive(Clone)]
pub struct SearchRequest {
    pub input: InputId,
    /// Per-picker sequence number; only the latest one is ever applied
    pub seq: u64,
    pub query: String,
    pub fetcher: Arc<dyn Fetcher>,
}

impl fmt::Debug for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchRequest")
            .field("input", &self.input)
            .field("seq", &self.seq)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

/// Outcome of a [`SearchRequest`]
#[derive(Debug)]
pub struct SearchResponse {
    pub input: InputId,
    pub seq: u64,
    pub query: String,
    pub result: Result<Vec<Item>, FetchError>,
}
