//! Fetcher over an in-memory catalog

use std::collections::HashSet;
use std::sync::Arc;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Deserialize;

use super::{FetchFuture, Fetcher};
use crate::picker::Item;

/// Default number of catalog entries returned per search
pub const DEFAULT_LOCAL_LIMIT: usize = 80;

/// How catalog labels are matched against the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Case-insensitive label substring, or id substring for numeric queries
    #[default]
    Substring,
    /// fzf-style fuzzy match on labels, best score first
    Fuzzy,
}

#[derive(Debug, Clone)]
pub struct LocalFetcher {
    catalog: Arc<Vec<Item>>,
    strategy: MatchStrategy,
    limit: usize,
}

impl LocalFetcher {
    pub fn new(catalog: Vec<Item>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            strategy: MatchStrategy::default(),
            limit: DEFAULT_LOCAL_LIMIT,
        }
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Matching entries, de-duplicated by id and capped to the limit
    pub fn search(&self, query: &str) -> Vec<Item> {
        let term = query.trim().to_lowercase();
        let matches: Vec<&Item> = if term.is_empty() {
            self.catalog.iter().collect()
        } else {
            match self.strategy {
                MatchStrategy::Substring => self.substring_matches(&term),
                MatchStrategy::Fuzzy => self.fuzzy_matches(&term),
            }
        };

        let mut seen = HashSet::new();
        matches
            .into_iter()
            .filter(|item| seen.insert(item.id))
            .take(self.limit)
            .cloned()
            .collect()
    }

    fn substring_matches(&self, term: &str) -> Vec<&Item> {
        let numeric = term.chars().all(|c| c.is_ascii_digit());
        self.catalog
            .iter()
            .filter(|item| {
                item.label.to_lowercase().contains(term)
                    || (numeric && item.id.to_string().contains(term))
            })
            .collect()
    }

    fn fuzzy_matches(&self, term: &str) -> Vec<&Item> {
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &Item)> = self
            .catalog
            .iter()
            .filter_map(|item| matcher.fuzzy_match(&item.label, term).map(|score| (score, item)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, item)| item).collect()
    }
}

impl Fetcher for LocalFetcher {
    fn fetch(&self, query: &str) -> FetchFuture {
        let results = self.search(query);
        Box::pin(async move { Ok(results) })
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod local_tests;
