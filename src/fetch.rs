//! Suggestion fetchers
//!
//! A fetcher turns a query into a future list of items. Pickers never await
//! fetchers themselves: requests are handed to the [`FetchWorker`], which runs
//! them off the UI thread and sends the responses back for the registry to
//! apply.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::picker::Item;

mod http;
mod local;
mod worker;

pub use http::{Endpoint, HttpFetcher, parse_rows, rows_to_items};
pub use local::{DEFAULT_LOCAL_LIMIT, LocalFetcher, MatchStrategy};
pub use worker::FetchWorker;

/// Future resolved by a fetcher
pub type FetchFuture = BoxFuture<'static, Result<Vec<Item>, FetchError>>;

/// Errors a fetcher can report
///
/// Pickers treat every variant as an empty result; the variants exist so
/// fetchers and their logs can tell failures apart.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent or its body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// Body was not a list of usable rows
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Asynchronous search function supplied by the caller
pub trait Fetcher: Send + Sync {
    fn fetch(&self, query: &str) -> FetchFuture;
}

impl<F> Fetcher for F
where
    F: Fn(&str) -> FetchFuture + Send + Sync,
{
    fn fetch(&self, query: &str) -> FetchFuture {
        self(query)
    }
}
