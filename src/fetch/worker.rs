//! Fetch Worker Thread
//!
//! Runs picker searches in a background thread so the UI never waits on the
//! network. Requests arrive over a channel, each one runs as its own task on
//! a single-threaded tokio runtime, and responses are sent back to the main
//! thread in completion order. Nothing is cancelled here: the receiving
//! picker drops responses that are no longer its latest request.

use std::sync::mpsc::Sender;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::picker::{SearchRequest, SearchResponse};

/// Handle to the background fetch thread
///
/// Dropping the handle closes the request channel, which lets the worker
/// thread finish.
#[derive(Debug)]
pub struct FetchWorker {
    request_tx: UnboundedSender<SearchRequest>,
}

impl FetchWorker {
    /// Spawn the worker thread
    ///
    /// # Arguments
    /// * `response_tx` - Channel the main thread polls for search responses
    pub fn spawn(response_tx: Sender<SearchResponse>) -> std::io::Result<Self> {
        let (request_tx, request_rx) = unbounded_channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        std::thread::Builder::new()
            .name("posipick-fetch".to_string())
            .spawn(move || worker_loop(runtime, request_rx, response_tx))?;

        Ok(Self { request_tx })
    }

    /// Queue a search; returns false if the worker has stopped
    pub fn dispatch(&self, request: SearchRequest) -> bool {
        self.request_tx.send(request).is_ok()
    }
}

/// Main worker loop - spawns one task per request until the channel closes
fn worker_loop(
    runtime: tokio::runtime::Runtime,
    mut request_rx: UnboundedReceiver<SearchRequest>,
    response_tx: Sender<SearchResponse>,
) {
    runtime.block_on(async move {
        while let Some(request) = request_rx.recv().await {
            tokio::spawn(run_request(request, response_tx.clone()));
        }
    });

    log::debug!("Fetch worker thread shutting down");
}

async fn run_request(request: SearchRequest, response_tx: Sender<SearchResponse>) {
    let SearchRequest {
        input,
        seq,
        query,
        fetcher,
    } = request;

    let result = fetcher.fetch(&query).await;
    if let Err(e) = &result {
        log::debug!("Search #{} for {:?} on {:?} failed: {}", seq, query, input, e);
    }

    // Main thread gone: nothing left to render into
    let _ = response_tx.send(SearchResponse {
        input,
        seq,
        query,
        result,
    });
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
