use std::sync::{
    mpsc::{self, Receiver, Sender},
    Arc,
};

use threadpool::ThreadPool;
use viewport::FetchRequest;

use crate::{
    provider::{ProtestProvider, ProviderError},
    types::Protest,
};

/// The result of one fetch, tagged with the request that produced it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub request: FetchRequest,
    pub result: Result<Vec<Protest>, ProviderError>,
}

/// Runs protest fetches on a worker pool and hands the results back to the UI thread.
///
/// Outcomes are delivered in completion order, which is not necessarily the
/// order the requests were issued in. In-flight fetches are never cancelled.
pub struct ProtestFetcher {
    provider: Arc<dyn ProtestProvider>,
    thread_pool: ThreadPool,
    sender: Sender<FetchOutcome>,
    receiver: Receiver<FetchOutcome>,
    issued: usize,
    delivered: usize,
}

impl ProtestFetcher {
    /// Creates a new `ProtestFetcher`.
    ///
    /// # Parameters
    /// - `provider`: Shared with every worker thread.
    /// - `workers`: Size of the thread pool, at least one.
    ///
    /// # Returns
    /// A fetcher with no request issued yet.
    pub fn new(provider: Arc<dyn ProtestProvider>, workers: usize) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            provider,
            thread_pool: ThreadPool::new(workers.max(1)),
            sender,
            receiver,
            issued: 0,
            delivered: 0,
        }
    }

    /// Queues `request` on the pool and returns immediately.
    pub fn issue(&mut self, request: FetchRequest) {
        let provider = Arc::clone(&self.provider);
        let sender = self.sender.clone();
        self.issued += 1;

        self.thread_pool.execute(move || {
            let result = provider.fetch_protests(&request);
            // The receiver only goes away when the app is shutting down.
            let _ = sender.send(FetchOutcome { request, result });
        });
    }

    /// Collects every outcome that arrived since the last call, without blocking.
    pub fn drain(&mut self) -> Vec<FetchOutcome> {
        let outcomes: Vec<FetchOutcome> = self.receiver.try_iter().collect();
        self.delivered += outcomes.len();
        outcomes
    }

    /// Blocks until the next outcome arrives.
    pub fn wait(&mut self) -> Option<FetchOutcome> {
        let outcome = self.receiver.recv().ok()?;
        self.delivered += 1;
        Some(outcome)
    }

    pub fn issued(&self) -> usize {
        self.issued
    }

    /// Fetches issued whose outcome was not handed back yet.
    pub fn in_flight(&self) -> usize {
        self.issued - self.delivered
    }
}
