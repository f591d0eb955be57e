//! # Mock Store & Testing Guide
//!
//! Code that *writes to* a store (an orchestrator fanning out work, say) is easier to test when
//! the store is scripted rather than real. This module offers two ways to do that.
//!
//! ## When to use Mocks vs the Real Actor
//!
//! | Feature | Mock | Real Actor |
//! |---------|------|------------|
//! | **State** | None, responses are scripted | Real set semantics |
//! | **Error Injection** | Easy (`return_err`) | Only by dropping the actor |
//! | **Inspection** | Every request is recorded | Only through `snapshot`/`len` |
//! | **Use Case** | Testing the code *around* the client | Testing union behaviour itself |
//!
//! ## Pattern 0: Raw Receiver
//!
//! [`create_mock_client`] hands back a client and the receiving end of its channel. The test plays
//! the actor: pull requests with [`expect_merge`] / [`expect_snapshot`] and answer them by hand.
//! Handy for asserting that *no* request was sent (`receiver.try_recv()` is empty).
//!
//! ## Pattern 1: Fluent Expectations
//!
//! [`MockStore`] answers requests from a queue of expectations and records the merged payloads.
//!
//! ```rust
//! use actor_store::mock::MockStore;
//! use actor_store::{MergeOutcome, StoreError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<u32>::new();
//!     mock.expect_merge().return_ok(MergeOutcome { received: 2, inserted: 2, total: 2 });
//!     mock.expect_snapshot().return_err(StoreError::ActorClosed);
//!
//!     let client = mock.client();
//!     client.merge(vec![7, 8]).await.unwrap();
//!     assert!(client.snapshot().await.is_err());
//!
//!     assert_eq!(mock.merged(), vec![vec![7, 8]]);
//!     mock.verify();
//! }
//! ```

use crate::client::StoreClient;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::{MergeOutcome, StoreRequest};
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
enum Expectation<T: StoreEntity> {
    Merge {
        response: Result<MergeOutcome, StoreError>,
    },
    Snapshot {
        response: Result<HashSet<T>, StoreError>,
    },
    Len {
        response: Result<usize, StoreError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock store with expectation tracking for fluent testing.
///
/// Requests are matched against expectations in FIFO order. A request that does not match the
/// next expectation panics the background task, which the client observes as
/// [`StoreError::ActorDropped`] and [`MockStore::verify`] reports as unmet expectations.
pub struct MockStore<T: StoreEntity> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    merged: Arc<Mutex<Vec<Vec<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> MockStore<T> {
    /// Creates a new mock store with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let merged = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let merged_clone = merged.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Merge { items, respond_to },
                        Some(Expectation::Merge { response }),
                    ) => {
                        merged_clone.lock().unwrap().push(items);
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Len { respond_to }, Some(Expectation::Len { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            merged,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    /// Expects a `merge` request.
    pub fn expect_merge(&mut self) -> ExpectationBuilder<T, MergeOutcome> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: |response| Expectation::Merge { response },
        }
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> ExpectationBuilder<T, HashSet<T>> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: |response| Expectation::Snapshot { response },
        }
    }

    /// Expects a `len` request.
    pub fn expect_len(&mut self) -> ExpectationBuilder<T, usize> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: |response| Expectation::Len { response },
        }
    }

    /// Payloads of every merge received so far, in arrival order.
    pub fn merged(&self) -> Vec<Vec<T>> {
        self.merged.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder that queues the response for one expected request.
pub struct ExpectationBuilder<T: StoreEntity, R> {
    expectations: Queue<T>,
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
}

impl<T: StoreEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: StoreEntity>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Merge request.
pub async fn expect_merge<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(Vec<T>, oneshot::Sender<Result<MergeOutcome, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Merge { items, respond_to }) => Some((items, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Snapshot request.
pub async fn expect_snapshot<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<oneshot::Sender<Result<HashSet<T>, StoreError>>> {
    match receiver.recv().await {
        Some(StoreRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}
