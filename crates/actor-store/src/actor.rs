//! # Store Actor
//!
//! This module defines the `StoreActor`, the single owner of an accumulated set. It implements
//! the "Server" side of the Actor Model: it owns the set and the receiving end of the request
//! channel, and processes requests strictly one at a time.

use crate::client::StoreClient;
use crate::entity::StoreEntity;
use crate::message::{MergeOutcome, StoreRequest};
use std::collections::HashSet;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The actor that owns a deduplicated set of entities.
///
/// # Architecture Note
/// Any number of tasks may hold a cloned [`StoreClient`] and merge concurrently. All of those
/// merges funnel into one channel and this actor applies them sequentially, so no two merges can
/// interleave at the element level and the set needs no `Mutex`. Exclusive ownership of the
/// `HashSet` inside one task is the lock.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Use**: Clone the client into as many writers as needed.
/// 4.  **Finish**: Either ask for a `snapshot()` once writers are done, or drop every client and
///     await the join handle, which yields the final set.
///
/// ```rust
/// use actor_store::StoreActor;
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::<u32>::new(16);
///     let handle = tokio::spawn(actor.run());
///
///     client.merge(vec![1, 2, 3]).await.unwrap();
///     client.merge(vec![3, 4]).await.unwrap();
///     assert_eq!(client.len().await.unwrap(), 4);
///
///     drop(client);
///     let set = handle.await.unwrap();
///     assert_eq!(set.len(), 4);
/// }
/// ```
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    set: HashSet<T>,
}

impl<T: StoreEntity> StoreActor<T> {
    /// Creates a new `StoreActor` with an empty set, and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            set: HashSet::new(),
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped, then returns the set.
    pub async fn run(mut self) -> HashSet<T> {
        // Extract just the type name (e.g., "Actor" instead of "popular_cast::model::actor::Actor")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Merge { items, respond_to } => {
                    let outcome = self.merge(items);
                    debug!(
                        entity_type,
                        received = outcome.received,
                        inserted = outcome.inserted,
                        size = outcome.total,
                        "Merge"
                    );
                    let _ = respond_to.send(Ok(outcome));
                }
                StoreRequest::Snapshot { respond_to } => {
                    debug!(entity_type, size = self.set.len(), "Snapshot");
                    let _ = respond_to.send(Ok(self.set.clone()));
                }
                StoreRequest::Len { respond_to } => {
                    let _ = respond_to.send(Ok(self.set.len()));
                }
            }
        }

        info!(entity_type, size = self.set.len(), "Shutdown");
        self.set
    }

    fn merge(&mut self, items: Vec<T>) -> MergeOutcome {
        let received = items.len();
        let before = self.set.len();
        self.set.extend(items);
        MergeOutcome {
            received,
            inserted: self.set.len() - before,
            total: self.set.len(),
        }
    }
}
