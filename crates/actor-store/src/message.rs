//! # Store Messages
//!
//! This module defines the request types exchanged between the `StoreClient` and `StoreActor`.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use std::collections::HashSet;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Summary of a single merge, as seen by the actor at the moment it applied it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Number of elements carried by the request.
    pub received: usize,
    /// Number of elements that were not already present.
    pub inserted: usize,
    /// Size of the set after the merge.
    pub total: usize,
}

/// Internal message type sent to the actor.
///
/// The set only ever grows, so there is no removal variant: the protocol is a
/// union (`Merge`) and two reads (`Snapshot`, `Len`). Because the actor handles one
/// message at a time, every `Merge` is atomic with respect to every other request.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Merge {
        items: Vec<T>,
        respond_to: Response<MergeOutcome>,
    },
    Snapshot {
        respond_to: Response<HashSet<T>>,
    },
    Len {
        respond_to: Response<usize>,
    },
}
