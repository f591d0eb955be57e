//! # Store Client
//!
//! This module defines the client handle used to talk to a [`StoreActor`](crate::StoreActor).

use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::{MergeOutcome, StoreRequest};
use std::collections::HashSet;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `StoreActor`.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive and every writer task can own one.
/// * **Async API** – every call resolves to `Result<…, StoreError>`.
/// * **Lifetime** – the actor keeps running while at least one clone is alive.
pub struct StoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

// Manual impl: deriving would require `T: Clone` on the handle, not just on the entity.
impl<T: StoreEntity> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: StoreEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    /// Unions `items` into the store. Applied atomically relative to every other request.
    pub async fn merge(&self, items: Vec<T>) -> Result<MergeOutcome, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Merge { items, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Returns a copy of the current contents.
    ///
    /// Only complete once every writer has finished; an earlier call sees a valid prefix.
    pub async fn snapshot(&self) -> Result<HashSet<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn len(&self) -> Result<usize, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Len { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len().await? == 0)
    }
}
