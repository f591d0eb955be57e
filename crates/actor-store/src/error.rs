//! # Store Errors
//!
//! Errors raised by the plumbing between a [`StoreClient`](crate::StoreClient) and its actor.
//! Merging itself cannot fail; the only thing that can go wrong is the actor task being gone.

/// Errors that can occur while talking to a store actor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
}
