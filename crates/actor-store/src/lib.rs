//! # Actor Store
//!
//! A single-owner, concurrency-safe set accumulator built on the **Actor Model** with Tokio.
//!
//! ## Why an Actor?
//!
//! Many tasks want to add to one collection at the same time. Instead of sharing the collection
//! behind a lock, one task owns it outright and everyone else sends it messages:
//!
//! - Isolated state (no shared memory, no locks)
//! - Message-passing concurrency
//! - Sequential processing inside the actor, so a merge can never interleave with another merge
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`StoreEntity`]) - What may be stored; its `Eq`/`Hash` is the dedup rule
//! 2. **Runtime Layer** ([`StoreActor`]) - The message loop that owns the `HashSet`
//! 3. **Interface Layer** ([`StoreClient`]) - Cloneable async handle for writers and readers
//!
//! ## Semantics
//!
//! - `merge` is set union. It is idempotent, commutative and associative, so the final contents do
//!   not depend on how concurrent merges were ordered.
//! - The set only grows for the lifetime of one actor. A new aggregation creates a new actor.
//! - `snapshot` copies the contents at the moment the actor handles the request. Callers that need
//!   the *final* set must only ask once every writer has finished, or drop all clients and await
//!   the value returned by [`StoreActor::run`].
//!
//! ## Testing
//!
//! See the [`mock`] module for a scripted store and raw-receiver helpers.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use entity::StoreEntity;
pub use error::StoreError;
pub use message::{MergeOutcome, Response, StoreRequest};
