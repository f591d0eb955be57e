//! # StoreEntity Trait
//!
//! The `StoreEntity` trait is the bound every element held by a [`StoreActor`](crate::StoreActor)
//! must satisfy. The store keeps a *set* of entities, so identity is whatever `Eq` and `Hash`
//! say it is: two values are the same entry exactly when they compare equal.
//!
//! # Architecture Note
//! The store never looks inside an entity. It only unions, so the equality rule of the domain
//! type is the deduplication rule of the store.
//!
//! A blanket implementation covers every type that already has the required capabilities,
//! so domain types opt in simply by deriving or implementing `Clone`, `Eq`, `Hash` and `Debug`.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait that any element must implement to be accumulated by a `StoreActor`.
///
/// `Send + Sync + 'static` are required because elements travel through channels
/// into the actor task and snapshots travel back out.
pub trait StoreEntity: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> StoreEntity for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
