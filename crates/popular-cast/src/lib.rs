//! # Popular Cast
//!
//! Collects the distinct set of actors credited in one discover page of popular movies.
//!
//! ## Core Components
//!
//! - **[model]**: Pure data structures ([`Actor`](model::Actor), [`Movie`](model::Movie)) and the
//!   JSON envelopes of the remote service.
//! - **[source]**: The [`MovieSource`] capability, its live [`TmdbClient`] and a scripted fake.
//! - **[aggregator]**: Fans credits fetches out concurrently and unions every cast into a per-run
//!   [`actor_store::StoreActor`].
//! - **[config]** and **[cli]**: Defaults, validation and the command-line surface.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use popular_cast::{Aggregator, AggregatorConfig, ApiKey, TmdbClient, TmdbConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let source = TmdbClient::new(TmdbConfig::default())?;
//! let aggregator = Aggregator::new(source, AggregatorConfig::default())?;
//! let aggregate = aggregator.run(&ApiKey::new("my-api-key")?).await?;
//! println!("{} distinct actors", aggregate.actors.len());
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod model;
pub mod source;

pub use aggregator::{Aggregate, Aggregator, FetchError, RunState};
pub use config::{AggregatorConfig, ApiKey, ConfigError, FailurePolicy, TmdbConfig};
pub use source::{MovieSource, RemoteError, TmdbClient};
