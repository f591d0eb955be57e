//! # Remote Sources
//!
//! The aggregator does not know about HTTP. It consumes a [`MovieSource`], an injected capability
//! with exactly two operations:
//!
//! - [`MovieSource::list_movies`] - one discover page of movies
//! - [`MovieSource::list_cast`] - the cast of one movie
//!
//! [`TmdbClient`] is the live implementation. [`fake::FakeSource`] is a scripted implementation
//! for tests: deterministic results, injected failures and delays, and call counters.

pub mod error;
pub mod fake;
pub mod tmdb;

pub use error::*;
pub use tmdb::TmdbClient;

use async_trait::async_trait;

use crate::config::ApiKey;
use crate::model::{Actor, Movie, MovieId};

/// Parameters of the single discover request issued per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverRequest {
    pub api_key: ApiKey,
    pub sort_by: String,
    pub page: u32,
}

/// The two capabilities the aggregator needs from the movie metadata service.
///
/// Implementations must be safe to call concurrently: the aggregator shares one instance across
/// all credits tasks of a run.
#[async_trait]
pub trait MovieSource: Send + Sync + 'static {
    /// Lists the movies of one discover page.
    async fn list_movies(&self, request: &DiscoverRequest) -> Result<Vec<Movie>, RemoteError>;

    /// Lists the cast of one movie.
    async fn list_cast(&self, api_key: &ApiKey, movie_id: MovieId)
        -> Result<Vec<Actor>, RemoteError>;
}
