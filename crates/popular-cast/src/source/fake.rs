//! # Fake Source
//!
//! A scripted [`MovieSource`] for tests. Nothing touches the network.
//!
//! ```rust
//! use popular_cast::model::Actor;
//! use popular_cast::source::fake::FakeSource;
//! use std::time::Duration;
//!
//! let source = FakeSource::new()
//!     .with_movies([1, 2, 3])
//!     .with_cast(1, vec![Actor::new(10, "A", 5.0)])
//!     .failing_cast(2, "connection reset")
//!     .with_delayed_cast(3, vec![Actor::new(20, "B", 1.0)], Duration::from_millis(20));
//! ```
//!
//! Movies without a scripted cast answer with a 404 [`RemoteError::Api`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{DiscoverRequest, MovieSource, RemoteError};
use crate::config::ApiKey;
use crate::model::{Actor, Movie, MovieId};

#[derive(Debug, Clone)]
enum CastOutcome {
    Cast(Vec<Actor>),
    Fail(String),
    Panic,
}

#[derive(Debug, Clone)]
struct CastScript {
    outcome: CastOutcome,
    delay: Duration,
}

/// Scripted source with call counters.
#[derive(Debug, Default)]
pub struct FakeSource {
    movies: Vec<Movie>,
    movies_error: Option<String>,
    casts: HashMap<MovieId, CastScript>,
    movie_calls: AtomicUsize,
    cast_requests: Mutex<Vec<MovieId>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.movies = ids.into_iter().map(Movie::new).collect();
        self
    }

    /// Makes `list_movies` fail.
    pub fn failing_movies(mut self, reason: impl Into<String>) -> Self {
        self.movies_error = Some(reason.into());
        self
    }

    pub fn with_cast(self, movie_id: u64, cast: Vec<Actor>) -> Self {
        self.with_delayed_cast(movie_id, cast, Duration::ZERO)
    }

    /// Scripts a cast that is only returned after `delay`.
    pub fn with_delayed_cast(mut self, movie_id: u64, cast: Vec<Actor>, delay: Duration) -> Self {
        self.casts.insert(
            MovieId(movie_id),
            CastScript {
                outcome: CastOutcome::Cast(cast),
                delay,
            },
        );
        self
    }

    pub fn failing_cast(self, movie_id: u64, reason: impl Into<String>) -> Self {
        self.failing_cast_after(movie_id, reason, Duration::ZERO)
    }

    /// Scripts a credits failure that is only reported after `delay`.
    pub fn failing_cast_after(
        mut self,
        movie_id: u64,
        reason: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.casts.insert(
            MovieId(movie_id),
            CastScript {
                outcome: CastOutcome::Fail(reason.into()),
                delay,
            },
        );
        self
    }

    /// Makes `list_cast` panic for `movie_id`, as a bug in a source would.
    pub fn panicking_cast(mut self, movie_id: u64) -> Self {
        self.casts.insert(
            MovieId(movie_id),
            CastScript {
                outcome: CastOutcome::Panic,
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn movie_calls(&self) -> usize {
        self.movie_calls.load(Ordering::SeqCst)
    }

    pub fn cast_calls(&self) -> usize {
        self.cast_requests.lock().unwrap().len()
    }

    /// Movie ids passed to `list_cast`, in call order.
    pub fn cast_requests(&self) -> Vec<MovieId> {
        self.cast_requests.lock().unwrap().clone()
    }

    /// Highest number of `list_cast` calls that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight counter even when the call is cancelled mid-sleep.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MovieSource for FakeSource {
    async fn list_movies(&self, _request: &DiscoverRequest) -> Result<Vec<Movie>, RemoteError> {
        self.movie_calls.fetch_add(1, Ordering::SeqCst);
        match &self.movies_error {
            Some(reason) => Err(RemoteError::unavailable(reason.clone())),
            None => Ok(self.movies.clone()),
        }
    }

    async fn list_cast(
        &self,
        _api_key: &ApiKey,
        movie_id: MovieId,
    ) -> Result<Vec<Actor>, RemoteError> {
        self.cast_requests.lock().unwrap().push(movie_id);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        let Some(script) = self.casts.get(&movie_id).cloned() else {
            return Err(RemoteError::Api {
                status_code: 404,
                message: format!("no credits scripted for movie {movie_id}"),
            });
        };
        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }
        match script.outcome {
            CastOutcome::Cast(cast) => Ok(cast),
            CastOutcome::Fail(reason) => Err(RemoteError::Unavailable(reason)),
            CastOutcome::Panic => panic!("scripted panic in list_cast for movie {movie_id}"),
        }
    }
}
