//! # Aggregator
//!
//! Drives one run end to end:
//!
//! 1. **Discover** - one `list_movies` call. Failure aborts the run with
//!    [`FetchError::MoviesUnavailable`] before the store is ever touched.
//! 2. **Fan out** - one `list_cast` task per movie in a [`JoinSet`], at most
//!    `concurrency` in flight. Each task merges its cast into a fresh per-run
//!    [`StoreActor`].
//! 3. **Collect** - once the `JoinSet` is drained the last store client is dropped, the store
//!    actor winds down, and the set it returns is the result. No copy of the set is made.
//!
//! ## Failure Policy
//!
//! The [`FailurePolicy`] from the config applies uniformly to every movie of a run.
//!
//! - **FailFast** (default): the first credits failure aborts every in-flight task, waits for
//!   them to wind down, and returns [`FetchError::CreditsUnavailable`]. A task that already
//!   merged before it was cancelled is harmless; its merge is discarded with the store.
//! - **BestEffort**: failed movies are skipped and listed in [`Aggregate::failed_movie_ids`].
//!   If every movie fails, the list covers every movie; an empty `actors` set is never passed off
//!   as a clean result.
//!
//! Store errors and panicked tasks are fatal under both policies.

pub mod error;
pub mod state;

pub use error::*;
pub use state::{InvalidTransition, RunState};

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use actor_store::{StoreActor, StoreClient, StoreError};
use tokio::task::{self, JoinError, JoinSet};
use tracing::{debug, info, instrument, warn};

use crate::config::{AggregatorConfig, ApiKey, ConfigError, FailurePolicy};
use crate::model::{Actor, MovieId};
use crate::source::{DiscoverRequest, MovieSource, RemoteError};
use state::RunTracker;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aggregate {
    /// Union of every cast that was fetched.
    pub actors: HashSet<Actor>,
    /// Movies whose credits could not be fetched, ascending. Always empty under fail-fast.
    pub failed_movie_ids: Vec<MovieId>,
}

impl Aggregate {
    /// `true` when no movie was skipped.
    pub fn is_complete(&self) -> bool {
        self.failed_movie_ids.is_empty()
    }

    /// Actors ordered by popularity (highest first), then id, then name.
    pub fn sorted_actors(&self) -> Vec<&Actor> {
        let mut actors: Vec<&Actor> = self.actors.iter().collect();
        actors.sort_by(|a, b| {
            b.popularity
                .total_cmp(&a.popularity)
                .then_with(|| a.id.cmp(&b.id))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.profile_path.cmp(&b.profile_path))
        });
        actors
    }
}

/// Why a single credits task did not finish its merge.
#[derive(Debug)]
enum CreditsFailure {
    Remote {
        movie_id: MovieId,
        source: RemoteError,
    },
    Store(StoreError),
}

/// Collects the distinct cast of one discover page.
///
/// The aggregator itself is stateless between runs and can be reused; every call to
/// [`run`](Aggregator::run) gets its own store and state machine.
pub struct Aggregator<S: MovieSource> {
    source: Arc<S>,
    config: AggregatorConfig,
}

impl<S: MovieSource> Aggregator<S> {
    pub fn new(source: S, config: AggregatorConfig) -> Result<Self, ConfigError> {
        Self::with_shared_source(Arc::new(source), config)
    }

    /// Builds an aggregator around a source that is also used elsewhere.
    pub fn with_shared_source(source: Arc<S>, config: AggregatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Runs one aggregation with a fresh store.
    #[instrument(skip_all, fields(page = self.config.page, policy = ?self.config.policy))]
    pub async fn run(&self, api_key: &ApiKey) -> Result<Aggregate, FetchError> {
        let (actor, store) = StoreActor::<Actor>::new(self.config.store_buffer);
        let store_handle = tokio::spawn(actor.run());
        let mut tracker = RunTracker::new();

        // Returns only once every client, including `store`, is gone.
        let fanned_out = self.fan_out(api_key, store, &mut tracker).await;

        let actors = match store_handle.await {
            Ok(actors) => actors,
            Err(e) => {
                warn!(error = %e, "Actor store task did not shut down cleanly");
                if fanned_out.is_ok() {
                    let error = FetchError::Store(StoreError::ActorDropped);
                    tracker.advance(RunState::Failed(error.to_string()))?;
                    return Err(error);
                }
                HashSet::new()
            }
        };

        let mut failed_movie_ids = fanned_out?;
        tracker.advance(RunState::Done)?;

        failed_movie_ids.sort();
        info!(
            actors = actors.len(),
            failed = failed_movie_ids.len(),
            "Aggregation finished"
        );
        Ok(Aggregate {
            actors,
            failed_movie_ids,
        })
    }

    /// Discovers the movies and merges every cast into `store`. Consumes the store client, so
    /// when this returns no task of the run can still write to the store.
    ///
    /// Returns the movies skipped under best-effort. On success the tracker is left at
    /// `FetchingCredits { pending: 0 }`; on failure it is `Failed`.
    pub(crate) async fn fan_out(
        &self,
        api_key: &ApiKey,
        store: StoreClient<Actor>,
        tracker: &mut RunTracker,
    ) -> Result<Vec<MovieId>, FetchError> {
        tracker.advance(RunState::FetchingMovies)?;

        let request = DiscoverRequest {
            api_key: api_key.clone(),
            sort_by: self.config.sort_by.clone(),
            page: self.config.page,
        };
        let movies = match self.source.list_movies(&request).await {
            Ok(movies) => movies,
            Err(e) => {
                warn!(error = %e, "Movie list unavailable");
                tracker.advance(RunState::Failed(e.to_string()))?;
                return Err(FetchError::MoviesUnavailable(e));
            }
        };
        info!(count = movies.len(), "Movies fetched");

        let mut pending = movies.len();
        tracker.advance(RunState::FetchingCredits { pending })?;

        let mut queue = movies.into_iter().map(|movie| movie.id);
        let mut tasks: JoinSet<Result<MovieId, CreditsFailure>> = JoinSet::new();
        let mut task_movies: HashMap<task::Id, MovieId> = HashMap::new();
        let mut failed_movie_ids = Vec::new();

        loop {
            while tasks.len() < self.config.concurrency {
                let Some(movie_id) = queue.next() else { break };
                let handle = tasks.spawn(fetch_and_merge(
                    self.source.clone(),
                    api_key.clone(),
                    movie_id,
                    store.clone(),
                ));
                task_movies.insert(handle.id(), movie_id);
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };
            pending = pending.saturating_sub(1);

            let error = match joined {
                Ok(Ok(_)) => None,
                Ok(Err(CreditsFailure::Remote { movie_id, source })) => match self.config.policy {
                    FailurePolicy::FailFast => {
                        Some(FetchError::CreditsUnavailable { movie_id, source })
                    }
                    FailurePolicy::BestEffort => {
                        warn!(%movie_id, error = %source, "Skipping movie, credits unavailable");
                        failed_movie_ids.push(movie_id);
                        None
                    }
                },
                Ok(Err(CreditsFailure::Store(e))) => Some(FetchError::Store(e)),
                Err(join_error) => Some(task_error(&task_movies, join_error)),
            };

            if let Some(error) = error {
                warn!(error = %error, "Aborting run");
                cancel_all(&mut tasks).await;
                tracker.advance(RunState::Failed(error.to_string()))?;
                return Err(error);
            }
            tracker.advance(RunState::FetchingCredits { pending })?;
        }

        Ok(failed_movie_ids)
    }
}

/// Fetches one cast and merges it. Runs as its own task.
#[instrument(skip(source, api_key, store))]
async fn fetch_and_merge<S: MovieSource>(
    source: Arc<S>,
    api_key: ApiKey,
    movie_id: MovieId,
    store: StoreClient<Actor>,
) -> Result<MovieId, CreditsFailure> {
    let cast = source
        .list_cast(&api_key, movie_id)
        .await
        .map_err(|source| CreditsFailure::Remote { movie_id, source })?;

    let outcome = store.merge(cast).await.map_err(CreditsFailure::Store)?;
    debug!(
        received = outcome.received,
        inserted = outcome.inserted,
        size = outcome.total,
        "Cast merged"
    );
    Ok(movie_id)
}

/// Maps a credits task that did not return back to the movie it was fetching.
fn task_error(task_movies: &HashMap<task::Id, MovieId>, join_error: JoinError) -> FetchError {
    match task_movies.get(&join_error.id()) {
        Some(&movie_id) if join_error.is_panic() => FetchError::TaskPanicked { movie_id },
        _ => FetchError::TaskFailed(join_error.to_string()),
    }
}

/// Aborts every task and waits until each one has stopped, so nothing is still running when the
/// caller returns.
async fn cancel_all(tasks: &mut JoinSet<Result<MovieId, CreditsFailure>>) {
    let in_flight = tasks.len();
    tasks.abort_all();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Err(e) if e.is_cancelled() => {}
            Err(e) => warn!(error = %e, "Credits task failed during cancellation"),
            // Finished before the abort landed; its merge, if any, is already in the store.
            Ok(_) => {}
        }
    }
    debug!(in_flight, "In-flight credits tasks cancelled");
}
