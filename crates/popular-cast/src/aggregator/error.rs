//! Error types for the Aggregator.

use actor_store::StoreError;
use thiserror::Error;

use super::state::InvalidTransition;
use crate::model::MovieId;
use crate::source::RemoteError;

/// Why a run produced no result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The single discover request failed. Nothing was aggregated.
    #[error("Movie list unavailable: {0}")]
    MoviesUnavailable(#[source] RemoteError),

    /// Fail-fast only: the credits of one movie could not be fetched.
    #[error("Credits unavailable for movie {movie_id}: {source}")]
    CreditsUnavailable {
        movie_id: MovieId,
        #[source]
        source: RemoteError,
    },

    /// The per-run actor store stopped answering.
    #[error("Actor store error: {0}")]
    Store(#[from] StoreError),

    /// The credits task of one movie panicked.
    #[error("Credits task for movie {movie_id} panicked")]
    TaskPanicked { movie_id: MovieId },

    /// A credits task stopped without returning and could not be tied to a movie, e.g. because
    /// the runtime is shutting down.
    #[error("Credits task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    State(#[from] InvalidTransition),
}

impl FetchError {
    /// The movie whose credits caused the failure, if the failure is tied to one movie.
    pub fn movie_id(&self) -> Option<MovieId> {
        match self {
            FetchError::CreditsUnavailable { movie_id, .. }
            | FetchError::TaskPanicked { movie_id } => Some(*movie_id),
            _ => None,
        }
    }
}
