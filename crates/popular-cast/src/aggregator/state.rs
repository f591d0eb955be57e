//! Per-run state machine.
//!
//! ```text
//! NotStarted -> FetchingMovies -> FetchingCredits { pending: n } -> ... -> FetchingCredits { pending: 0 } -> Done
//!                     |                        |
//!                     +-----> Failed(reason) <-+
//! ```
//!
//! `Done` and `Failed` are terminal. A fresh run starts again from `NotStarted`.

use std::fmt;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    FetchingMovies,
    FetchingCredits { pending: usize },
    Done,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid run transition from {from} to {to}")]
pub struct InvalidTransition {
    pub from: RunState,
    pub to: RunState,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::NotStarted => f.write_str("NotStarted"),
            RunState::FetchingMovies => f.write_str("FetchingMovies"),
            RunState::FetchingCredits { pending } => write!(f, "FetchingCredits({pending} pending)"),
            RunState::Done => f.write_str("Done"),
            RunState::Failed(reason) => write!(f, "Failed({reason})"),
        }
    }
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed(_))
    }

    /// Returns `next` if the machine may move there from `self`.
    ///
    /// `pending` may only go down, and `Done` is only reachable once nothing is pending.
    pub fn advance(&self, next: RunState) -> Result<RunState, InvalidTransition> {
        let allowed = match (self, &next) {
            (RunState::NotStarted, RunState::FetchingMovies) => true,
            (RunState::FetchingMovies, RunState::FetchingCredits { .. }) => true,
            (
                RunState::FetchingCredits { pending: current },
                RunState::FetchingCredits { pending: remaining },
            ) => remaining <= current,
            (RunState::FetchingCredits { pending: 0 }, RunState::Done) => true,
            (RunState::FetchingMovies | RunState::FetchingCredits { .. }, RunState::Failed(_)) => {
                true
            }
            _ => false,
        };

        if allowed {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: self.clone(),
                to: next,
            })
        }
    }
}

/// Holds the current state of one run and logs every transition.
#[derive(Debug)]
pub(crate) struct RunTracker {
    state: RunState,
}

impl RunTracker {
    pub(crate) fn new() -> Self {
        Self {
            state: RunState::NotStarted,
        }
    }

    pub(crate) fn state(&self) -> &RunState {
        &self.state
    }

    pub(crate) fn advance(&mut self, next: RunState) -> Result<(), InvalidTransition> {
        self.state = self.state.advance(next)?;
        debug!(state = %self.state, "Run state");
        Ok(())
    }
}
