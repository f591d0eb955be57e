//! Response envelopes of the remote API. They are unwrapped by the source layer and never
//! reach the aggregator.

use serde::{Deserialize, Serialize};

use super::{Actor, MovieId};

/// One page of a paginated listing (`/discover/movie`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// Body of `/movie/{id}/credits`. Crew is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub id: Option<MovieId>,
    pub cast: Vec<Actor>,
}
