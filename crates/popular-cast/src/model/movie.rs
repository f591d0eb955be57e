use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Movies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A discover result. Only the id is used, as the key for the credits request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub original_title: Option<String>,
}

impl Movie {
    pub fn new(id: u64) -> Self {
        Self {
            id: MovieId(id),
            original_title: None,
        }
    }

    pub fn titled(id: u64, original_title: impl Into<String>) -> Self {
        Self {
            id: MovieId(id),
            original_title: Some(original_title.into()),
        }
    }
}
