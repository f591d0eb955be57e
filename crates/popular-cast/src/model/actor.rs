use serde::{Deserialize, Serialize};

use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// Type-safe identifier for people in the remote catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cast member as reported by the credits endpoint.
///
/// # Equality
/// Equality and hashing cover **every** field. Two records for the same person that differ only
/// in `popularity` are two distinct entries: each one is a snapshot of the remote service at the
/// time it answered, and the aggregated set is the union of those snapshots.
///
/// `popularity` is compared by its bit pattern so that `Eq` and `Hash` agree with each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub popularity: f64,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl Actor {
    /// Creates an Actor without a profile image.
    pub fn new(id: u64, name: impl Into<String>, popularity: f64) -> Self {
        Self {
            id: ActorId(id),
            name: name.into(),
            popularity,
            profile_path: None,
        }
    }

    pub fn with_profile_path(mut self, path: impl Into<String>) -> Self {
        self.profile_path = Some(path.into());
        self
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.popularity.to_bits() == other.popularity.to_bits()
            && self.profile_path == other.profile_path
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
        self.popularity.to_bits().hash(state);
        self.profile_path.hash(state);
    }
}
