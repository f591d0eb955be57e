//! # Configuration
//!
//! Plain structs with sensible defaults. The CLI fills them from flags and environment
//! variables; tests build them directly.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_SORT_BY: &str = "popularity.desc";
pub const DEFAULT_PAGE: u32 = 2;
pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_STORE_BUFFER: usize = 32;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while assembling configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key must not be empty")]
    MissingApiKey,

    #[error("Sort order must not be empty")]
    EmptySortOrder,

    /// Pages are 1-based on the remote service.
    #[error("Invalid page: {0} (pages start at 1)")]
    InvalidPage(u32),

    #[error("Concurrency limit must be at least 1")]
    ZeroConcurrency,

    #[error("Store buffer size must be at least 1")]
    ZeroStoreBuffer,
}

/// Credential for the remote service. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// What a run does when the credits of one movie cannot be fetched.
///
/// The policy is fixed for the whole run and applied to every movie alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Abort on the first failure, cancel in-flight fetches, return no actors.
    #[default]
    FailFast,
    /// Skip failed movies and report their ids next to the actors that were collected.
    BestEffort,
}

/// Settings for one [`Aggregator`](crate::Aggregator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Value of the `sort_by` discover parameter.
    pub sort_by: String,
    pub page: u32,
    /// Maximum number of credits fetches in flight at once.
    pub concurrency: usize,
    pub policy: FailurePolicy,
    /// Channel capacity of the per-run actor store.
    pub store_buffer: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            sort_by: DEFAULT_SORT_BY.to_string(),
            page: DEFAULT_PAGE,
            concurrency: DEFAULT_CONCURRENCY,
            policy: FailurePolicy::default(),
            store_buffer: DEFAULT_STORE_BUFFER,
        }
    }
}

impl AggregatorConfig {
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sort_by.trim().is_empty() {
            return Err(ConfigError::EmptySortOrder);
        }
        if self.page == 0 {
            return Err(ConfigError::InvalidPage(self.page));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.store_buffer == 0 {
            return Err(ConfigError::ZeroStoreBuffer);
        }
        Ok(())
    }
}

/// Settings for the live [`TmdbClient`](crate::source::TmdbClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbConfig {
    pub base_url: String,
    /// Optional `language` query parameter, e.g. `en-US`.
    pub language: Option<String>,
    pub timeout: Duration,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TmdbConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
