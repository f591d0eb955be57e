//! Command-line arguments.

use std::time::Duration;

use clap::Parser;

use crate::config::{
    AggregatorConfig, ApiKey, ConfigError, FailurePolicy, TmdbConfig, DEFAULT_BASE_URL,
    DEFAULT_CONCURRENCY, DEFAULT_PAGE, DEFAULT_SORT_BY, DEFAULT_STORE_BUFFER, DEFAULT_TIMEOUT_SECS,
};

/// Collect the distinct cast of one page of popular movies from TMDb.
#[derive(Debug, Parser)]
#[command(name = "popular-cast", version)]
pub struct Cli {
    /// TMDb v3 API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the TMDb v3 API
    #[arg(long, env = "TMDB_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Optional `language` parameter, e.g. en-US
    #[arg(long)]
    pub language: Option<String>,

    /// Discover sort order
    #[arg(long, default_value = DEFAULT_SORT_BY)]
    pub sort_by: String,

    /// Discover page (1-based)
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    pub page: u32,

    /// Maximum concurrent credits requests
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// What to do when the credits of one movie cannot be fetched
    #[arg(long, value_enum, default_value_t = FailurePolicy::FailFast)]
    pub policy: FailurePolicy,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn api_key(&self) -> Result<ApiKey, ConfigError> {
        ApiKey::new(self.api_key.as_str())
    }

    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            sort_by: self.sort_by.clone(),
            page: self.page,
            concurrency: self.concurrency,
            policy: self.policy,
            store_buffer: DEFAULT_STORE_BUFFER,
        }
    }

    pub fn tmdb_config(&self) -> TmdbConfig {
        TmdbConfig {
            base_url: self.base_url.clone(),
            language: self.language.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["popular-cast", "--api-key", "abc"]).unwrap();
        assert_eq!(cli.api_key().unwrap().expose(), "abc");
        assert_eq!(cli.aggregator_config(), AggregatorConfig::default());
        assert_eq!(cli.tmdb_config().timeout, Duration::from_secs(30));
        assert_eq!(cli.tmdb_config().language, None);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "popular-cast",
            "--api-key",
            "abc",
            "--base-url",
            "http://localhost:8080/3",
            "--page",
            "5",
            "--concurrency",
            "2",
            "--policy",
            "best-effort",
            "--language",
            "en-US",
        ])
        .unwrap();

        let config = cli.aggregator_config();
        assert_eq!(config.page, 5);
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.policy, FailurePolicy::BestEffort);
        assert_eq!(cli.tmdb_config().base_url, "http://localhost:8080/3");
        assert_eq!(cli.tmdb_config().language.as_deref(), Some("en-US"));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result =
            Cli::try_parse_from(["popular-cast", "--api-key", "abc", "--policy", "sometimes"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
