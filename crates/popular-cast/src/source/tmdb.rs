//! # TMDb Client
//!
//! Live [`MovieSource`] backed by the TMDb v3 REST API.
//!
//! | Capability | Request |
//! |------------|---------|
//! | `list_movies` | `GET {base}/discover/movie?api_key=…&sort_by=…&page=…` |
//! | `list_cast` | `GET {base}/movie/{id}/credits?api_key=…` |

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use super::{DiscoverRequest, MovieSource, RemoteError};
use crate::config::{ApiKey, TmdbConfig};
use crate::model::{Actor, Credits, Movie, MovieId, Page};

pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Builds a dedicated `reqwest` client with the configured timeout.
    pub fn new(config: TmdbConfig) -> Result<Self, RemoteError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Wraps an existing `reqwest` client, e.g. one shared with the rest of an application.
    pub fn with_client(client: Client, config: TmdbConfig) -> Self {
        Self { client, config }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api {
                status_code: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    fn with_language(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.language {
            Some(language) => request.query(&[("language", language.as_str())]),
            None => request,
        }
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    #[instrument(skip(self, request), fields(sort_by = %request.sort_by, page = request.page))]
    async fn list_movies(&self, request: &DiscoverRequest) -> Result<Vec<Movie>, RemoteError> {
        let page = request.page.to_string();
        let builder = self.client.get(self.url("/discover/movie")).query(&[
            ("api_key", request.api_key.expose()),
            ("sort_by", request.sort_by.as_str()),
            ("page", page.as_str()),
        ]);

        let response = self.with_language(builder).send().await?;
        let page: Page<Movie> = self.handle_response(response).await?;
        debug!(
            count = page.results.len(),
            total_pages = page.total_pages,
            "Discover page received"
        );
        Ok(page.results)
    }

    #[instrument(skip(self, api_key))]
    async fn list_cast(
        &self,
        api_key: &ApiKey,
        movie_id: MovieId,
    ) -> Result<Vec<Actor>, RemoteError> {
        let path = format!("/movie/{}/credits", movie_id);
        let builder = self
            .client
            .get(self.url(&path))
            .query(&[("api_key", api_key.expose())]);

        let response = self.with_language(builder).send().await?;
        let credits: Credits = self.handle_response(response).await?;
        debug!(count = credits.cast.len(), "Credits received");
        Ok(credits.cast)
    }
}
