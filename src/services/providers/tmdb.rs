/// TMDB API provider
///
/// API Flow:
/// 1. Metadata: /movie/{id}?api_key=...&language=en-US → `poster_path` (nullable)
/// 2. Image: {image_base_url}/{poster_path} → raw image bytes
///
/// Both calls share the client-level timeout.
use crate::{
    error::PosterFetchError,
    models::{MovieId, MovieMetadata},
    services::providers::PosterSource,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
}

impl TmdbClient {
    /// Creates a new TMDB client whose requests time out after `timeout`
    pub fn new(
        api_key: String,
        api_url: String,
        image_base_url: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url,
        })
    }

    /// Full image URL for a poster path, joined with exactly one slash
    pub fn image_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.image_base_url.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }

    async fn get(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, PosterFetchError> {
        let response = request.send().await.map_err(classify)?;

        if !response.status().is_success() {
            return Err(PosterFetchError::Status(response.status()));
        }

        Ok(response)
    }
}

fn classify(err: reqwest::Error) -> PosterFetchError {
    if err.is_timeout() {
        PosterFetchError::Timeout
    } else {
        PosterFetchError::Http(err)
    }
}

#[async_trait::async_trait]
impl PosterSource for TmdbClient {
    async fn fetch_metadata(&self, movie_id: MovieId) -> Result<MovieMetadata, PosterFetchError> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let request = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")]);

        let metadata: MovieMetadata = self.get(request).await?.json().await.map_err(classify)?;

        tracing::debug!(
            movie_id = %movie_id,
            has_poster = metadata.poster_path().is_some(),
            provider = "tmdb",
            "Metadata fetched"
        );

        Ok(metadata)
    }

    async fn fetch_image(&self, poster_path: &str) -> Result<Vec<u8>, PosterFetchError> {
        let url = self.image_url(poster_path);
        let bytes = self
            .get(self.http_client.get(&url))
            .await?
            .bytes()
            .await
            .map_err(classify)?;

        tracing::debug!(url = %url, size = bytes.len(), provider = "tmdb", "Poster image fetched");

        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
