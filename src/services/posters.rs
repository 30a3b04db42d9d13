use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    error::PosterFetchError,
    models::{MovieId, Poster},
    services::providers::PosterSource,
    store::PosterCache,
};

/// Attempt budget and backoff schedule for poster fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt, doubled after each further failure
    pub initial_backoff: Duration,
    /// Upper bound on each individual remote call
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            timeout: Duration::from_secs(15),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_backoff: config.initial_backoff(),
            timeout: config.request_timeout(),
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.initial_backoff.saturating_mul(1u32 << exponent)
    }
}

/// Resolves movie ids to poster images.
///
/// Never fails: every remote or decoding failure is retried under the
/// [`RetryPolicy`] and finally degraded to the placeholder. Each outcome,
/// including "no poster", is memoized in the [`PosterCache`] for the life of
/// the process.
pub struct PosterResolver {
    source: Arc<dyn PosterSource>,
    cache: PosterCache,
    policy: RetryPolicy,
}

impl PosterResolver {
    pub fn new(source: Arc<dyn PosterSource>, cache: PosterCache, policy: RetryPolicy) -> Self {
        Self {
            source,
            cache,
            policy,
        }
    }

    pub async fn resolve_poster(&self, movie_id: MovieId) -> Poster {
        if let Some(poster) = self.cache.get(movie_id) {
            tracing::debug!(movie_id = %movie_id, "Poster cache hit");
            return poster;
        }

        tracing::debug!(movie_id = %movie_id, "Poster cache miss");

        self.cache
            .get_or_resolve(movie_id, || self.fetch_with_retry(movie_id))
            .await
    }

    /// Number of movie ids with a memoized outcome
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    async fn fetch_with_retry(&self, movie_id: MovieId) -> Poster {
        let max_attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.fetch_once(movie_id).await {
                Ok(poster) => return poster,
                Err(e) if attempt < max_attempts => {
                    let delay = self.policy.delay_after(attempt);
                    tracing::warn!(
                        movie_id = %movie_id,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Poster fetch attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!(
                        movie_id = %movie_id,
                        attempts = max_attempts,
                        error = %e,
                        "All poster fetch attempts failed, using placeholder"
                    );
                }
            }
        }

        Poster::Unavailable
    }

    /// One attempt: metadata, then image download and decode.
    ///
    /// A metadata response without a poster path is a successful outcome.
    async fn fetch_once(&self, movie_id: MovieId) -> Result<Poster, PosterFetchError> {
        let metadata = self
            .with_timeout(self.source.fetch_metadata(movie_id))
            .await?;

        let Some(poster_path) = metadata.poster_path() else {
            tracing::info!(movie_id = %movie_id, "Movie has no poster, using placeholder");
            return Ok(Poster::Unavailable);
        };

        let bytes = self.with_timeout(self.source.fetch_image(poster_path)).await?;
        let image = image::load_from_memory(&bytes)?;

        tracing::info!(
            movie_id = %movie_id,
            width = image.width(),
            height = image.height(),
            "Poster resolved"
        );

        Ok(Poster::fetched(image))
    }

    async fn with_timeout<T>(
        &self,
        call: impl std::future::Future<Output = Result<T, PosterFetchError>>,
    ) -> Result<T, PosterFetchError> {
        tokio::time::timeout(self.policy.timeout, call)
            .await
            .map_err(|_| PosterFetchError::Timeout)?
    }
}
