/// Remote poster data abstraction
///
/// The poster resolver only needs two calls from the metadata service: look up
/// a movie's poster path, then download the image behind it. Keeping them
/// behind a trait lets the resolver's retry and caching policy be exercised
/// without a network.
use crate::{
    error::PosterFetchError,
    models::{MovieId, MovieMetadata},
};

pub mod tmdb;

pub use tmdb::TmdbClient;

/// Trait for poster data providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterSource: Send + Sync {
    /// Fetch metadata for a movie
    ///
    /// A successful response without a poster path is not an error; it means
    /// the movie has no poster.
    async fn fetch_metadata(&self, movie_id: MovieId) -> Result<MovieMetadata, PosterFetchError>;

    /// Download the raw image bytes for a poster path from the metadata response
    async fn fetch_image(&self, poster_path: &str) -> Result<Vec<u8>, PosterFetchError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
