use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod poster;

pub use poster::{placeholder_image, Poster, PLACEHOLDER_COLOR, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};

/// Identifier of a movie in the remote metadata API (TMDB movie id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A catalog entry. Loaded once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
}

impl Movie {
    pub fn new(movie_id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self {
            movie_id: movie_id.into(),
            title: title.into(),
        }
    }
}

/// A neighbor produced by the ranker
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMovie {
    /// Row/column position in the catalog
    pub index: usize,
    pub movie: Movie,
    pub score: f32,
}

/// A ranked neighbor paired with its resolved poster
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub movie: Movie,
    pub score: f32,
    pub poster: Poster,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of the response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MovieMetadata {
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieMetadata {
    /// Poster path if present and non-empty
    pub fn poster_path(&self) -> Option<&str> {
        self.poster_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub rank: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
    pub poster_url: String,
    pub placeholder: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub recommendations: Vec<RecommendationItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_display() {
        assert_eq!(format!("{}", MovieId(19995)), "19995");
    }

    #[test]
    fn test_movie_deserialization() {
        let json = r#"{"movie_id": 19995, "title": "Avatar"}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie, Movie::new(19995, "Avatar"));
    }

    #[test]
    fn test_metadata_with_poster_path() {
        let json = r#"{
            "id": 19995,
            "title": "Avatar",
            "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"
        }"#;

        let metadata: MovieMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(
            metadata.poster_path(),
            Some("/kyeqWdyUXW608qlYkRqosgbbJyK.jpg")
        );
    }

    #[test]
    fn test_metadata_null_poster_path() {
        let metadata: MovieMetadata =
            serde_json::from_str(r#"{"id": 1, "poster_path": null}"#).unwrap();
        assert_eq!(metadata.poster_path(), None);
    }

    #[test]
    fn test_metadata_missing_or_empty_poster_path() {
        let missing: MovieMetadata = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(missing.poster_path(), None);

        let empty: MovieMetadata = serde_json::from_str(r#"{"poster_path": ""}"#).unwrap();
        assert_eq!(empty.poster_path(), None);
    }
}
