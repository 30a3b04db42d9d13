use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors raised while loading the catalog and similarity matrix at startup.
///
/// These are fatal: the service cannot answer any query without its datasets.
#[derive(thiserror::Error, Debug)]
pub enum DataLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Movie catalog is empty")]
    EmptyCatalog,

    #[error("Similarity matrix has {rows} rows but the catalog has {expected} movies")]
    MatrixShape { expected: usize, rows: usize },

    #[error("Similarity row {row} has {found} columns, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Failures of a single poster fetch attempt.
///
/// Never leaves the poster resolver: every variant is retried and finally
/// degraded to the placeholder image.
#[derive(thiserror::Error, Debug)]
pub enum PosterFetchError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote API returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to decode poster image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Request timed out")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DataLoad(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
