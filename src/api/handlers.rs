use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Movie, MovieId, RecommendationItem, RecommendationResponse},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub k: Option<usize>,
}

/// Path the poster of `movie_id` is served from
pub fn poster_url(movie_id: MovieId) -> String {
    format!("/api/v1/posters/{}", movie_id)
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// All selectable movies in catalog order
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.recommender.catalog().movies().to_vec())
}

/// Top-k similar movies for a title, each with its poster link
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let k = params.k.unwrap_or(state.default_k);
    if k == 0 || k > state.max_k {
        return Err(AppError::InvalidInput(format!(
            "k must be between 1 and {}",
            state.max_k
        )));
    }

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        k,
        "Processing recommendation request"
    );

    let recommendations = state.recommender.recommend(&params.title, k).await?;

    let items = recommendations
        .into_iter()
        .enumerate()
        .map(|(i, rec)| RecommendationItem {
            rank: i + 1,
            movie_id: rec.movie.movie_id,
            poster_url: poster_url(rec.movie.movie_id),
            placeholder: rec.poster.is_placeholder(),
            title: rec.movie.title,
            score: rec.score,
        })
        .collect();

    Ok(Json(RecommendationResponse {
        title: params.title,
        recommendations: items,
    }))
}

/// PNG rendering of a movie's poster, or the placeholder
pub async fn poster(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
) -> AppResult<Response> {
    let movie_id = MovieId(movie_id);
    if state.recommender.catalog().by_id(movie_id).is_none() {
        return Err(AppError::NotFound(format!("Unknown movie id: {}", movie_id)));
    }

    let poster = state.recommender.resolver().resolve_poster(movie_id).await;
    let png = poster
        .to_png()
        .map_err(|e| AppError::Internal(format!("Failed to encode poster: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
