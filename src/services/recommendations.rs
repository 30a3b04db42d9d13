use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Poster, Recommendation},
    services::{posters::PosterResolver, ranker::rank_neighbors},
    store::Catalog,
};

/// Composes the neighbor ranker with the poster resolver
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    resolver: Arc<PosterResolver>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, resolver: Arc<PosterResolver>) -> Self {
        Self { catalog, resolver }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &PosterResolver {
        &self.resolver
    }

    /// Returns the `k` nearest neighbors of `title` with their posters, in rank order.
    ///
    /// Posters for the neighbors are resolved in parallel. Poster failures
    /// never fail the call; only an unknown title does.
    pub async fn recommend(&self, title: &str, k: usize) -> AppResult<Vec<Recommendation>> {
        let neighbors = rank_neighbors(&self.catalog, title, k)?;

        let mut tasks = Vec::with_capacity(neighbors.len());
        for neighbor in &neighbors {
            let resolver = Arc::clone(&self.resolver);
            let movie_id = neighbor.movie.movie_id;
            tasks.push(tokio::spawn(async move {
                resolver.resolve_poster(movie_id).await
            }));
        }

        let mut recommendations = Vec::with_capacity(neighbors.len());
        for (neighbor, task) in neighbors.into_iter().zip(tasks) {
            let poster = match task.await {
                Ok(poster) => poster,
                Err(e) => {
                    tracing::error!(
                        movie_id = %neighbor.movie.movie_id,
                        error = %e,
                        "Poster task join error"
                    );
                    Poster::Unavailable
                }
            };

            recommendations.push(Recommendation {
                movie: neighbor.movie,
                score: neighbor.score,
                poster,
            });
        }

        tracing::info!(
            title = %title,
            count = recommendations.len(),
            placeholders = recommendations.iter().filter(|r| r.poster.is_placeholder()).count(),
            "Recommendations assembled"
        );

        Ok(recommendations)
    }
}
