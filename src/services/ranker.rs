use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::RankedMovie,
    store::Catalog,
};

/// Returns the `k` movies most similar to `title`, best first.
///
/// The query movie is excluded by its own index rather than by sorted
/// position, so a different movie tying with it on score is still returned.
/// Equal scores keep catalog order and NaN scores sort last. If fewer than
/// `k` other movies exist, all of them are returned.
pub fn rank_neighbors(catalog: &Catalog, title: &str, k: usize) -> AppResult<Vec<RankedMovie>> {
    let query = catalog.title_index(title)?;
    let row = catalog.similarity_row(query).ok_or_else(|| {
        AppError::Internal(format!("Missing similarity row {} for {}", query, title))
    })?;

    let mut scored: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(index, _)| index != query)
        .collect();

    // sort_by is stable, so ties stay in ascending index order
    scored.sort_by(|a, b| by_score_desc(a.1, b.1));

    let neighbors = scored
        .into_iter()
        .take(k)
        .filter_map(|(index, score)| {
            catalog.movie(index).map(|movie| RankedMovie {
                index,
                movie: movie.clone(),
                score,
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        title = %title,
        k,
        returned = neighbors.len(),
        "Ranked neighbors"
    );

    Ok(neighbors)
}

fn by_score_desc(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movie;
    use crate::store::SimilarityMatrix;

    fn catalog(titles: &[&str], rows: Vec<Vec<f32>>) -> Catalog {
        let movies = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Movie::new(i as u64 + 100, *title))
            .collect();
        Catalog::new(movies, SimilarityMatrix::new(rows)).unwrap()
    }

    fn abcd() -> Catalog {
        catalog(
            &["A", "B", "C", "D"],
            vec![
                vec![1.0, 0.9, 0.1, 0.5],
                vec![0.9, 1.0, 0.2, 0.3],
                vec![0.1, 0.2, 1.0, 0.4],
                vec![0.5, 0.3, 0.4, 1.0],
            ],
        )
    }

    fn titles(ranked: &[RankedMovie]) -> Vec<&str> {
        ranked.iter().map(|r| r.movie.title.as_str()).collect()
    }

    #[test]
    fn test_rank_neighbors_orders_by_score() {
        let ranked = rank_neighbors(&abcd(), "A", 3).unwrap();

        assert_eq!(titles(&ranked), vec!["B", "D", "C"]);
        assert_eq!(
            ranked.iter().map(|r| r.score).collect::<Vec<_>>(),
            vec![0.9, 0.5, 0.1]
        );
        assert_eq!(ranked[0].index, 1);
        assert_eq!(ranked[0].movie.movie_id.0, 101);
    }

    #[test]
    fn test_rank_neighbors_truncates_to_k() {
        let ranked = rank_neighbors(&abcd(), "C", 2).unwrap();
        assert_eq!(titles(&ranked), vec!["D", "B"]);
    }

    #[test]
    fn test_rank_neighbors_never_returns_query() {
        let catalog = abcd();
        for title in ["A", "B", "C", "D"] {
            let ranked = rank_neighbors(&catalog, title, 3).unwrap();
            assert_eq!(ranked.len(), 3);
            assert!(ranked.iter().all(|r| r.movie.title != title));
            assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_rank_neighbors_excludes_self_by_identity() {
        // A ties with B's self-score and sorts ahead of it
        let catalog = catalog(
            &["A", "B", "C"],
            vec![
                vec![1.0, 1.0, 0.3],
                vec![1.0, 1.0, 0.2],
                vec![0.3, 0.2, 1.0],
            ],
        );

        let ranked = rank_neighbors(&catalog, "B", 2).unwrap();
        assert_eq!(titles(&ranked), vec!["A", "C"]);
    }

    #[test]
    fn test_rank_neighbors_ties_use_catalog_order() {
        let catalog = catalog(
            &["A", "B", "C", "D"],
            vec![
                vec![1.0, 0.4, 0.4, 0.4],
                vec![0.4, 1.0, 0.0, 0.0],
                vec![0.4, 0.0, 1.0, 0.0],
                vec![0.4, 0.0, 0.0, 1.0],
            ],
        );

        let ranked = rank_neighbors(&catalog, "A", 3).unwrap();
        assert_eq!(titles(&ranked), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_rank_neighbors_nan_sorts_last() {
        let catalog = catalog(
            &["A", "B", "C"],
            vec![
                vec![1.0, f32::NAN, 0.1],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
        );

        let ranked = rank_neighbors(&catalog, "A", 2).unwrap();
        assert_eq!(titles(&ranked), vec!["C", "B"]);
    }

    #[test]
    fn test_rank_neighbors_k_larger_than_catalog() {
        let ranked = rank_neighbors(&abcd(), "A", 10).unwrap();
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_rank_neighbors_k_zero() {
        assert!(rank_neighbors(&abcd(), "A", 0).unwrap().is_empty());
    }

    #[test]
    fn test_rank_neighbors_unknown_title() {
        let err = rank_neighbors(&abcd(), "Z", 3).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
