use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::{
    error::{AppError, AppResult, DataLoadError},
    models::{Movie, MovieId},
};

/// Square matrix of precomputed similarity scores, row i belongs to movie i
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    pub fn new(rows: Vec<Vec<f32>>) -> Self {
        Self { rows }
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads the catalog and similarity matrix from their JSON files
pub fn load_catalog(
    catalog_path: impl AsRef<Path>,
    similarity_path: impl AsRef<Path>,
) -> Result<(Vec<Movie>, SimilarityMatrix), DataLoadError> {
    let movies: Vec<Movie> = read_json(catalog_path.as_ref())?;
    let matrix: SimilarityMatrix = read_json(similarity_path.as_ref())?;
    Ok((movies, matrix))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| DataLoadError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| DataLoadError::Parse {
        path: display,
        source,
    })
}

/// Read-only dataset store: the movie catalog plus its similarity matrix.
///
/// Built once at startup and shared behind an `Arc`; no mutation is exposed,
/// so lookups need no locking.
#[derive(Debug)]
pub struct Catalog {
    movies: Vec<Movie>,
    similarity: SimilarityMatrix,
    /// Title -> first catalog index carrying that title
    by_title: HashMap<String, usize>,
    by_id: HashMap<MovieId, usize>,
}

impl Catalog {
    /// Validates the shape of the datasets and builds the lookup indices
    pub fn new(movies: Vec<Movie>, similarity: SimilarityMatrix) -> Result<Self, DataLoadError> {
        if movies.is_empty() {
            return Err(DataLoadError::EmptyCatalog);
        }

        let expected = movies.len();
        if similarity.len() != expected {
            return Err(DataLoadError::MatrixShape {
                expected,
                rows: similarity.len(),
            });
        }

        if let Some((row, found)) = similarity
            .rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(DataLoadError::RowLength {
                row,
                expected,
                found,
            });
        }

        let mut by_title = HashMap::with_capacity(movies.len());
        let mut by_id = HashMap::with_capacity(movies.len());
        let mut duplicate_titles = 0usize;

        for (index, movie) in movies.iter().enumerate() {
            if by_title.contains_key(&movie.title) {
                duplicate_titles += 1;
            } else {
                by_title.insert(movie.title.clone(), index);
            }
            by_id.entry(movie.movie_id).or_insert(index);
        }

        if duplicate_titles > 0 {
            tracing::warn!(
                duplicates = duplicate_titles,
                "Catalog contains duplicate titles, lookups use the first occurrence"
            );
        }

        Ok(Self {
            movies,
            similarity,
            by_title,
            by_id,
        })
    }

    /// Loads and validates both datasets from disk
    pub fn load(
        catalog_path: impl AsRef<Path>,
        similarity_path: impl AsRef<Path>,
    ) -> Result<Self, DataLoadError> {
        let (movies, similarity) = load_catalog(catalog_path, similarity_path)?;
        let catalog = Self::new(movies, similarity)?;

        tracing::info!(movies = catalog.len(), "Loaded movie catalog and similarity matrix");

        Ok(catalog)
    }

    /// Resolves a title to its catalog index
    pub fn title_index(&self, title: &str) -> AppResult<usize> {
        self.by_title
            .get(title)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Unknown title: {}", title)))
    }

    pub fn movie(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    pub fn by_id(&self, movie_id: MovieId) -> Option<&Movie> {
        self.by_id.get(&movie_id).map(|&index| &self.movies[index])
    }

    pub fn similarity_row(&self, index: usize) -> Option<&[f32]> {
        self.similarity.row(index)
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
