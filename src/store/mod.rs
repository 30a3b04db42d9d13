pub mod catalog;
pub mod poster_cache;

pub use catalog::{load_catalog, Catalog, SimilarityMatrix};
pub use poster_cache::PosterCache;
