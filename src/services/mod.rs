pub mod posters;
pub mod providers;
pub mod ranker;
pub mod recommendations;

pub use posters::{PosterResolver, RetryPolicy};
pub use ranker::rank_neighbors;
pub use recommendations::Recommender;
