use crate::services::Recommender;

/// Shared application state
///
/// Everything behind it is either read-only (catalog) or internally
/// synchronized (poster cache), so handlers never take a lock here.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    /// Neighbors returned when the request does not specify `k`
    pub default_k: usize,
    pub max_k: usize,
}

impl AppState {
    pub fn new(recommender: Recommender, default_k: usize, max_k: usize) -> Self {
        Self {
            recommender,
            default_k,
            max_k,
        }
    }
}
