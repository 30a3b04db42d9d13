use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

use crate::models::{MovieId, Poster};

type Slot = Arc<OnceCell<Poster>>;

/// Process-lifetime memo of resolved posters keyed by movie id.
///
/// Each id owns a `OnceCell`: the first caller runs the resolution, concurrent
/// callers for the same id await that same cell, so at most one fetch
/// sequence per id is ever in flight. Entries are never evicted.
#[derive(Clone, Default)]
pub struct PosterCache {
    slots: Arc<Mutex<HashMap<MovieId, Slot>>>,
}

impl PosterCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, movie_id: MovieId) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(movie_id).or_default())
    }

    /// Returns the cached poster, if resolution for this id has completed
    pub fn get(&self, movie_id: MovieId) -> Option<Poster> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(&movie_id).and_then(|slot| slot.get().cloned())
    }

    /// Returns the cached poster or runs `resolve` to produce it.
    ///
    /// `resolve` runs at most once per id for the lifetime of the cache, unless
    /// a running resolution is cancelled, in which case the next waiter retries.
    pub async fn get_or_resolve<F, Fut>(&self, movie_id: MovieId, resolve: F) -> Poster
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Poster>,
    {
        let slot = self.slot(movie_id);
        let poster = slot.get_or_init(resolve).await.clone();
        poster
    }

    /// Number of ids with a completed resolution
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_cache_miss_then_hit() {
        let cache = PosterCache::new();
        let calls = AtomicUsize::new(0);

        assert!(cache.get(MovieId(7)).is_none());

        for _ in 0..3 {
            let poster = cache
                .get_or_resolve(MovieId(7), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Poster::Unavailable
                })
                .await;
            assert!(poster.is_placeholder());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.get(MovieId(7)).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_ids_resolve_independently() {
        let cache = PosterCache::new();

        cache
            .get_or_resolve(MovieId(1), || async { Poster::Unavailable })
            .await;
        cache
            .get_or_resolve(MovieId(2), || async { Poster::Unavailable })
            .await;

        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_single_flight() {
        let cache = PosterCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..5)
            .map(|_| {
                let cache = cache.clone();
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_resolve(MovieId(42), || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            Poster::Unavailable
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap().is_placeholder());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = PosterCache::new();
        let other = cache.clone();

        cache
            .get_or_resolve(MovieId(3), || async { Poster::Unavailable })
            .await;

        assert!(other.get(MovieId(3)).is_some());
        assert!(!other.is_empty());
    }
}
