//! Similar-movie recommendations with cached poster lookups.
//!
//! A title is resolved against a precomputed similarity matrix to its nearest
//! neighbors, and each neighbor's poster is fetched from TMDB at most once per
//! process, with retries and a placeholder fallback.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
