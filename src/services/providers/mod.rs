//! External data providers.
//!
//! Two collaborators live behind traits here: the film-tracking site the
//! service reads user data from, and the movie catalog it writes lists to.
//! Both are plain reqwest JSON clients in production and mocked in tests.

use crate::models::{CatalogMovie, SourceProfile, UserFilms, UserWatchlist};

pub mod letterboxd;
pub mod tmdb;

pub use letterboxd::LetterboxdProvider;
pub use tmdb::TmdbCatalog;

/// Read-only access to a user's data on the film-tracking site.
///
/// Methods return plain `anyhow` errors; the orchestrator layer folds every
/// failure into a single fetch-failed error kind carrying the username.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FilmSource: Send + Sync {
    /// Profile summary for a user
    async fn fetch_profile(&self, username: &str) -> anyhow::Result<SourceProfile>;

    /// Every film the user has logged, keyed by slug in source order
    async fn fetch_films(&self, username: &str) -> anyhow::Result<UserFilms>;

    /// The user's watchlist, keyed by slug in source order
    async fn fetch_watchlist(&self, username: &str) -> anyhow::Result<UserWatchlist>;
}

/// A movie catalog holding user-owned lists (TMDb).
///
/// Operations degrade instead of failing where the sync pipeline expects it:
/// an unknown title is `Ok(None)` and a refused list update is `Ok(false)`.
/// `Err` is reserved for transport or protocol failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Best match for a title/year pair, or None when nothing close exists
    async fn search_movie(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> anyhow::Result<Option<CatalogMovie>>;

    /// Finds a list with this exact name or creates it. None when creation
    /// succeeded but came back without an id.
    async fn get_or_create_list(
        &self,
        name: &str,
        description: &str,
    ) -> anyhow::Result<Option<u64>>;

    /// Empties the list; false when the catalog refused
    async fn clear_list(&self, list_id: u64) -> anyhow::Result<bool>;

    /// Adds movies to the list in one bulk call; false when refused
    async fn add_movies(&self, list_id: u64, movie_ids: &[u64]) -> anyhow::Result<bool>;
}
