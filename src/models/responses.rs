use serde::Serialize;

use crate::models::{Film, WatchlistFilm};

/// Profile counters returned to the client.
///
/// `lists` is always zero for now; the source export does not carry a list
/// count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub films_watched: u64,
    pub lists: u64,
    pub following: u64,
    pub followers: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub stats: UserStats,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchlistResponse {
    pub username: String,
    /// Watchlist size before limiting and paging
    pub total_watchlist: usize,
    /// Number of films on this page
    pub films_count: usize,
    pub page: i64,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub films: Vec<WatchlistFilm>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopRatedResponse {
    pub username: String,
    /// Rated-and-liked film count before limiting and paging
    pub total_rated: usize,
    /// Number of films on this page
    pub films_count: usize,
    pub page: i64,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub films: Vec<Film>,
}
