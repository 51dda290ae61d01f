use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{
        Film, SortOrder, TopRatedResponse, TopRatedSort, UserProfileResponse, UserStats,
        WatchlistFilm, WatchlistResponse, WatchlistSort,
    },
    pagination::{paginate, PageQuery},
    services::{films, providers::FilmSource},
};

/// Query parameters for the watchlist endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct WatchlistQuery {
    pub limit: Option<usize>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub sort_by: WatchlistSort,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Default for WatchlistQuery {
    fn default() -> Self {
        Self {
            limit: None,
            page: default_page(),
            page_size: default_page_size(),
            sort_by: WatchlistSort::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Query parameters for the top-rated endpoint; ordering defaults to the
/// highest rating first
#[derive(Debug, Clone, Deserialize)]
pub struct TopRatedQuery {
    pub limit: Option<usize>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub sort_by: TopRatedSort,
    #[serde(default = "default_top_rated_order")]
    pub sort_order: SortOrder,
}

impl Default for TopRatedQuery {
    fn default() -> Self {
        Self {
            limit: None,
            page: default_page(),
            page_size: default_page_size(),
            sort_by: TopRatedSort::default(),
            sort_order: default_top_rated_order(),
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> usize {
    20
}

fn default_top_rated_order() -> SortOrder {
    SortOrder::Desc
}

/// Profile summary with zero-defaulted stats
pub async fn user_profile(
    source: &dyn FilmSource,
    username: &str,
) -> AppResult<UserProfileResponse> {
    let profile = source
        .fetch_profile(username)
        .await
        .map_err(|e| AppError::source_fetch(username, e))?;

    Ok(UserProfileResponse {
        username: username.to_string(),
        display_name: profile
            .display_name
            .unwrap_or_else(|| username.to_string()),
        bio: profile.bio,
        stats: UserStats {
            films_watched: profile.stats.films,
            // not exposed by the source export
            lists: 0,
            following: profile.stats.following,
            followers: profile.stats.followers,
        },
        url: profile
            .url
            .unwrap_or_else(|| format!("https://letterboxd.com/{username}/")),
    })
}

/// The user's watchlist, normalized, sorted, and paged
pub async fn user_watchlist(
    source: &dyn FilmSource,
    username: &str,
    query: &WatchlistQuery,
) -> AppResult<WatchlistResponse> {
    let watchlist = source
        .fetch_watchlist(username)
        .await
        .map_err(|e| AppError::source_fetch(username, e))?;

    let films: Vec<WatchlistFilm> = watchlist
        .data
        .iter()
        .map(|(slug, entry)| films::normalize_watchlist_film(slug, entry))
        .collect();

    let sort_by = query.sort_by;
    let result = paginate(
        films,
        &page_query(query.limit, query.page, query.page_size),
        Some(move |a: &WatchlistFilm, b: &WatchlistFilm| sort_by.compare(a, b)),
        query.sort_order.is_descending(),
    );

    tracing::info!(
        username = %username,
        total = result.total_count,
        page = result.page,
        returned = result.items_count,
        "Watchlist assembled"
    );

    Ok(WatchlistResponse {
        username: username.to_string(),
        total_watchlist: result.total_count,
        films_count: result.items_count,
        page: result.page,
        page_size: result.page_size,
        total_pages: result.total_pages,
        has_next: result.has_next,
        has_previous: result.has_previous,
        films: result.items,
    })
}

/// The user's rated-and-liked films, sorted, and paged
pub async fn top_rated_films(
    source: &dyn FilmSource,
    username: &str,
    query: &TopRatedQuery,
) -> AppResult<TopRatedResponse> {
    let all_films = source
        .fetch_films(username)
        .await
        .map_err(|e| AppError::source_fetch(username, e))?;

    let films = films::rated_and_liked_films(&all_films);

    let sort_by = query.sort_by;
    let result = paginate(
        films,
        &page_query(query.limit, query.page, query.page_size),
        Some(move |a: &Film, b: &Film| sort_by.compare(a, b)),
        query.sort_order.is_descending(),
    );

    tracing::info!(
        username = %username,
        total = result.total_count,
        page = result.page,
        returned = result.items_count,
        "Top rated films assembled"
    );

    Ok(TopRatedResponse {
        username: username.to_string(),
        total_rated: result.total_count,
        films_count: result.items_count,
        page: result.page,
        page_size: result.page_size,
        total_pages: result.total_pages,
        has_next: result.has_next,
        has_previous: result.has_previous,
        films: result.items,
    })
}

fn page_query(limit: Option<usize>, page: i64, page_size: usize) -> PageQuery {
    PageQuery {
        limit,
        page,
        page_size,
    }
}
