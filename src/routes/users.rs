use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{TopRatedResponse, UserProfileResponse, WatchlistResponse},
    services::users::{self, TopRatedQuery, WatchlistQuery},
    state::AppState,
};

pub(crate) const MAX_USERNAME_LENGTH: usize = 100;
const MAX_LIMIT: usize = 1000;
const MAX_PAGE_SIZE: usize = 100;

/// Handler for user profile lookup
pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserProfileResponse>> {
    validate_username(&username)?;
    let profile = users::user_profile(state.film_source.as_ref(), &username).await?;
    Ok(Json(profile))
}

/// Handler for the paginated watchlist
pub async fn watchlist(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<WatchlistQuery>,
) -> AppResult<Json<WatchlistResponse>> {
    validate_username(&username)?;
    validate_paging(query.limit, query.page, query.page_size)?;
    let watchlist = users::user_watchlist(state.film_source.as_ref(), &username, &query).await?;
    Ok(Json(watchlist))
}

/// Handler for the paginated top-rated films
pub async fn top_rated(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<TopRatedQuery>,
) -> AppResult<Json<TopRatedResponse>> {
    validate_username(&username)?;
    validate_paging(query.limit, query.page, query.page_size)?;
    let top_rated = users::top_rated_films(state.film_source.as_ref(), &username, &query).await?;
    Ok(Json(top_rated))
}

pub(crate) fn validate_username(username: &str) -> AppResult<()> {
    if username.is_empty() || username.len() > MAX_USERNAME_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "Username must be 1-{MAX_USERNAME_LENGTH} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::InvalidInput(format!(
            "Invalid username format: {username}"
        )));
    }
    Ok(())
}

fn validate_paging(limit: Option<usize>, page: i64, page_size: usize) -> AppResult<()> {
    if let Some(limit) = limit {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
    }
    if page < 1 {
        return Err(AppError::InvalidInput(
            "page must be at least 1".to_string(),
        ));
    }
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(AppError::InvalidInput(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}
