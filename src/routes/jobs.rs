use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    jobs::sync::run_sync_job,
    routes::users::validate_username,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SyncTmdbRequest {
    pub usernames: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SyncTmdbResponse {
    pub message: String,
    pub usernames: Vec<String>,
    pub job_started: bool,
}

/// Handler that kicks off a detached TMDb sync for the given users.
///
/// The response only acknowledges the start; results land in the logs.
pub async fn sync_tmdb(
    State(state): State<AppState>,
    Json(request): Json<SyncTmdbRequest>,
) -> AppResult<Json<SyncTmdbResponse>> {
    if request.usernames.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one username is required".to_string(),
        ));
    }
    for username in &request.usernames {
        validate_username(username)?;
    }

    if !state.config.tmdb_sync_enabled {
        return Err(AppError::SyncUnavailable(
            "TMDb sync is disabled. Set TMDB_SYNC_ENABLED=true in .env".to_string(),
        ));
    }
    if state.config.tmdb_api_key.is_empty() {
        return Err(AppError::SyncUnavailable(
            "TMDb API key not configured. Set TMDB_API_KEY in .env".to_string(),
        ));
    }
    if state.config.tmdb_v4_access_token.is_empty() {
        return Err(AppError::SyncUnavailable(
            "TMDb v4 access token not configured. Set TMDB_V4_ACCESS_TOKEN in .env".to_string(),
        ));
    }

    let usernames = request.usernames;
    tracing::info!(users = usernames.len(), "TMDb sync job queued");
    tokio::spawn(run_sync_job(state, usernames.clone()));

    Ok(Json(SyncTmdbResponse {
        message: format!(
            "TMDb sync job started for {} user(s). Each user will get their own list.",
            usernames.len()
        ),
        usernames,
        job_started: true,
    }))
}
