use crate::{
    error::{AppError, AppResult},
    services::{
        providers::{Catalog, TmdbCatalog},
        sync::{update_list_with_films, SyncReport},
        users::{self, TopRatedQuery},
    },
    state::AppState,
};

/// How many unmatched titles a result log lists before truncating
const UNMATCHED_LOG_SAMPLE: usize = 5;

/// Syncs each user's top-rated films to their own TMDb list, sequentially.
///
/// Meant to run detached (spawned by the HTTP trigger or the scheduler); it
/// never returns an error, it only logs. One user's failure does not stop the
/// rest.
pub async fn run_sync_job(state: AppState, usernames: Vec<String>) {
    let config = &state.config;

    if !config.tmdb_sync_enabled {
        tracing::info!("TMDb sync is disabled (TMDB_SYNC_ENABLED=false)");
        return;
    }
    if config.tmdb_api_key.is_empty() {
        tracing::error!("TMDb API key not configured (TMDB_API_KEY)");
        return;
    }
    if config.tmdb_v4_access_token.is_empty() {
        tracing::error!("TMDb v4 access token not configured (TMDB_V4_ACCESS_TOKEN)");
        return;
    }
    if usernames.is_empty() {
        tracing::warn!("No usernames provided for TMDb sync");
        return;
    }

    tracing::info!(users = usernames.len(), "Starting TMDb sync job");

    let catalog = TmdbCatalog::new(
        config.tmdb_api_url.clone(),
        config.tmdb_api_key.clone(),
        config.tmdb_v4_access_token.clone(),
    );

    for username in &usernames {
        if let Err(error) = sync_user(&state, &catalog, username).await {
            tracing::error!(username = %username, error = %error, "Sync failed for user");
        }
    }

    tracing::info!("Completed TMDb sync job");
}

/// Syncs a single user: resolve their list, fetch their top films, replace
/// the list contents.
async fn sync_user(state: &AppState, catalog: &dyn Catalog, username: &str) -> AppResult<()> {
    tracing::info!(username = %username, "Processing user");

    let list_id = resolve_list_id(state, catalog, username).await?;

    let query = TopRatedQuery {
        limit: Some(state.config.tmdb_sync_limit),
        page: 1,
        // the limit doubles as the page size so page 1 holds everything
        page_size: state.config.tmdb_sync_limit.max(1),
        sort_by: state.config.tmdb_sync_sort_by,
        sort_order: state.config.tmdb_sync_sort_order,
    };
    let top_rated = users::top_rated_films(state.film_source.as_ref(), username, &query).await?;

    if top_rated.films.is_empty() {
        tracing::warn!(username = %username, "No top-rated films found");
        return Ok(());
    }
    tracing::info!(
        username = %username,
        films = top_rated.films.len(),
        "Fetched top-rated films"
    );

    let report = update_list_with_films(catalog, list_id, &top_rated.films, true).await;
    if report.success {
        log_sync_report(username, list_id, &report);
    } else {
        tracing::error!(username = %username, list_id, "Failed to sync films to TMDb");
    }

    Ok(())
}

/// The list id for a user: stored id first, otherwise get-or-create on the
/// catalog and persist the result.
async fn resolve_list_id(
    state: &AppState,
    catalog: &dyn Catalog,
    username: &str,
) -> AppResult<u64> {
    let stored = match state.list_store.get(username).await {
        Ok(stored) => stored,
        Err(error) => {
            tracing::warn!(username = %username, error = %error, "List store read failed");
            None
        }
    };
    if let Some(list_id) = stored {
        tracing::info!(username = %username, list_id, "Using stored TMDb list");
        return Ok(list_id);
    }

    let list_name = format!("{username}'s Top Rated Movies");
    let description =
        format!("Top-rated and liked movies from Letterboxd user {username}, automatically synced");

    let list_id = catalog
        .get_or_create_list(&list_name, &description)
        .await
        .map_err(|e| AppError::catalog("get_or_create_list", e))?
        .ok_or_else(|| AppError::ListNotFound(username.to_string()))?;

    if let Err(error) = state.list_store.set(username, list_id).await {
        tracing::warn!(username = %username, list_id, error = %error, "List store write failed");
    }

    Ok(list_id)
}

fn log_sync_report(username: &str, list_id: u64, report: &SyncReport) {
    tracing::info!(
        username = %username,
        list_id,
        total_films = report.total_films,
        matched = report.matched,
        added = report.added,
        not_matched = report.not_matched.len(),
        "Synced list"
    );

    if !report.not_matched.is_empty() {
        let sample = report
            .not_matched
            .iter()
            .take(UNMATCHED_LOG_SAMPLE)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(films = %sample, "Films not found on TMDb");
        if report.not_matched.len() > UNMATCHED_LOG_SAMPLE {
            tracing::info!(
                more = report.not_matched.len() - UNMATCHED_LOG_SAMPLE,
                "Further unmatched films omitted from log"
            );
        }
    }
}
