use anyhow::Context;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    models::{SourceProfile, UserFilms, UserWatchlist},
    services::providers::FilmSource,
};

/// Client for a letterboxdpy-compatible JSON export service.
///
/// The export mirrors what the letterboxdpy scraper produces: profile data
/// under `/user/{username}`, the rated-films map under
/// `/user/{username}/films` and the watchlist under
/// `/user/{username}/watchlist`.
#[derive(Clone)]
pub struct LetterboxdProvider {
    http_client: HttpClient,
    base_url: String,
}

impl LetterboxdProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> anyhow::Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("{what} request failed"))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Letterboxd export returned status {} for {what}",
                response.status()
            );
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("invalid {what} payload"))
    }
}

#[async_trait::async_trait]
impl FilmSource for LetterboxdProvider {
    async fn fetch_profile(&self, username: &str) -> anyhow::Result<SourceProfile> {
        let profile = self
            .fetch_json(&format!("/user/{username}"), "profile")
            .await?;
        tracing::debug!(username = %username, "Fetched profile");
        Ok(profile)
    }

    async fn fetch_films(&self, username: &str) -> anyhow::Result<UserFilms> {
        let films: UserFilms = self
            .fetch_json(&format!("/user/{username}/films"), "films")
            .await?;
        tracing::info!(
            username = %username,
            films = films.movies.len(),
            "Fetched rated films"
        );
        Ok(films)
    }

    async fn fetch_watchlist(&self, username: &str) -> anyhow::Result<UserWatchlist> {
        let watchlist: UserWatchlist = self
            .fetch_json(&format!("/user/{username}/watchlist"), "watchlist")
            .await?;
        tracing::info!(
            username = %username,
            films = watchlist.data.len(),
            "Fetched watchlist"
        );
        Ok(watchlist)
    }
}
