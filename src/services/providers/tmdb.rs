use std::time::Duration;

use anyhow::Context;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{models::CatalogMovie, services::providers::Catalog};

/// Courtesy pause before every outbound TMDb call
const RATE_LIMIT_DELAY: Duration = Duration::from_millis(250);

/// TMDb adapter: v3 movie search plus v4 list operations.
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_url: String,
    api_key: String,
    v4_access_token: String,
    /// Account object id decoded from the v4 token, used to enumerate the
    /// account's existing lists. None when the token is not a decodable JWT.
    account_object_id: Option<String>,
}

impl TmdbCatalog {
    pub fn new(api_url: String, api_key: String, v4_access_token: String) -> Self {
        let account_object_id = decode_account_object_id(&v4_access_token);
        if account_object_id.is_none() {
            tracing::warn!(
                "Could not read an account id from the TMDb v4 token; \
                 existing lists will not be discovered"
            );
        }

        Self {
            http_client: HttpClient::new(),
            api_url,
            api_key,
            v4_access_token,
            account_object_id,
        }
    }

    async fn pace(&self) {
        tokio::time::sleep(RATE_LIMIT_DELAY).await;
    }

    /// Walks the account's list pages looking for an exact name match
    async fn find_list_by_name(&self, name: &str) -> anyhow::Result<Option<u64>> {
        let Some(account_id) = &self.account_object_id else {
            return Ok(None);
        };

        let url = format!("{}/4/account/{}/lists", self.api_url, account_id);
        let mut page = 1u32;
        loop {
            self.pace().await;
            let response = self
                .http_client
                .get(&url)
                .bearer_auth(&self.v4_access_token)
                .query(&[("page", page.to_string())])
                .send()
                .await
                .context("account lists request failed")?;
            let response = ensure_success(response, "account lists").await?;
            let lists: ListsPage = response
                .json()
                .await
                .context("invalid account lists payload")?;

            if let Some(found) = lists.results.iter().find(|list| list.name == name) {
                return Ok(Some(found.id));
            }
            if page >= lists.total_pages {
                return Ok(None);
            }
            page += 1;
        }
    }

    async fn create_list(&self, name: &str, description: &str) -> anyhow::Result<Option<u64>> {
        self.pace().await;
        let url = format!("{}/4/list", self.api_url);
        let body = CreateListBody {
            name,
            description,
            iso_639_1: "en",
            iso_3166_1: "US",
            public: true,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.v4_access_token)
            .json(&body)
            .send()
            .await
            .context("list create request failed")?;
        let response = ensure_success(response, "list create").await?;
        let created: CreatedList = response
            .json()
            .await
            .context("invalid list create payload")?;

        Ok(created.id)
    }
}

#[async_trait::async_trait]
impl Catalog for TmdbCatalog {
    async fn search_movie(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> anyhow::Result<Option<CatalogMovie>> {
        self.pace().await;
        let url = format!("{}/3/search/movie", self.api_url);
        let mut query = vec![
            ("api_key", self.api_key.clone()),
            ("query", title.to_string()),
            ("include_adult", "false".to_string()),
        ];
        if let Some(year) = year {
            query.push(("primary_release_year", year.to_string()));
        }

        let response = self
            .http_client
            .get(&url)
            .query(&query)
            .send()
            .await
            .context("movie search request failed")?;
        let response = ensure_success(response, "movie search").await?;
        let search: SearchResponse = response
            .json()
            .await
            .context("invalid movie search payload")?;

        match search.results.into_iter().next() {
            Some(result) => {
                let movie = CatalogMovie {
                    id: result.id,
                    title: result.title,
                    year: release_year(result.release_date.as_deref()),
                };
                tracing::info!(
                    query = %title,
                    tmdb_id = movie.id,
                    matched = %movie.title,
                    "TMDb match found"
                );
                Ok(Some(movie))
            }
            None => {
                tracing::warn!(query = %title, year = ?year, "No TMDb match found");
                Ok(None)
            }
        }
    }

    async fn get_or_create_list(
        &self,
        name: &str,
        description: &str,
    ) -> anyhow::Result<Option<u64>> {
        if self.v4_access_token.is_empty() {
            anyhow::bail!("TMDb v4 access token is required for list operations");
        }

        match self.find_list_by_name(name).await {
            Ok(Some(id)) => {
                tracing::info!(list_id = id, name = %name, "Found existing TMDb list");
                return Ok(Some(id));
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    "Could not enumerate TMDb lists, creating a new one"
                );
            }
        }

        let created = self.create_list(name, description).await?;
        match created {
            Some(id) => tracing::info!(list_id = id, name = %name, "Created TMDb list"),
            None => tracing::error!(name = %name, "TMDb list create returned no id"),
        }
        Ok(created)
    }

    async fn clear_list(&self, list_id: u64) -> anyhow::Result<bool> {
        self.pace().await;
        // v4 exposes clearing as a GET, oddly
        let url = format!("{}/4/list/{}/clear", self.api_url, list_id);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.v4_access_token)
            .send()
            .await
            .context("list clear request failed")?;

        let cleared = response.status().is_success();
        if cleared {
            tracing::info!(list_id, "Cleared TMDb list");
        } else {
            tracing::error!(list_id, status = %response.status(), "TMDb list clear refused");
        }
        Ok(cleared)
    }

    async fn add_movies(&self, list_id: u64, movie_ids: &[u64]) -> anyhow::Result<bool> {
        if movie_ids.is_empty() {
            tracing::warn!(list_id, "No movie ids to add");
            return Ok(false);
        }

        self.pace().await;
        let url = format!("{}/4/list/{}/items", self.api_url, list_id);
        let items: Vec<ListItem> = movie_ids
            .iter()
            .map(|&media_id| ListItem {
                media_type: "movie",
                media_id,
            })
            .collect();

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.v4_access_token)
            .json(&AddItemsBody { items })
            .send()
            .await
            .context("list add request failed")?;

        let added = response.status().is_success();
        if added {
            tracing::info!(list_id, movies = movie_ids.len(), "Added movies to TMDb list");
        } else {
            tracing::error!(list_id, status = %response.status(), "TMDb list add refused");
        }
        Ok(added)
    }
}

async fn ensure_success(
    response: reqwest::Response,
    operation: &str,
) -> anyhow::Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("TMDb {operation} returned status {status}: {body}")
}

/// Year prefix of a `YYYY-MM-DD` release date
fn release_year(release_date: Option<&str>) -> Option<i32> {
    release_date?.split('-').next()?.parse().ok()
}

/// TMDb v4 access tokens are JWTs whose `sub` claim is the account object id
/// the v4 list endpoints are scoped to.
fn decode_account_object_id(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims["sub"].as_str().map(String::from)
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    id: u64,
    title: String,
    #[serde(default)]
    release_date: Option<String>,
}

#[derive(Deserialize)]
struct ListsPage {
    #[serde(default)]
    results: Vec<AccountList>,
    #[serde(default = "default_total_pages")]
    total_pages: u32,
}

fn default_total_pages() -> u32 {
    1
}

#[derive(Deserialize)]
struct AccountList {
    id: u64,
    name: String,
}

#[derive(Serialize)]
struct CreateListBody<'a> {
    name: &'a str,
    description: &'a str,
    iso_639_1: &'a str,
    iso_3166_1: &'a str,
    public: bool,
}

#[derive(Deserialize)]
struct CreatedList {
    #[serde(default)]
    id: Option<u64>,
}

#[derive(Serialize)]
struct AddItemsBody {
    items: Vec<ListItem>,
}

#[derive(Serialize)]
struct ListItem {
    media_type: &'static str,
    media_id: u64,
}
