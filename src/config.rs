use std::path::PathBuf;

use serde::Deserialize;

use crate::models::{SortOrder, TopRatedSort};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the letterboxdpy-compatible export service
    #[serde(default = "default_letterboxd_api_url")]
    pub letterboxd_api_url: String,

    /// TMDb API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDb v3 API key, used for movie search
    #[serde(default)]
    pub tmdb_api_key: String,

    /// TMDb v4 access token, used for list operations
    #[serde(default)]
    pub tmdb_v4_access_token: String,

    /// Master switch for the TMDb sync job
    #[serde(default)]
    pub tmdb_sync_enabled: bool,

    /// How many top-rated films to sync per user; doubles as the page size
    /// when fetching them
    #[serde(default = "default_sync_limit")]
    pub tmdb_sync_limit: usize,

    #[serde(default)]
    pub tmdb_sync_sort_by: TopRatedSort,

    #[serde(default = "default_sync_sort_order")]
    pub tmdb_sync_sort_order: SortOrder,

    /// Enables the cron scheduler at startup
    #[serde(default)]
    pub cron_enabled: bool,

    /// Standard 5-field crontab expression
    #[serde(default = "default_cron_schedule")]
    pub cron_schedule: String,

    /// IANA timezone name the schedule is evaluated in
    #[serde(default = "default_cron_timezone")]
    pub cron_timezone: String,

    /// Comma-separated usernames the scheduler syncs
    #[serde(default)]
    pub cron_target_users: String,

    /// Path of the on-disk username -> TMDb list id map
    #[serde(default = "default_list_store_path")]
    pub list_store_path: PathBuf,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_letterboxd_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_sync_limit() -> usize {
    100
}

fn default_sync_sort_order() -> SortOrder {
    SortOrder::Desc
}

fn default_cron_schedule() -> String {
    "0 0 * * *".to_string()
}

fn default_cron_timezone() -> String {
    "UTC".to_string()
}

fn default_list_store_path() -> PathBuf {
    PathBuf::from("data/tmdb_lists.json")
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Usernames the scheduler should sync, parsed from the comma-separated
    /// `CRON_TARGET_USERS` value
    pub fn target_users(&self) -> Vec<String> {
        self.cron_target_users
            .split(',')
            .map(str::trim)
            .filter(|user| !user.is_empty())
            .map(String::from)
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            letterboxd_api_url: default_letterboxd_api_url(),
            tmdb_api_url: default_tmdb_api_url(),
            tmdb_api_key: String::new(),
            tmdb_v4_access_token: String::new(),
            tmdb_sync_enabled: false,
            tmdb_sync_limit: default_sync_limit(),
            tmdb_sync_sort_by: TopRatedSort::default(),
            tmdb_sync_sort_order: default_sync_sort_order(),
            cron_enabled: false,
            cron_schedule: default_cron_schedule(),
            cron_timezone: default_cron_timezone(),
            cron_target_users: String::new(),
            list_store_path: default_list_store_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_users_parsing() {
        let config = Config {
            cron_target_users: "alice, bob ,,carol".to_string(),
            ..Config::default()
        };
        assert_eq!(config.target_users(), vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_target_users_empty() {
        let config = Config::default();
        assert!(config.target_users().is_empty());
    }

    #[test]
    fn test_default_sync_settings() {
        let config = Config::default();
        assert_eq!(config.tmdb_sync_limit, 100);
        assert_eq!(config.tmdb_sync_sort_by, TopRatedSort::Rating);
        assert_eq!(config.tmdb_sync_sort_order, SortOrder::Desc);
        assert!(!config.tmdb_sync_enabled);
    }
}
