use std::sync::Arc;

use crate::{
    config::Config,
    jobs::ListStore,
    services::providers::{FilmSource, LetterboxdProvider},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub film_source: Arc<dyn FilmSource>,
    pub list_store: Arc<ListStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state backed by the configured Letterboxd export service
    pub fn new(config: Config) -> Self {
        let film_source: Arc<dyn FilmSource> =
            Arc::new(LetterboxdProvider::new(config.letterboxd_api_url.clone()));
        Self::with_film_source(config, film_source)
    }

    /// Creates state around a caller-supplied film source
    pub fn with_film_source(config: Config, film_source: Arc<dyn FilmSource>) -> Self {
        let list_store = Arc::new(ListStore::new(config.list_store_path.clone()));
        Self {
            film_source,
            list_store,
            config: Arc::new(config),
        }
    }
}
